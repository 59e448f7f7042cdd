// Location and sensor catalog domain models
use super::reading::{LocationInfo, SensorInfo};
use serde::Serialize;

/// A dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn for_location(location: &LocationInfo) -> Self {
        Self {
            value: location.name.clone(),
            label: format!("{} ({})", location.name, location.sensor_count),
        }
    }

    pub fn for_sensor(sensor: &SensorInfo) -> Self {
        Self {
            value: sensor.sensor_id.clone(),
            label: sensor.sensor_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorEntry {
    pub label: String,
    pub sensor: SensorInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorGroup {
    pub sensor_type: String,
    pub header: String,
    pub entries: Vec<SensorEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SensorCatalog {
    pub options: Vec<SelectOption>,
    pub groups: Vec<SensorGroup>,
}

impl SensorCatalog {
    /// Builds the dropdown and the by-type list. Groups keep first-seen order.
    pub fn from_sensors(sensors: Vec<SensorInfo>) -> Self {
        let options = sensors.iter().map(SelectOption::for_sensor).collect();

        let mut groups: Vec<SensorGroup> = Vec::new();
        for sensor in sensors {
            let entry = SensorEntry {
                label: format!("{} ({})", sensor.sensor_id, sensor.location),
                sensor,
            };
            match groups
                .iter_mut()
                .find(|g| g.sensor_type == entry.sensor.sensor_type)
            {
                Some(group) => group.entries.push(entry),
                None => groups.push(SensorGroup {
                    sensor_type: entry.sensor.sensor_type.clone(),
                    header: format!("{} Sensors", capitalize(&entry.sensor.sensor_type)),
                    entries: vec![entry],
                }),
            }
        }

        Self { options, groups }
    }

    pub fn find(&self, sensor_id: &str) -> Option<&SensorInfo> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .map(|e| &e.sensor)
            .find(|s| s.sensor_id == sensor_id)
    }
}

/// Upper-cases the first character: "temperature" -> "Temperature".
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(id: &str, kind: &str, location: &str) -> SensorInfo {
        SensorInfo {
            sensor_id: id.to_string(),
            sensor_type: kind.to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("temperature"), "Temperature");
        assert_eq!(capitalize("électricité"), "Électricité");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_location_option_label() {
        let option = SelectOption::for_location(&LocationInfo {
            name: "warehouse".to_string(),
            sensor_count: 4,
        });
        assert_eq!(option.value, "warehouse");
        assert_eq!(option.label, "warehouse (4)");
    }

    #[test]
    fn test_catalog_groups_by_type_in_first_seen_order() {
        let catalog = SensorCatalog::from_sensors(vec![
            sensor("hum-1", "humidity", "lab"),
            sensor("temp-1", "temperature", "lab"),
            sensor("hum-2", "humidity", "office"),
        ]);

        let ids: Vec<_> = catalog.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(ids, ["hum-1", "temp-1", "hum-2"]);

        assert_eq!(catalog.groups.len(), 2);
        assert_eq!(catalog.groups[0].header, "Humidity Sensors");
        assert_eq!(catalog.groups[0].entries.len(), 2);
        assert_eq!(catalog.groups[0].entries[1].label, "hum-2 (office)");
        assert_eq!(catalog.groups[1].header, "Temperature Sensors");

        assert_eq!(catalog.find("temp-1").map(|s| s.location.as_str()), Some("lab"));
        assert!(catalog.find("missing").is_none());
    }
}
