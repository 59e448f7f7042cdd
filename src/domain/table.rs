// Table view domain models
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableRow {
    /// One cell spanning every column.
    Placeholder { message: String, colspan: usize },
    Cells { cells: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(columns: Vec<&'static str>, rows: Vec<TableRow>) -> Self {
        Self { columns, rows }
    }

    pub fn placeholder(columns: Vec<&'static str>, message: &str) -> Self {
        let colspan = columns.len();
        Self {
            columns,
            rows: vec![TableRow::Placeholder {
                message: message.to_string(),
                colspan,
            }],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [TableRow::Placeholder { .. }])
    }
}
