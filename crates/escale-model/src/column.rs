use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type the backend analyzer declared for a column.
///
/// `Any` doubles as the catch-all for type strings this build does not know;
/// a column whose payload carried *no* type at all is `None` on
/// [`ColumnDef::data_type`], which is a different situation (the name-based
/// fallback applies there, not here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Number,
    TextOnly,
    Date,
    Boolean,
    Text,
    #[serde(other)]
    Any,
}

impl DataType {
    /// Parse the backend's type string. Unknown strings map to `Any`,
    /// empty strings to nothing.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed {
            "number" => Self::Number,
            "text_only" => Self::TextOnly,
            "date" => Self::Date,
            "boolean" => Self::Boolean,
            "text" => Self::Text,
            _ => Self::Any,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::TextOnly => "text_only",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input widget the backend suggests for a column.
///
/// The names are the HTML input types the original web client rendered,
/// which is why `DatetimeLocal` keeps its hyphen on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Textarea,
    Number,
    SelectYesno,
    #[serde(rename = "datetime-local")]
    DatetimeLocal,
    #[serde(other)]
    Text,
}

impl FieldType {
    /// Parse the backend's widget string. Unknown strings fall back to `Text`.
    /// Both spellings of the yes/no select are live on the wire, so both are
    /// accepted.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "select_yesno" | "select-yesno" => Self::SelectYesno,
            "datetime-local" => Self::DatetimeLocal,
            _ => Self::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::SelectYesno => "select_yesno",
            Self::DatetimeLocal => "datetime-local",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one worksheet column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// 1-based position in the sheet.
    pub index: usize,
    pub name: String,
    /// `None` when the backend sent no type for this column.
    pub data_type: Option<DataType>,
    pub field_type: FieldType,
    pub required: bool,
    #[serde(default)]
    pub sample_values: Vec<String>,
}

/// The column layout of one sheet inside one workbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSchema {
    pub filename: String,
    pub sheet_name: String,
    pub columns: Vec<ColumnDef>,
}

impl SheetSchema {
    /// Look up a column by its exact header name. When the sheet carries
    /// duplicate headers the first one wins.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}
