use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Секция зала, в которой стоит ряд. Ряд без секции попадает в `center`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Left,
    Right,
    #[default]
    Center,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Left => "left",
            Section::Right => "right",
            Section::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AisleMarker {
    Aisle,
}

/// Одна запись схемы зала: ряд мест или проход.
///
/// В JSON выглядит как `{ "row": "C", "count": 9, "section": "left" }`
/// или `{ "type": "aisle" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeatLayoutEntry {
    Aisle {
        #[serde(rename = "type")]
        kind: AisleMarker,
    },
    Row {
        row: String,
        count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section: Option<Section>,
    },
}

impl SeatLayoutEntry {
    pub fn row(row: &str, count: u32) -> Self {
        SeatLayoutEntry::Row {
            row: row.to_string(),
            count,
            section: None,
        }
    }

    pub fn row_in(row: &str, count: u32, section: Section) -> Self {
        SeatLayoutEntry::Row {
            row: row.to_string(),
            count,
            section: Some(section),
        }
    }

    pub fn aisle() -> Self {
        SeatLayoutEntry::Aisle {
            kind: AisleMarker::Aisle,
        }
    }

    pub fn is_aisle(&self) -> bool {
        matches!(self, SeatLayoutEntry::Aisle { .. })
    }
}

/// Идентификатор места: буква ряда плюс номер (`"C3"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    pub fn new(row: &str, index: u32) -> Self {
        SeatId(format!("{}{}", row, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatId {
    fn from(value: &str) -> Self {
        SeatId(value.to_string())
    }
}

impl From<String> for SeatId {
    fn from(value: String) -> Self {
        SeatId(value)
    }
}

impl AsRef<str> for SeatId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SeatId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Схема зала кинотеатра: два центральных ряда, затем два блока
/// с левой и правой секциями.
pub fn default_layout() -> Vec<SeatLayoutEntry> {
    vec![
        SeatLayoutEntry::row("A", 9),
        SeatLayoutEntry::row("B", 9),
        SeatLayoutEntry::aisle(),
        SeatLayoutEntry::row_in("C", 9, Section::Left),
        SeatLayoutEntry::row_in("D", 9, Section::Left),
        SeatLayoutEntry::row_in("E", 9, Section::Right),
        SeatLayoutEntry::row_in("F", 9, Section::Right),
        SeatLayoutEntry::aisle(),
        SeatLayoutEntry::row_in("G", 9, Section::Left),
        SeatLayoutEntry::row_in("H", 9, Section::Left),
        SeatLayoutEntry::row_in("I", 9, Section::Right),
        SeatLayoutEntry::row_in("J", 9, Section::Right),
    ]
}
