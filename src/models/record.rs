//! Tabular color records and the ordered dataset that holds them.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::{ColorFamily, MainFamily};
use crate::constants::{
    FAMILY_COLUMN, HEX_COLUMN, NAME_COLUMN, RGB_COLUMN, SUB_FAMILY_COLUMN,
};

/// A column of the working dataset.
///
/// Recognized columns are matched case-insensitively on load and written back
/// under their canonical header. Everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// Optional display name
    Name,
    /// Hex color string
    Hex,
    /// `rgb(r, g, b)` color string
    Rgb,
    /// Classified main family
    ColorFamily,
    /// Classified sub-family
    ColorSubFamily,
    /// Any other column, kept verbatim
    Other(String),
}

impl Column {
    /// Maps a header cell to a column.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        let trimmed = header.trim();
        [
            (NAME_COLUMN, Self::Name),
            (HEX_COLUMN, Self::Hex),
            (RGB_COLUMN, Self::Rgb),
            (FAMILY_COLUMN, Self::ColorFamily),
            (SUB_FAMILY_COLUMN, Self::ColorSubFamily),
        ]
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| Self::Other(trimmed.to_string()), |(_, column)| column)
    }

    /// Header text written on export.
    #[must_use]
    pub fn header(&self) -> &str {
        match self {
            Self::Name => NAME_COLUMN,
            Self::Hex => HEX_COLUMN,
            Self::Rgb => RGB_COLUMN,
            Self::ColorFamily => FAMILY_COLUMN,
            Self::ColorSubFamily => SUB_FAMILY_COLUMN,
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the working dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorRecord {
    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hex color string as loaded (e.g. "#FF5733" or "FF5733")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// RGB color string as loaded (e.g. "rgb(255, 87, 51)")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
    /// Classified main family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_family: Option<String>,
    /// Classified sub-family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_sub_family: Option<String>,
    /// Pass-through columns, keyed by header
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ColorRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the hex field.
    #[must_use]
    pub fn with_hex(mut self, hex: impl Into<String>) -> Self {
        self.hex = Some(hex.into());
        self
    }

    /// Sets the RGB field.
    #[must_use]
    pub fn with_rgb(mut self, rgb: impl Into<String>) -> Self {
        self.rgb = Some(rgb.into());
        self
    }

    /// Sets a pass-through column value.
    #[must_use]
    pub fn with_extra(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(header.into(), value.into());
        self
    }

    /// Returns the value stored under `column`, if any.
    #[must_use]
    pub fn value(&self, column: &Column) -> Option<&str> {
        match column {
            Column::Name => self.name.as_deref(),
            Column::Hex => self.hex.as_deref(),
            Column::Rgb => self.rgb.as_deref(),
            Column::ColorFamily => self.color_family.as_deref(),
            Column::ColorSubFamily => self.color_sub_family.as_deref(),
            Column::Other(header) => self.extra.get(header).map(String::as_str),
        }
    }

    /// Stores `value` under `column`.
    ///
    /// Recognized columns are trimmed and a blank value is absent.
    /// Pass-through values are kept exactly; only an empty string is absent.
    pub fn set_value(&mut self, column: &Column, value: impl Into<String>) {
        let value = value.into();
        let value = match column {
            Column::Other(_) => Some(value).filter(|v| !v.is_empty()),
            _ => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        };

        match column {
            Column::Name => self.name = value,
            Column::Hex => self.hex = value,
            Column::Rgb => self.rgb = value,
            Column::ColorFamily => self.color_family = value,
            Column::ColorSubFamily => self.color_sub_family = value,
            Column::Other(header) => match value {
                Some(value) => {
                    self.extra.insert(header.clone(), value);
                }
                None => {
                    self.extra.remove(header);
                }
            },
        }
    }

    /// Overwrites both classification fields.
    pub fn apply_family(&mut self, family: &ColorFamily) {
        self.color_family = Some(family.main.name().to_string());
        self.color_sub_family = Some(family.sub.to_string());
    }
}

/// An ordered collection of records plus the column layout they came with.
///
/// Record order is significant and is never changed by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<Column>,
    records: Vec<ColorRecord>,
}

impl Dataset {
    /// Creates a dataset with an explicit column layout.
    #[must_use]
    pub fn new(columns: Vec<Column>, records: Vec<ColorRecord>) -> Self {
        Self { columns, records }
    }

    /// Creates a dataset and infers its columns from the records.
    ///
    /// Known columns come first (Name, HEX, RGB) when any record uses them,
    /// followed by pass-through columns in the order they are first seen.
    #[must_use]
    pub fn from_records(records: Vec<ColorRecord>) -> Self {
        let mut columns = Vec::new();
        if records.iter().any(|r| r.name.is_some()) {
            columns.push(Column::Name);
        }
        if records.iter().any(|r| r.hex.is_some()) {
            columns.push(Column::Hex);
        }
        if records.iter().any(|r| r.rgb.is_some()) {
            columns.push(Column::Rgb);
        }
        for record in &records {
            for header in record.extra.keys() {
                let column = Column::Other(header.clone());
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        Self { columns, records }
    }

    /// Input columns in their original order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns written on export: the input columns, plus the two
    /// classification columns if the input did not already carry them.
    #[must_use]
    pub fn output_columns(&self) -> Vec<Column> {
        let mut columns = self.columns.clone();
        for column in [Column::ColorFamily, Column::ColorSubFamily] {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }

    /// Whether the layout includes a HEX or RGB column.
    #[must_use]
    pub fn has_color_column(&self) -> bool {
        self.columns
            .iter()
            .any(|c| matches!(c, Column::Hex | Column::Rgb))
    }

    /// Records in order.
    #[must_use]
    pub fn records(&self) -> &[ColorRecord] {
        &self.records
    }

    /// Mutable access to records, for in-place classification.
    pub fn records_mut(&mut self) -> &mut [ColorRecord] {
        &mut self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record counts per main family, in canonical family order.
    ///
    /// Unclassified records are not counted. Family names that do not parse
    /// are counted as `Unknown`.
    #[must_use]
    pub fn family_counts(&self) -> Vec<(MainFamily, usize)> {
        let mut counts: BTreeMap<usize, (MainFamily, usize)> = BTreeMap::new();
        for record in &self.records {
            let Some(name) = record.color_family.as_deref() else {
                continue;
            };
            let family = name.parse().unwrap_or(MainFamily::Unknown);
            counts.entry(family.display_rank()).or_insert((family, 0)).1 += 1;
        }
        counts.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_from_header_is_case_insensitive() {
        assert_eq!(Column::from_header("hex"), Column::Hex);
        assert_eq!(Column::from_header(" Rgb "), Column::Rgb);
        assert_eq!(Column::from_header("colorfamily"), Column::ColorFamily);
        assert_eq!(
            Column::from_header("CIELAB"),
            Column::Other("CIELAB".to_string())
        );
    }

    #[test]
    fn test_set_value_blank_is_absent() {
        let mut record = ColorRecord::new().with_hex("#fff");
        record.set_value(&Column::Hex, "   ");
        assert_eq!(record.hex, None);

        record.set_value(&Column::Rgb, " rgb(1, 2, 3) ");
        assert_eq!(record.rgb.as_deref(), Some("rgb(1, 2, 3)"));

        record.set_value(&Column::Other("Notes".into()), " warm ");
        assert_eq!(record.value(&Column::Other("Notes".into())), Some(" warm "));
        record.set_value(&Column::Other("Notes".into()), "");
        assert_eq!(record.value(&Column::Other("Notes".into())), None);
    }

    #[test]
    fn test_apply_family_overwrites() {
        let mut record = ColorRecord::new();
        record.apply_family(&ColorFamily::new(MainFamily::Blue, "Navy"));
        record.apply_family(&ColorFamily::new(MainFamily::Blue, "Navy"));
        assert_eq!(record.color_family.as_deref(), Some("Blue"));
        assert_eq!(record.color_sub_family.as_deref(), Some("Navy"));
    }

    #[test]
    fn test_from_records_infers_columns() {
        let dataset = Dataset::from_records(vec![
            ColorRecord::new().with_name("A").with_hex("#000"),
            ColorRecord::new().with_extra("Notes", "x"),
        ]);
        assert_eq!(
            dataset.columns(),
            &[Column::Name, Column::Hex, Column::Other("Notes".into())]
        );
        assert!(dataset.has_color_column());
        assert_eq!(
            dataset.output_columns().last(),
            Some(&Column::ColorSubFamily)
        );
    }

    #[test]
    fn test_family_counts_in_canonical_order() {
        let mut records = vec![
            ColorRecord::new(),
            ColorRecord::new(),
            ColorRecord::new(),
            ColorRecord::new(),
        ];
        records[0].apply_family(&ColorFamily::new(MainFamily::White, "White"));
        records[1].apply_family(&ColorFamily::new(MainFamily::Red, "Crimson"));
        records[2].apply_family(&ColorFamily::new(MainFamily::Red, "Maroon"));

        let counts = Dataset::from_records(records).family_counts();
        assert_eq!(counts, vec![(MainFamily::Red, 2), (MainFamily::White, 1)]);
    }
}
