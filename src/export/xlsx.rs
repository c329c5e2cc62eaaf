//! XLSX export with colored HEX cells.
//!
//! The workbook is assembled directly as SpreadsheetML parts inside a zip
//! archive. Cell text is written as inline strings, so no shared string table
//! is needed. Every distinct HEX color gets one solid fill and one cell
//! format; the header row uses a bold font.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::ExportOptions;
use crate::models::{Column, Dataset, RgbColor};

/// Longest worksheet title Excel accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Style index of the bold header format.
const HEADER_STYLE: usize = 1;
/// Style index of the first color fill format.
const FIRST_COLOR_STYLE: usize = 2;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Checks that `name` is usable as a worksheet title.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Sheet name cannot be empty");
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        anyhow::bail!(
            "Sheet name '{}' is longer than {} characters",
            name,
            MAX_SHEET_NAME_LEN
        );
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        anyhow::bail!("Sheet name '{}' contains forbidden character '{}'", name, c);
    }
    Ok(())
}

/// Distinct fill colors, each mapped to its cell style index.
#[derive(Debug, Default)]
struct FillTable {
    styles: BTreeMap<String, usize>,
    order: Vec<String>,
}

impl FillTable {
    /// Returns the style index for `color`, registering it on first use.
    fn style_for(&mut self, color: RgbColor) -> usize {
        let argb = format!("FF{:02X}{:02X}{:02X}", color.r, color.g, color.b);
        if let Some(&style) = self.styles.get(&argb) {
            return style;
        }
        let style = FIRST_COLOR_STYLE + self.order.len();
        self.styles.insert(argb.clone(), style);
        self.order.push(argb);
        style
    }

    fn styles_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        xml.push_str(
            r#"<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts>"#,
        );

        // Fills 0 and 1 are reserved by the format
        let _ = write!(
            xml,
            r#"<fills count="{}"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill>"#,
            self.order.len() + 2
        );
        for argb in &self.order {
            let _ = write!(
                xml,
                r#"<fill><patternFill patternType="solid"><fgColor rgb="{argb}"/><bgColor indexed="64"/></patternFill></fill>"#
            );
        }
        xml.push_str("</fills>");

        xml.push_str(
            r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
        );
        xml.push_str(
            r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
        );

        let _ = write!(
            xml,
            r#"<cellXfs count="{}"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>"#,
            self.order.len() + FIRST_COLOR_STYLE
        );
        for fill in 0..self.order.len() {
            let _ = write!(
                xml,
                r#"<xf numFmtId="0" fontId="0" fillId="{}" borderId="0" xfId="0" applyFill="1"/>"#,
                fill + 2
            );
        }
        xml.push_str("</cellXfs>");

        xml.push_str(
            r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#,
        );
        xml
    }
}

/// Spreadsheet column letters for a zero-based index (0 → "A", 26 → "AA").
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        // index % 26 < 26, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Escapes text for XML content and attributes, dropping characters XML 1.0
/// cannot carry.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}

fn push_cell(xml: &mut String, reference: &str, text: &str, style: Option<usize>) {
    let _ = write!(xml, r#"<c r="{reference}" t="inlineStr""#);
    if let Some(style) = style {
        let _ = write!(xml, r#" s="{style}""#);
    }
    let _ = write!(
        xml,
        r#"><is><t xml:space="preserve">{}</t></is></c>"#,
        escape_xml(text)
    );
}

fn sheet_xml(dataset: &Dataset, options: &ExportOptions, fills: &mut FillTable) -> String {
    let columns = dataset.output_columns();
    let letters: Vec<String> = (0..columns.len()).map(column_letters).collect();

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    xml.push_str(r#"<row r="1">"#);
    for (column, letter) in columns.iter().zip(&letters) {
        push_cell(&mut xml, &format!("{letter}1"), column.header(), Some(HEADER_STYLE));
    }
    xml.push_str("</row>");

    for (index, record) in dataset.records().iter().enumerate() {
        let row = index + 2;
        let _ = write!(xml, r#"<row r="{row}">"#);
        for (column, letter) in columns.iter().zip(&letters) {
            let Some(text) = record.value(column) else {
                continue;
            };

            let style = if options.style_hex_cells && *column == Column::Hex {
                match RgbColor::from_hex(text) {
                    Ok(color) => Some(fills.style_for(color)),
                    Err(e) => {
                        warn!("Skipping fill for {}{}: {:#}", letter, row, e);
                        None
                    }
                }
            } else {
                None
            };

            push_cell(&mut xml, &format!("{letter}{row}"), text, style);
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(sheet_name)
    )
}

fn add_part(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    content: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .context(format!("Failed to start workbook part {name}"))?;
    zip.write_all(content.as_bytes())
        .context(format!("Failed to write workbook part {name}"))?;
    Ok(())
}

/// Serializes `dataset` as an XLSX workbook.
///
/// A HEX value that does not parse leaves its cell unstyled; the rest of the
/// export is unaffected.
///
/// # Errors
///
/// Returns an error if the sheet name is invalid or the archive cannot be
/// written.
pub fn export_xlsx(dataset: &Dataset, options: &ExportOptions) -> Result<Vec<u8>> {
    validate_sheet_name(&options.sheet_name)?;

    let mut fills = FillTable::default();
    let sheet = sheet_xml(dataset, options, &mut fills);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let part_options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    add_part(&mut zip, "[Content_Types].xml", CONTENT_TYPES, part_options)?;
    add_part(&mut zip, "_rels/.rels", ROOT_RELS, part_options)?;
    add_part(
        &mut zip,
        "xl/workbook.xml",
        &workbook_xml(&options.sheet_name),
        part_options,
    )?;
    add_part(
        &mut zip,
        "xl/_rels/workbook.xml.rels",
        WORKBOOK_RELS,
        part_options,
    )?;
    add_part(&mut zip, "xl/styles.xml", &fills.styles_xml(), part_options)?;
    add_part(&mut zip, "xl/worksheets/sheet1.xml", &sheet, part_options)?;

    let cursor = zip.finish().context("Failed to finalize workbook")?;
    Ok(cursor.into_inner())
}

/// Writes `dataset` as an XLSX file.
pub fn write_xlsx(dataset: &Dataset, path: &Path, options: &ExportOptions) -> Result<()> {
    let bytes = export_xlsx(dataset, options)?;
    fs::write(path, bytes).context(format!("Failed to write workbook: {}", path.display()))?;
    info!("Wrote {} records to {}", dataset.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorRecord;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            ColorRecord::new().with_name("Red & Co").with_hex("#FF0000"),
            ColorRecord::new().with_name("Broken").with_hex("#GG0000"),
            ColorRecord::new().with_name("Short").with_hex("f00"),
            ColorRecord::new().with_name("Sky").with_hex("87CEEB"),
        ])
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
        assert_eq!(escape_xml("bell\u{7}"), "bell");
    }

    #[test]
    fn test_sheet_name_validation() {
        assert!(validate_sheet_name("Classified Colors").is_ok());
        assert!(validate_sheet_name("").is_err());
        assert!(validate_sheet_name("a/b").is_err());
        assert!(validate_sheet_name(&"x".repeat(32)).is_err());
    }

    #[test]
    fn test_export_contains_every_part() {
        let bytes = export_xlsx(&sample(), &ExportOptions::default()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
        assert!(read_part(&bytes, "xl/workbook.xml").contains(r#"name="Classified Colors""#));
    }

    #[test]
    fn test_malformed_hex_is_left_unstyled() {
        let bytes = export_xlsx(&sample(), &ExportOptions::default()).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

        // "#FF0000" and "f00" share one fill, "87CEEB" gets another
        assert!(sheet.contains(r#"<c r="B2" t="inlineStr" s="2">"#));
        assert!(sheet.contains(r#"<c r="B3" t="inlineStr">"#));
        assert!(sheet.contains(r#"<c r="B4" t="inlineStr" s="2">"#));
        assert!(sheet.contains(r#"<c r="B5" t="inlineStr" s="3">"#));
        assert!(sheet.contains("Red &amp; Co"));

        let styles = read_part(&bytes, "xl/styles.xml");
        assert!(styles.contains(r#"<fgColor rgb="FFFF0000"/>"#));
        assert!(styles.contains(r#"<fgColor rgb="FF87CEEB"/>"#));
        assert!(styles.contains(r#"<fills count="4">"#));
        assert!(styles.contains(r#"<cellXfs count="4">"#));
    }

    #[test]
    fn test_styling_can_be_disabled() {
        let options = ExportOptions {
            style_hex_cells: false,
            ..ExportOptions::default()
        };
        let bytes = export_xlsx(&sample(), &options).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(!sheet.contains(r#"s="2""#));
        assert!(read_part(&bytes, "xl/styles.xml").contains(r#"<fills count="2">"#));
    }

    #[test]
    fn test_header_row_lists_output_columns() {
        let bytes = export_xlsx(&sample(), &ExportOptions::default()).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        for (cell, header) in [
            ("A1", "Name"),
            ("B1", "HEX"),
            ("C1", "ColorFamily"),
            ("D1", "ColorSubFamily"),
        ] {
            let expected = format!(
                r#"<c r="{cell}" t="inlineStr" s="1"><is><t xml:space="preserve">{header}</t></is></c>"#
            );
            assert!(sheet.contains(&expected), "missing {expected}");
        }
    }
}
