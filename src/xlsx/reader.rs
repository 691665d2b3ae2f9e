//! First-sheet reader for XLSX packages.

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::extract::SheetSource;
use crate::model::{CellKind, RawCell};
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

use super::shared_strings::SharedStrings;

const DEFAULT_WORKBOOK_PATH: &str = "xl/workbook.xml";
const DEFAULT_SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// Sheet info from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Reads the first worksheet of an XLSX workbook as rows of [`RawCell`].
///
/// The package is loaded into memory on open, so the reader holds no file
/// handle. The shared-string table is parsed once and lives as long as the
/// reader.
pub struct XlsxSheetReader {
    container: OoxmlContainer,
    shared_strings: SharedStrings,
    sheet_name: String,
    sheet_path: String,
}

impl XlsxSheetReader {
    /// Open an XLSX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = OoxmlContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a reader over an opened package.
    pub fn from_container(container: OoxmlContainer) -> Result<Self> {
        let workbook_path = container
            .read_relationships("")?
            .find_by_type_suffix("/officeDocument")
            .map(|rel| OoxmlContainer::resolve_path("", &rel.target))
            .unwrap_or_else(|| DEFAULT_WORKBOOK_PATH.to_string());

        let workbook_xml = container.read_xml(&workbook_path)?;
        let sheet = first_sheet(&workbook_xml)?
            .ok_or_else(|| Error::MalformedSheet("workbook contains no sheets".to_string()))?;

        let rels = container.read_relationships(&workbook_path)?;
        let target = rels.get(&sheet.rel_id).ok_or_else(|| {
            Error::MissingComponent(format!(
                "relationship {} for sheet '{}'",
                sheet.rel_id, sheet.name
            ))
        })?;
        let sheet_path = OoxmlContainer::resolve_path(&workbook_path, &target.target);

        let shared_strings_path = rels
            .find_by_type_suffix("/sharedStrings")
            .map(|rel| OoxmlContainer::resolve_path(&workbook_path, &rel.target))
            .unwrap_or_else(|| DEFAULT_SHARED_STRINGS_PATH.to_string());
        let shared_strings = if container.exists(&shared_strings_path) {
            SharedStrings::parse(&container.read_xml(&shared_strings_path)?)?
        } else {
            log::warn!("no shared strings part at {}", shared_strings_path);
            SharedStrings::default()
        };

        log::debug!(
            "first sheet '{}' at {} ({} shared strings)",
            sheet.name,
            sheet_path,
            shared_strings.len()
        );

        Ok(Self {
            container,
            shared_strings,
            sheet_name: sheet.name,
            sheet_path,
        })
    }

    /// Name of the sheet being read.
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Package path of the sheet being read.
    pub fn sheet_path(&self) -> &str {
        &self.sheet_path
    }

    fn read_rows(&self, limit: Option<usize>) -> Result<Vec<Vec<RawCell>>> {
        let xml = self.container.read_xml(&self.sheet_path)?;
        parse_sheet_rows(&xml, limit)
    }
}

impl SheetSource for XlsxSheetReader {
    fn rows(&self) -> Result<Vec<Vec<RawCell>>> {
        self.read_rows(None)
    }

    fn first_row(&self) -> Result<Option<Vec<RawCell>>> {
        Ok(self.read_rows(Some(1))?.into_iter().next())
    }

    fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }
}

impl std::fmt::Debug for XlsxSheetReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxSheetReader")
            .field("sheet_name", &self.sheet_name)
            .field("sheet_path", &self.sheet_path)
            .field("shared_strings", &self.shared_strings.len())
            .finish()
    }
}

/// Find the first `<sheet>` in workbook.xml.
fn first_sheet(xml: &str) -> Result<Option<SheetInfo>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                let mut name = String::new();
                let mut rel_id = String::new();

                for attr in e.attributes().flatten() {
                    let key = attr.key;
                    if key.as_ref() == b"name" {
                        name = String::from_utf8_lossy(&attr.value).to_string();
                    } else if key.prefix().is_some() && key.local_name().as_ref() == b"id" {
                        rel_id = String::from_utf8_lossy(&attr.value).to_string();
                    }
                }

                return Ok(Some(SheetInfo { name, rel_id }));
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
}

fn start_cell(e: &BytesStart) -> RawCell {
    let mut cell = RawCell::default();
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"t" => cell.kind = CellKind::from_type_attr(&String::from_utf8_lossy(&attr.value)),
            b"r" => cell.reference = Some(String::from_utf8_lossy(&attr.value).to_string()),
            _ => {}
        }
    }
    cell
}

/// Parse `<sheetData>` rows of a worksheet.
///
/// Every `<row>` element is a logical row, including ones without cells.
/// Cells keep their document order; the `r` reference is recorded but not
/// used for placement. Only `<v>` and inline `<is><t>` text count as the
/// payload, so formula text in `<f>` is ignored.
pub(crate) fn parse_sheet_rows(xml: &str, limit: Option<usize>) -> Result<Vec<Vec<RawCell>>> {
    let mut rows = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut current_row: Option<Vec<RawCell>> = None;
    let mut current_cell: Option<RawCell> = None;
    let mut in_inline = false;
    let mut in_value = false;
    let mut phonetic_depth = 0usize;

    loop {
        if limit.is_some_and(|n| rows.len() >= n) {
            break;
        }

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"row" => current_row = Some(Vec::new()),
                b"c" if current_row.is_some() => current_cell = Some(start_cell(e)),
                b"v" if current_cell.is_some() => in_value = true,
                b"is" if current_cell.is_some() => in_inline = true,
                b"rPh" if in_inline => phonetic_depth += 1,
                b"t" if in_inline && phonetic_depth == 0 => in_value = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"row" => rows.push(Vec::new()),
                b"c" => {
                    if let Some(row) = current_row.as_mut() {
                        row.push(start_cell(e));
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_value => {
                if let Some(cell) = current_cell.as_mut() {
                    let text = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                    cell.value.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"c" => {
                    if let (Some(cell), Some(row)) = (current_cell.take(), current_row.as_mut()) {
                        row.push(cell);
                    }
                    in_inline = false;
                }
                b"is" => in_inline = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"v" | b"t" => in_value = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    log::trace!("read {} rows from sheet", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
    <row r="2"><c r="A2" t="inlineStr"><is><t xml:space="preserve"> Ann </t></is></c><c r="B2"><f>SUM(1,2)</f><v>3</v></c></row>
    <row r="3"/>
    <row r="4"><c r="A4" s="1"/><c r="B4" t="b"><v>1</v></c></row>
  </sheetData>
</worksheet>"#;

    #[test]
    fn test_parse_sheet_rows() {
        let rows = parse_sheet_rows(SHEET, None).unwrap();
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0], vec![RawCell::shared(0).at("A1"), RawCell::shared(1).at("B1")]);

        assert_eq!(rows[1][0].kind, CellKind::InlineString);
        assert_eq!(rows[1][0].value, " Ann ");
        assert_eq!(rows[1][1].value, "3");

        assert!(rows[2].is_empty());

        assert_eq!(rows[3][0].value, "");
        assert_eq!(rows[3][0].reference.as_deref(), Some("A4"));
        assert_eq!(rows[3][1].kind, CellKind::Boolean);
        assert_eq!(rows[3][1].value, "1");
    }

    #[test]
    fn test_parse_sheet_rows_limit() {
        let rows = parse_sheet_rows(SHEET, Some(1)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_first_sheet() {
        let xml = r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="People" sheetId="1" r:id="rId3"/>
    <sheet name="Other" sheetId="2" r:id="rId4"/>
  </sheets>
</workbook>"#;
        let sheet = first_sheet(xml).unwrap().unwrap();
        assert_eq!(sheet.name, "People");
        assert_eq!(sheet.rel_id, "rId3");

        assert!(first_sheet("<workbook><sheets/></workbook>").unwrap().is_none());
    }
}
