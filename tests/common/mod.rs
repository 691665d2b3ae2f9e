//! In-memory XLSX fixtures.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

/// A cell in a fixture row.
pub enum C<'a> {
    /// Shared-string reference
    S(usize),
    /// Numeric literal
    N(&'a str),
    /// Inline string
    I(&'a str),
}

/// Builds a workbook with one or more sheets; only sheet order matters.
pub struct WorkbookBuilder {
    shared: Vec<String>,
    sheets: Vec<(String, String)>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self {
            shared: Vec::new(),
            sheets: Vec::new(),
        }
    }

    pub fn shared_strings(mut self, strings: &[&str]) -> Self {
        self.shared = strings.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a sheet from rows of cells.
    pub fn sheet(self, name: &str, rows: &[&[C]]) -> Self {
        let mut data = String::new();
        for (r, row) in rows.iter().enumerate() {
            data.push_str(&format!("<row r=\"{}\">", r + 1));
            for (c, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
                let xml = match cell {
                    C::S(idx) => format!("<c r=\"{}\" t=\"s\"><v>{}</v></c>", reference, idx),
                    C::N(v) => format!("<c r=\"{}\"><v>{}</v></c>", reference, v),
                    C::I(v) => format!(
                        "<c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                        reference, v
                    ),
                };
                data.push_str(&xml);
            }
            data.push_str("</row>");
        }
        self.raw_sheet(name, &data)
    }

    /// Add a sheet from raw `<sheetData>` content.
    pub fn raw_sheet(mut self, name: &str, sheet_data: &str) -> Self {
        self.sheets.push((name.to_string(), sheet_data.to_string()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();

        let mut put = |name: &str, body: &str| {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };

        put("[Content_Types].xml", CONTENT_TYPES);
        put("_rels/.rels", PACKAGE_RELS);

        let mut sheets = String::new();
        let mut rels = String::new();
        for (i, (name, data)) in self.sheets.iter().enumerate() {
            let id = i + 1;
            sheets.push_str(&format!(
                "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                name, id, id
            ));
            rels.push_str(&format!(
                "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
                id, id
            ));
            put(
                &format!("xl/worksheets/sheet{}.xml", id),
                &format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                     <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
                     <sheetData>{}</sheetData></worksheet>",
                    data
                ),
            );
        }

        if !self.shared.is_empty() {
            rels.push_str(
                "<Relationship Id=\"rIdSst\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings\" Target=\"sharedStrings.xml\"/>",
            );
            let items: String = self
                .shared
                .iter()
                .map(|s| format!("<si><t>{}</t></si>", s))
                .collect();
            put(
                "xl/sharedStrings.xml",
                &format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                     <sst xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" uniqueCount=\"{}\">{}</sst>",
                    self.shared.len(),
                    items
                ),
            );
        }

        put(
            "xl/workbook.xml",
            &format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
                 xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
                 <sheets>{}</sheets></workbook>",
                sheets
            ),
        );
        put(
            "xl/_rels/workbook.xml.rels",
            &format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{}</Relationships>",
                rels
            ),
        );

        zip.finish().unwrap();
        buffer
    }
}

/// The two-row staff sheet: header plus one employee.
pub fn staff_workbook() -> Vec<u8> {
    WorkbookBuilder::new()
        .shared_strings(&["Name", "Hired", "Rate", "Ann"])
        .sheet(
            "Staff",
            &[
                &[C::S(0), C::S(1), C::S(2)],
                &[C::S(3), C::N("45047"), C::N("12.345678")],
            ],
        )
        .build()
}
