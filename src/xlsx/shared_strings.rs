//! XLSX shared strings parsing.

use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Shared strings table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    /// All strings in order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Build a table from already-resolved strings.
    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse shared strings from `sharedStrings.xml` content.
    ///
    /// Each `<si>` is one entry. Rich-text runs are concatenated; phonetic
    /// hints (`<rPh>`) are skipped. Whitespace inside `<t>` is kept as-is.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut phonetic_depth = 0usize;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_text.clear();
                    }
                    b"rPh" => phonetic_depth += 1,
                    b"t" if in_si && phonetic_depth == 0 => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::Text(e)) if in_t => {
                    let text = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                    current_text.push_str(&text);
                }
                Ok(Event::CData(e)) if in_t => {
                    current_text.push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(std::mem::take(&mut current_text));
                        in_si = false;
                    }
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        log::trace!("parsed {} shared strings", strings.len());
        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Resolve the raw payload of a shared-string cell.
    ///
    /// Succeeds iff the payload is an integer `i` with `0 <= i < len()`.
    pub fn resolve(&self, payload: &str) -> Result<&str> {
        payload
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| self.get(idx))
            .ok_or_else(|| Error::InvalidCellReference {
                index: payload.to_string(),
                available: self.len(),
            })
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shared_strings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="5" uniqueCount="3">
    <si><t>Name</t></si>
    <si><t>Hired</t></si>
    <si><t>Rate</t></si>
</sst>"#;

        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some("Name"));
        assert_eq!(ss.get(1), Some("Hired"));
        assert_eq!(ss.get(2), Some("Rate"));
        assert_eq!(ss.get(3), None);
    }

    #[test]
    fn test_rich_text_and_phonetics() {
        let xml = r#"<sst>
    <si>
        <r><rPr><b/></rPr><t>Hello</t></r>
        <r><t xml:space="preserve"> World</t></r>
        <rPh sb="0" eb="1"><t>hint</t></rPh>
    </si>
    <si/>
    <si><t>a &amp; b</t></si>
</sst>"#;

        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some("Hello World"));
        assert_eq!(ss.get(1), Some(""));
        assert_eq!(ss.get(2), Some("a & b"));
    }

    #[test]
    fn test_resolve_bounds() {
        let ss = SharedStrings::from_strings(["x", "y"]);
        assert_eq!(ss.resolve("0").unwrap(), "x");
        assert_eq!(ss.resolve("1").unwrap(), "y");
        assert_eq!(ss.resolve("1").unwrap(), ss.resolve("1").unwrap());

        match ss.resolve("2") {
            Err(Error::InvalidCellReference { index, available }) => {
                assert_eq!(index, "2");
                assert_eq!(available, 2);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(ss.resolve("-1").is_err());
        assert!(ss.resolve("abc").is_err());
    }
}
