//! ZIP package access for XLSX workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// A relationship entry from a .rels part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path, relative to the owning part unless it starts with '/'
    pub target: String,
}

/// Relationships of one package part, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Find the first relationship whose type URI ends with `suffix`.
    ///
    /// Transitional and strict OOXML use different URI prefixes for the same
    /// relationship, so lookups go by the trailing segment.
    pub fn find_by_type_suffix(&self, suffix: &str) -> Option<&Relationship> {
        self.by_id.values().find(|r| r.rel_type.ends_with(suffix))
    }

    /// Add a relationship.
    pub fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Decode XML part bytes to a string.
///
/// Parts are normally UTF-8. A UTF-8 BOM is stripped. UTF-16 parts (with a
/// BOM) are transcoded and their declaration rewritten to UTF-8 so quick-xml
/// does not try to decode the already-decoded text a second time.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    let invalid = |e: std::string::FromUtf8Error| {
        Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    };

    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).map_err(invalid),
        [0xFF, 0xFE, rest @ ..] => {
            decode_utf16(rest, u16::from_le_bytes).map(|s| fix_xml_declaration(&s))
        }
        [0xFE, 0xFF, rest @ ..] => {
            decode_utf16(rest, u16::from_be_bytes).map(|s| fix_xml_declaration(&s))
        }
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn fix_xml_declaration(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    match content.find("?>") {
        Some(end) => {
            let (decl, rest) = content.split_at(end + 2);
            let decl = decl
                .replace("\"UTF-16\"", "\"UTF-8\"")
                .replace("'UTF-16'", "'UTF-8'")
                .replace("\"utf-16\"", "\"UTF-8\"")
                .replace("'utf-16'", "'UTF-8'");
            format!("{}{}", decl, rest)
        }
        None => content.to_string(),
    }
}

/// OOXML package over an in-memory ZIP archive.
///
/// Opening from a path reads the whole file and closes it before the archive
/// is parsed, so no file handle outlives [`OoxmlContainer::open`].
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xlsx_records::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("people.xlsx")?;
    /// assert!(container.exists("xl/workbook.xml"));
    /// # Ok::<(), xlsx_records::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("opening package {}", path.display());
        let data = {
            let mut reader = BufReader::new(File::open(path)?);
            let mut data = Vec::new();
            reader.read_to_end(&mut data)?;
            data
        };
        Self::from_bytes(data)
    }

    /// Create a package from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        log::trace!("package has {} entries", archive.len());
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part as a string.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// Read the relationships of `part_path` (e.g. `xl/workbook.xml`).
    ///
    /// A part without a .rels file has no relationships.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let path = Path::new(part_path);
        let parent = path.parent().unwrap_or(Path::new(""));
        let filename = path.file_name().unwrap_or_default().to_string_lossy();
        let rels_path = if parent.as_os_str().is_empty() {
            format!("_rels/{}.rels", filename)
        } else {
            format!("{}/_rels/{}.rels", parent.display(), filename)
        };

        match self.read_xml(&rels_path) {
            Ok(xml) => parse_relationships(&xml),
            Err(Error::MissingComponent(_)) => Ok(Relationships::default()),
            Err(e) => Err(e),
        }
    }

    /// Resolve a relationship target against the part that owns it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut result = Path::new(base).parent().unwrap_or(Path::new("")).to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                std::path::Component::ParentDir => {
                    result.pop();
                }
                std::path::Component::Normal(c) => result.push(c),
                _ => {}
            }
        }

        result.to_string_lossy().replace('\\', "/")
    }
}

fn parse_relationships(xml: &str) -> Result<Relationships> {
    let mut rels = Relationships::default();
    if xml.trim().is_empty() {
        return Ok(rels);
    }

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        _ => {}
                    }
                }
                if !rel.id.is_empty() {
                    rels.add(rel);
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.archive.borrow().len())
            .finish()
    }
}
