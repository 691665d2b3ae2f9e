//! Raw worksheet cells.

/// Cell type tag, from the `t` attribute of a `<c>` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellKind {
    /// No tag or `t="n"`: a number stored as literal text
    #[default]
    Number,
    /// `t="s"`: payload is an index into the shared-string table
    SharedString,
    /// `t="inlineStr"`: text stored in the cell itself
    InlineString,
    /// `t="str"`: cached string result of a formula
    FormulaString,
    /// `t="b"`: `0` or `1`
    Boolean,
    /// `t="e"`: error literal such as `#N/A`
    Error,
    /// `t="d"`: ISO 8601 date text
    Date,
}

impl CellKind {
    /// Map a `t` attribute value to a kind. Unknown tags are treated as numbers.
    pub fn from_type_attr(value: &str) -> Self {
        match value {
            "s" => CellKind::SharedString,
            "inlineStr" => CellKind::InlineString,
            "str" => CellKind::FormulaString,
            "b" => CellKind::Boolean,
            "e" => CellKind::Error,
            "d" => CellKind::Date,
            _ => CellKind::Number,
        }
    }
}

/// One worksheet cell before shared-string resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// Type tag
    pub kind: CellKind,
    /// Raw serialized payload (empty when the cell has no value)
    pub value: String,
    /// A1-style reference, when the sheet provides one
    pub reference: Option<String>,
}

impl RawCell {
    /// A cell holding a literal value.
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Number,
            value: value.into(),
            reference: None,
        }
    }

    /// A cell referencing the shared-string table.
    pub fn shared(index: usize) -> Self {
        Self {
            kind: CellKind::SharedString,
            value: index.to_string(),
            reference: None,
        }
    }

    /// Attach an A1 reference.
    pub fn at(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}
