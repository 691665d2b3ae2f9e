//! Table → typed record mapping.
//!
//! A [`Schema`] declares, for one record type, which column names it accepts,
//! how each value is coerced and how it is stored. [`RecordMapper`] binds a
//! table's columns to those fields once and then builds one record per row.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDateTime;
//! use rust_decimal::Decimal;
//! use xlsx_records::mapping::{Record, RecordMapper, Schema};
//! use xlsx_records::Table;
//!
//! #[derive(Debug, Default)]
//! struct Employee {
//!     name: String,
//!     hired: NaiveDateTime,
//!     rate: Decimal,
//! }
//!
//! impl Record for Employee {
//!     fn schema() -> Schema<Self> {
//!         Schema::default()
//!             .text("Name", |e: &mut Employee, v| e.name = v)
//!             .date("Hired", |e: &mut Employee, v| e.hired = v)
//!             .decimal("Rate", |e: &mut Employee, v| e.rate = v)
//!     }
//! }
//!
//! let mut table = Table::new(vec!["Name".into(), "Hired".into(), "Rate".into()]);
//! table.add_row(vec!["Ann".into(), "45047".into(), "12.345678".into()]);
//!
//! let schema = Employee::schema();
//! let people = RecordMapper::new(&schema).map_rows(&table)?;
//! assert_eq!(people[0].name, "Ann");
//! assert_eq!(people[0].rate.to_string(), "12.34568");
//! # Ok::<(), xlsx_records::Error>(())
//! ```

pub mod coerce;

use crate::error::{Error, Result};
use crate::model::Table;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Date literal, or a spreadsheet serial as fallback
    DateTime,
    /// Fixed-point decimal rounded to five places
    Decimal,
    /// 32-bit signed integer
    Int32,
    /// Raw string, always accepted
    Text,
    /// Raw string handed to a setter that may reject it
    Other,
}

impl FieldKind {
    /// Parse a short kind name (`date`, `decimal`, `int`, `text`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" | "datetime" => Some(FieldKind::DateTime),
            "decimal" => Some(FieldKind::Decimal),
            "int" | "int32" | "integer" => Some(FieldKind::Int32),
            "text" | "string" => Some(FieldKind::Text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::DateTime => "date/time",
            FieldKind::Decimal => "decimal",
            FieldKind::Int32 => "integer",
            FieldKind::Text => "text",
            FieldKind::Other => "custom value",
        };
        f.write_str(name)
    }
}

/// A coerced cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    DateTime(NaiveDateTime),
    Decimal(Decimal),
    Int32(i32),
    Text(String),
}

type Setter<T> = Box<dyn Fn(&mut T, FieldValue) -> std::result::Result<(), String> + Send + Sync>;

/// One named, typed field of a [`Schema`].
pub struct Field<T> {
    name: String,
    kind: FieldKind,
    set: Setter<T>,
}

impl<T> Field<T> {
    /// Column name this field is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Coerce `raw` and store it in `record`.
    fn assign(&self, record: &mut T, raw: &str) -> Result<()> {
        let rejected = || Error::Coercion {
            value: raw.to_string(),
            column: self.name.clone(),
            kind: self.kind,
        };

        let value = coerce::coerce(self.kind, raw).ok_or_else(rejected)?;
        (self.set)(record, value).map_err(|reason| {
            log::debug!("column {} rejected '{}': {}", self.name, raw, reason);
            rejected()
        })
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Field declarations and a factory for one record type.
///
/// Field names are matched against column names exactly. Declaring the same
/// name twice replaces the earlier declaration.
pub struct Schema<T> {
    factory: Box<dyn Fn() -> T + Send + Sync>,
    fields: Vec<Field<T>>,
}

impl<T: 'static> Schema<T> {
    /// Create a schema whose records start as `factory()`.
    pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            fields: Vec::new(),
        }
    }

    /// Declare a date/time field.
    pub fn date(
        self,
        name: impl Into<String>,
        set: impl Fn(&mut T, NaiveDateTime) + Send + Sync + 'static,
    ) -> Self {
        self.typed(name, FieldKind::DateTime, move |record, value| match value {
            FieldValue::DateTime(v) => {
                set(record, v);
                Some(())
            }
            _ => None,
        })
    }

    /// Declare a decimal field.
    pub fn decimal(
        self,
        name: impl Into<String>,
        set: impl Fn(&mut T, Decimal) + Send + Sync + 'static,
    ) -> Self {
        self.typed(name, FieldKind::Decimal, move |record, value| match value {
            FieldValue::Decimal(v) => {
                set(record, v);
                Some(())
            }
            _ => None,
        })
    }

    /// Declare a 32-bit integer field.
    pub fn int32(
        self,
        name: impl Into<String>,
        set: impl Fn(&mut T, i32) + Send + Sync + 'static,
    ) -> Self {
        self.typed(name, FieldKind::Int32, move |record, value| match value {
            FieldValue::Int32(v) => {
                set(record, v);
                Some(())
            }
            _ => None,
        })
    }

    /// Declare a field that takes the raw string.
    pub fn text(
        self,
        name: impl Into<String>,
        set: impl Fn(&mut T, String) + Send + Sync + 'static,
    ) -> Self {
        self.typed(name, FieldKind::Text, move |record, value| match value {
            FieldValue::Text(v) => {
                set(record, v);
                Some(())
            }
            _ => None,
        })
    }

    /// Declare a field whose setter converts the raw string itself.
    ///
    /// An `Err` from the setter aborts mapping with a coercion error.
    pub fn other<E: fmt::Display + 'static>(
        self,
        name: impl Into<String>,
        set: impl Fn(&mut T, String) -> std::result::Result<(), E> + Send + Sync + 'static,
    ) -> Self {
        self.push(
            name.into(),
            FieldKind::Other,
            Box::new(move |record: &mut T, value: FieldValue| match value {
                FieldValue::Text(v) => set(record, v).map_err(|e| e.to_string()),
                other => Err(format!("unexpected value {:?}", other)),
            }),
        )
    }

    /// Declare a field of a kind chosen at runtime.
    ///
    /// The setter receives the coerced [`FieldValue`]; useful when the record
    /// shape itself is only known at runtime.
    pub fn value(
        self,
        name: impl Into<String>,
        kind: FieldKind,
        set: impl Fn(&mut T, FieldValue) + Send + Sync + 'static,
    ) -> Self {
        self.push(
            name.into(),
            kind,
            Box::new(move |record: &mut T, value: FieldValue| {
                set(record, value);
                Ok(())
            }),
        )
    }

    fn typed(
        self,
        name: impl Into<String>,
        kind: FieldKind,
        set: impl Fn(&mut T, FieldValue) -> Option<()> + Send + Sync + 'static,
    ) -> Self {
        self.push(
            name.into(),
            kind,
            Box::new(move |record: &mut T, value: FieldValue| {
                set(record, value).ok_or_else(|| format!("value does not match {}", kind))
            }),
        )
    }

    fn push(mut self, name: String, kind: FieldKind, set: Setter<T>) -> Self {
        self.fields.retain(|f| f.name != name);
        self.fields.push(Field { name, kind, set });
        self
    }
}

impl<T> Schema<T> {
    /// Look up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&Field<T>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All declared fields, in declaration order.
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Create a fresh record.
    pub fn instantiate(&self) -> T {
        (self.factory)()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: Default + 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("fields", &self.fields).finish()
    }
}

/// A record type with a fixed schema.
pub trait Record: Sized + 'static {
    /// Field declarations for this type.
    fn schema() -> Schema<Self>;
}

/// Maps table rows onto records of one schema.
#[derive(Debug)]
pub struct RecordMapper<'s, T> {
    schema: &'s Schema<T>,
}

impl<'s, T> RecordMapper<'s, T> {
    /// Create a mapper for `schema`.
    pub fn new(schema: &'s Schema<T>) -> Self {
        Self { schema }
    }

    /// Build one record per data row.
    ///
    /// Columns without a field of the same name are ignored; fields without
    /// a column keep the factory value. The first value that fails coercion
    /// aborts the whole call.
    pub fn map_rows(&self, table: &Table) -> Result<Vec<T>> {
        let bindings = self.bind(table);

        table
            .rows
            .iter()
            .map(|row| -> Result<T> {
                let mut record = self.schema.instantiate();
                for (col, field) in &bindings {
                    let raw = row.get(*col).map(String::as_str).unwrap_or("");
                    field.assign(&mut record, raw)?;
                }
                Ok(record)
            })
            .collect()
    }

    fn bind(&self, table: &Table) -> Vec<(usize, &'s Field<T>)> {
        let schema: &'s Schema<T> = self.schema;
        let bindings: Vec<(usize, &'s Field<T>)> = table
            .columns
            .iter()
            .enumerate()
            .filter_map(|(idx, column)| schema.field(column).map(|f| (idx, f)))
            .collect();

        if log::log_enabled!(log::Level::Debug) {
            let ignored: Vec<&str> = table
                .columns
                .iter()
                .filter(|c| schema.field(c).is_none())
                .map(String::as_str)
                .collect();
            log::debug!(
                "bound {} of {} columns to fields (ignored: {:?})",
                bindings.len(),
                table.column_count(),
                ignored
            );
        }

        bindings
    }
}

/// Map every row of `table` with `schema`.
pub fn map_rows<T>(table: &Table, schema: &Schema<T>) -> Result<Vec<T>> {
    RecordMapper::new(schema).map_rows(table)
}
