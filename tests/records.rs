//! Mapping XLSX rows to typed records.

mod common;

use chrono::{NaiveDate, NaiveDateTime};
use common::{staff_workbook, WorkbookBuilder, C};
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use xlsx_records::{read_records, read_records_from_bytes, Error, FieldKind, Record, Schema};

#[derive(Debug, Default, PartialEq)]
struct Employee {
    name: String,
    hired: NaiveDateTime,
    rate: Decimal,
}

impl Record for Employee {
    fn schema() -> Schema<Self> {
        Schema::default()
            .text("Name", |e: &mut Employee, v| e.name = v)
            .date("Hired", |e: &mut Employee, v| e.hired = v)
            .decimal("Rate", |e: &mut Employee, v| e.rate = v)
    }
}

#[derive(Debug, Default)]
struct Counted {
    label: String,
    count: i32,
}

impl Record for Counted {
    fn schema() -> Schema<Self> {
        Schema::default()
            .text("Label", |c: &mut Counted, v| c.label = v)
            .int32("Count", |c: &mut Counted, v| c.count = v)
    }
}

fn may_first_2023() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 5, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn staff_sheet_maps_to_one_employee() {
    let staff: Vec<Employee> = read_records_from_bytes(&staff_workbook()).unwrap();

    assert_eq!(
        staff,
        vec![Employee {
            name: "Ann".to_string(),
            hired: may_first_2023(),
            rate: Decimal::from_str("12.34568").unwrap(),
        }]
    );
}

#[test]
fn date_literal_and_serial_give_same_date() {
    let data = WorkbookBuilder::new()
        .shared_strings(&["Name", "Hired", "2023-05-01"])
        .sheet(
            "Sheet1",
            &[
                &[C::S(0), C::S(1)],
                &[C::I("a"), C::S(2)],
                &[C::I("b"), C::N("45047")],
            ],
        )
        .build();

    let staff: Vec<Employee> = read_records_from_bytes(&data).unwrap();
    assert_eq!(staff[0].hired, may_first_2023());
    assert_eq!(staff[0].hired, staff[1].hired);
}

#[test]
fn non_numeric_integer_names_value_and_column() {
    let data = WorkbookBuilder::new()
        .sheet(
            "Sheet1",
            &[
                &[C::I("Label"), C::I("Count")],
                &[C::I("ok"), C::N("3")],
                &[C::I("bad"), C::I("abc")],
            ],
        )
        .build();

    let err = read_records_from_bytes::<Counted>(&data).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The value 'abc' for the column Count is the wrong datatype (expected integer)"
    );
    assert!(matches!(
        err,
        Error::Coercion {
            kind: FieldKind::Int32,
            ..
        }
    ));
}

#[test]
fn extra_columns_ignored_missing_fields_default() {
    let data = WorkbookBuilder::new()
        .sheet(
            "Sheet1",
            &[&[C::I("Notes"), C::I("Label")], &[C::I("ignored"), C::I("x")]],
        )
        .build();

    let rows: Vec<Counted> = read_records_from_bytes(&data).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "x");
    assert_eq!(rows[0].count, 0);
}

#[test]
fn placeholder_becomes_default_text_but_fails_typed() {
    let data = WorkbookBuilder::new()
        .sheet("Sheet1", &[&[C::I("Label")], &[C::I("-")]])
        .build();
    let rows: Vec<Counted> = read_records_from_bytes(&data).unwrap();
    assert_eq!(rows[0].label, "");

    let data = WorkbookBuilder::new()
        .sheet("Sheet1", &[&[C::I("Count")], &[C::I("-")]])
        .build();
    assert!(read_records_from_bytes::<Counted>(&data).is_err());
}

#[test]
fn header_only_sheet_gives_no_records() {
    let data = WorkbookBuilder::new()
        .sheet("Sheet1", &[&[C::I("Label"), C::I("Count")]])
        .build();
    let rows: Vec<Counted> = read_records_from_bytes(&data).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn read_records_from_path() {
    let mut file = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .unwrap();
    file.write_all(&staff_workbook()).unwrap();
    file.flush().unwrap();

    let staff: Vec<Employee> = read_records(file.path()).unwrap();
    assert_eq!(staff[0].name, "Ann");
}
