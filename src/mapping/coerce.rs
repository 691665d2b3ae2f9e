//! Text → value coercion, one function per field kind.

use super::{FieldKind, FieldValue};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fractional digits kept by decimal coercion.
pub const DECIMAL_SCALE: u32 = 5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Exclusive serial bounds, matching the years 0100 through 9999.
const MIN_SERIAL: f64 = -657_435.0;
const MAX_SERIAL: f64 = 2_958_466.0;

/// Two-digit years land in the hundred years ending here.
const TWO_DIGIT_YEAR_MAX: i32 = 2049;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

const SHORT_YEAR_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
];

const SHORT_YEAR_DATE_FORMATS: &[&str] = &["%m/%d/%y"];

/// Coerce `raw` according to `kind`.
///
/// `Text` and `Other` pass the string through; the setter of an `Other`
/// field decides whether it accepts it.
pub fn coerce(kind: FieldKind, raw: &str) -> Option<FieldValue> {
    match kind {
        FieldKind::DateTime => parse_datetime(raw).map(FieldValue::DateTime),
        FieldKind::Decimal => parse_decimal(raw).map(FieldValue::Decimal),
        FieldKind::Int32 => parse_int32(raw).map(FieldValue::Int32),
        FieldKind::Text | FieldKind::Other => Some(FieldValue::Text(raw.to_string())),
    }
}

/// Parse a date literal, falling back to a spreadsheet date serial.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    parse_date_literal(raw).or_else(|| {
        let serial = raw.trim().parse::<f64>().ok()?;
        from_serial(serial)
    })
}

/// Parse a locale-invariant date or date-time literal.
///
/// Years are written with four digits, except in the US `m/d/yy` form where
/// two digits map into 1950..=2049. RFC 3339 values keep their written
/// wall-clock time; the offset is dropped.
pub fn parse_date_literal(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    // chrono's %Y also takes one to three digits; require the full year in the text
    parse_formats(s, DATETIME_FORMATS, DATE_FORMATS)
        .find(|dt| s.contains(&format!("{:04}", dt.year())))
        .or_else(|| {
            parse_formats(s, SHORT_YEAR_DATETIME_FORMATS, SHORT_YEAR_DATE_FORMATS)
                .next()
                .and_then(window_two_digit_year)
        })
}

fn parse_formats<'a>(
    s: &'a str,
    datetime_formats: &'static [&'static str],
    date_formats: &'static [&'static str],
) -> impl Iterator<Item = NaiveDateTime> + 'a {
    let datetimes = datetime_formats
        .iter()
        .filter_map(move |fmt| NaiveDateTime::parse_from_str(s, fmt).ok());
    let dates = date_formats
        .iter()
        .filter_map(move |fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN));
    datetimes.chain(dates)
}

fn window_two_digit_year(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    if dt.year() > TWO_DIGIT_YEAR_MAX {
        dt.with_year(dt.year() - 100)
    } else {
        Some(dt)
    }
}

/// Convert a spreadsheet date serial to a date-time.
///
/// Days count from 1899-12-30; the fraction is the time of day, rounded to
/// the millisecond. For negative serials the fraction still moves forward
/// from midnight, so -1.25 is 1899-12-29 06:00.
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial <= MIN_SERIAL || serial >= MAX_SERIAL {
        return None;
    }

    let half = if serial >= 0.0 { 0.5 } else { -0.5 };
    let mut millis = (serial * MILLIS_PER_DAY + half) as i64;
    if millis < 0 {
        let day = MILLIS_PER_DAY as i64;
        millis -= (millis % day) * 2;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Parse a decimal, allowing an exponent, rounded to [`DECIMAL_SCALE`]
/// places with midpoints away from zero.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(pos) => (&s[..pos], s[pos + 1..].parse::<i32>().ok()?),
        None => (s, 0),
    };

    let mut value = Decimal::from_str(mantissa).ok()?;
    if !value.is_zero() {
        if exponent > 28 + DECIMAL_SCALE as i32 * 2 {
            return None;
        }
        for _ in 0..exponent.max(0) {
            value = value.checked_mul(Decimal::TEN)?;
        }
        for _ in 0..exponent.min(0).unsigned_abs().min(64) {
            value = value.checked_div(Decimal::TEN)?;
        }
    }

    Some(value.round_dp_with_strategy(DECIMAL_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

/// Parse a 32-bit integer literal with an optional sign.
pub fn parse_int32(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}
