//! Value enum for dynamic cell values

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic value held by one cell of a row.
///
/// Host rows expose their fields through this enum so the engine can search,
/// sort and export them without knowing the record type.
///
/// # Type Mapping
///
/// | Field kind | Rust Variant |
/// |------------|--------------|
/// | missing / null | `Null` |
/// | flag | `Bool` |
/// | small integer | `Int` |
/// | big integer | `Long` |
/// | floating point | `Float` |
/// | money, quantities | `Decimal` |
/// | text | `String` |
/// | record reference | `Guid` |
/// | calendar date | `Date` |
/// | timestamp | `DateTime` |
/// | tags, multi-select | `List` |
///
/// # Example
///
/// ```
/// use datagrid_lib::model::CellValue;
///
/// let name = CellValue::from("Contoso");
/// let revenue = CellValue::from(1_000_000i64);
/// let active = CellValue::from(true);
/// let empty = CellValue::from(None::<String>);
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Calendar date without time.
    Date(NaiveDate),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Several values in one cell.
    List(Vec<CellValue>),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Long(_) => "long",
            CellValue::Float(_) => "float",
            CellValue::Decimal(_) => "decimal",
            CellValue::String(_) => "string",
            CellValue::Guid(_) => "guid",
            CellValue::Date(_) => "date",
            CellValue::DateTime(_) => "datetime",
            CellValue::List(_) => "list",
        }
    }

    /// Returns the plain-text display form used for searching and export.
    ///
    /// Null renders as the empty string.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(v) => v.to_string(),
            CellValue::Int(v) => v.to_string(),
            CellValue::Long(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Decimal(v) => v.normalize().to_string(),
            CellValue::String(v) => v.clone(),
            CellValue::Guid(v) => v.to_string(),
            CellValue::Date(v) => v.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(v) => v.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::List(items) => items
                .iter()
                .map(CellValue::display)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Returns `true` if the value is one of the numeric variants.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Int(_) | CellValue::Long(_) | CellValue::Float(_) | CellValue::Decimal(_)
        )
    }

    /// Sort rank of the value's kind. Kinds never interleave.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Int(_) | CellValue::Long(_) | CellValue::Float(_) | CellValue::Decimal(_) => 0,
            CellValue::String(_) => 1,
            CellValue::Bool(_) => 2,
            CellValue::Guid(_) => 3,
            CellValue::Date(_) => 4,
            CellValue::DateTime(_) => 5,
            CellValue::List(_) => 6,
            CellValue::Null => 7,
        }
    }

    fn numeric_key(&self) -> Option<NumericKey> {
        let key = match self {
            CellValue::Int(v) => NumericKey::Exact(Decimal::from(*v)),
            CellValue::Long(v) => NumericKey::Exact(Decimal::from(*v)),
            CellValue::Decimal(v) => NumericKey::Exact(*v),
            CellValue::Float(v) => match Decimal::from_f64(*v) {
                Some(d) => NumericKey::Exact(d),
                None => NumericKey::Beyond(*v),
            },
            _ => return None,
        };
        Some(key)
    }

    /// Total ordering used by the default sort comparator.
    ///
    /// Values are grouped by kind first (numbers, text, booleans, GUIDs,
    /// dates, timestamps, lists) with `Null` after everything, then compared
    /// within the kind. All numeric variants share one scale, strings
    /// compare case-insensitively and lists compare element by element.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        let rank = self.kind_rank().cmp(&other.kind_rank());
        if rank != Ordering::Equal {
            return rank;
        }
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::String(a), CellValue::String(b)) => compare_text(a, b),
            (CellValue::Guid(a), CellValue::Guid(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            (CellValue::List(a), CellValue::List(b)) => compare_lists(a, b),
            (a, b) => match (a.numeric_key(), b.numeric_key()) {
                (Some(x), Some(y)) => x.compare(&y),
                _ => Ordering::Equal,
            },
        }
    }
}

/// A number on the shared numeric scale.
///
/// Integers, decimals and floats that fit a `Decimal` compare as decimals. The rest
/// (infinities, NaN, magnitudes past `Decimal::MAX`) sit beyond every
/// decimal on the side of their sign and order among themselves by
/// `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
enum NumericKey {
    Exact(Decimal),
    Beyond(f64),
}

impl NumericKey {
    fn compare(&self, other: &NumericKey) -> Ordering {
        match (self, other) {
            (NumericKey::Exact(a), NumericKey::Exact(b)) => a.cmp(b),
            (NumericKey::Beyond(a), NumericKey::Beyond(b)) => a.total_cmp(b),
            (NumericKey::Beyond(a), NumericKey::Exact(_)) => beyond_side(*a),
            (NumericKey::Exact(_), NumericKey::Beyond(b)) => beyond_side(*b).reverse(),
        }
    }
}

fn beyond_side(v: f64) -> Ordering {
    if v.is_sign_negative() {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn compare_lists(a: &[CellValue], b: &[CellValue]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = x.compare(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Long(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Long(i64::from(v))
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<Decimal> for CellValue {
    fn from(v: Decimal) -> Self {
        CellValue::Decimal(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::String(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(v.to_string())
    }
}

impl From<Uuid> for CellValue {
    fn from(v: Uuid) -> Self {
        CellValue::Guid(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for CellValue {
    fn from(v: Vec<T>) -> Self {
        CellValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(CellValue::Null.display(), "");
        assert_eq!(CellValue::from("Acme").display(), "Acme");
        assert_eq!(CellValue::from(42i64).display(), "42");
        assert_eq!(CellValue::from(Decimal::new(12_500, 2)).display(), "125");
        assert_eq!(
            CellValue::from(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()).display(),
            "2024-03-09"
        );
        assert_eq!(
            CellValue::from(vec!["vip", "finance"]).display(),
            "vip, finance"
        );
    }

    #[test]
    fn test_null_orders_last() {
        assert_eq!(CellValue::Null.compare(&CellValue::from(1)), Ordering::Greater);
        assert_eq!(CellValue::from("a").compare(&CellValue::Null), Ordering::Less);
        assert_eq!(CellValue::Null.compare(&CellValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_numeric_across_kinds() {
        assert_eq!(CellValue::from(2).compare(&CellValue::from(10i64)), Ordering::Less);
        assert_eq!(
            CellValue::from(Decimal::new(105, 1)).compare(&CellValue::from(10)),
            Ordering::Greater
        );
        assert_eq!(CellValue::from(2.5).compare(&CellValue::from(3)), Ordering::Less);
    }

    #[test]
    fn test_float_and_decimal_share_one_scale() {
        let float = CellValue::from(2.5);
        assert_eq!(float.compare(&CellValue::from(Decimal::new(25, 1))), Ordering::Equal);
        assert_eq!(float.compare(&CellValue::from(Decimal::new(251, 2))), Ordering::Less);
        assert_eq!(float.compare(&CellValue::from(2)), Ordering::Greater);
        assert_eq!(
            CellValue::from(f64::INFINITY).compare(&CellValue::from(i64::MAX)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::from(f64::NEG_INFINITY).compare(&CellValue::from(i64::MIN)),
            Ordering::Less
        );
        assert_eq!(CellValue::from(1e30).compare(&CellValue::from(f64::INFINITY)), Ordering::Less);
    }

    #[test]
    fn test_kinds_never_interleave() {
        let ten = CellValue::from(10i64);
        let nine = CellValue::from(9i64);
        let nine_text = CellValue::from("9");
        assert_eq!(nine.compare(&ten), Ordering::Less);
        assert_eq!(ten.compare(&nine_text), Ordering::Less);
        assert_eq!(nine.compare(&nine_text), Ordering::Less);
        assert_eq!(nine_text.compare(&CellValue::from(true)), Ordering::Less);
        assert_eq!(CellValue::from(vec![1, 2]).compare(&CellValue::from(vec![1])), Ordering::Greater);
    }

    #[test]
    fn test_strings_case_insensitive() {
        assert_eq!(
            CellValue::from("apple").compare(&CellValue::from("Banana")),
            Ordering::Less
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(CellValue::from(Some("x")), CellValue::String("x".into()));
        assert!(CellValue::from(None::<i32>).is_null());
    }
}
