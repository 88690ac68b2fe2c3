//! Runtime view of record fields and their comparison semantics.
//!
//! Records are `serde_json::Value` documents. A resolved field is exposed as
//! a borrowed [`FieldValue`], which carries the loose, dynamically typed
//! semantics the builder's clauses are defined in terms of: truthiness,
//! string coercion, loose (`==`) and strict (`===`) equality, and relational
//! comparison with numeric coercion.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// Borrowed value of a record field at evaluation time.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_filter::FieldValue;
///
/// let doc = json!({ "title": "", "tags": ["a"] });
/// assert!(!FieldValue::from_json(&doc["title"]).is_truthy());
/// assert!(FieldValue::from_json(&doc["tags"]).is_truthy());
/// assert_eq!(FieldValue::Undefined.to_js_string(), "undefined");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Field not present on the record.
    Undefined,
    /// Explicit JSON `null`.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value (borrowed).
    String(&'a str),
    /// Array value (borrowed).
    Array(&'a [Json]),
    /// Object value (borrowed).
    Object(&'a Map<String, Json>),
}

impl<'a> FieldValue<'a> {
    /// Wraps a JSON value.
    pub fn from_json(value: &'a Json) -> Self {
        match value {
            Json::Null => FieldValue::Null,
            Json::Bool(b) => FieldValue::Bool(*b),
            Json::Number(n) => FieldValue::Number(Number::from_json(n)),
            Json::String(s) => FieldValue::String(s),
            Json::Array(items) => FieldValue::Array(items),
            Json::Object(map) => FieldValue::Object(map),
        }
    }

    /// Truthiness: `undefined`, `null`, `false`, `0`, `NaN` and `""` are
    /// falsy; everything else (including empty arrays and objects) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Undefined | FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => {
                let n = n.to_f64();
                n != 0.0 && !n.is_nan()
            }
            FieldValue::String(s) => !s.is_empty(),
            FieldValue::Array(_) | FieldValue::Object(_) => true,
        }
    }

    /// Converts back to an owned JSON value; `None` for `Undefined`.
    pub fn to_json(&self) -> Option<Json> {
        match self {
            FieldValue::Undefined => None,
            FieldValue::Null => Some(Json::Null),
            FieldValue::Bool(b) => Some(Json::Bool(*b)),
            FieldValue::Number(n) => Some(n.to_json()),
            FieldValue::String(s) => Some(Json::String(s.to_string())),
            FieldValue::Array(items) => Some(Json::Array(items.to_vec())),
            FieldValue::Object(map) => Some(Json::Object((*map).clone())),
        }
    }

    /// String coercion, as produced by `'' + value`.
    ///
    /// Arrays join their elements with `,` (nullish elements become empty),
    /// objects become `[object Object]`.
    pub fn to_js_string(&self) -> Cow<'a, str> {
        match self {
            FieldValue::Undefined => Cow::Borrowed("undefined"),
            FieldValue::Null => Cow::Borrowed("null"),
            FieldValue::Bool(true) => Cow::Borrowed("true"),
            FieldValue::Bool(false) => Cow::Borrowed("false"),
            FieldValue::Number(n) => Cow::Owned(n.to_js_string()),
            FieldValue::String(s) => Cow::Borrowed(*s),
            FieldValue::Array(items) => Cow::Owned(
                items
                    .iter()
                    .map(|item| match FieldValue::from_json(item) {
                        FieldValue::Null | FieldValue::Undefined => Cow::Borrowed(""),
                        other => other.to_js_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            FieldValue::Object(_) => Cow::Borrowed("[object Object]"),
        }
    }

    /// Numeric coercion. Unparseable values become `NaN`.
    pub fn to_number(&self) -> f64 {
        self.to_primitive().to_number()
    }

    /// Loose equality (`==`), with type coercion between primitives.
    pub fn loose_eq(&self, other: &FieldValue<'_>) -> bool {
        if let (Some(a), Some(b)) = (self.container_ptr(), other.container_ptr()) {
            return a == b;
        }
        self.to_primitive().loose_eq(&other.to_primitive())
    }

    /// Strict equality (`===`): same type and same value, no coercion.
    pub fn strict_eq(&self, other: &FieldValue<'_>) -> bool {
        match (self, other) {
            (FieldValue::Undefined, FieldValue::Undefined) => true,
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Number(a), FieldValue::Number(b)) => a.to_f64() == b.to_f64(),
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Array(_), FieldValue::Array(_))
            | (FieldValue::Object(_), FieldValue::Object(_)) => {
                self.container_ptr() == other.container_ptr()
            }
            _ => false,
        }
    }

    /// Like [`strict_eq`](Self::strict_eq), except `NaN` equals `NaN`.
    /// This is the equality used by array `includes`.
    pub fn same_value_zero(&self, other: &FieldValue<'_>) -> bool {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                let (a, b) = (a.to_f64(), b.to_f64());
                a == b || (a.is_nan() && b.is_nan())
            }
            _ => self.strict_eq(other),
        }
    }

    /// Relational comparison used by `<`, `<=`, `>` and `>=`.
    ///
    /// Two strings compare by UTF-16 code units; anything else compares
    /// numerically. Returns `None` when either side coerces to `NaN`, in
    /// which case every relational operator is false.
    pub fn js_compare(&self, other: &FieldValue<'_>) -> Option<Ordering> {
        match (self.to_primitive(), other.to_primitive()) {
            (Primitive::String(a), Primitive::String(b)) => Some(compare_utf16(&a, &b)),
            (a, b) => a.to_number().partial_cmp(&b.to_number()),
        }
    }

    /// Rank of the value's type, used to order mixed types when sorting.
    pub(crate) fn type_rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Number(_) => 1,
            FieldValue::String(_) => 2,
            FieldValue::Array(_) => 3,
            FieldValue::Object(_) => 4,
            FieldValue::Null => 5,
            FieldValue::Undefined => 6,
        }
    }

    fn container_ptr(&self) -> Option<*const ()> {
        match self {
            FieldValue::Array(items) => Some(items.as_ptr() as *const ()),
            FieldValue::Object(map) => Some(*map as *const Map<String, Json> as *const ()),
            _ => None,
        }
    }

    fn to_primitive(&self) -> Primitive<'a> {
        match self {
            FieldValue::Undefined => Primitive::Undefined,
            FieldValue::Null => Primitive::Null,
            FieldValue::Bool(b) => Primitive::Bool(*b),
            FieldValue::Number(n) => Primitive::Number(n.to_f64()),
            FieldValue::String(s) => Primitive::String(Cow::Borrowed(*s)),
            FieldValue::Array(_) | FieldValue::Object(_) => Primitive::String(self.to_js_string()),
        }
    }
}

impl<'a> From<Option<&'a Json>> for FieldValue<'a> {
    fn from(value: Option<&'a Json>) -> Self {
        value.map_or(FieldValue::Undefined, FieldValue::from_json)
    }
}

/// A field value reduced to a primitive, the form coercions operate on.
enum Primitive<'a> {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Cow<'a, str>),
}

impl Primitive<'_> {
    fn to_number(&self) -> f64 {
        match self {
            Primitive::Undefined => f64::NAN,
            Primitive::Null => 0.0,
            Primitive::Bool(b) => f64::from(u8::from(*b)),
            Primitive::Number(n) => *n,
            Primitive::String(s) => parse_js_number(s),
        }
    }

    fn loose_eq(&self, other: &Primitive<'_>) -> bool {
        match (self, other) {
            (
                Primitive::Undefined | Primitive::Null,
                Primitive::Undefined | Primitive::Null,
            ) => true,
            (Primitive::Undefined | Primitive::Null, _)
            | (_, Primitive::Undefined | Primitive::Null) => false,
            (Primitive::Bool(a), Primitive::Bool(b)) => a == b,
            (Primitive::String(a), Primitive::String(b)) => a == b,
            (Primitive::Number(a), Primitive::Number(b)) => a == b,
            // bool/number/string mixes all coerce to numbers
            _ => self.to_number() == other.to_number(),
        }
    }
}

/// Orders strings by UTF-16 code units, the way JS string comparison does.
pub(crate) fn compare_utf16(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// String to number coercion: surrounding whitespace is ignored, the empty
/// string is `0`, `Infinity` is recognized, anything else unparseable is
/// `NaN`.
fn parse_js_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    // Rust accepts "inf"/"nan" spellings that must stay NaN here
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Serializes as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts a JSON number, keeping integers exact where possible.
    pub fn from_json(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Converts to a JSON number; non-finite floats become `null`.
    pub fn to_json(self) -> Json {
        match self {
            Number::I64(n) => Json::from(n),
            Number::U64(n) => Json::from(n),
            Number::F64(n) => serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number),
        }
    }

    /// Renders the number the way string coercion does: integral values
    /// without a fractional part, `NaN`, `Infinity` and `-Infinity`, and
    /// exponent notation below `1e-6` or from `1e21` in magnitude.
    pub fn to_js_string(self) -> String {
        match self {
            Number::I64(n) => n.to_string(),
            Number::U64(n) => n.to_string(),
            Number::F64(n) if n.is_nan() => "NaN".to_string(),
            Number::F64(n) if n == f64::INFINITY => "Infinity".to_string(),
            Number::F64(n) if n == f64::NEG_INFINITY => "-Infinity".to_string(),
            // -0 prints as 0
            Number::F64(n) if n == 0.0 => "0".to_string(),
            Number::F64(n) => format_js_float(n),
        }
    }
}

fn format_js_float(n: f64) -> String {
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);
