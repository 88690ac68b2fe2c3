//! Literal operands and their textual rendering.
//!
//! An [`Operand`] is the right-hand side of a clause. It owns its data so it
//! can be stored in the expression tree, and renders as a quoted literal when
//! an expression is displayed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{FieldValue, Number};

/// Owned scalar used as a clause operand.
///
/// # Example
///
/// ```
/// use standout_filter::Operand;
///
/// assert_eq!(Operand::from("it's").to_string(), r"'it\'s'");
/// assert_eq!(Operand::from(2.5).to_string(), "2.5");
/// assert_eq!(Operand::from(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// `null`.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Numeric literal.
    Number(Number),
    /// String literal.
    String(String),
}

impl Operand {
    /// Borrows the operand as a field value, for comparison.
    pub fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Operand::Null => FieldValue::Null,
            Operand::Bool(b) => FieldValue::Bool(*b),
            Operand::Number(n) => FieldValue::Number(*n),
            Operand::String(s) => FieldValue::String(s),
        }
    }

    /// String coercion of the operand (`'' + value`), unquoted.
    pub fn to_js_string(&self) -> String {
        self.as_field_value().to_js_string().into_owned()
    }
}

/// Writes `s` as a single-quoted literal, escaping `\` and `'`.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Null => f.write_str("null"),
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::Number(n) => write!(f, "{}", n),
            Operand::String(s) => write_quoted(f, s),
        }
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_string())
    }
}

impl From<&String> for Operand {
    fn from(s: &String) -> Self {
        Operand::String(s.clone())
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<()> for Operand {
    fn from(_: ()) -> Self {
        Operand::Null
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        value.map_or(Operand::Null, Into::into)
    }
}

macro_rules! operand_from_number {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Operand {
                fn from(n: $source) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )+
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
