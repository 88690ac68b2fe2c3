//! Comparison operators for explicit-operator clauses.
//!
//! The [`Op`] enum covers the operator tokens accepted by
//! `where_op(path, token, value)`. Tokens are parsed with [`str::parse`];
//! anything outside the table is rejected rather than inserted verbatim.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::value::FieldValue;

/// Comparison operator for a clause.
///
/// - **Equality**: `Eq` (`==`, loose) and `StrictEq` (`===`)
/// - **Inequality**: `Ne` (`!=`, loose) and `StrictNe` (`!==`)
/// - **Relational**: `Gt`, `Gte`, `Lt`, `Lte`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Loose equality, with type coercion.
    #[serde(rename = "==")]
    Eq,
    /// Loose inequality.
    #[serde(rename = "!=")]
    Ne,
    /// Strict equality: same type and value.
    #[serde(rename = "===")]
    StrictEq,
    /// Strict inequality.
    #[serde(rename = "!==")]
    StrictNe,
    /// Greater than.
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Gte,
    /// Less than.
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Lte,
}

impl Op {
    /// Evaluates a relational comparison given an ordering result.
    ///
    /// A missing ordering (either side `NaN`) makes every operator false.
    pub fn eval_ordering(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Applies the operator to a field value (left) and an operand (right).
    pub fn apply(self, left: &FieldValue<'_>, right: &FieldValue<'_>) -> bool {
        match self {
            Op::Eq => left.loose_eq(right),
            Op::Ne => !left.loose_eq(right),
            Op::StrictEq => left.strict_eq(right),
            Op::StrictNe => !left.strict_eq(right),
            relational => relational.eval_ordering(left.js_compare(right)),
        }
    }

    /// Returns the operator token.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::StrictEq => "===",
            Op::StrictNe => "!==",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl FromStr for Op {
    type Err = FilterError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "==" => Ok(Op::Eq),
            "!=" => Ok(Op::Ne),
            "===" => Ok(Op::StrictEq),
            "!==" => Ok(Op::StrictNe),
            ">" => Ok(Op::Gt),
            ">=" => Ok(Op::Gte),
            "<" => Ok(Op::Lt),
            "<=" => Ok(Op::Lte),
            _ => Err(FilterError::UnknownOperator(token.to_string())),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
