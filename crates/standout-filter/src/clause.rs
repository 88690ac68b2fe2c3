//! Clause types for filter predicates.
//!
//! A [`Clause`] is one atomic boolean test over a record. Each clause is
//! self-contained; combining clauses is the job of [`Expr`](crate::Expr).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::op::Op;
use crate::operand::{write_quoted, Operand};
use crate::path::FieldPath;
use crate::value::FieldValue;

/// A single filter test.
///
/// The guarded shapes (`In`, `Includes`, `IncludesKey`, `Contains`) evaluate
/// to `false` when the target field is absent or falsy, instead of failing.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_filter::{Clause, FieldPath, Op};
///
/// let clause = Clause::compare(FieldPath::parse("a").unwrap(), Op::Gt, 1);
/// assert_eq!(clause.to_string(), "(item.a > 1)");
/// assert!(clause.matches(&json!({ "a": 2 })));
/// assert!(!clause.matches(&json!({})));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", from = "ClauseDef")]
pub enum Clause {
    /// The field is truthy.
    Truthy { field: FieldPath },

    /// The field compares to a literal with an operator.
    Compare {
        field: FieldPath,
        op: Op,
        value: Operand,
    },

    /// The field's string form is one of the candidates.
    In {
        field: FieldPath,
        candidates: Vec<String>,
    },

    /// The list field contains the value (or the string field contains the
    /// value's string form).
    Includes { field: FieldPath, value: Operand },

    /// Some element of the list field has `element.key === value`.
    IncludesKey {
        field: FieldPath,
        key: FieldPath,
        value: Operand,
    },

    /// The string field contains the needle. Case-insensitive needles are
    /// kept lowercased.
    Contains {
        field: FieldPath,
        needle: String,
        case_sensitive: bool,
    },
}

impl Clause {
    /// Creates a truthiness clause.
    pub fn truthy(field: FieldPath) -> Self {
        Clause::Truthy { field }
    }

    /// Creates a comparison clause.
    pub fn compare(field: FieldPath, op: Op, value: impl Into<Operand>) -> Self {
        Clause::Compare {
            field,
            op,
            value: value.into(),
        }
    }

    /// Creates a membership clause. Candidates are stored in string form,
    /// since the field is compared by its string form.
    pub fn one_of<I, V>(field: FieldPath, candidates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        Clause::In {
            field,
            candidates: candidates
                .into_iter()
                .map(|candidate| candidate.into().to_js_string())
                .collect(),
        }
    }

    /// Creates a list-includes clause.
    pub fn includes(field: FieldPath, value: impl Into<Operand>) -> Self {
        Clause::Includes {
            field,
            value: value.into(),
        }
    }

    /// Creates a list-element key clause.
    pub fn includes_key(field: FieldPath, key: FieldPath, value: impl Into<Operand>) -> Self {
        Clause::IncludesKey {
            field,
            key,
            value: value.into(),
        }
    }

    /// Creates a substring clause. Case-insensitive needles are stored
    /// lowercased.
    pub fn contains(field: FieldPath, needle: &str, case_sensitive: bool) -> Self {
        Clause::Contains {
            field,
            needle: if case_sensitive {
                needle.to_string()
            } else {
                needle.to_lowercase()
            },
            case_sensitive,
        }
    }

    /// Returns the field this clause tests.
    pub fn field(&self) -> &FieldPath {
        match self {
            Clause::Truthy { field }
            | Clause::Compare { field, .. }
            | Clause::In { field, .. }
            | Clause::Includes { field, .. }
            | Clause::IncludesKey { field, .. }
            | Clause::Contains { field, .. } => field,
        }
    }

    /// Returns every path the clause reads, including element keys.
    pub fn paths(&self) -> Vec<&FieldPath> {
        match self {
            Clause::IncludesKey { field, key, .. } => vec![field, key],
            other => vec![other.field()],
        }
    }

    /// Evaluates this clause against a record.
    pub fn matches(&self, record: &Json) -> bool {
        let value = self.field().resolve(record);
        match self {
            Clause::Truthy { .. } => value.is_truthy(),
            Clause::Compare { op, value: rhs, .. } => op.apply(&value, &rhs.as_field_value()),
            _ if !value.is_truthy() => false,
            Clause::In { candidates, .. } => {
                let text = value.to_js_string();
                candidates.iter().any(|candidate| *candidate == text)
            }
            Clause::Includes { value: needle, .. } => match value {
                FieldValue::Array(items) => {
                    let needle = needle.as_field_value();
                    items
                        .iter()
                        .any(|item| FieldValue::from_json(item).same_value_zero(&needle))
                }
                FieldValue::String(s) => s.contains(needle.to_js_string().as_str()),
                _ => false,
            },
            Clause::IncludesKey {
                key, value: rhs, ..
            } => match value {
                FieldValue::Array(items) => {
                    let rhs = rhs.as_field_value();
                    items.iter().any(|item| key.resolve(item).strict_eq(&rhs))
                }
                _ => false,
            },
            Clause::Contains {
                needle,
                case_sensitive,
                ..
            } => match value {
                FieldValue::String(s) if *case_sensitive => s.contains(needle.as_str()),
                FieldValue::String(s) => s.to_lowercase().contains(needle.as_str()),
                _ => false,
            },
        }
    }
}

/// Deserialized form of a [`Clause`], normalized through the constructors.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClauseDef {
    Truthy {
        field: FieldPath,
    },
    Compare {
        field: FieldPath,
        op: Op,
        value: Operand,
    },
    In {
        field: FieldPath,
        candidates: Vec<String>,
    },
    Includes {
        field: FieldPath,
        value: Operand,
    },
    IncludesKey {
        field: FieldPath,
        key: FieldPath,
        value: Operand,
    },
    Contains {
        field: FieldPath,
        needle: String,
        #[serde(default)]
        case_sensitive: bool,
    },
}

impl From<ClauseDef> for Clause {
    fn from(def: ClauseDef) -> Self {
        match def {
            ClauseDef::Truthy { field } => Clause::Truthy { field },
            ClauseDef::Compare { field, op, value } => Clause::Compare { field, op, value },
            ClauseDef::In { field, candidates } => Clause::In { field, candidates },
            ClauseDef::Includes { field, value } => Clause::Includes { field, value },
            ClauseDef::IncludesKey { field, key, value } => {
                Clause::IncludesKey { field, key, value }
            }
            ClauseDef::Contains {
                field,
                needle,
                case_sensitive,
            } => Clause::contains(field, &needle, case_sensitive),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Truthy { field } => write!(f, "(item.{})", field),
            Clause::Compare { field, op, value } => write!(f, "(item.{} {} {})", field, op, value),
            Clause::In { field, candidates } => {
                write!(f, "(item.{} ? [", field)?;
                for (i, candidate) in candidates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, candidate)?;
                }
                write!(f, "].includes('' + item.{}) : false)", field)
            }
            Clause::Includes { field, value } => {
                write!(f, "(item.{0} ? item.{0}.includes({1}) : false)", field, value)
            }
            Clause::IncludesKey { field, key, value } => write!(
                f,
                "(item.{0} ? item.{0}.some(element => element.{1} === {2}) : false)",
                field, key, value
            ),
            Clause::Contains {
                field,
                needle,
                case_sensitive,
            } => {
                let lower = if *case_sensitive { "" } else { ".toLowerCase()" };
                write!(f, "(item.{0} ? item.{0}{1}.includes(", field, lower)?;
                write_quoted(f, needle)?;
                f.write_str(") : false)")
            }
        }
    }
}
