//! Boolean expression trees.
//!
//! An [`Expr`] is the composed predicate: clauses joined by conjunction and
//! disjunction, optionally negated. The builder produces one; the compiler
//! evaluates it. [`Expr::sanitize`] normalizes a tree so that empty groups
//! leave no trace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clause::Clause;
use crate::path::FieldPath;

/// A boolean predicate over one record.
///
/// # Example
///
/// ```
/// use standout_filter::{Clause, Expr, FieldPath, Op};
///
/// let a = Expr::Clause(Clause::compare(FieldPath::parse("a").unwrap(), Op::Eq, 1));
/// let b = Expr::Clause(Clause::truthy(FieldPath::parse("b").unwrap()));
///
/// let expr = Expr::All(vec![a, Expr::Any(vec![]), b]).sanitize();
/// assert_eq!(expr.to_string(), "(item.a == 1) && (item.b)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Constant result.
    Literal(bool),
    /// A single clause.
    Clause(Clause),
    /// Negation.
    Not(Box<Expr>),
    /// Conjunction: every child must match. Empty means no constraint.
    All(Vec<Expr>),
    /// Disjunction: at least one child must match. Empty means no constraint.
    Any(Vec<Expr>),
}

impl Default for Expr {
    fn default() -> Self {
        Expr::Literal(true)
    }
}

impl Expr {
    /// Returns `true` if the expression matches every record.
    pub fn is_trivial(&self) -> bool {
        matches!(self, Expr::Literal(true))
    }

    /// Nesting depth; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Clause(_) => 1,
            Expr::Not(inner) => 1 + inner.depth(),
            Expr::All(children) | Expr::Any(children) => {
                1 + children.iter().map(Expr::depth).max().unwrap_or(0)
            }
        }
    }

    /// Returns every field path the expression reads.
    pub fn paths(&self) -> Vec<&FieldPath> {
        let mut out = Vec::new();
        self.collect_paths(&mut out);
        out
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a FieldPath>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Clause(clause) => out.extend(clause.paths()),
            Expr::Not(inner) => inner.collect_paths(out),
            Expr::All(children) | Expr::Any(children) => {
                for child in children {
                    child.collect_paths(out);
                }
            }
        }
    }

    /// Removes empty groups and flattens redundant nesting.
    ///
    /// - empty `All`/`Any` nodes disappear from their parent, and a negated
    ///   empty group disappears with them;
    /// - single-child groups collapse to the child;
    /// - a group nested directly in a group of the same kind is inlined;
    /// - if nothing remains, the result is `Literal(true)`.
    ///
    /// Sanitizing is idempotent.
    pub fn sanitize(self) -> Expr {
        self.prune().unwrap_or_default()
    }

    fn prune(self) -> Option<Expr> {
        match self {
            Expr::Literal(_) | Expr::Clause(_) => Some(self),
            Expr::Not(inner) => inner.prune().map(|inner| Expr::Not(Box::new(inner))),
            Expr::All(children) => prune_group(children, true),
            Expr::Any(children) => prune_group(children, false),
        }
    }
}

fn prune_group(children: Vec<Expr>, conjunction: bool) -> Option<Expr> {
    let mut kept = Vec::with_capacity(children.len());
    for child in children {
        match child.prune() {
            Some(Expr::All(inner)) if conjunction => kept.extend(inner),
            Some(Expr::Any(inner)) if !conjunction => kept.extend(inner),
            Some(expr) => kept.push(expr),
            None => {}
        }
    }
    match kept.len() {
        0 => None,
        1 => kept.pop(),
        _ if conjunction => Some(Expr::All(kept)),
        _ => Some(Expr::Any(kept)),
    }
}

impl From<Clause> for Expr {
    fn from(clause: Clause) -> Self {
        Expr::Clause(clause)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(b) => write!(f, "{}", b),
            Expr::Clause(clause) => write!(f, "{}", clause),
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Clause(_) | Expr::Literal(_) => write!(f, "!{}", inner),
                _ => write!(f, "!({})", inner),
            },
            Expr::All(children) => write_joined(f, children, " && ", |child| {
                matches!(child, Expr::Any(_) | Expr::All(_))
            }),
            Expr::Any(children) => {
                write_joined(f, children, " || ", |child| matches!(child, Expr::Any(_)))
            }
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    children: &[Expr],
    separator: &str,
    needs_parens: impl Fn(&Expr) -> bool,
) -> fmt::Result {
    if children.is_empty() {
        return f.write_str("()");
    }
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if needs_parens(child) {
            write!(f, "({})", child)?;
        } else {
            write!(f, "{}", child)?;
        }
    }
    Ok(())
}
