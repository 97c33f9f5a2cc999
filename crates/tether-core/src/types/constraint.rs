//! Version constraints (`^1.2.0`, `~2.3.0`, `>=1.0.0 <2.0.0`).
//!
//! A constraint is a list of primitive comparators that must all hold.
//! Caret and tilde ranges never survive parsing: they are desugared into a
//! lower and an upper bound so that every violation can be reported as a
//! single operator and bound.

use std::fmt;
use std::str::FromStr;

use super::version::{Version, VersionError};

/// Comparison operator for a primitive comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Exact,     // =1.0.0
    NotEqual,  // !=1.0.0
    Greater,   // >1.0.0
    GreaterEq, // >=1.0.0
    Less,      // <1.0.0
    LessEq,    // <=1.0.0
}

/// Individual version comparator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    pub op: Op,
    pub version: Version,
}

/// AND-combined list of comparators. An empty list matches every version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraint {
    pub comparators: Vec<Comparator>,
}

/// Operator prefix as written, before desugaring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    Primitive(Op),
    Caret,
    Tilde,
}

// Longest operators first so `>=` is not read as `>`
const PREFIXES: &[(&str, Prefix)] = &[
    (">=", Prefix::Primitive(Op::GreaterEq)),
    ("<=", Prefix::Primitive(Op::LessEq)),
    ("!=", Prefix::Primitive(Op::NotEqual)),
    (">", Prefix::Primitive(Op::Greater)),
    ("<", Prefix::Primitive(Op::Less)),
    ("=", Prefix::Primitive(Op::Exact)),
    ("^", Prefix::Caret),
    ("~", Prefix::Tilde),
];

impl Op {
    /// Operator as written in a constraint
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Exact => "=",
            Op::NotEqual => "!=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Comparator {
    /// Create a new comparator
    pub fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    /// Check if a version matches this comparator
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Exact => version == &self.version,
            Op::NotEqual => version != &self.version,
            Op::Greater => version > &self.version,
            Op::GreaterEq => version >= &self.version,
            Op::Less => version < &self.version,
            Op::LessEq => version <= &self.version,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl Constraint {
    /// Constraint that accepts any version
    pub fn any() -> Self {
        Self::default()
    }

    /// Parse a constraint expression.
    ///
    /// Blank input yields [`Constraint::any`]. Tokens are separated by
    /// whitespace or commas; a token without a valid version literal is
    /// skipped, and the parse only fails when nothing usable remains.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::any());
        }

        let mut comparators = Vec::new();
        let mut words = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|w| !w.is_empty());

        while let Some(word) = words.next() {
            let (prefix, rest) = split_prefix(word);

            // `>= 1.0.0`: operator and version written apart
            let literal = if rest.is_empty() && prefix.is_some() {
                match words.next() {
                    Some(next) => next,
                    None => break,
                }
            } else {
                rest
            };

            let Ok(version) = literal.parse::<Version>() else {
                continue;
            };

            desugar(
                prefix.unwrap_or(Prefix::Primitive(Op::Exact)),
                version,
                &mut comparators,
            );
        }

        if comparators.is_empty() {
            return Err(VersionError::NoVersionInConstraint {
                input: trimmed.to_string(),
            });
        }

        Ok(Self { comparators })
    }

    /// Whether this constraint accepts every version
    pub fn is_any(&self) -> bool {
        self.comparators.is_empty()
    }

    /// Check if a version matches every comparator
    pub fn matches(&self, version: &Version) -> bool {
        self.check(version).is_ok()
    }

    /// Evaluate comparators in order, stopping at the first violated one
    pub fn check(&self, version: &Version) -> Result<(), &Comparator> {
        match self.comparators.iter().find(|c| !c.matches(version)) {
            Some(violated) => Err(violated),
            None => Ok(()),
        }
    }
}

fn split_prefix(word: &str) -> (Option<Prefix>, &str) {
    for (symbol, prefix) in PREFIXES {
        if let Some(rest) = word.strip_prefix(symbol) {
            return (Some(*prefix), rest);
        }
    }
    (None, word)
}

fn desugar(prefix: Prefix, version: Version, out: &mut Vec<Comparator>) {
    match prefix {
        Prefix::Primitive(op) => out.push(Comparator::new(op, version)),
        Prefix::Caret => {
            // Caret pins the leftmost non-zero of major/minor
            let upper = if version.major == 0 {
                version.bump_minor()
            } else {
                version.bump_major()
            };
            out.push(Comparator::new(Op::GreaterEq, version));
            out.push(Comparator::new(Op::Less, upper));
        },
        Prefix::Tilde => {
            let upper = version.bump_minor();
            out.push(Comparator::new(Op::GreaterEq, version));
            out.push(Comparator::new(Op::Less, upper));
        },
    }
}

impl FromStr for Constraint {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return f.write_str("*");
        }
        for (i, comparator) in self.comparators.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", comparator)?;
        }
        Ok(())
    }
}
