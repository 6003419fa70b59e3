//! Rule Representation
//!
//! Typed form of a check's compact rule text. Pure data, no evaluation logic.

use std::fmt;

/// What an HTML rule points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// The `<!DOCTYPE>` declaration
    Doctype,
    /// A lowercase tag name like "h1"
    Tag(String),
}

/// Comparison used by `count:` rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOp {
    AtLeast,
    AtMost,
    Equal,
    MoreThan,
    LessThan,
}

/// Expected value of a CSS declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedValue {
    /// `*`: any non-empty value
    Wildcard,
    Exact(String),
}

/// A parsed assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// `exists:h1`
    Exists { selector: Selector },
    /// `count:p>=1`
    Count {
        selector: Selector,
        op: CountOp,
        threshold: u32,
    },
    /// `text:h1=Hello World`
    Text { selector: Selector, expected: String },
    /// `rule:.container display=flex`
    CssDeclaration {
        selector: String,
        property: String,
        expected: ExpectedValue,
    },
    /// Anything the parser could not make sense of
    Invalid { raw: String },
}

impl Rule {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Rule::Invalid { .. })
    }

    /// Whether this rule is answered from CSS rather than HTML
    pub fn is_css(&self) -> bool {
        matches!(self, Rule::CssDeclaration { .. })
    }
}

impl CountOp {
    /// Operator spellings, longest first so `>=` wins over `>`
    pub const ALL: [CountOp; 5] = [
        CountOp::AtLeast,
        CountOp::AtMost,
        CountOp::Equal,
        CountOp::MoreThan,
        CountOp::LessThan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CountOp::AtLeast => ">=",
            CountOp::AtMost => "<=",
            CountOp::Equal => "==",
            CountOp::MoreThan => ">",
            CountOp::LessThan => "<",
        }
    }

    /// Symbol shown to learners
    pub fn symbol(self) -> &'static str {
        match self {
            CountOp::AtLeast => "≥",
            CountOp::AtMost => "≤",
            CountOp::Equal => "=",
            CountOp::MoreThan => ">",
            CountOp::LessThan => "<",
        }
    }

    pub fn holds(self, actual: usize, threshold: u32) -> bool {
        let threshold = threshold as usize;
        match self {
            CountOp::AtLeast => actual >= threshold,
            CountOp::AtMost => actual <= threshold,
            CountOp::Equal => actual == threshold,
            CountOp::MoreThan => actual > threshold,
            CountOp::LessThan => actual < threshold,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Doctype => f.write_str("!DOCTYPE"),
            Selector::Tag(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedValue::Wildcard => f.write_str("*"),
            ExpectedValue::Exact(value) => f.write_str(value),
        }
    }
}

/// Canonical rule text; parsing it yields the same rule back
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Exists { selector } => write!(f, "exists:{}", selector),
            Rule::Count {
                selector,
                op,
                threshold,
            } => write!(f, "count:{}{}{}", selector, op.as_str(), threshold),
            Rule::Text { selector, expected } => write!(f, "text:{}={}", selector, expected),
            Rule::CssDeclaration {
                selector,
                property,
                expected,
            } => write!(f, "rule:{} {}={}", selector, property, expected),
            Rule::Invalid { raw } => f.write_str(raw),
        }
    }
}
