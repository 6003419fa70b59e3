//! Assertion Rules
//!
//! The compact rule DSL lesson authors write checks in, parsed once into a
//! closed sum type that both evaluators consume.

pub mod ast;
pub mod parse;

pub use ast::{CountOp, ExpectedValue, Rule, Selector};
pub use parse::parse_rule;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_text_reparses_identically() {
        let inputs = [
            "exists:h1",
            "exists:!doctype",
            "count:P >= 2",
            "text:h1=Hello World",
            "rule:.nav a  color = red",
            "rule:body background-color=*",
            "nonsense",
        ];

        for input in inputs {
            let first = parse_rule(input);
            let second = parse_rule(&first.to_string());
            assert_eq!(first, second, "round trip of {:?}", input);
        }
    }
}
