//! Recursive-descent parser for selector text.
//!
//! ```text
//! selector    := [ requirement (',' requirement)* ]
//! requirement := '!' key
//!              | key [ op ]
//! op          := ('=' | '==' | '!=') value
//!              | ('in' | 'notin') valueList
//!              | ('>' | '<') integer
//! valueList   := '(' [ value (',' value)* ] ')'
//! ```
//!
//! Keys and values are validated as soon as they are read, and the first
//! error aborts the whole parse.

use std::collections::BTreeSet;

use crate::error::{Result, SelectorError};
use crate::lexer::{tokenize, Spanned, Token};
use crate::op::Operator;
use crate::requirement::Requirement;
use crate::selector::Selector;
use crate::validation::{validate_key, validate_value};

const EXPECTED_OPERATOR: &str = "'=', '==', '!=', 'in', 'notin', '>', '<', ',' or end of input";

/// Parses selector text into a [`Selector`].
///
/// The empty string parses to the empty selector, which matches every
/// label set.
///
/// # Example
///
/// ```
/// use kubesel::{parse, LabelSet};
///
/// let selector = parse("app in (nginx), tier!=cache, !canary").unwrap();
/// let labels = LabelSet::new().with("app", "nginx").with("tier", "web");
/// assert!(selector.matches(&labels));
///
/// assert!(parse("app ?? nginx").is_err());
/// ```
pub fn parse(input: &str) -> Result<Selector> {
    let tokens = tokenize(input)?;
    let selector = Parser::new(&tokens, input.len()).selector()?;
    tracing::trace!(input, requirements = selector.len(), "parsed label selector");
    Ok(selector)
}

struct Parser<'t, 'a> {
    tokens: &'t [Spanned<'a>],
    pos: usize,
    end: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Spanned<'a>], end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).map(|s| s.token)
    }

    /// Byte offset of the next token, or the end of input.
    fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |s| s.position)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> SelectorError {
        let found = self.peek().map(|t| t.describe().to_string()).unwrap_or_default();
        SelectorError::syntax(self.position(), found, expected)
    }

    /// True at a requirement boundary: a comma or the end of input.
    fn at_boundary(&self) -> bool {
        matches!(self.peek(), None | Some(Token::Comma))
    }

    fn selector(&mut self) -> Result<Selector> {
        let mut selector = Selector::everything();
        if self.peek().is_none() {
            return Ok(selector);
        }

        loop {
            selector = selector.add(self.requirement()?);
            match self.peek() {
                None => return Ok(selector),
                Some(Token::Comma) => {
                    self.advance();
                }
                Some(_) => return Err(self.unexpected("',' or end of input")),
            }
        }
    }

    fn requirement(&mut self) -> Result<Requirement> {
        if self.peek() == Some(Token::Bang) {
            self.advance();
            let key = self.key()?;
            if !self.at_boundary() {
                return Err(self.unexpected("',' or end of input"));
            }
            return Requirement::assemble(key, Operator::DoesNotExist, BTreeSet::new());
        }

        let key = self.key()?;
        if self.at_boundary() {
            return Requirement::assemble(key, Operator::Exists, BTreeSet::new());
        }

        let operator = match self.peek() {
            Some(Token::Equals) => Operator::Equals,
            Some(Token::DoubleEquals) => Operator::DoubleEquals,
            Some(Token::NotEquals) => Operator::NotEquals,
            Some(Token::GreaterThan) => Operator::GreaterThan,
            Some(Token::LessThan) => Operator::LessThan,
            Some(Token::Identifier("in")) => Operator::In,
            Some(Token::Identifier("notin")) => Operator::NotIn,
            _ => return Err(self.unexpected(EXPECTED_OPERATOR)),
        };
        self.advance();

        let values = if operator.is_set() {
            self.value_list()?
        } else if operator.is_ordering() {
            BTreeSet::from([self.ordering_operand()?])
        } else {
            BTreeSet::from([self.exact_value()?])
        };
        Requirement::assemble(key, operator, values)
    }

    fn key(&mut self) -> Result<String> {
        match self.peek() {
            Some(Token::Identifier(key)) => {
                validate_key(key)?;
                self.advance();
                Ok(key.to_string())
            }
            _ => Err(self.unexpected("label key")),
        }
    }

    fn value(&mut self, value: &str) -> Result<String> {
        validate_value(value)?;
        self.advance();
        Ok(value.to_string())
    }

    /// Value after `=`, `==` or `!=`; absent means the empty string.
    fn exact_value(&mut self) -> Result<String> {
        match self.peek() {
            Some(Token::Identifier(value)) => self.value(value),
            None | Some(Token::Comma) => Ok(String::new()),
            Some(_) => Err(self.unexpected("label value")),
        }
    }

    fn ordering_operand(&mut self) -> Result<String> {
        match self.peek() {
            Some(Token::Identifier(value)) => self.value(value),
            _ => Err(self.unexpected("integer value")),
        }
    }

    /// `'(' [ value (',' value)* ] ')'`; an empty slot is the empty string.
    fn value_list(&mut self) -> Result<BTreeSet<String>> {
        if self.peek() != Some(Token::OpenParen) {
            return Err(self.unexpected("'('"));
        }
        self.advance();

        let mut values = BTreeSet::new();
        loop {
            match self.peek() {
                Some(Token::Identifier(value)) => {
                    values.insert(self.value(value)?);
                    match self.peek() {
                        Some(Token::Comma) => {
                            self.advance();
                        }
                        Some(Token::CloseParen) => {
                            self.advance();
                            return Ok(values);
                        }
                        _ => return Err(self.unexpected("',' or ')'")),
                    }
                }
                Some(Token::Comma) => {
                    values.insert(String::new());
                    self.advance();
                }
                Some(Token::CloseParen) => {
                    values.insert(String::new());
                    self.advance();
                    return Ok(values);
                }
                _ => return Err(self.unexpected("label value, ',' or ')'")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationTarget;

    fn single(input: &str) -> Requirement {
        let selector = parse(input).unwrap();
        assert_eq!(selector.len(), 1, "{input}");
        selector.iter().next().unwrap().clone()
    }

    fn values(req: &Requirement) -> Vec<&str> {
        req.values().iter().map(String::as_str).collect()
    }

    #[test]
    fn empty_input_is_everything() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn each_operator() {
        let cases = [
            ("app", Operator::Exists, vec![]),
            ("!app", Operator::DoesNotExist, vec![]),
            ("app=x", Operator::Equals, vec!["x"]),
            ("app==x", Operator::DoubleEquals, vec!["x"]),
            ("app!=x", Operator::NotEquals, vec!["x"]),
            ("app in (x,y)", Operator::In, vec!["x", "y"]),
            ("app notin (x)", Operator::NotIn, vec!["x"]),
            ("n>5", Operator::GreaterThan, vec!["5"]),
            ("n<5", Operator::LessThan, vec!["5"]),
        ];
        for (input, op, expected) in cases {
            let req = single(input);
            assert_eq!(req.operator(), op, "{input}");
            assert_eq!(values(&req), expected, "{input}");
        }
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(
            parse(" app = x ,  tier in ( a , b ) ").unwrap(),
            parse("app=x,tier in (a,b)").unwrap()
        );
        assert_eq!(parse("! app").unwrap(), parse("!app").unwrap());
    }

    #[test]
    fn prefixed_keys() {
        let req = single("app.kubernetes.io/name=nginx");
        assert_eq!(req.key(), "app.kubernetes.io/name");
    }

    #[test]
    fn empty_exact_value() {
        assert_eq!(values(&single("app=")), vec![""]);
        assert_eq!(values(&single("app==")), vec![""]);
        let selector = parse("app=,tier").unwrap();
        assert_eq!(selector.len(), 2);
    }

    #[test]
    fn empty_slots_in_value_list() {
        assert_eq!(values(&single("app in ()")), vec![""]);
        assert_eq!(values(&single("app in (a,)")), vec!["", "a"]);
        assert_eq!(values(&single("app in (,a)")), vec!["", "a"]);
        assert_eq!(values(&single("app in (a,a)")), vec!["a"]);
    }

    #[test]
    fn in_and_notin_are_keys_outside_operator_position() {
        let selector = parse("in in (notin), notin").unwrap();
        let reqs = selector.requirements();
        assert_eq!(reqs[0].key(), "in");
        assert_eq!(reqs[0].operator(), Operator::In);
        assert_eq!(values(reqs[0]), vec!["notin"]);
        assert_eq!(reqs[1].key(), "notin");
        assert_eq!(reqs[1].operator(), Operator::Exists);
    }

    #[test]
    fn operator_words_are_case_sensitive() {
        assert!(parse("app IN (a)").unwrap_err().is_syntax());
        assert!(parse("app NotIn (a)").unwrap_err().is_syntax());
    }

    #[test]
    fn duplicate_keys_are_independent_constraints() {
        let selector = parse("app in (a,b),app!=b").unwrap();
        assert_eq!(selector.len(), 2);
    }

    #[test]
    fn syntax_errors() {
        for input in [
            ",",
            ",app",
            "app,",
            "app,,tier",
            "app=x,",
            "app in (a",
            "app in a)",
            "app in (a b)",
            "app in",
            "app notin",
            "app=(a)",
            "app = x y",
            "!app=x",
            "!",
            "!,app",
            "app >",
            "app ?? nginx",
            "app ! x",
            "(app)",
        ] {
            assert!(parse(input).unwrap_err().is_syntax(), "{input}");
        }
    }

    #[test]
    fn error_positions() {
        assert_eq!(
            parse("app=x,").unwrap_err(),
            SelectorError::syntax(6, "", "label key")
        );
        assert_eq!(
            parse("app foo").unwrap_err(),
            SelectorError::syntax(4, "foo", EXPECTED_OPERATOR)
        );
        assert_eq!(
            parse("a in (x").unwrap_err(),
            SelectorError::syntax(7, "", "',' or ')'")
        );
    }

    #[test]
    fn validation_errors() {
        match parse("-app=x").unwrap_err() {
            SelectorError::Validation { target, value, .. } => {
                assert_eq!(target, ValidationTarget::Key);
                assert_eq!(value, "-app");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        match parse("app in (ok, -bad)").unwrap_err() {
            SelectorError::Validation { target, value, .. } => {
                assert_eq!(target, ValidationTarget::Value);
                assert_eq!(value, "-bad");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse("a/b/c").unwrap_err().is_validation());
        assert!(parse("n>five").unwrap_err().is_validation());
        assert!(parse("n<1.5").unwrap_err().is_validation());
        // Ordering operands are label values too, so a sign is rejected.
        assert!(parse("n<-5").unwrap_err().is_validation());
    }

    #[test]
    fn first_error_wins() {
        // The key is invalid before the dangling comma is reached.
        assert!(parse("-app,").unwrap_err().is_validation());
        // The syntax error comes first here.
        assert!(parse("app ?? -bad").unwrap_err().is_syntax());
    }
}
