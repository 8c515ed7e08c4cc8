//! Regular-expression filtering of image and tag names.
//!
//! A filter is a list of expressions that every name must satisfy. An
//! expression prefixed with `!` must *not* match, and the set-wide `invert`
//! flag flips the meaning of every expression at once.

use crate::error::{NexusError, Result};
use regex::Regex;


/// Marker that negates a single expression.
pub const NEGATION_PREFIX: char = '!';

/// Decides whether a name passes one expression.
///
/// The baseline is "the regex matches"; `invert` flips it for the whole set
/// and `negate` flips it again for this expression only.
///
/// # Examples
///
/// ```
/// use libnexus::filter::effective_pass;
///
/// assert!(effective_pass(false, false, true));
/// assert!(effective_pass(true, false, false));
/// assert!(effective_pass(true, true, true));
/// ```
pub fn effective_pass(invert: bool, negate: bool, matched: bool) -> bool {
    matched == (!invert ^ negate)
}

/// A single compiled filter expression.
#[derive(Debug, Clone)]
pub struct Expression {
    pattern: Regex,
    negate: bool,
}

impl Expression {
    /// Compiles a raw expression, consuming a leading `!` as negation.
    ///
    /// # Errors
    ///
    /// Returns [`NexusError::InvalidExpression`] when the pattern left after
    /// the marker is not a valid regular expression.
    pub fn parse(raw: &str) -> Result<Self> {
        let (negate, pattern) = match raw.strip_prefix(NEGATION_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let pattern = Regex::new(pattern).map_err(|source| NexusError::InvalidExpression {
            expression: raw.to_string(),
            source,
        })?;

        Ok(Self { pattern, negate })
    }

    /// The compiled pattern, without the negation marker.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }

    /// Evaluates this expression against `name` under the set-wide `invert` flag.
    pub fn passes(&self, name: &str, invert: bool) -> bool {
        effective_pass(invert, self.negate, self.pattern.is_match(name))
    }
}

/// Ordered expressions combined with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct ExpressionSet {
    expressions: Vec<Expression>,
    invert: bool,
}

impl ExpressionSet {
    /// Compiles every raw expression up front.
    ///
    /// Compilation fails as a whole on the first malformed pattern, so a
    /// filter never produces partial results.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::filter::ExpressionSet;
    ///
    /// let set = ExpressionSet::parse(&["^v", "!rc"], false).unwrap();
    /// let tags = vec!["v1".to_string(), "v2-rc".to_string(), "latest".to_string()];
    /// assert_eq!(set.filter(tags), vec!["v1".to_string()]);
    /// ```
    pub fn parse<S: AsRef<str>>(raw: &[S], invert: bool) -> Result<Self> {
        let expressions = raw
            .iter()
            .map(|expression| Expression::parse(expression.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            expressions,
            invert,
        })
    }

    /// A set with no expressions, which passes everything.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    /// Returns true if `name` satisfies every expression.
    pub fn matches(&self, name: &str) -> bool {
        self.expressions
            .iter()
            .all(|expression| expression.passes(name, self.invert))
    }

    /// Keeps the names that satisfy every expression, preserving order.
    ///
    /// An empty set returns the input unchanged.
    pub fn filter(&self, names: Vec<String>) -> Vec<String> {
        if self.is_empty() {
            return names;
        }

        let before = names.len();
        let kept: Vec<String> = names.into_iter().filter(|name| self.matches(name)).collect();
        tracing::debug!(
            expressions = self.len(),
            invert = self.invert,
            before,
            after = kept.len(),
            "filtered names"
        );
        kept
    }
}
