//! Deferred expressions bound to token literals.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::error::ResolutionError;
use crate::value::Value;

type EvalFn = dyn Fn(&mut dyn RngCore) -> Result<Value, ResolutionError> + Send + Sync;

/// A deferred computation producing a [`Value`].
///
/// Nothing is computed until [`Evaluator::evaluate`] is called, and every call
/// recomputes from scratch, so a provider backed by randomness yields a fresh
/// value per call.
#[derive(Clone)]
pub struct Evaluator {
    description: String,
    eval: Arc<EvalFn>,
}

impl Evaluator {
    /// Wrap an arbitrary closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> Result<Value, ResolutionError> + Send + Sync + 'static,
    {
        Self {
            description: "<fn>".into(),
            eval: Arc::new(f),
        }
    }

    /// An evaluator that always returns `value`.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        let description = format!("{value:?}");
        Self::from_fn(move |_| Ok(value.clone())).describe(description)
    }

    /// Replace the description shown in `Debug` output and logs.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn evaluate(&self, rng: &mut dyn RngCore) -> Result<Value, ResolutionError> {
        (self.eval)(rng)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Evaluator").field(&self.description).finish()
    }
}

/// A token literal paired with the evaluator that produces its replacement.
#[derive(Debug, Clone)]
pub struct VariableExpression {
    literal: String,
    evaluator: Evaluator,
}

impl VariableExpression {
    pub fn new(literal: impl Into<String>, evaluator: Evaluator) -> Self {
        Self {
            literal: literal.into(),
            evaluator,
        }
    }

    /// The exact token text to replace, e.g. `%% name.fullName %%`.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}

/// The expressions of one render pass, keyed by token literal.
///
/// Each literal appears at most once: inserting a second expression for a
/// literal already present is a no-op. Iteration follows insertion order,
/// which for scanned templates is order of first appearance in the text.
#[derive(Debug, Clone, Default)]
pub struct ExpressionSet {
    items: Vec<VariableExpression>,
    index: HashMap<String, usize>,
}

impl ExpressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `expression` unless its literal is already bound.
    ///
    /// Returns whether it was inserted.
    pub fn insert(&mut self, expression: VariableExpression) -> bool {
        if self.contains(expression.literal()) {
            tracing::debug!(
                literal = expression.literal(),
                "literal already bound, keeping the first evaluator"
            );
            return false;
        }
        self.index
            .insert(expression.literal.clone(), self.items.len());
        self.items.push(expression);
        true
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.index.contains_key(literal)
    }

    pub fn get(&self, literal: &str) -> Option<&VariableExpression> {
        self.index.get(literal).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariableExpression> {
        self.items.iter()
    }

    /// The bound literals in iteration order.
    pub fn literals(&self) -> Vec<&str> {
        self.items.iter().map(VariableExpression::literal).collect()
    }
}

impl FromIterator<VariableExpression> for ExpressionSet {
    fn from_iter<I: IntoIterator<Item = VariableExpression>>(iter: I) -> Self {
        let mut set = Self::new();
        for expression in iter {
            set.insert(expression);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ExpressionSet {
    type Item = &'a VariableExpression;
    type IntoIter = std::slice::Iter<'a, VariableExpression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_dedup_by_literal_keeps_first() {
        let mut set = ExpressionSet::new();
        assert!(set.insert(VariableExpression::new("%%a%%", Evaluator::constant("first"))));
        assert!(!set.insert(VariableExpression::new("%%a%%", Evaluator::constant("second"))));
        assert_eq!(set.len(), 1);

        let mut rng = StdRng::seed_from_u64(0);
        let value = set.get("%%a%%").unwrap().evaluator().evaluate(&mut rng);
        assert_eq!(value, Ok(Value::from("first")));
    }

    #[test]
    fn test_same_path_different_literals_are_distinct() {
        let set: ExpressionSet = [
            VariableExpression::new("%%a%%", Evaluator::constant(1_i64)),
            VariableExpression::new("%% a %%", Evaluator::constant(1_i64)),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.literals(), vec!["%%a%%", "%% a %%"]);
    }

    #[test]
    fn test_evaluator_is_deferred_and_repeatable() {
        let evaluator = Evaluator::from_fn(|rng| Ok(Value::Int(rng.gen_range(0..1_000_000))));
        let mut rng = StdRng::seed_from_u64(5);
        let a = evaluator.evaluate(&mut rng).unwrap();
        let b = evaluator.evaluate(&mut rng).unwrap();
        // Same evaluator, advancing rng: a fresh draw each time.
        assert_ne!(a, b);

        let mut replay = StdRng::seed_from_u64(5);
        assert_eq!(evaluator.evaluate(&mut replay).unwrap(), a);
    }

    #[test]
    fn test_debug_shows_description() {
        let evaluator = Evaluator::constant("x").describe("name.fullName");
        assert_eq!(format!("{evaluator:?}"), "Evaluator(\"name.fullName\")");
    }
}
