//! Expression resolution by chained dynamic dispatch.
//!
//! `a.b.c` is evaluated as: call `a` on the root provider, call `b` on the
//! runtime type of that result, call `c` on the runtime type of *that*.
//! A segment naming no method yields null. Requesting a further segment once
//! a step produced null is a [`ResolutionError::NullDereference`].

use std::sync::Arc;

use rand::RngCore;

use crate::error::ResolutionError;
use crate::expression::{Evaluator, ExpressionSet, VariableExpression};
use crate::provider::Provider;
use crate::scanner::Token;
use crate::value::Value;

/// Evaluate `expression` against `root` right now.
pub fn resolve_path(
    root: &Arc<dyn Provider>,
    expression: &str,
    rng: &mut dyn RngCore,
) -> Result<Value, ResolutionError> {
    let mut current = Value::Object(Arc::clone(root));
    let mut resolved = String::new();

    for segment in expression.split('.') {
        if current.is_null() {
            return Err(ResolutionError::NullDereference {
                expression: expression.to_string(),
                segment: segment.to_string(),
                resolved,
            });
        }

        current = match current.invoke(segment, rng) {
            Some(value) => value,
            None => {
                tracing::debug!(
                    expression,
                    segment,
                    receiver = current.type_name(),
                    "no such method, resolving to null"
                );
                Value::Null
            }
        };

        if !resolved.is_empty() {
            resolved.push('.');
        }
        resolved.push_str(segment);
    }

    Ok(current)
}

/// Build a deferred evaluator for `expression` against `provider`.
pub fn evaluator(provider: &Arc<dyn Provider>, expression: &str) -> Evaluator {
    let provider = Arc::clone(provider);
    let path = expression.to_string();
    Evaluator::from_fn(move |rng| resolve_path(&provider, &path, rng)).describe(expression)
}

/// Bind each scanned token to an evaluator for its path.
pub fn bind(provider: &Arc<dyn Provider>, tokens: Vec<Token>) -> ExpressionSet {
    tokens
        .into_iter()
        .map(|token| VariableExpression::new(token.literal, evaluator(provider, &token.path)))
        .collect()
}
