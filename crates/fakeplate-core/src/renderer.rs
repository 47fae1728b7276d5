//! Token substitution.
//!
//! Every expression is evaluated once per render, then the token pattern is
//! matched in a single left-to-right pass over the original text and each
//! bound literal is swapped for its value. Replacement text is never
//! rescanned, so a generated value that happens to look like a token stays
//! as generated.

use std::collections::HashMap;

use rand::RngCore;
use regex::Captures;

use crate::error::ResolutionError;
use crate::expression::ExpressionSet;
use crate::scanner;
use crate::template::{ReplacedContent, TemplateContent};

/// Render `content` by substituting every bound literal.
///
/// `Absent` input renders to `Absent` without invoking any evaluator. The
/// first evaluation error aborts the render. Tokens with no bound literal are
/// left as written.
pub fn render(
    content: &TemplateContent,
    expressions: &ExpressionSet,
    rng: &mut dyn RngCore,
) -> Result<ReplacedContent, ResolutionError> {
    let text = match content {
        TemplateContent::Present(text) => text,
        TemplateContent::Absent => return Ok(ReplacedContent::Absent),
    };

    let mut values = HashMap::with_capacity(expressions.len());
    for expression in expressions {
        let value = expression.evaluator().evaluate(rng)?;
        tracing::trace!(literal = expression.literal(), %value, "evaluated");
        values.insert(expression.literal(), value.to_string());
    }

    Ok(ReplacedContent::Present(substitute(text, &values)))
}

fn substitute(text: &str, values: &HashMap<&str, String>) -> String {
    if values.is_empty() {
        return text.to_string();
    }
    scanner::token_regex()
        .replace_all(text, |caps: &Captures| {
            let literal = &caps[0];
            values
                .get(literal)
                .cloned()
                .unwrap_or_else(|| literal.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{Evaluator, VariableExpression};
    use crate::value::Value;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    fn set(pairs: &[(&str, &str)]) -> ExpressionSet {
        pairs
            .iter()
            .map(|(literal, value)| VariableExpression::new(*literal, Evaluator::constant(*value)))
            .collect()
    }

    #[test]
    fn test_absent_renders_absent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let expressions: ExpressionSet = [VariableExpression::new(
            "%%a%%",
            Evaluator::from_fn(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Null)
            }),
        )]
        .into_iter()
        .collect();

        let out = render(&TemplateContent::Absent, &expressions, &mut rng()).unwrap();
        assert_eq!(out, ReplacedContent::Absent);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let template = TemplateContent::from(
            "This is a more complex test %%name.fullName%% with many expressions %% name.firstName %%",
        );
        let expressions = set(&[
            ("%%name.fullName%%", "test1"),
            ("%% name.firstName %%", "test2"),
        ]);
        let out = render(&template, &expressions, &mut rng()).unwrap();
        let text = out.text().unwrap();
        assert!(!text.contains("%%name.fullName%%"));
        assert!(!text.contains("%% name.firstName %%"));
        assert!(text.contains("test1"));
        assert!(text.contains("test2"));
    }

    #[test]
    fn test_repeated_literal_evaluated_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let expressions: ExpressionSet = [VariableExpression::new(
            "%%n%%",
            Evaluator::from_fn(move |_| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Int(n as i64))
            }),
        )]
        .into_iter()
        .collect();

        let out = render(&"%%n%%-%%n%%-%%n%%".into(), &expressions, &mut rng()).unwrap();
        assert_eq!(out.text(), Some("0-0-0"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let again = render(&"%%n%%".into(), &expressions, &mut rng()).unwrap();
        assert_eq!(again.text(), Some("1"));
    }

    #[test]
    fn test_null_substitutes_empty() {
        let expressions: ExpressionSet =
            [VariableExpression::new("%%x%%", Evaluator::constant(None::<&str>))]
                .into_iter()
                .collect();
        let out = render(&"[%%x%%]".into(), &expressions, &mut rng()).unwrap();
        assert_eq!(out.text(), Some("[]"));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let expressions = set(&[("%%a%%", "%%b%%"), ("%%b%%", "B")]);
        let out = render(&"%%a%% %%b%%".into(), &expressions, &mut rng()).unwrap();
        assert_eq!(out.text(), Some("%%b%% B"));

        let reversed = set(&[("%%b%%", "B"), ("%%a%%", "%%b%%")]);
        let out = render(&"%%a%% %%b%%".into(), &reversed, &mut rng()).unwrap();
        assert_eq!(out.text(), Some("%%b%% B"));
    }

    #[test]
    fn test_unbound_tokens_left_verbatim() {
        let expressions = set(&[("%%a%%", "A")]);
        let out = render(&"%%a%% %%b%% %% a %%".into(), &expressions, &mut rng()).unwrap();
        assert_eq!(out.text(), Some("A %%b%% %% a %%"));
    }

    #[test]
    fn test_adjacent_tokens() {
        let expressions = set(&[("%%a%%", "1"), ("%%b%%", "2")]);
        let out = render(&"%%a%%%%b%%%%a%%".into(), &expressions, &mut rng()).unwrap();
        assert_eq!(out.text(), Some("121"));
    }

    #[test]
    fn test_no_expressions_is_identity() {
        let out = render(&"plain %% text".into(), &ExpressionSet::new(), &mut rng()).unwrap();
        assert_eq!(out.text(), Some("plain %% text"));
    }

    #[test]
    fn test_evaluation_error_aborts() {
        let failing = Evaluator::from_fn(|_| {
            Err(ResolutionError::NullDereference {
                expression: "a.b".into(),
                segment: "b".into(),
                resolved: "a".into(),
            })
        });
        let expressions: ExpressionSet = [VariableExpression::new("%%a.b%%", failing)]
            .into_iter()
            .collect();
        assert!(render(&"%%a.b%%".into(), &expressions, &mut rng()).is_err());
    }
}
