//! Runtime values produced by provider method calls.
//!
//! A [`Value`] is whatever a zero-argument method returned. Dispatch of the
//! next path segment happens on the value's runtime variant: objects delegate
//! to their own [`Provider`] method table, scalars answer a small fixed set of
//! methods (`uppercase`, `length`, `abs`, ...), and [`Value::Null`] answers
//! nothing at all.

use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::provider::Provider;

/// A dynamically-typed result of a method call.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A nested object exposing further methods.
    Object(Arc<dyn Provider>),
}

impl Value {
    /// Wrap a provider as an object value.
    pub fn object(provider: impl Provider + 'static) -> Self {
        Self::Object(Arc::new(provider))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the runtime type, used in logs and when an object is rendered.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Str(_) => "String",
            Self::Object(provider) => provider.type_name(),
        }
    }

    /// Invoke the zero-argument method `method` on this value's runtime type.
    ///
    /// Returns `None` when the runtime type has no method with that name.
    /// `Null` has no methods; callers that must distinguish "no such method"
    /// from "receiver is null" check [`Value::is_null`] first.
    pub fn invoke(&self, method: &str, rng: &mut dyn RngCore) -> Option<Value> {
        match self {
            Self::Null => None,
            Self::Object(provider) => provider.invoke(method, rng),
            Self::Str(s) => str_method(s, method),
            Self::Int(n) => int_method(*n, method),
            Self::Float(x) => float_method(*x, method),
            Self::Bool(b) => bool_method(*b, method),
        }
    }
}

fn str_method(s: &str, method: &str) -> Option<Value> {
    let value = match method {
        "toString" => Value::Str(s.to_string()),
        "uppercase" => Value::Str(s.to_uppercase()),
        "lowercase" => Value::Str(s.to_lowercase()),
        "trim" => Value::Str(s.trim().to_string()),
        "length" => Value::Int(s.chars().count() as i64),
        "reversed" => Value::Str(s.chars().rev().collect()),
        "capitalize" => {
            let mut chars = s.chars();
            match chars.next() {
                Some(first) => Value::Str(first.to_uppercase().chain(chars).collect()),
                None => Value::Str(String::new()),
            }
        }
        "isEmpty" => Value::Bool(s.is_empty()),
        _ => return None,
    };
    Some(value)
}

fn int_method(n: i64, method: &str) -> Option<Value> {
    let value = match method {
        "toString" => Value::Str(n.to_string()),
        "abs" => Value::Int(n.wrapping_abs()),
        "negate" => Value::Int(n.wrapping_neg()),
        "isEven" => Value::Bool(n % 2 == 0),
        _ => return None,
    };
    Some(value)
}

fn float_method(x: f64, method: &str) -> Option<Value> {
    let value = match method {
        "toString" => Value::Str(x.to_string()),
        "abs" => Value::Float(x.abs()),
        "round" => Value::Float(x.round()),
        "floor" => Value::Float(x.floor()),
        "ceil" => Value::Float(x.ceil()),
        _ => return None,
    };
    Some(value)
}

fn bool_method(b: bool, method: &str) -> Option<Value> {
    match method {
        "toString" => Some(Value::Str(b.to_string())),
        "not" => Some(Value::Bool(!b)),
        _ => None,
    }
}

/// Rendered form of a value. `Null` renders as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Object(provider) => write!(f, "<{}>", provider.type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Object(provider) => write!(f, "Object(<{}>)", provider.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
