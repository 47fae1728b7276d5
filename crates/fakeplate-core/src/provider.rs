//! Data-generation providers.
//!
//! A [`Provider`] is anything that answers zero-argument method calls by name.
//! Expressions such as `name.fullName` are resolved by calling `name` on the
//! root provider and `fullName` on whatever that returned (see
//! [`crate::resolver`]).
//!
//! [`Registry`] is the concrete provider: an explicit name → callable table
//! whose entries are either methods or nested registries. Methods receive the
//! caller's random source, so a provider holds no mutable state and the same
//! seed always yields the same values.
//!
//! ```ignore
//! use fakeplate_core::provider::Registry;
//! use fakeplate_core::value::Value;
//!
//! let provider = Registry::new("Faker")
//!     .constant("test1", "A")
//!     .nested("name", Registry::new("Name").constant("fullName", "Ada Lovelace"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::value::Value;

/// Something expressions can be resolved against.
///
/// Implementations are shared across concurrent render passes behind an
/// `Arc`, hence `Send + Sync`. Methods must not rely on interior mutability
/// for randomness; they draw from the `rng` they are handed.
pub trait Provider: Send + Sync {
    /// Runtime type name, e.g. `"Faker"` or `"Name"`.
    fn type_name(&self) -> &str;

    /// Call the zero-argument method `method`.
    ///
    /// Returns `None` if this type has no such method. A method that exists
    /// but produces no value returns `Some(Value::Null)`.
    fn invoke(&self, method: &str, rng: &mut dyn RngCore) -> Option<Value>;

    /// Names of all methods this type answers, sorted.
    fn method_names(&self) -> Vec<String>;
}

/// A zero-argument method body.
pub type Method = Arc<dyn Fn(&mut dyn RngCore) -> Value + Send + Sync>;

#[derive(Clone)]
enum Entry {
    Method(Method),
    Nested(Arc<Registry>),
}

/// A provider backed by an explicit method table.
#[derive(Clone)]
pub struct Registry {
    name: String,
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    /// Create an empty registry whose runtime type name is `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Register a method. Re-registering a name replaces the previous entry.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> Value + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Entry::Method(Arc::new(f)));
        self
    }

    /// Register a method that always returns `value`.
    pub fn constant(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.method(name, move |_| value.clone())
    }

    /// Register a method returning the nested registry as an object.
    pub fn nested(mut self, name: impl Into<String>, registry: Registry) -> Self {
        self.entries
            .insert(name.into(), Entry::Nested(Arc::new(registry)));
        self
    }

    /// Merge `other`'s entries into this registry; `other` wins on conflicts.
    ///
    /// This is how a stock provider is extended with project-specific
    /// methods without touching its definition.
    pub fn extend(mut self, other: Registry) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every expression path that ends in a method, depth-first, sorted.
    ///
    /// Nested registries contribute their own paths prefixed with the
    /// registry's entry name (`name.firstName`, `name.lastName`, ...).
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, entry) in &self.entries {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match entry {
                Entry::Method(_) => out.push(path),
                Entry::Nested(registry) => registry.collect_paths(&path, out),
            }
        }
    }
}

impl Provider for Registry {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, method: &str, rng: &mut dyn RngCore) -> Option<Value> {
        match self.entries.get(method)? {
            Entry::Method(f) => Some(f(rng)),
            Entry::Nested(registry) => {
                let object: Arc<dyn Provider> = registry.clone();
                Some(Value::Object(object))
            }
        }
    }

    fn method_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .finish()
    }
}
