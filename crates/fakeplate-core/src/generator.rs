//! Render-pass entry point.
//!
//! A render pass is scan → bind → render over one template:
//!
//! ```ignore
//! use fakeplate_core::generator::Generator;
//! use fakeplate_core::faker;
//! use rand::SeedableRng;
//!
//! let generator = Generator::new(faker::provider());
//! let resolved = generator.resolve("Hi %%name.firstName%%".into());
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let output = generator.render(&resolved, &mut rng)?;
//! ```
//!
//! The `ResolvedTemplate` produced by [`Generator::resolve`] belongs to one
//! pass. Rendering it twice re-evaluates every expression.

use std::path::Path;
use std::sync::Arc;

use rand::RngCore;

use crate::error::{ResolutionError, Result};
use crate::expression::ExpressionSet;
use crate::provider::Provider;
use crate::renderer;
use crate::resolver;
use crate::scanner;
use crate::template::{self, ReplacedContent, TemplateContent};

/// A template together with the expressions bound to its tokens.
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    pub content: TemplateContent,
    pub expressions: ExpressionSet,
}

impl ResolvedTemplate {
    pub fn new(content: TemplateContent, expressions: ExpressionSet) -> Self {
        Self {
            content,
            expressions,
        }
    }
}

/// Resolves and renders templates against one provider.
///
/// Cheap to clone; the provider is shared.
#[derive(Clone)]
pub struct Generator {
    provider: Arc<dyn Provider>,
}

impl Generator {
    pub fn new(provider: impl Provider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    pub fn from_shared(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Read the template at `path` and resolve it.
    pub fn generate_expressions(&self, path: &Path) -> Result<ResolvedTemplate> {
        let content = template::read_template(path)?;
        Ok(self.resolve(content))
    }

    /// Scan `content` for tokens and bind each to a deferred evaluator.
    ///
    /// `Absent` content resolves to `Absent` with no expressions.
    pub fn resolve(&self, content: TemplateContent) -> ResolvedTemplate {
        let expressions = match &content {
            TemplateContent::Present(text) => {
                resolver::bind(&self.provider, scanner::scan(text))
            }
            TemplateContent::Absent => ExpressionSet::new(),
        };
        ResolvedTemplate::new(content, expressions)
    }

    /// Evaluate the bound expressions and substitute them.
    pub fn render(
        &self,
        resolved: &ResolvedTemplate,
        rng: &mut dyn RngCore,
    ) -> std::result::Result<ReplacedContent, ResolutionError> {
        renderer::render(&resolved.content, &resolved.expressions, rng)
    }

    /// One full pass over in-memory text.
    pub fn render_text(
        &self,
        text: &str,
        rng: &mut dyn RngCore,
    ) -> std::result::Result<String, ResolutionError> {
        let resolved = self.resolve(TemplateContent::from(text));
        let rendered = self.render(&resolved, rng)?;
        Ok(rendered.into_text().unwrap_or_default())
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("provider", &self.provider.type_name())
            .finish()
    }
}
