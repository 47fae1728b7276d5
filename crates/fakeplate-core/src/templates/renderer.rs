//! Handlebars-based renderer for project scaffolding.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled, so any
//! `{{variable}}` referenced in a template must be present in the data context.
//! HTML escaping is off: scaffolds are JSON and plain text.
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::ScaffoldRenderer};
//!
//! let renderer = ScaffoldRenderer::new();
//! let data = serde_json::json!({ "template_path": "templates/record.txt", ... });
//! let config = renderer.render(embedded::CONFIG_JSON, &data)?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{FakeplateError, Result};

/// Template renderer using Handlebars for generating project files.
pub struct ScaffoldRenderer {
    hbs: Handlebars<'static>,
}

impl ScaffoldRenderer {
    /// Create a new renderer with strict mode enabled and escaping disabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| FakeplateError::ScaffoldRender(e.to_string()))
    }
}

impl Default for ScaffoldRenderer {
    fn default() -> Self {
        Self::new()
    }
}
