//! Compile-time embedded templates for project scaffolding.
//!
//! Each constant loads a template file from `templates/` via [`include_str!`]. The paths
//! are relative to this source file (`crates/fakeplate-core/src/templates/embedded.rs`).
//!
//! Do NOT rename or move template files without updating the `include_str!` path here.

/// Generator config, rendered with Handlebars.
pub const CONFIG_JSON: &str = include_str!("../../../../templates/config/fakeplate.config.json.tmpl");

/// Sample record template, written as-is.
pub const SAMPLE_RECORD: &str = include_str!("../../../../templates/sample/record.txt");
