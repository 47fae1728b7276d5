//! Scaffolding templates for `fakeplate init`.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`] in the
//! [`embedded`] module. The config template is rendered with
//! [Handlebars](https://handlebarsjs.com/) via [`renderer::ScaffoldRenderer`]; the sample
//! record template is written verbatim, since its `%% ... %%` tokens are meant for the
//! generator, not for Handlebars.
//!
//! ## Template variables
//!
//! - `{{template_path}}`: record template path, relative to the project
//! - `{{output_dir}}`: directory the generated records are written to
//! - `{{count}}`, `{{workers}}`: batch defaults
//!
//! **Warning**: Template files in `templates/` and constants in [`embedded`] must stay in sync.
//! The `include_str!` paths are relative to this file and checked at compile-time.

pub mod embedded;
pub mod renderer;
