//! Core library for the fakeplate toolkit.
//!
//! Renders text templates whose `%% expression %%` tokens are filled in by a
//! data-generation [`provider::Provider`]. An expression such as
//! `name.fullName` is resolved by calling `name` on the provider and
//! `fullName` on the result.
//!
//! A render pass is:
//! - [`scanner`]: find the tokens in the template text
//! - [`resolver`]: bind each token to a deferred [`expression::Evaluator`]
//! - [`renderer`]: evaluate once per token and substitute every occurrence
//!
//! [`generator::Generator`] ties these together. Around the engine sit the
//! shared pieces the CLI needs: configuration, the built-in [`faker`]
//! provider, output [`sink`]s, concurrent [`batch`] generation, and
//! `init` scaffolding.

pub mod batch;
pub mod config;
pub mod error;
pub mod expression;
pub mod faker;
pub mod generator;
pub mod project;
pub mod provider;
pub mod renderer;
pub mod resolver;
pub mod scanner;
pub mod sink;
pub mod template;
pub mod templates;
pub mod value;
