//! CLI command implementations for fakeplate.
//!
//! Each module corresponds to a subcommand (`fakeplate <command>`).

pub mod fields;
pub mod generate;
pub mod init;
pub mod render;

use fakeplate_core::faker;
use fakeplate_core::generator::Generator;

/// The generator every command renders with.
pub fn default_generator() -> Generator {
    Generator::new(faker::provider())
}
