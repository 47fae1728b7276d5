use std::path::Path;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fakeplate_core::error::FakeplateError;
use fakeplate_core::template::ReplacedContent;

/// Render `template` once and print it to stdout.
///
/// A missing template is an error here; `generate` treats it as an empty batch.
pub fn run(template: &Path, seed: Option<u64>) -> Result<()> {
    let generator = super::default_generator();
    let resolved = generator.generate_expressions(template)?;
    tracing::info!(
        "{} expression(s) in {}",
        resolved.expressions.len(),
        template.display()
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match generator.render(&resolved, &mut rng)? {
        ReplacedContent::Present(text) => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        ReplacedContent::Absent => Err(FakeplateError::TemplateNotFound(template.to_path_buf()).into()),
    }
}
