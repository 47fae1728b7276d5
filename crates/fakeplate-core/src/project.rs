//! Project scaffolding for `fakeplate init`.
//!
//! ## Directory layout
//!
//! ```text
//! <project>/
//! ├── fakeplate.config.json   # GeneratorConfig
//! ├── templates/record.txt    # Sample record template
//! └── out/                    # Generated records (directory sink)
//! ```

use std::path::{Path, PathBuf};

use crate::config::{GeneratorConfig, CONFIG_FILE};
use crate::error::{FakeplateError, Result};
use crate::templates::embedded;
use crate::templates::renderer::ScaffoldRenderer;

/// Record template path inside a scaffolded project.
pub const SAMPLE_TEMPLATE_PATH: &str = "templates/record.txt";

/// Directory sink path inside a scaffolded project.
pub const OUTPUT_DIR: &str = "out";

/// Settings baked into a new project's config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub count: u64,
    pub workers: usize,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            count: 10,
            workers: 4,
        }
    }
}

/// Create the project directory structure.
pub fn create_project_dirs(project_dir: &Path) -> Result<()> {
    if project_dir.exists() {
        return Err(FakeplateError::ProjectExists(project_dir.to_path_buf()));
    }

    std::fs::create_dir_all(project_dir.join("templates"))?;
    std::fs::create_dir_all(project_dir.join(OUTPUT_DIR))?;
    Ok(())
}

/// Render the config and write it with the sample template.
///
/// Returns the path of the written config.
pub fn write_scaffold(project_dir: &Path, options: &ScaffoldOptions) -> Result<PathBuf> {
    let renderer = ScaffoldRenderer::new();
    let data = serde_json::json!({
        "template_path": SAMPLE_TEMPLATE_PATH,
        "output_dir": OUTPUT_DIR,
        "count": options.count,
        "workers": options.workers,
    });
    let config = renderer.render(embedded::CONFIG_JSON, &data)?;

    let config_path = project_dir.join(CONFIG_FILE);
    std::fs::write(&config_path, config)?;
    std::fs::write(project_dir.join(SAMPLE_TEMPLATE_PATH), embedded::SAMPLE_RECORD)?;

    // Fail now rather than on the first `generate`.
    GeneratorConfig::load(&config_path)?;
    Ok(config_path)
}

/// Directory that relative paths in the config at `config_path` are based on.
pub fn config_dir(config_path: &Path) -> &Path {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Load the config at `config_path`, resolving its paths against its directory.
pub fn load_config(config_path: &Path) -> Result<GeneratorConfig> {
    Ok(GeneratorConfig::load(config_path)?.resolve_paths(config_dir(config_path)))
}
