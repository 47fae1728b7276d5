use std::path::Path;

use anyhow::Result;

use fakeplate_core::project::{self, ScaffoldOptions};

use crate::output;

/// Initialize a new fakeplate project.
///
/// Creates the directory structure, renders the config and writes the sample
/// record template.
pub fn run(name: &str, count: u64, workers: usize) -> Result<()> {
    output::print_header(&format!("fakeplate init: {name}"));

    if workers == 0 {
        anyhow::bail!("--workers must be at least 1");
    }

    let project_dir = Path::new(name);
    output::print_step(1, 2, &format!("Creating project directory: {name}/"));
    project::create_project_dirs(project_dir)?;

    output::print_step(2, 2, "Writing config and sample template");
    let config_path = project::write_scaffold(project_dir, &ScaffoldOptions { count, workers })?;

    output::print_success(&format!("Project '{name}' created"));
    output::print_key_value("Config", &config_path.display().to_string());
    output::print_key_value(
        "Template",
        &project_dir.join(project::SAMPLE_TEMPLATE_PATH).display().to_string(),
    );
    eprintln!();
    eprintln!("  Next steps:");
    eprintln!("    cd {name}");
    eprintln!("    fakeplate render {}", project::SAMPLE_TEMPLATE_PATH);
    eprintln!("    fakeplate generate");
    eprintln!();

    Ok(())
}
