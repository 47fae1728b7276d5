use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use fakeplate_core::batch::{self, BatchOptions, Progress};
use fakeplate_core::config::{GeneratorConfig, SinkConfig};
use fakeplate_core::project;
use fakeplate_core::sink::{self, Sink};
use fakeplate_core::template;

use crate::output;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub count: Option<u64>,
    pub workers: Option<usize>,
    pub seed: Option<u64>,
    pub out_dir: Option<PathBuf>,
    /// Sink kind (`stdout`, `directory`).
    pub sink: Option<String>,
}

impl Overrides {
    /// Apply the overrides to `config`, whose paths are already based at `base`.
    ///
    /// `--out-dir` is taken as given. A `--sink directory` without it writes
    /// to the project's default output directory under `base`.
    fn apply(self, mut config: GeneratorConfig, base: &Path) -> Result<GeneratorConfig> {
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        match (self.sink, self.out_dir) {
            (Some(kind), path) => {
                let path = path.unwrap_or_else(|| base.join(project::OUTPUT_DIR));
                config.sink = SinkConfig::from_kind(&kind, Some(path))?;
            }
            (None, Some(path)) => config.sink = SinkConfig::Directory { path },
            (None, None) => {}
        }
        Ok(config)
    }
}

/// Render a batch of records from the configured template.
///
/// Loads the config, applies command-line overrides, then renders and
/// publishes `count` records concurrently. Records that fail to resolve are
/// skipped and counted.
pub async fn run(config_path: &Path, overrides: Overrides) -> Result<()> {
    output::print_header("fakeplate generate");

    output::print_step(1, 3, "Loading config...");
    let config = overrides.apply(
        project::load_config(config_path)
            .with_context(|| format!("run `fakeplate init` or pass --config ({})", config_path.display()))?,
        project::config_dir(config_path),
    )?;
    config.validate()?;

    output::print_key_value("Template", &config.template.display().to_string());
    output::print_key_value("Records", &config.count.to_string());
    output::print_key_value("Workers", &config.workers.to_string());
    if let Some(seed) = config.seed {
        output::print_key_value("Seed", &seed.to_string());
    }

    output::print_step(2, 3, "Reading template...");
    let content = template::read_template(&config.template)?;
    let sink: Arc<dyn Sink> = Arc::from(sink::from_config(&config.sink)?);
    output::print_key_value("Sink", sink.name());

    output::print_step(3, 3, "Generating records...");
    let bar = progress_bar(config.count, config.sink == SinkConfig::Stdout);
    let progress: Option<Progress> = bar.clone().map(|bar| {
        let progress: Progress = Arc::new(move || bar.inc(1));
        progress
    });

    let generator = super::default_generator();
    let report = batch::run(
        &generator,
        content,
        &BatchOptions::from(&config),
        sink,
        progress,
    )
    .await?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    if report.absent {
        output::print_warning(&format!(
            "Template not found: {} (nothing generated)",
            config.template.display()
        ));
        return Ok(());
    }

    output::print_success(&format!("Generated {} record(s)", report.published));
    if report.skipped > 0 {
        output::print_warning(&format!(
            "Skipped {} record(s) with unresolvable expressions (run with -v for details)",
            report.skipped
        ));
    }
    output::print_key_value("Elapsed", &format!("{} ms", report.elapsed.as_millis()));
    if let SinkConfig::Directory { path } = &config.sink {
        output::print_key_value("Output", &path.display().to_string());
    }

    Ok(())
}

/// A progress bar on stderr, unless records themselves go to the terminal.
fn progress_bar(len: u64, records_on_stdout: bool) -> Option<ProgressBar> {
    if records_on_stdout {
        return None;
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    Some(bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let config = GeneratorConfig::for_template("t.txt");
        let config = Overrides {
            count: Some(5),
            workers: Some(3),
            seed: Some(8),
            out_dir: Some(PathBuf::from("records")),
            sink: None,
        }
        .apply(config, Path::new("/project"))
        .unwrap();
        assert_eq!(config.count, 5);
        assert_eq!(config.workers, 3);
        assert_eq!(config.seed, Some(8));
        assert_eq!(
            config.sink,
            SinkConfig::Directory {
                path: PathBuf::from("records")
            }
        );
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let config = GeneratorConfig {
            seed: Some(1),
            ..GeneratorConfig::for_template("t.txt")
        };
        let applied = Overrides::default()
            .apply(config.clone(), Path::new("/project"))
            .unwrap();
        assert_eq!(applied, config);
    }

    #[test]
    fn test_sink_override() {
        let config = GeneratorConfig {
            sink: SinkConfig::Directory {
                path: PathBuf::from("out"),
            },
            ..GeneratorConfig::for_template("t.txt")
        };
        let overrides = Overrides {
            sink: Some("stdout".into()),
            ..Overrides::default()
        };
        assert_eq!(
            overrides
                .apply(config.clone(), Path::new("/project"))
                .unwrap()
                .sink,
            SinkConfig::Stdout
        );

        let overrides = Overrides {
            sink: Some("kafka".into()),
            ..Overrides::default()
        };
        let err = overrides.apply(config, Path::new("/project")).unwrap_err();
        assert!(err.to_string().contains("unknown sink: kafka"));
    }

    #[test]
    fn test_directory_sink_defaults_under_config_dir() {
        let overrides = Overrides {
            sink: Some("directory".into()),
            ..Overrides::default()
        };
        let config = overrides
            .apply(GeneratorConfig::for_template("t.txt"), Path::new("/project"))
            .unwrap();
        assert_eq!(
            config.sink,
            SinkConfig::Directory {
                path: PathBuf::from("/project/out")
            }
        );
    }

    #[tokio::test]
    async fn test_generate_writes_records_to_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("t.txt");
        std::fs::write(&template, "%%name.fullName%%").unwrap();
        let config_path = dir.path().join("fakeplate.config.json");
        GeneratorConfig::for_template("t.txt").save(&config_path).unwrap();

        let out = dir.path().join("records");
        run(
            &config_path,
            Overrides {
                count: Some(3),
                workers: Some(2),
                seed: Some(5),
                out_dir: Some(out.clone()),
                sink: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 3);
    }

    #[tokio::test]
    async fn test_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&dir.path().join("missing.json"), Overrides::default()).await;
        assert!(result.is_err());
    }
}
