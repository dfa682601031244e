//! Command: validate the manifest without touching the package manager.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Category, Config, Origin};
use crate::logging::{Log, Logger};

/// Lines describing one bucket, one per entry.
///
/// Injected entries are marked, and entries without a name are shown with
/// their original record.
#[must_use]
pub fn bucket_lines(config: &Config, category: Category) -> Vec<String> {
    config
        .manifest
        .bucket(category)
        .iter()
        .map(|entry| match (&entry.name, &entry.origin) {
            (Some(name), Origin::Synthetic) => format!("{name} (injected)"),
            (Some(name), Origin::Declared { .. }) => name.clone(),
            (None, _) => format!("<missing name> {}", entry.describe()),
        })
        .collect()
}

/// Count the problems `check` reports: dropped records plus entries
/// without a name.
#[must_use]
pub fn problem_count(config: &Config) -> usize {
    let nameless = Category::ALL
        .iter()
        .flat_map(|c| config.manifest.bucket(*c))
        .filter(|entry| entry.name.is_none())
        .count();
    config.warnings.len() + nameless
}

/// Run the check command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or has problems.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let config = &setup.config;

    for category in Category::ALL {
        let lines = bucket_lines(config, category);
        if lines.is_empty() {
            continue;
        }
        log.stage(&format!("{category} ({})", lines.len()));
        for line in &lines {
            log.info(line);
        }
    }

    let problems = problem_count(config);
    if problems > 0 {
        anyhow::bail!("{} has {problems} problem(s)", config.path.display());
    }
    log.info(&format!("{} is valid", config.path.display()));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::write_temp_manifest;
    use crate::tasks::test_helpers::config_from;

    #[test]
    fn bucket_lines_marks_injected_entries() {
        let config = config_from("- homebrew_tap:\n  name: homebrew/cask\n- homebrew_cask:\n  name: firefox\n");
        let taps = bucket_lines(&config, Category::Tap);
        assert_eq!(taps[0], "homebrew/cask");
        assert_eq!(taps[1], "homebrew/cask-drivers (injected)");
        assert_eq!(taps.len(), 4);
        assert_eq!(bucket_lines(&config, Category::Cask), ["firefox"]);
    }

    #[test]
    fn bucket_lines_shows_record_for_missing_name() {
        let config = config_from("- homebrew_formula:\n  version: 2\n");
        let lines = bucket_lines(&config, Category::Formula);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("<missing name> {homebrew_formula: ~"));
    }

    #[test]
    fn problem_count_includes_warnings_and_nameless_entries() {
        let config = config_from(
            "- name: orphan\n- homebrew_formula:\n  version: 2\n- homebrew_formula:\n  name: wget\n",
        );
        assert_eq!(problem_count(&config), 2);
    }

    #[test]
    fn run_passes_clean_manifest() {
        let (_dir, path) = write_temp_manifest("- homebrew_formula:\n  name: wget\n");
        let global = GlobalOpts {
            config: path,
            dry_run: false,
            brew: "brew".to_string(),
        };
        run(&global, &Logger::new("test")).unwrap();
    }

    #[test]
    fn run_fails_on_ambiguous_record() {
        let (_dir, path) =
            write_temp_manifest("- homebrew_formula:\n  homebrew_cask:\n  name: wget\n");
        let global = GlobalOpts {
            config: path,
            dry_run: false,
            brew: "brew".to_string(),
        };
        let err = run(&global, &Logger::new("test")).unwrap_err();
        assert!(err.to_string().contains("1 problem(s)"));
    }
}
