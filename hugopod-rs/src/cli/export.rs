//! The `export` and `plan` commands.

use crate::cli::args::ExportArgs;
use crate::cli::output::Output;
use crate::config::PodConfig;
use crate::error::Result;
use crate::export::{ExportReport, HugoExporter};
use crate::types::ExportRequest;
use crate::vault::{Vault, ROOT_FNAME};
use tracing::info;

/// Merge the config file (if any) with command-line overrides.
///
/// Flags win over the file. Without a file, the vault name defaults to the
/// vault directory name and the designated root note to `root`.
pub fn resolve_config(args: &ExportArgs) -> Result<PodConfig> {
    let mut config = match PodConfig::discover(args.config.as_deref())? {
        Some(config) => config,
        None => {
            let vault_name = args
                .vault
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| args.vault.to_string_lossy().into_owned());
            PodConfig::new(ROOT_FNAME, vault_name)
        }
    };

    if let Some(ref fname) = args.fname {
        config.fname = fname.clone();
    }
    if let Some(ref name) = args.vault_name {
        config.vault_name = name.clone();
    }
    if args.include_stubs {
        config.include_stubs = true;
    }
    if let Some(ref extension) = args.extension {
        config.extension = extension.trim_start_matches('.').to_string();
    }

    Ok(config)
}

/// Load the vault and export it, or only plan the export when `dry_run`.
pub async fn run(args: &ExportArgs, dry_run: bool, output: &Output) -> Result<ExportReport> {
    let config = resolve_config(args)?;
    let vault = Vault::new(&args.vault, Some(&config.vault_name))?;
    let notes = vault.load_notes()?;

    let exporter = HugoExporter::new(config);
    let notes = exporter.select_notes(notes);
    let request = ExportRequest::new(&args.dest, notes);

    info!(
        vault = %vault.name(),
        dest = %request.dest.display(),
        notes = request.notes.len(),
        dry_run,
        "exporting vault"
    );

    let report = if dry_run {
        exporter.plan(&request)
    } else {
        exporter.export(request).await
    };

    output.print(&report.summary())?;
    if !report.is_success() {
        output.info(&format!(
            "{} of {} notes failed",
            report.failures().count(),
            report.total()
        ));
    }

    report.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(vault: &str) -> ExportArgs {
        ExportArgs {
            vault: PathBuf::from(vault),
            dest: PathBuf::from("/out"),
            vault_name: None,
            config: None,
            fname: None,
            include_stubs: false,
            extension: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_config_from_flags() {
        let mut args = args("/notes/garden");
        args.fname = Some("home".to_string());
        args.include_stubs = true;
        args.extension = Some(".markdown".to_string());
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.fname, "home");
        assert!(config.include_stubs);
        assert_eq!(config.extension, "markdown");
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pod.toml");
        std::fs::write(
            &path,
            "fname = \"index\"\nvaultName = \"public\"\nincludeStubs = false\n",
        )
        .unwrap();

        let mut args = args("/notes/garden");
        args.config = Some(path);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.fname, "index");
        assert_eq!(config.vault_name, "public");

        args.vault_name = Some("other".to_string());
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.vault_name, "other");
    }
}
