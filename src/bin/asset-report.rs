use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use sutu_assets::asl::LayerStylePreset;
use sutu_assets::import::{import_many, ImportedAsset};

#[derive(Parser, Debug)]
#[command(name = "asset-report")]
#[command(version)]
#[command(
    about = "Decode Photoshop brush (.abr) and layer style (.asl) files and print a JSON report.",
    long_about = None,
    after_help = "Examples:\n  asset-report brushes.abr\n  asset-report --pretty styles.asl brushes.abr\n  RUST_LOG=sutu_assets=debug asset-report brushes.abr"
)]
struct Cli {
    /// Paths to .abr or .asl files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress logging and the stderr summary
    #[arg(long)]
    quiet: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "sutu_assets=info")]
    log_filter: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    files: Vec<FileReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileReport {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset: Option<ImportedAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    sutu_assets::init_logging(if cli.quiet { "off" } else { cli.log_filter.as_str() });

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every input imported
fn run(cli: &Cli) -> Result<bool> {
    let results = import_many(&cli.inputs);

    let mut all_ok = true;
    let mut files = Vec::with_capacity(results.len());
    for (path, result) in results {
        let path = path.display().to_string();
        match result {
            Ok(asset) => {
                if !cli.quiet {
                    summarize(&path, &asset);
                }
                files.push(FileReport {
                    path,
                    asset: Some(asset),
                    error: None,
                });
            }
            Err(err) => {
                all_ok = false;
                if !cli.quiet {
                    eprintln!("{}: {}", path, err);
                }
                files.push(FileReport {
                    path,
                    asset: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let report = Report { files };
    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write report")?;

    Ok(all_ok)
}

fn summarize(path: &str, asset: &ImportedAsset) {
    match asset {
        ImportedAsset::Abr(abr) => eprintln!(
            "{}: ABR v{}.{}, {} presets from {} samples",
            path,
            abr.version,
            abr.subversion,
            abr.presets.len(),
            abr.sample_count
        ),
        ImportedAsset::Asl(asl) => {
            eprintln!(
                "{}: ASL v{}, {} styles, {} skipped effects",
                path,
                asl.version,
                asl.styles.len(),
                asl.skipped_effects.len()
            );
            for style in &asl.styles {
                eprintln!("  {}: {}", style.name, effect_list(style));
            }
        }
    }
    for warning in asset.warnings() {
        eprintln!("  warning: {}", warning);
    }
}

/// Effect names of a style, disabled ones marked
fn effect_list(style: &LayerStylePreset) -> String {
    if style.effects.is_empty() {
        return "no effects".to_string();
    }
    style
        .effects
        .iter()
        .map(|effect| {
            if effect.is_enabled() {
                effect.display_name().to_string()
            } else {
                format!("{} (disabled)", effect.display_name())
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
