//! fmg-vault: export a Fantasy Map Generator map into a Markdown vault.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use vault_export::{ConfigOverrides, ExportConfig, ExportError, ModeName};

#[derive(Parser)]
#[command(name = "fmg-vault")]
#[command(about = "Convert an FMG JSON export into an Obsidian-style vault", version)]
struct Cli {
    /// FMG full JSON export
    mapfile: PathBuf,

    /// Output vault directory
    #[arg(short, long, env = "FMG_VAULT_OUTDIR")]
    outdir: Option<PathBuf>,

    /// Download emblem images referenced by URL
    #[arg(long, env = "FMG_VAULT_DOWNLOAD_EMBLEMS")]
    download_emblems: bool,

    /// Directory with externally generated settlement bundles
    #[arg(long, env = "FMG_VAULT_MFCG_ROOT")]
    mfcg_root: Option<PathBuf>,

    /// How bundle entries are matched to settlements
    #[arg(long, value_enum, env = "FMG_VAULT_MATCH_MODE")]
    match_mode: Option<ModeName>,

    /// Pattern for regex matching; `{id}` and `{name}` are substituted
    #[arg(long, env = "FMG_VAULT_MATCH_PATTERN")]
    match_pattern: Option<String>,

    /// JSON file mapping settlement ids to bundle entries
    #[arg(long, env = "FMG_VAULT_MATCH_MAP")]
    match_map: Option<PathBuf>,

    /// Reuse identical files already in the vault
    #[arg(long, env = "FMG_VAULT_DEDUP")]
    dedup: bool,

    /// Zip each settlement's bundles instead of copying them
    #[arg(long, env = "FMG_VAULT_ARCHIVE")]
    archive: bool,

    /// Add generated lore to settlement notes
    #[arg(long, env = "FMG_VAULT_WITH_LORE")]
    with_lore: bool,

    /// TOML configuration file
    #[arg(short, long, env = "FMG_VAULT_CONFIG")]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            vault_root: self.outdir.clone(),
            download_emblems: self.download_emblems,
            with_lore: self.with_lore,
            bundle_root: self.mfcg_root.clone(),
            mode: self.match_mode,
            pattern: self.match_pattern.clone(),
            map_file: self.match_map.clone(),
            dedup: self.dedup,
            archive: self.archive,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match export(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(2)
        }
    }
}

fn export(cli: &Cli) -> Result<(), ExportError> {
    let mut config = ExportConfig::load_or_default(cli.config.as_deref())?;
    config.apply(cli.overrides());

    let summary = vault_export::run(&cli.mapfile, &config)?;
    if summary.written() == 0 {
        warn!("No notes were written; check the map file");
    }
    Ok(())
}
