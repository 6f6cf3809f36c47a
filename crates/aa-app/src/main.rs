use std::io::{self, BufWriter};

use aa_core::ConvertConfig;
use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod pipeline;
pub mod report;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.level_filter())
        .init();

    // 3. Charger la config
    let mut config = resolve_config(&cli)?;

    // 3b. Appliquer les overrides CLI
    cli.apply_overrides(&mut config);

    // 4. Lire le fichier source
    let data = pipeline::read_source(&cli.fpath)?;
    log::debug!("{} : {} octets", cli.fpath.display(), data.len());

    // 5. Écrire sur stdout (rapport SAUCE ou rendu)
    let mut out = BufWriter::new(io::stdout().lock());
    if cli.sauce_only {
        pipeline::write_report(&cli.fpath, &data, &config, &mut out)
    } else {
        let lines = pipeline::convert(&data, &config, &mut out)?;
        log::info!("Rendu terminé : {lines} lignes");
        Ok(())
    }
}

/// Load `--config`, or defaults when the file does not exist.
fn resolve_config(cli: &cli::Cli) -> Result<ConvertConfig> {
    if cli.config.exists() {
        aa_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ConvertConfig::default())
    }
}
