use std::path::PathBuf;

use aa_core::{ConvertConfig, SupportedEncoding};
use clap::Parser;

/// ansi-art-convert — rendu des fichiers ANSI/DOS (CP437, SAUCE) pour terminaux modernes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier ANSI à convertir.
    #[arg(short, long)]
    pub fpath: PathBuf,

    /// Encodage du fichier (cp437, iso-8859-1, ascii, utf-8) si la détection se trompe.
    #[arg(short, long)]
    pub encoding: Option<SupportedEncoding>,

    /// Afficher uniquement les métadonnées SAUCE en JSON.
    #[arg(short, long, default_value_t = false)]
    pub sauce_only: bool,

    /// Sortie de débogage détaillée (équivaut à --log-level debug).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Forcer les ice colours (fond clair au lieu du clignotement).
    #[arg(long, default_value_t = false)]
    pub ice_colours: bool,

    /// Police pour le décalage des glyphes (prioritaire sur SAUCE).
    #[arg(long)]
    pub font_name: Option<String>,

    /// Largeur de sortie en colonnes (prioritaire sur SAUCE tinfo1).
    #[arg(short, long)]
    pub width: Option<u16>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Effective log level; `--verbose` wins over `--log-level`.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
        }
    }

    /// Écrase les valeurs de config par celles passées en ligne de commande.
    pub fn apply_overrides(&self, config: &mut ConvertConfig) {
        if let Some(encoding) = self.encoding {
            config.encoding = Some(encoding);
        }
        if let Some(width) = self.width {
            config.width = Some(width);
        }
        if let Some(ref name) = self.font_name {
            config.font_name = Some(name.clone());
        }
        if self.ice_colours {
            config.ice_colours = true;
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_parse() {
        let cli = Cli::parse_from([
            "ansi-art-convert",
            "-f",
            "art.ans",
            "-e",
            "iso-8859-1",
            "-w",
            "132",
            "-s",
        ]);
        assert_eq!(cli.fpath, PathBuf::from("art.ans"));
        assert_eq!(cli.encoding, Some(SupportedEncoding::Iso8859_1));
        assert_eq!(cli.width, Some(132));
        assert!(cli.sauce_only);
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["ansi-art-convert"]).is_err());
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(Cli::try_parse_from(["ansi-art-convert", "-f", "a", "-e", "koi8-r"]).is_err());
    }

    #[test]
    fn verbose_forces_debug() {
        let cli = Cli::parse_from(["ansi-art-convert", "-f", "a", "-v", "--log-level", "error"]);
        assert_eq!(cli.level_filter(), log::LevelFilter::Debug);

        let cli = Cli::parse_from(["ansi-art-convert", "-f", "a", "--log-level", "bogus"]);
        assert_eq!(cli.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn overrides_win_over_config() {
        let cli = Cli::parse_from([
            "ansi-art-convert",
            "-f",
            "a",
            "--font-name",
            "Amiga mOsOul",
            "--ice-colours",
            "-w",
            "5000",
        ]);
        let mut config = ConvertConfig {
            font_name: Some("IBM VGA".into()),
            ..ConvertConfig::default()
        };
        cli.apply_overrides(&mut config);
        assert_eq!(config.font_name.as_deref(), Some("Amiga mOsOul"));
        assert!(config.ice_colours);
        assert_eq!(config.width, Some(aa_core::config::MAX_WIDTH));
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["ansi-art-convert", "-f", "a"]);
        let mut config = ConvertConfig {
            ice_colours: true,
            width: Some(100),
            ..ConvertConfig::default()
        };
        cli.apply_overrides(&mut config);
        assert!(config.ice_colours);
        assert_eq!(config.width, Some(100));
        assert!(config.encoding.is_none());
    }
}
