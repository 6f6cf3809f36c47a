use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::encoding::SupportedEncoding;

/// Bornes de largeur de sortie, en colonnes.
pub const MIN_WIDTH: u16 = 1;
pub const MAX_WIDTH: u16 = 1024;

/// Configuration de conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine ;
/// les options de ligne de commande priment sur ces valeurs.
///
/// # Example
/// ```
/// use aa_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert_eq!(config.default_width, 80);
/// assert!(config.encoding.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConvertConfig {
    /// Largeur utilisée quand ni la CLI ni SAUCE (tinfo1) n'en fournissent.
    pub default_width: u16,
    /// Largeur imposée, prioritaire sur SAUCE.
    pub width: Option<u16>,
    /// Encodage imposé ; `None` = détection automatique.
    pub encoding: Option<SupportedEncoding>,
    /// Police imposée pour le décalage de glyphes, prioritaire sur SAUCE.
    pub font_name: Option<String>,
    /// Police de repli quand SAUCE ne nomme aucune police connue.
    pub fallback_font: Option<String>,
    /// Forcer les ice colours (fond clair au lieu du clignotement).
    pub ice_colours: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            default_width: 80,
            width: None,
            encoding: None,
            font_name: None,
            fallback_font: None,
            ice_colours: false,
        }
    }
}

impl ConvertConfig {
    /// Clamp widths into `[MIN_WIDTH, MAX_WIDTH]`.
    pub fn clamp_all(&mut self) {
        self.default_width = self.default_width.clamp(MIN_WIDTH, MAX_WIDTH);
        self.width = self.width.map(|w| w.clamp(MIN_WIDTH, MAX_WIDTH));
    }
}

/// Structure intermédiaire pour le parsing TOML.
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    convert: ConvertSection,
}

#[derive(Default, Deserialize)]
struct ConvertSection {
    default_width: Option<u16>,
    width: Option<u16>,
    encoding: Option<SupportedEncoding>,
    font_name: Option<String>,
    fallback_font: Option<String>,
    ice_colours: Option<bool>,
}

/// Charge la configuration depuis un fichier TOML.
///
/// Les champs absents gardent leur valeur par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse un document TOML de configuration.
///
/// # Errors
/// Returns an error if the TOML is malformed or a value has the wrong type.
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content)?;

    let mut config = ConvertConfig::default();

    let c = file.convert;
    if let Some(v) = c.default_width {
        config.default_width = v;
    }
    if let Some(v) = c.width {
        config.width = Some(v);
    }
    if let Some(v) = c.encoding {
        config.encoding = Some(v);
    }
    if let Some(v) = c.font_name.filter(|s| !s.trim().is_empty()) {
        config.font_name = Some(v);
    }
    if let Some(v) = c.fallback_font.filter(|s| !s.trim().is_empty()) {
        config.fallback_font = Some(v);
    }
    if let Some(v) = c.ice_colours {
        config.ice_colours = v;
    }

    config.clamp_all();
    log::debug!("Configuration chargée : {config:?}");
    Ok(config)
}
