use crate::utils::{check_num, check_str};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Colors cycled through by the chart groups, in assignment order.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "rgb(31, 119, 180)",
    "rgb(255, 127, 14)",
    "rgb(44, 160, 44)",
    "rgb(214, 39, 40)",
    "rgb(148, 103, 189)",
    "rgb(140, 86, 75)",
    "rgb(227, 119, 194)",
    "rgb(127, 127, 127)",
    "rgb(188, 189, 34)",
    "rgb(23, 190, 207)",
];

/// Chart configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// Every field is optional and falls back to its [`Default`] value.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Group colors (cycled when there are more groups than colors).
    pub palette: Vec<String>,

    /// Plot area background color.
    pub plot_bgcolor: String,

    /// Marker color of the upper bound traces.
    pub bound_color: String,

    /// Show the figure legend.
    pub show_legend: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|color| color.to_string()).collect(),
            plot_bgcolor: "#ffffff".to_string(),
            bound_color: "#444".to_string(),
            show_legend: true,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.palette.len(), 1..=256).context("invalid number of palette colors")?;
        for (i_color, color) in self.palette.iter().enumerate() {
            check_str(color).with_context(|| format!("invalid palette color {i_color}"))?;
        }
        check_str(&self.plot_bgcolor).context("invalid background color")?;
        check_str(&self.bound_color).context("invalid bound color")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.palette.len(), 10);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str("palette = [\"red\", \"blue\"]\n").unwrap();
        assert_eq!(cfg.palette, ["red", "blue"]);
        assert_eq!(cfg.plot_bgcolor, "#ffffff");
        assert!(cfg.show_legend);
    }

    #[test]
    fn empty_palette_is_rejected() {
        let cfg: Config = toml::from_str("palette = []\n").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_color_is_rejected() {
        let cfg: Config = toml::from_str("palette = [\"red\", \" \"]\n").unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err:#}").contains("invalid palette color 1"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("colour = \"red\"\n").is_err());
    }
}
