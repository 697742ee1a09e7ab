//! Experiment data types.

use crate::utils::to_mat;
use anyhow::{Context, Result, bail};
use ndarray::Array2;
use serde::Deserialize;
use std::{fs, path::Path};

/// Runs of one experiment group.
///
/// Each row of `runs` holds the values of one run, indexed by timestep.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesGroup {
    pub name: String,
    pub runs: Vec<Vec<f64>>,
}

impl SeriesGroup {
    /// Get the runs as a `runs x timesteps` matrix.
    pub fn to_mat(&self) -> Result<Array2<f64>> {
        to_mat(&self.runs)
    }
}

/// Raw values of a single experiment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedSeries {
    pub experiment_id: String,
    pub data: Vec<f64>,
}

/// Input document.
///
/// Groups and series keep the order in which they appear in the file,
/// which is the order used for color assignment and trace emission.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Dataset {
    pub groups: Vec<SeriesGroup>,
    pub series: Vec<NamedSeries>,
}

impl Dataset {
    /// Load a [`Dataset`] from a TOML or JSON file, chosen by extension.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let ext = file.extension().and_then(|ext| ext.to_str());
        if !matches!(ext, Some("toml" | "json")) {
            bail!("unsupported data file extension: {file:?}");
        }
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let dataset: Dataset = if ext == Some("json") {
            serde_json::from_str(&contents).context("failed to deserialize JSON data")?
        } else {
            toml::from_str(&contents).context("failed to deserialize TOML data")?
        };

        Ok(dataset)
    }
}
