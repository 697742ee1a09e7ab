use crate::chart::ChartBuilder;
use crate::config::Config;
use crate::figure::{Figure, Graph};
use crate::marks::generate_marks;
use crate::types::Dataset;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

pub struct Manager {
    builder: ChartBuilder,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        let cfg = match config_file {
            Some(file) => Config::from_file(file).context("failed to construct cfg")?,
            None => Config::default(),
        };
        log::info!("{cfg:#?}");

        Ok(Self {
            builder: ChartBuilder::new(&cfg),
        })
    }

    pub fn render_band(
        &self,
        input: &Path,
        title: &str,
        graph_id: Option<String>,
        output: Option<&Path>,
    ) -> Result<()> {
        let dataset = Dataset::from_file(input).context("failed to load dataset")?;
        if dataset.groups.is_empty() {
            bail!("dataset {input:?} has no groups");
        }
        log::info!("loaded {} groups from {input:?}", dataset.groups.len());

        let figure = self
            .builder
            .band_figure(title, &dataset.groups)
            .context("failed to build band figure")?;

        write_figure(figure, graph_id, output)
    }

    pub fn render_line(
        &self,
        input: &Path,
        title: &str,
        graph_id: Option<String>,
        output: Option<&Path>,
    ) -> Result<()> {
        let dataset = Dataset::from_file(input).context("failed to load dataset")?;
        if dataset.series.is_empty() {
            bail!("dataset {input:?} has no series");
        }
        log::info!("loaded {} series from {input:?}", dataset.series.len());

        let figure = self.builder.line_figure(title, &dataset.series);

        write_figure(figure, graph_id, output)
    }

    pub fn render_marks(&self, min: f64, max: f64, step: f64, output: Option<&Path>) -> Result<()> {
        let marks = generate_marks(min, max, step).context("failed to generate marks")?;
        log::info!("generated {} marks", marks.0.len());

        write_json(&marks, output)
    }
}

fn write_figure(figure: Figure, graph_id: Option<String>, output: Option<&Path>) -> Result<()> {
    match graph_id {
        Some(id) => write_json(&Graph { id, figure }, output),
        None => write_json(&figure, output),
    }
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(file) => {
            let writer = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
            let mut writer = BufWriter::new(writer);
            serde_json::to_writer_pretty(&mut writer, value).context("failed to serialize output")?;
            writer.flush().context("failed to flush writer stream")?;
            log::info!("wrote {file:?}");
        }
        None => {
            let mut writer = io::stdout().lock();
            serde_json::to_writer_pretty(&mut writer, value).context("failed to serialize output")?;
            writeln!(writer).context("failed to write output")?;
        }
    }
    Ok(())
}
