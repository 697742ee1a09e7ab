use crate::config::Config;
use crate::figure::{Figure, Fill, Layout, Line, Marker, Title, Trace};
use crate::stats::{Deviations, compute_deviations};
use crate::types::{NamedSeries, SeriesGroup};
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Builds figures from experiment data.
///
/// Holds the colors and layout settings; every call returns a new [`Figure`].
pub struct ChartBuilder {
    palette: Vec<String>,
    plot_bgcolor: String,
    bound_color: String,
    show_legend: bool,
}

impl ChartBuilder {
    pub fn new(cfg: &Config) -> Self {
        Self {
            palette: cfg.palette.clone(),
            plot_bgcolor: cfg.plot_bgcolor.clone(),
            bound_color: cfg.bound_color.clone(),
            show_legend: cfg.show_legend,
        }
    }

    /// Color of the group with index `i_grp`, cycling through the palette.
    pub fn color(&self, i_grp: usize) -> &str {
        &self.palette[i_grp % self.palette.len()]
    }

    /// Build a figure with the mean of each group and its standard deviation band.
    ///
    /// Each group yields three traces: lower bound, mean and upper bound.
    /// The bounds are drawn with zero width and the area between them is
    /// filled, so the order of the traces must not change.
    pub fn band_figure(&self, title: &str, groups: &[SeriesGroup]) -> Result<Figure> {
        let mut names = HashSet::new();
        let mut data = Vec::with_capacity(3 * groups.len());
        for (i_grp, grp) in groups.iter().enumerate() {
            if !names.insert(grp.name.as_str()) {
                log::warn!("duplicate group name {:?} shares its legend entry", grp.name);
            }

            let dev = grp
                .to_mat()
                .and_then(|mat| compute_deviations(mat.view()))
                .with_context(|| format!("invalid group {:?}", grp.name))?;
            log::debug!("group {:?}: {} timesteps", grp.name, dev.n_steps());

            data.extend(self.band_traces(&grp.name, dev, self.color(i_grp)));
        }

        let layout = Layout {
            title: Title::centered(title),
            plot_bgcolor: Some(self.plot_bgcolor.clone()),
            showlegend: Some(self.show_legend),
        };

        Ok(Figure { data, layout })
    }

    fn band_traces(&self, name: &str, dev: Deviations, color: &str) -> [Trace; 3] {
        let band_trace = |y: Vec<f64>, fill: Fill, show_legend: bool| {
            let mut trace = Trace::new(name, y);
            trace.fill = Some(fill);
            trace.fillcolor = Some(color.to_string());
            trace.legendgroup = Some(name.to_string());
            trace.showlegend = Some(show_legend);
            trace
        };
        let bound_line = || Line {
            width: Some(0.0),
            ..Default::default()
        };

        let mut lower = band_trace(dev.lower.to_vec(), Fill::None, false);
        lower.line = Some(bound_line());

        let mut mean = band_trace(dev.mean.to_vec(), Fill::ToNextY, true);
        mean.line = Some(Line {
            color: Some(color.to_string()),
            ..Default::default()
        });

        let mut upper = band_trace(dev.upper.to_vec(), Fill::ToNextY, false);
        upper.line = Some(bound_line());
        upper.marker = Some(Marker {
            color: self.bound_color.clone(),
        });

        [lower, mean, upper]
    }

    /// Build a figure with one line per experiment, plotting its raw values.
    pub fn line_figure(&self, title: &str, series: &[NamedSeries]) -> Figure {
        let data = series
            .iter()
            .map(|exp| {
                let mut trace = Trace::new(&exp.experiment_id, exp.data.clone());
                trace.kind = Some("scatter".to_string());
                trace
            })
            .collect();

        let layout = Layout {
            title: Title::new(title),
            plot_bgcolor: None,
            showlegend: None,
        };

        Figure { data, layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn groups(n_grp: usize) -> Vec<SeriesGroup> {
        (0..n_grp)
            .map(|i_grp| {
                let runs = vec![vec![i_grp as f64, 1.0], vec![i_grp as f64 + 2.0, 3.0]];
                SeriesGroup {
                    name: format!("grp-{i_grp}"),
                    runs,
                }
            })
            .collect()
    }

    #[test]
    fn three_traces_per_group_in_order() {
        let builder = ChartBuilder::new(&Config::default());
        let fig = builder.band_figure("runs", &groups(4)).unwrap();

        assert_eq!(fig.data.len(), 12);
        for (i_grp, triple) in fig.data.chunks(3).enumerate() {
            let name = format!("grp-{i_grp}");
            for trace in triple {
                assert_eq!(trace.name, name);
                assert_eq!(trace.legendgroup.as_deref(), Some(name.as_str()));
                assert_eq!(trace.x, [0, 1]);
            }
            assert!(triple[0].y[0] <= triple[1].y[0] && triple[1].y[0] <= triple[2].y[0]);
        }
    }

    #[test]
    fn fill_and_legend_flags() {
        let builder = ChartBuilder::new(&Config::default());
        let fig = builder.band_figure("runs", &groups(1)).unwrap();

        let fills: Vec<_> = fig.data.iter().map(|trace| trace.fill).collect();
        assert_eq!(fills, [Some(Fill::None), Some(Fill::ToNextY), Some(Fill::ToNextY)]);

        let legends: Vec<_> = fig.data.iter().map(|trace| trace.showlegend).collect();
        assert_eq!(legends, [Some(false), Some(true), Some(false)]);

        assert_eq!(fig.data[0].line.as_ref().unwrap().width, Some(0.0));
        assert_eq!(fig.data[2].line.as_ref().unwrap().width, Some(0.0));
        assert_eq!(fig.data[2].marker.as_ref().unwrap().color, "#444");
    }

    #[test]
    fn colors_cycle_through_palette() {
        let cfg = Config {
            palette: vec!["red".to_string(), "green".to_string(), "blue".to_string()],
            ..Config::default()
        };
        let builder = ChartBuilder::new(&cfg);
        let fig = builder.band_figure("runs", &groups(5)).unwrap();

        let colors: Vec<_> = fig
            .data
            .chunks(3)
            .map(|triple| triple[1].line.as_ref().unwrap().color.clone().unwrap())
            .collect();
        assert_eq!(colors, ["red", "green", "blue", "red", "green"]);
        for triple in fig.data.chunks(3) {
            let color = &triple[1].line.as_ref().unwrap().color;
            assert!(triple.iter().all(|trace| &trace.fillcolor == color));
        }
    }

    #[test]
    fn default_palette_wraps_after_ten_groups() {
        let builder = ChartBuilder::new(&Config::default());
        assert_eq!(builder.color(0), builder.color(10));
        assert_ne!(builder.color(0), builder.color(9));
    }

    #[test]
    fn band_layout() {
        let builder = ChartBuilder::new(&Config::default());
        let fig = builder.band_figure("Reward", &groups(1)).unwrap();
        let layout = serde_json::to_value(&fig.layout).unwrap();
        assert_eq!(
            layout,
            json!({
                "title": { "text": "Reward", "x": 0.5, "xanchor": "center", "yanchor": "top" },
                "plot_bgcolor": "#ffffff",
                "showlegend": true
            })
        );
    }

    #[test]
    fn band_figure_is_deterministic() {
        let builder = ChartBuilder::new(&Config::default());
        let fig_a = builder.band_figure("runs", &groups(3)).unwrap();
        let fig_b = builder.band_figure("runs", &groups(3)).unwrap();
        assert_eq!(fig_a, fig_b);
        assert_eq!(
            serde_json::to_string(&fig_a).unwrap(),
            serde_json::to_string(&fig_b).unwrap()
        );
    }

    #[test]
    fn invalid_group_aborts_figure() {
        let builder = ChartBuilder::new(&Config::default());
        let mut grps = groups(2);
        grps.push(SeriesGroup {
            name: "ragged".to_string(),
            runs: vec![vec![1.0, 2.0], vec![3.0]],
        });

        let err = builder.band_figure("runs", &grps).unwrap_err();
        assert!(format!("{err:#}").contains("invalid group \"ragged\""));
    }

    #[test]
    fn line_figure_passes_data_through() {
        let builder = ChartBuilder::new(&Config::default());
        let series = vec![NamedSeries {
            experiment_id: "a".to_string(),
            data: vec![1.0, 2.0, 3.0],
        }];
        let fig = builder.line_figure("Loss", &series);

        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0].x, [0, 1, 2]);
        assert_eq!(fig.data[0].y, [1.0, 2.0, 3.0]);
        assert_eq!(fig.data[0].name, "a");

        let value = serde_json::to_value(&fig).unwrap();
        assert_eq!(value["layout"], json!({ "title": { "text": "Loss" } }));
        assert_eq!(value["data"][0]["type"], json!("scatter"));
    }

    #[test]
    fn duplicate_names_share_legend_group() {
        let builder = ChartBuilder::new(&Config::default());
        let mut grps = groups(1);
        grps.extend(groups(1));

        let fig = builder.band_figure("runs", &grps).unwrap();
        assert_eq!(fig.data.len(), 6);
        assert!(fig
            .data
            .iter()
            .all(|trace| trace.legendgroup.as_deref() == Some("grp-0")));
        assert_ne!(builder.color(0), builder.color(1));
        assert_ne!(fig.data[1].line, fig.data[4].line);
    }
}
