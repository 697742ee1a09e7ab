use crate::utils::{check_num, check_vec};
use anyhow::{Context, Result};
use ndarray::{Array1, ArrayView2, Axis};

/// Mean of a group of runs together with its one standard deviation band.
#[derive(Debug, Clone, PartialEq)]
pub struct Deviations {
    pub mean: Array1<f64>,
    pub lower: Array1<f64>,
    pub upper: Array1<f64>,
}

impl Deviations {
    pub fn n_steps(&self) -> usize {
        self.mean.len()
    }
}

/// Compute the deviation band of a `runs x timesteps` matrix.
///
/// Mean and standard deviation are taken column-wise over the runs axis.
/// The standard deviation is the population one (divisor = number of runs).
pub fn compute_deviations(data: ArrayView2<f64>) -> Result<Deviations> {
    let (n_runs, n_steps) = data.dim();
    check_num(n_runs, 1..).context("invalid number of runs")?;
    check_num(n_steps, 1..).context("invalid number of timesteps")?;

    let mean = data
        .mean_axis(Axis(0))
        .context("failed to compute mean over runs")?;
    let std_dev = data.std_axis(Axis(0), 0.0);

    let dev = Deviations {
        lower: &mean - &std_dev,
        upper: &mean + &std_dev,
        mean,
    };

    // Reductions of finite values can still overflow.
    for (label, vec) in [
        ("mean", &dev.mean),
        ("std dev", &std_dev),
        ("lower bound", &dev.lower),
        ("upper bound", &dev.upper),
    ] {
        check_vec(vec.view(), n_steps)
            .with_context(|| format!("non-finite deviation summary ({label})"))?;
    }

    Ok(dev)
}
