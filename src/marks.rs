use crate::utils::check_num;
use anyhow::{Context, Result, bail};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::collections::HashSet;

const MAX_N_MARKS: usize = 100_000;

/// Extra decimals kept in keys beyond the resolution of the step.
const KEY_EXTRA_DECIMALS: usize = 3;

/// Labeled position of a slider or axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub pos: f64,
    /// Key of the mark in the serialized mapping.
    pub key: String,
    pub label: String,
}

/// Ordered marks, serialized as a `position -> label` mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Marks(pub Vec<Mark>);

impl Serialize for Marks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for mark in &self.0 {
            map.serialize_entry(&mark.key, &mark.label)?;
        }
        map.end()
    }
}

/// Generate marks from `min` to `max` (inclusive) every `step`.
///
/// Keys are the positions in plain decimal form, rounded a few digits below
/// the resolution of `step`; integral positions have no fractional part.
/// Labels are the positions rounded to two decimals, ties to even, and
/// always carry a fractional part (`"2.0"`, `"0.12"`).
pub fn generate_marks(min: f64, max: f64, step: f64) -> Result<Marks> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) {
        bail!("bounds and step must be finite");
    }
    if min > max {
        bail!("min must not exceed max, but {min} > {max}");
    }
    if step <= 0.0 {
        bail!("step must be positive, but is {step}");
    }

    // Tolerate rounding error when max is a multiple of step away from min.
    let n_marks = ((max - min) / step + 1e-9).floor() + 1.0;
    check_num(n_marks, 1.0..=MAX_N_MARKS as f64).context("invalid number of marks")?;

    let key_decimals = (-step.log10()).ceil().max(0.0) as usize + KEY_EXTRA_DECIMALS;

    let mut keys = HashSet::new();
    let mut marks = Vec::with_capacity(n_marks as usize);
    for i_mark in 0..n_marks as usize {
        let pos = min + i_mark as f64 * step;
        if !pos.is_finite() {
            bail!("mark {i_mark} position is not finite");
        }

        let key = to_decimal(pos, key_decimals)?;
        if !keys.insert(key.clone()) {
            bail!("marks collide at {key}, step {step} is too small for the range");
        }

        let mut label = to_decimal(pos, 2)?;
        if !label.contains('.') {
            label.push_str(".0");
        }

        marks.push(Mark { pos, key, label });
    }

    Ok(Marks(marks))
}

/// Round `val` to `n_decimals` (ties to even) and write it in its shortest
/// plain decimal form.
fn to_decimal(val: f64, n_decimals: usize) -> Result<String> {
    let rounded: f64 = format!("{val:.n_decimals$}")
        .parse()
        .with_context(|| format!("failed to round {val}"))?;
    Ok(format!("{}", rounded + 0.0))
}
