use anyhow::{Context, Result, bail};
use ndarray::{Array2, ArrayView1};
use std::{fmt::Debug, ops::RangeBounds};

pub fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

pub fn check_vec(vec: ArrayView1<f64>, exp_len: usize) -> Result<()> {
    let len = vec.len();
    if len != exp_len {
        bail!("vector length must be {exp_len}, but is {len}");
    }
    if let Some(idx) = vec.iter().position(|ele| !ele.is_finite()) {
        bail!("vector must have only finite elements, but element {idx} is {}", vec[idx]);
    }
    Ok(())
}

/// Build a `runs x timesteps` matrix from row vectors.
///
/// Every row must have the same non-zero length and only finite values.
pub fn to_mat(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    check_num(n_rows, 1..).context("invalid number of rows")?;
    let n_cols = rows[0].len();
    check_num(n_cols, 1..).context("invalid number of columns")?;

    let mut mat = Array2::zeros((n_rows, n_cols));
    for (i_row, row) in rows.iter().enumerate() {
        let row = ArrayView1::from(row.as_slice());
        check_vec(row, n_cols).with_context(|| format!("invalid row {i_row}"))?;
        mat.row_mut(i_row).assign(&row);
    }
    Ok(mat)
}

pub fn check_str(str: &str) -> Result<()> {
    if str.trim().is_empty() {
        bail!("string must not be blank");
    }
    Ok(())
}
