use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::contour::Grid;

use super::source::DataSource;

/// Decode a row-major 2D array of numbers. `null` cells become NaN.
pub fn read_grid(bytes: &[u8]) -> Result<Grid> {
    let value: Value = serde_json::from_slice(bytes)
        .context("[io::grid] failed to parse grid JSON")?;
    let rows = value.as_array()
        .ok_or_else(|| anyhow!("[io::grid] expected an array of rows"))?;

    let rows = rows.iter().enumerate()
        .map(|(y, row)| {
            let row = row.as_array()
                .ok_or_else(|| anyhow!("[io::grid] row {y} is not an array"))?;
            row.iter().enumerate()
                .map(|(x, cell)| match cell {
                    Value::Null => Ok(f64::NAN),
                    cell => cell.as_f64().ok_or_else(|| anyhow!("[io::grid] cell ({x}, {y}) is not a number")),
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Grid::from_rows(rows)
}

/// Fetch and decode a grid from a source.
pub fn read_grid_from(source: &dyn DataSource) -> Result<Grid> {
    let bytes = source.fetch()?;
    read_grid(&bytes).with_context(|| format!("[io::grid] failed to read {}", source.describe()))
}
