//! Time-Indexed Frame
//!
//! A small column-oriented table with one timestamp per row. This is the
//! shape that feature-engineering steps in this crate read from and append
//! columns to.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when manipulating a frame
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("column '{name}' has {got} values but the index has {expected} rows")]
    LengthMismatch {
        name: String,
        got: usize,
        expected: usize,
    },
}

/// An ordered table of `f64` columns indexed by UTC timestamps
///
/// Every column holds exactly one value per row of the index. Column order
/// is insertion order; assigning to an existing name overwrites the values
/// but keeps the column's position.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use cyclical_features::TimeFrame;
///
/// let index = vec![
///     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(),
/// ];
/// let mut frame = TimeFrame::new(index);
/// frame.insert_column("power", vec![310.0, 295.5]).unwrap();
/// assert_eq!(frame.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeFrame {
    index: Vec<DateTime<Utc>>,
    names: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
}

impl TimeFrame {
    /// Create an empty frame over the given time index
    pub fn new(index: Vec<DateTime<Utc>>) -> Self {
        Self {
            index,
            names: Vec::new(),
            columns: HashMap::new(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check whether the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The time index, one timestamp per row
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Values of a column, if present
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Insert or overwrite a column
    ///
    /// The value count must match the number of rows. Overwriting keeps the
    /// column's original position in the name order.
    pub fn insert_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), FrameError> {
        if values.len() != self.index.len() {
            return Err(FrameError::LengthMismatch {
                name: name.to_string(),
                got: values.len(),
                expected: self.index.len(),
            });
        }

        if !self.columns.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.columns.insert(name.to_string(), values);

        Ok(())
    }

    /// Dense matrix view of all columns, shape (rows, columns)
    ///
    /// Columns appear in insertion order, ready to feed a model.
    pub fn to_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.index.len(), self.names.len()));

        for (col_idx, name) in self.names.iter().enumerate() {
            let values = &self.columns[name];
            for (row_idx, &value) in values.iter().enumerate() {
                matrix[[row_idx, col_idx]] = value;
            }
        }

        matrix
    }
}

/// Generate a deterministic synthetic frame for tests and demos
///
/// Builds a regularly spaced index starting at 2024-01-01 00:00 UTC with
/// `step_minutes` between rows, and a single "power" column following a
/// seeded random walk.
pub fn generate_synthetic_frame(n_rows: usize, step_minutes: i64, seed: u64) -> TimeFrame {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let index: Vec<DateTime<Utc>> = (0..n_rows)
        .map(|i| start + Duration::minutes(step_minutes * i as i64))
        .collect();

    let mut level: f64 = 320.0;
    let values: Vec<f64> = (0..n_rows)
        .map(|_| {
            level = (level + rng.gen_range(-15.0..15.0)).max(0.0);
            level
        })
        .collect();

    let mut frame = TimeFrame::new(index);
    frame
        .insert_column("power", values)
        .expect("generated column matches the index length");

    frame
}
