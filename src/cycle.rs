//! Cyclical Time Encoding
//!
//! Projects a periodic time descriptor (hour of day, minute of hour, ...)
//! onto sine/cosine basis functions, so that values adjacent across a
//! period boundary (23:00 vs 00:00) come out numerically close, unlike a
//! raw linear encoding.
//!
//! The encoded value for a descriptor `v` with period `m` is
//! `trig(2π · v / m)`, appended as one new column per basis function.

use crate::frame::{FrameError, TimeFrame};
use crate::time::{compute_minute_of_day, compute_second_of_minute, IndexAttribute};
use std::f64::consts::PI;
use thiserror::Error;
use tracing::debug;

/// Prefix prepended to every generated column name
pub const DEFAULT_LABEL_PREFIX: &str = "cyclical_";

/// Errors raised by the cyclical encoder
///
/// All of these are caller-contract violations, raised before any column
/// is written.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("no label given and none derivable: a direct descriptor needs an explicit label")]
    MissingLabel,

    #[error("at least one basis function is required")]
    NoTrigFns,

    #[error("no period configured for the cycle")]
    MissingPeriod,

    #[error("{what} has {got} values but the frame has {expected} rows")]
    LengthMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Periodic basis function for the projection
///
/// Closed set: only sine and cosine are meaningful here, so requesting
/// anything else is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
}

impl TrigFn {
    /// Suffix used in generated column names
    pub fn name(&self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
        }
    }

    /// Evaluate the basis function at an angle in radians
    pub fn eval(&self, angle: f64) -> f64 {
        match self {
            TrigFn::Sin => angle.sin(),
            TrigFn::Cos => angle.cos(),
        }
    }
}

/// Number of discrete steps in one full cycle of a descriptor
///
/// Either one value for the whole frame (24 for hour of day) or one value
/// per row (days in month varies with the row's month). A zero period is
/// not guarded: the division propagates ordinary IEEE-754 inf/NaN.
#[derive(Debug, Clone)]
pub enum Period {
    Fixed(f64),
    PerRow(Vec<f64>),
}

impl Period {
    fn at(&self, row: usize) -> f64 {
        match self {
            Period::Fixed(steps) => *steps,
            Period::PerRow(steps) => steps[row],
        }
    }
}

#[derive(Debug, Clone)]
enum DescriptorSource {
    /// Caller-supplied values, one per row
    Direct(Vec<f64>),
    /// Values read off the frame's time index
    Index(IndexAttribute),
}

/// Configurable cyclical encoder
///
/// Built from exactly one descriptor source (a direct sequence or an index
/// attribute), then applied to a frame. `encode` works on a copy and
/// leaves the input untouched; `encode_in_place` mutates the caller's
/// frame.
///
/// # Example
///
/// ```rust
/// use cyclical_features::{generate_synthetic_frame, CycleEncoder, IndexAttribute, TrigFn};
///
/// let frame = generate_synthetic_frame(48, 60, 7);
/// let encoded = CycleEncoder::from_attribute(IndexAttribute::Hour)
///     .fixed_period(24.0)
///     .label("hour_of_day")
///     .encode(&frame)
///     .unwrap();
///
/// assert!(encoded.column("cyclical_hour_of_day_sin").is_some());
/// assert!(encoded.column("cyclical_hour_of_day_cos").is_some());
/// assert!(frame.column("cyclical_hour_of_day_sin").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CycleEncoder {
    source: DescriptorSource,
    period: Option<Period>,
    trig_fns: Vec<TrigFn>,
    label: Option<String>,
    label_prefix: String,
}

impl CycleEncoder {
    /// Encoder reading its descriptor from an attribute of the time index
    pub fn from_attribute(attribute: IndexAttribute) -> Self {
        Self::with_source(DescriptorSource::Index(attribute))
    }

    /// Encoder using a caller-supplied descriptor, one value per row
    pub fn from_descriptor(values: Vec<f64>) -> Self {
        Self::with_source(DescriptorSource::Direct(values))
    }

    fn with_source(source: DescriptorSource) -> Self {
        Self {
            source,
            period: None,
            trig_fns: vec![TrigFn::Sin, TrigFn::Cos],
            label: None,
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
        }
    }

    /// Set the cycle period
    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// Set a fixed cycle period
    pub fn fixed_period(self, steps: f64) -> Self {
        self.period(Period::Fixed(steps))
    }

    /// Select the basis functions, replacing the default `[Sin, Cos]`
    pub fn trig_fns(mut self, fns: &[TrigFn]) -> Self {
        self.trig_fns = fns.to_vec();
        self
    }

    /// Base name for the generated columns
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Replace the default `"cyclical_"` column-name prefix
    pub fn label_prefix(mut self, prefix: &str) -> Self {
        self.label_prefix = prefix.to_string();
        self
    }

    /// Encode into a copy of the frame, leaving the input untouched
    pub fn encode(&self, frame: &TimeFrame) -> Result<TimeFrame, FeatureError> {
        let mut out = frame.clone();
        self.encode_in_place(&mut out)?;
        Ok(out)
    }

    /// Encode into the caller's frame
    ///
    /// Validation runs before any column is written, so a contract error
    /// leaves the frame unchanged.
    pub fn encode_in_place(&self, frame: &mut TimeFrame) -> Result<(), FeatureError> {
        if self.trig_fns.is_empty() {
            return Err(FeatureError::NoTrigFns);
        }

        let period = self.period.as_ref().ok_or(FeatureError::MissingPeriod)?;
        let n_rows = frame.len();

        if let Period::PerRow(steps) = period {
            if steps.len() != n_rows {
                return Err(FeatureError::LengthMismatch {
                    what: "per-row period",
                    got: steps.len(),
                    expected: n_rows,
                });
            }
        }

        let descriptor: Vec<f64> = match &self.source {
            DescriptorSource::Direct(values) => {
                if values.len() != n_rows {
                    return Err(FeatureError::LengthMismatch {
                        what: "descriptor",
                        got: values.len(),
                        expected: n_rows,
                    });
                }
                values.clone()
            }
            DescriptorSource::Index(attribute) => attribute.extract_all(frame.index()),
        };

        let label = self.resolve_label()?;
        debug!(label = %label, rows = n_rows, fns = self.trig_fns.len(), "encoding cycle");

        for trig in &self.trig_fns {
            let name = format!("{}{}_{}", self.label_prefix, label, trig.name());
            let values: Vec<f64> = descriptor
                .iter()
                .enumerate()
                .map(|(row, &value)| trig.eval(2.0 * PI * value / period.at(row)))
                .collect();
            frame.insert_column(&name, values)?;
        }

        Ok(())
    }

    fn resolve_label(&self) -> Result<String, FeatureError> {
        if let Some(label) = &self.label {
            return Ok(label.clone());
        }

        match &self.source {
            DescriptorSource::Index(attribute) => Ok(format!("cyclical_{}", attribute.name())),
            DescriptorSource::Direct(_) => Err(FeatureError::MissingLabel),
        }
    }
}

/// Append hour-of-day sin/cos columns (period 24), in place
pub fn add_cyclical_hour_of_day(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    CycleEncoder::from_attribute(IndexAttribute::Hour)
        .fixed_period(24.0)
        .label(label.unwrap_or("hour_of_day"))
        .encode_in_place(frame)
}

/// Append half-hour-of-day sin/cos columns, in place
///
/// Uses the raw hour values over a 12-step period, so the cycle repeats
/// twice per day.
pub fn add_cyclical_half_hour_of_day(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    let hours = IndexAttribute::Hour.extract_all(frame.index());
    CycleEncoder::from_descriptor(hours)
        .fixed_period(12.0)
        .label(label.unwrap_or("half_hour_of_day"))
        .encode_in_place(frame)
}

/// Append week-of-year sin/cos columns (period 52), in place
///
/// ISO years with 53 numbered weeks are not handled; week 53 lands just
/// past a full cycle.
pub fn add_cyclical_week_of_year(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    let nb_week = 52.0;
    CycleEncoder::from_attribute(IndexAttribute::Week)
        .fixed_period(nb_week)
        .label(label.unwrap_or("week_of_year"))
        .encode_in_place(frame)
}

/// Append month-of-year sin/cos columns (period 12), in place
pub fn add_cyclical_month_of_year(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    CycleEncoder::from_attribute(IndexAttribute::Month)
        .fixed_period(12.0)
        .label(label.unwrap_or("month_of_year"))
        .encode_in_place(frame)
}

/// Append day-of-week sin/cos columns (period 7, Monday = 0), in place
pub fn add_cyclical_day_of_week(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    CycleEncoder::from_attribute(IndexAttribute::DayOfWeek)
        .fixed_period(7.0)
        .label(label.unwrap_or("day_of_week"))
        .encode_in_place(frame)
}

/// Append day-of-month sin/cos columns over a per-row days-in-month
/// period, in place
///
/// Known discrepancy: the descriptor is the day-of-week attribute, not the
/// day of the month, while the period is days-in-month. Kept as-is until
/// product intent is confirmed.
pub fn add_cyclical_day_of_month(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    let days = IndexAttribute::DaysInMonth.extract_all(frame.index());
    CycleEncoder::from_attribute(IndexAttribute::DayOfWeek)
        .period(Period::PerRow(days))
        .label(label.unwrap_or("day_of_month"))
        .encode_in_place(frame)
}

/// Append minute-of-hour sin/cos columns (period 60), in place
pub fn add_cyclical_minute_of_hour(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    CycleEncoder::from_attribute(IndexAttribute::Minute)
        .fixed_period(60.0)
        .label(label.unwrap_or("minute_of_hour"))
        .encode_in_place(frame)
}

/// Append minute-of-day sin/cos columns (period 1440), in place
pub fn add_cyclical_minute_of_day(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    let minutes: Vec<f64> = compute_minute_of_day(frame.index())
        .into_iter()
        .map(f64::from)
        .collect();
    CycleEncoder::from_descriptor(minutes)
        .fixed_period(1440.0)
        .label(label.unwrap_or("minute_of_day"))
        .encode_in_place(frame)
}

/// Append second-of-minute sin/cos columns (period 60), in place
pub fn add_cyclical_second_of_minute(
    frame: &mut TimeFrame,
    label: Option<&str>,
) -> Result<(), FeatureError> {
    let seconds: Vec<f64> = compute_second_of_minute(frame.index())
        .into_iter()
        .map(f64::from)
        .collect();
    CycleEncoder::from_descriptor(seconds)
        .fixed_period(60.0)
        .label(label.unwrap_or("second_of_minute"))
        .encode_in_place(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::generate_synthetic_frame;
    use chrono::{TimeZone, Utc};

    /// Frame indexed at the given (hour, minute) pairs on 2024-01-01
    fn frame_at(times: &[(u32, u32)]) -> TimeFrame {
        let index = times
            .iter()
            .map(|&(h, m)| Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap())
            .collect();
        let mut frame = TimeFrame::new(index);
        let power = vec![100.0; times.len()];
        frame.insert_column("power", power).unwrap();
        frame
    }

    #[test]
    fn test_sin_cos_unit_circle() {
        let mut frame = frame_at(&[(0, 0), (5, 0), (11, 30), (17, 15), (23, 59)]);
        add_cyclical_hour_of_day(&mut frame, None).unwrap();

        let sin = frame.column("cyclical_hour_of_day_sin").unwrap();
        let cos = frame.column("cyclical_hour_of_day_cos").unwrap();

        for (s, c) in sin.iter().zip(cos.iter()) {
            assert!((s * s + c * c - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_periodicity() {
        let frame = frame_at(&[(0, 0), (1, 0), (2, 0)]);

        let base = CycleEncoder::from_descriptor(vec![3.0, 10.0, 23.0])
            .fixed_period(24.0)
            .label("base")
            .encode(&frame)
            .unwrap();
        let shifted = CycleEncoder::from_descriptor(vec![27.0, 34.0, 47.0])
            .fixed_period(24.0)
            .label("base")
            .encode(&frame)
            .unwrap();

        for suffix in ["sin", "cos"] {
            let name = format!("cyclical_base_{}", suffix);
            let a = base.column(&name).unwrap();
            let b = shifted.column(&name).unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_encode_leaves_input_untouched() {
        let frame = frame_at(&[(0, 0), (6, 0)]);
        let encoded = CycleEncoder::from_attribute(IndexAttribute::Hour)
            .fixed_period(24.0)
            .label("hour_of_day")
            .encode(&frame)
            .unwrap();

        assert_eq!(frame.column_names(), &["power"]);
        assert_eq!(encoded.column_names().len(), 3);
    }

    #[test]
    fn test_encode_in_place_mutates() {
        let mut frame = frame_at(&[(0, 0), (6, 0)]);
        CycleEncoder::from_attribute(IndexAttribute::Hour)
            .fixed_period(24.0)
            .label("hour_of_day")
            .encode_in_place(&mut frame)
            .unwrap();

        assert_eq!(frame.column_names().len(), 3);
    }

    #[test]
    fn test_custom_label_and_prefix() {
        let mut frame = frame_at(&[(0, 0), (6, 0)]);
        CycleEncoder::from_descriptor(vec![1.0, 2.0])
            .fixed_period(4.0)
            .trig_fns(&[TrigFn::Sin])
            .label("foo")
            .label_prefix("bar_")
            .encode_in_place(&mut frame)
            .unwrap();

        assert_eq!(frame.column_names(), &["power", "bar_foo_sin"]);
    }

    #[test]
    fn test_derived_label_keeps_marker() {
        let mut frame = frame_at(&[(0, 0), (6, 0)]);
        CycleEncoder::from_attribute(IndexAttribute::Hour)
            .fixed_period(24.0)
            .encode_in_place(&mut frame)
            .unwrap();

        // Derived label is "cyclical_hour", then the prefix goes in front.
        assert!(frame.column("cyclical_cyclical_hour_sin").is_some());
        assert!(frame.column("cyclical_cyclical_hour_cos").is_some());
    }

    #[test]
    fn test_missing_label_with_direct_descriptor() {
        let mut frame = frame_at(&[(0, 0), (6, 0)]);
        let result = CycleEncoder::from_descriptor(vec![1.0, 2.0])
            .fixed_period(4.0)
            .encode_in_place(&mut frame);

        assert!(matches!(result, Err(FeatureError::MissingLabel)));
        assert_eq!(frame.column_names(), &["power"]);
    }

    #[test]
    fn test_empty_trig_fns() {
        let mut frame = frame_at(&[(0, 0)]);
        let result = CycleEncoder::from_attribute(IndexAttribute::Hour)
            .fixed_period(24.0)
            .trig_fns(&[])
            .encode_in_place(&mut frame);

        assert!(matches!(result, Err(FeatureError::NoTrigFns)));
    }

    #[test]
    fn test_missing_period() {
        let mut frame = frame_at(&[(0, 0)]);
        let result =
            CycleEncoder::from_attribute(IndexAttribute::Hour).encode_in_place(&mut frame);

        assert!(matches!(result, Err(FeatureError::MissingPeriod)));
    }

    #[test]
    fn test_descriptor_length_mismatch() {
        let mut frame = frame_at(&[(0, 0), (6, 0), (12, 0)]);
        let result = CycleEncoder::from_descriptor(vec![1.0, 2.0])
            .fixed_period(4.0)
            .label("short")
            .encode_in_place(&mut frame);

        assert!(matches!(
            result,
            Err(FeatureError::LengthMismatch {
                what: "descriptor",
                got: 2,
                expected: 3,
            })
        ));
    }

    #[test]
    fn test_per_row_period_length_mismatch() {
        let mut frame = frame_at(&[(0, 0), (6, 0)]);
        let result = CycleEncoder::from_attribute(IndexAttribute::DayOfWeek)
            .period(Period::PerRow(vec![31.0]))
            .label("dom")
            .encode_in_place(&mut frame);

        assert!(matches!(
            result,
            Err(FeatureError::LengthMismatch {
                what: "per-row period",
                ..
            })
        ));
    }

    #[test]
    fn test_hour_of_day_quadrants() {
        let mut frame = frame_at(&[(0, 0), (6, 0), (12, 0), (18, 0)]);
        add_cyclical_hour_of_day(&mut frame, None).unwrap();

        let sin = frame.column("cyclical_hour_of_day_sin").unwrap();
        let expected = [0.0, 1.0, 0.0, -1.0];
        for (value, want) in sin.iter().zip(expected.iter()) {
            assert!((value - want).abs() < 1e-10);
        }
    }

    #[test]
    fn test_minute_of_day_wraparound() {
        let mut frame = frame_at(&[(0, 0), (23, 59)]);
        add_cyclical_minute_of_day(&mut frame, None).unwrap();

        let cos = frame.column("cyclical_minute_of_day_cos").unwrap();
        // 0 and 1439 sit on either side of the cycle boundary.
        assert!((cos[0] - cos[1]).abs() < 1e-4);
    }

    #[test]
    fn test_half_hour_uses_raw_hours() {
        let mut frame = frame_at(&[(0, 0), (3, 0), (15, 0)]);
        add_cyclical_half_hour_of_day(&mut frame, None).unwrap();

        let sin = frame.column("cyclical_half_hour_of_day_sin").unwrap();
        // Hours 3 and 15 are one full 12-step cycle apart.
        assert!((sin[1] - sin[2]).abs() < 1e-9);
        assert!((sin[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_day_of_month_per_row_period() {
        // Jan 31 (dow=2, 31 days) and Feb 1 (dow=3, 29 days in 2024)
        let index = vec![
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        ];
        let mut frame = TimeFrame::new(index);
        frame.insert_column("power", vec![1.0, 2.0]).unwrap();

        add_cyclical_day_of_month(&mut frame, None).unwrap();

        let sin = frame.column("cyclical_day_of_month_sin").unwrap();
        let expected = [
            (2.0 * PI * 2.0 / 31.0).sin(),
            (2.0 * PI * 3.0 / 29.0).sin(),
        ];
        for (value, want) in sin.iter().zip(expected.iter()) {
            assert!((value - want).abs() < 1e-10);
        }
    }

    #[test]
    fn test_label_override() {
        let mut frame = frame_at(&[(0, 0), (6, 0)]);
        add_cyclical_hour_of_day(&mut frame, Some("hod")).unwrap();

        assert!(frame.column("cyclical_hod_sin").is_some());
        assert!(frame.column("cyclical_hour_of_day_sin").is_none());
    }

    #[test]
    fn test_all_wrappers_on_synthetic_frame() {
        let mut frame = generate_synthetic_frame(72, 30, 11);

        add_cyclical_hour_of_day(&mut frame, None).unwrap();
        add_cyclical_half_hour_of_day(&mut frame, None).unwrap();
        add_cyclical_week_of_year(&mut frame, None).unwrap();
        add_cyclical_month_of_year(&mut frame, None).unwrap();
        add_cyclical_day_of_week(&mut frame, None).unwrap();
        add_cyclical_day_of_month(&mut frame, None).unwrap();
        add_cyclical_minute_of_hour(&mut frame, None).unwrap();
        add_cyclical_minute_of_day(&mut frame, None).unwrap();
        add_cyclical_second_of_minute(&mut frame, None).unwrap();

        // power + 9 wrappers * 2 basis functions
        assert_eq!(frame.column_names().len(), 19);
        for name in frame.column_names().iter().filter(|n| *n != "power") {
            for &value in frame.column(name).unwrap() {
                assert!((-1.0..=1.0).contains(&value));
            }
        }

        let matrix = frame.to_matrix();
        assert_eq!(matrix.shape(), &[72, 19]);
    }
}
