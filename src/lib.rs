//! Cyclical Time Features
//!
//! This crate augments a time-indexed table with cyclical (sin/cos)
//! encodings of time components, for use as model input features in a
//! forecasting pipeline. A raw hour column jumps from 23 back to 0 at
//! midnight; its cyclical projection keeps those two rows numerically
//! close.
//!
//! # Components
//!
//! - **TimeFrame**: a small column-oriented table indexed by UTC timestamps
//! - **CycleEncoder**: projects a time descriptor onto sine/cosine basis
//!   functions over a configurable period
//! - **Convenience wrappers**: `add_cyclical_hour_of_day`,
//!   `add_cyclical_week_of_year`, ... with fixed labels and periods
//!
//! # Example
//!
//! ```rust
//! use cyclical_features::{add_cyclical_hour_of_day, generate_synthetic_frame};
//!
//! let mut frame = generate_synthetic_frame(48, 60, 7);
//! add_cyclical_hour_of_day(&mut frame, None).unwrap();
//!
//! assert!(frame.column("cyclical_hour_of_day_sin").is_some());
//! assert!(frame.column("cyclical_hour_of_day_cos").is_some());
//! ```

pub mod cycle;
pub mod frame;
pub mod time;

pub use cycle::*;
pub use frame::*;
pub use time::*;
