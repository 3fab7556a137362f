//! Demo: Cyclical Time Features
//!
//! Builds a synthetic time-indexed frame and appends every cyclical
//! encoding this crate provides, then shows a few rows around midnight to
//! illustrate the wraparound closeness that raw linear encodings lack.

use anyhow::Result;
use cyclical_features::{
    add_cyclical_day_of_month, add_cyclical_day_of_week, add_cyclical_half_hour_of_day,
    add_cyclical_hour_of_day, add_cyclical_minute_of_day, add_cyclical_minute_of_hour,
    add_cyclical_month_of_year, add_cyclical_second_of_minute, add_cyclical_week_of_year,
    generate_synthetic_frame, CycleEncoder, IndexAttribute, TrigFn,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn print_separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("Cyclical Time Features - Demo");

    // ===== 1. Synthetic frame =====
    print_separator("1. Synthetic Frame");

    let mut frame = generate_synthetic_frame(48, 60, 42);
    info!(rows = frame.len(), "generated synthetic frame");
    println!("Rows: {}", frame.len());
    println!("Columns: {:?}", frame.column_names());
    println!(
        "Index: {} .. {}",
        frame.index()[0],
        frame.index()[frame.len() - 1]
    );

    // ===== 2. All convenience encodings =====
    print_separator("2. Convenience Encodings");

    add_cyclical_hour_of_day(&mut frame, None)?;
    add_cyclical_half_hour_of_day(&mut frame, None)?;
    add_cyclical_week_of_year(&mut frame, None)?;
    add_cyclical_month_of_year(&mut frame, None)?;
    add_cyclical_day_of_week(&mut frame, None)?;
    add_cyclical_day_of_month(&mut frame, None)?;
    add_cyclical_minute_of_hour(&mut frame, None)?;
    add_cyclical_minute_of_day(&mut frame, None)?;
    add_cyclical_second_of_minute(&mut frame, None)?;

    println!("Columns after encoding ({}):", frame.column_names().len());
    for name in frame.column_names() {
        println!("  {}", name);
    }

    // ===== 3. Wraparound at midnight =====
    print_separator("3. Wraparound at Midnight");

    let sin = frame.column("cyclical_hour_of_day_sin").unwrap();
    let cos = frame.column("cyclical_hour_of_day_cos").unwrap();
    println!("hour  sin      cos");
    for row in [22, 23, 24, 25] {
        println!(
            "{:>4}  {:>7.4}  {:>7.4}",
            frame.index()[row].format("%H"),
            sin[row],
            cos[row]
        );
    }
    println!("23:00 and 00:00 sit next to each other on the circle.");

    // ===== 4. Custom encoder =====
    print_separator("4. Custom Encoder");

    let encoded = CycleEncoder::from_attribute(IndexAttribute::Hour)
        .fixed_period(24.0)
        .trig_fns(&[TrigFn::Sin])
        .label("shift")
        .label_prefix("feat_")
        .encode(&frame)?;

    println!("Copy-encoded column: feat_shift_sin");
    println!(
        "Original frame untouched: {}",
        frame.column("feat_shift_sin").is_none()
    );

    // ===== 5. Matrix view =====
    print_separator("5. Matrix View");

    let matrix = encoded.to_matrix();
    println!("Feature matrix shape: {:?}", matrix.shape());

    Ok(())
}
