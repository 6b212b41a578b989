//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

/// Number of decimals needed to print multiples of `step` exactly
///
/// Steps follow the 1/2/5 rule: 0.05 needs 2 decimals, 5 needs none.
pub fn step_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    // nudge so exact powers of ten do not round down a digit
    (-(step.log10() + 1e-9).floor()).max(0.0) as usize
}

/// Format an axis value with thousands separators
///
/// # Examples
/// ```
/// use trendline::utils::format_tick;
///
/// assert_eq!(format_tick(1500.0, 500.0), "1,500");
/// assert_eq!(format_tick(0.5, 0.1), "0.5");
/// ```
pub fn format_tick(value: f64, step: f64) -> String {
    let precision = step_precision(step);
    let formatted = format!("{:.*}", precision, value.abs());

    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let smallest = 0.5 * 10f64.powi(-(precision as i32));
    let sign = if value < 0.0 && value.abs() >= smallest { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a year label as a plain integer (no grouping)
pub fn format_year(year: i32) -> String {
    year.to_string()
}
