//! Linear trend estimation over yearly counts
//!
//! This module provides functionality for:
//! - Fitting an ordinary-least-squares line `count ≈ slope·year + intercept`
//! - Predicting one trend value per observed year
//! - Classifying trend direction and goodness of fit
//!
//! The fit is closed-form and computed in `f64` throughout. Degenerate inputs
//! (fewer than two years, or no variance in the years) are reported as
//! [`TrendError`] values instead of producing NaN predictions.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::models::{TrendPoint, YearCount};

/// Errors that can occur during trend estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("Insufficient data points: need at least {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Series is not strictly ascending at index {index}: year {year} follows {previous}")]
    UnorderedSeries {
        index: usize,
        previous: i32,
        year: i32,
    },

    #[error("Years have zero variance, slope is undefined")]
    DegenerateVariance,
}

/// Result type for trend estimation
pub type TrendResult<T> = Result<T, TrendError>;

/// Yearly change, as a share of the mean count, above which a trend is strong
const STRONG_CHANGE: f64 = 0.3;

/// Yearly change, as a share of the mean count, at or below which a series is flat
const FLAT_CHANGE: f64 = 0.1;

/// Direction of a fitted trendline
///
/// Classified from the slope relative to the mean yearly count, so that a
/// change of ten incidents a year reads as strong for a small precinct and
/// flat for a whole city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    /// Grows by more than 30% of the mean yearly count each year
    Rising,

    SlightlyRising,

    /// Yearly change within 10% of the mean yearly count
    Stable,

    SlightlyFalling,

    /// Shrinks by more than 30% of the mean yearly count each year
    Falling,
}

impl TrendDirection {
    /// Classify a relative yearly change (slope divided by mean count)
    #[must_use]
    pub fn from_relative_slope(change: f64) -> Self {
        let magnitude = change.abs();
        match (change > 0.0, magnitude) {
            (_, m) if m <= FLAT_CHANGE => Self::Stable,
            (true, m) if m > STRONG_CHANGE => Self::Rising,
            (true, _) => Self::SlightlyRising,
            (false, m) if m > STRONG_CHANGE => Self::Falling,
            (false, _) => Self::SlightlyFalling,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::SlightlyRising => "slightly rising",
            Self::Stable => "stable",
            Self::SlightlyFalling => "slightly falling",
            Self::Falling => "falling",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fitted least-squares line over a yearly series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    /// Incidents gained per year
    pub slope: f64,

    /// Predicted count at year 0
    pub intercept: f64,

    /// Coefficient of determination, `None` when all counts are equal
    pub r_squared: Option<f64>,

    /// Mean observed count
    pub mean_count: f64,

    /// Number of years the line was fitted on
    pub sample_size: usize,
}

impl LinearFit {
    /// Fit a line to a strictly ascending yearly series
    ///
    /// # Errors
    /// - [`TrendError::InsufficientData`] for fewer than two entries
    /// - [`TrendError::UnorderedSeries`] if years are unsorted or repeated
    /// - [`TrendError::DegenerateVariance`] if the slope is not finite
    pub fn fit(series: &[YearCount]) -> TrendResult<Self> {
        let n = series.len();
        if n < 2 {
            return Err(TrendError::InsufficientData {
                required: 2,
                actual: n,
            });
        }

        if let Some(index) = series.windows(2).position(|w| w[1].year <= w[0].year) {
            return Err(TrendError::UnorderedSeries {
                index: index + 1,
                previous: series[index].year,
                year: series[index + 1].year,
            });
        }

        let n_f64 = n as f64;
        let sum_x: f64 = series.iter().map(|p| f64::from(p.year)).sum();
        let sum_y: f64 = series.iter().map(|p| p.count as f64).sum();
        let sum_xy: f64 = series
            .iter()
            .map(|p| f64::from(p.year) * p.count as f64)
            .sum();
        let sum_x2: f64 = series
            .iter()
            .map(|p| f64::from(p.year) * f64::from(p.year))
            .sum();

        let denominator = n_f64 * sum_x2 - sum_x * sum_x;
        if denominator == 0.0 {
            return Err(TrendError::DegenerateVariance);
        }

        let slope = (n_f64 * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n_f64;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(TrendError::DegenerateVariance);
        }

        let counts: Vec<f64> = series.iter().map(|p| p.count as f64).collect();
        let mean_count = counts.iter().mean();
        let ss_tot = counts.iter().population_variance() * n_f64;
        let ss_res: f64 = series
            .iter()
            .map(|p| (p.count as f64 - (slope * f64::from(p.year) + intercept)).powi(2))
            .sum();

        let r_squared = (ss_tot > 0.0).then(|| 1.0 - ss_res / ss_tot);

        tracing::debug!(
            slope = %slope,
            intercept = %intercept,
            r_squared = ?r_squared,
            years = n,
            "Fitted linear trend"
        );

        Ok(Self {
            slope,
            intercept,
            r_squared,
            mean_count,
            sample_size: n,
        })
    }

    /// Predicted count for a year
    #[must_use]
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * f64::from(year) + self.intercept
    }

    /// One trend point per series entry, same order
    #[must_use]
    pub fn trend_points(&self, series: &[YearCount]) -> Vec<TrendPoint> {
        series
            .iter()
            .map(|p| TrendPoint {
                year: p.year,
                predicted_count: self.predict(p.year),
            })
            .collect()
    }

    /// Yearly change as a share of the mean count, clamped to `[-1.0, 1.0]`
    ///
    /// Zero when the mean count is zero.
    #[must_use]
    pub fn relative_slope(&self) -> f64 {
        if self.mean_count > 0.0 {
            (self.slope / self.mean_count).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    /// Classify the fitted slope
    #[must_use]
    pub fn direction(&self) -> TrendDirection {
        TrendDirection::from_relative_slope(self.relative_slope())
    }
}

/// Fit a least-squares line and predict one count per year
///
/// The output has the same length, years and order as the input.
///
/// # Example
/// ```
/// use trendline::analytics::fit_trend;
/// use trendline::models::YearCount;
///
/// let series = [YearCount::new(2000, 10), YearCount::new(2001, 10)];
/// let trend = fit_trend(&series).unwrap();
/// assert_eq!(trend[0].predicted_count, 10.0);
/// ```
pub fn fit_trend(series: &[YearCount]) -> TrendResult<Vec<TrendPoint>> {
    let fit = LinearFit::fit(series)?;
    Ok(fit.trend_points(series))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i32, u64)]) -> Vec<YearCount> {
        points.iter().map(|&(y, c)| YearCount::new(y, c)).collect()
    }

    #[test]
    fn test_collinear_points_fit_exactly() {
        let data = series(&[(1970, 1), (1971, 3), (1972, 5)]);
        let fit = LinearFit::fit(&data).unwrap();

        assert_eq!(fit.slope, 2.0);
        assert_eq!(fit.intercept, -3939.0);
        assert_eq!(fit.r_squared, Some(1.0));

        let predicted: Vec<f64> = fit.trend_points(&data).iter().map(|p| p.predicted_count).collect();
        assert_eq!(predicted, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_flat_series() {
        let data = series(&[(2000, 10), (2001, 10)]);
        let fit = LinearFit::fit(&data).unwrap();

        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, None);
        assert_eq!(fit.direction(), TrendDirection::Stable);

        let trend = fit_trend(&data).unwrap();
        assert_eq!(trend[0].predicted_count, 10.0);
        assert_eq!(trend[1].predicted_count, 10.0);
    }

    #[test]
    fn test_single_point_is_rejected() {
        let result = fit_trend(&series(&[(2005, 7)]));
        assert_eq!(
            result,
            Err(TrendError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_empty_series_is_rejected() {
        assert!(matches!(
            fit_trend(&[]),
            Err(TrendError::InsufficientData { actual: 0, .. })
        ));
    }

    #[test]
    fn test_duplicate_years_are_rejected() {
        let result = fit_trend(&series(&[(2010, 3), (2010, 4)]));
        assert_eq!(
            result,
            Err(TrendError::UnorderedSeries {
                index: 1,
                previous: 2010,
                year: 2010
            })
        );
    }

    #[test]
    fn test_unsorted_years_are_rejected() {
        let result = fit_trend(&series(&[(2010, 3), (2012, 4), (2011, 5)]));
        assert!(matches!(result, Err(TrendError::UnorderedSeries { index: 2, .. })));
    }

    #[test]
    fn test_gap_years_use_actual_year_values() {
        // 2000 -> 0, 2010 -> 100 puts 2005 at 50 on the line
        let data = series(&[(2000, 0), (2010, 100)]);
        let fit = LinearFit::fit(&data).unwrap();
        assert!((fit.predict(2005) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_noisy_series_r_squared() {
        let data = series(&[(2015, 10), (2016, 14), (2017, 11), (2018, 17), (2019, 18)]);
        let fit = LinearFit::fit(&data).unwrap();

        assert!(fit.slope > 0.0);
        let r2 = fit.r_squared.unwrap();
        assert!(r2 > 0.0 && r2 < 1.0);
        assert!(matches!(
            fit.direction(),
            TrendDirection::Rising | TrendDirection::SlightlyRising
        ));
    }

    #[test]
    fn test_direction_from_relative_slope() {
        assert_eq!(TrendDirection::from_relative_slope(0.5), TrendDirection::Rising);
        assert_eq!(TrendDirection::from_relative_slope(0.3), TrendDirection::SlightlyRising);
        assert_eq!(TrendDirection::from_relative_slope(0.1), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_relative_slope(0.0), TrendDirection::Stable);
        assert_eq!(TrendDirection::from_relative_slope(-0.2), TrendDirection::SlightlyFalling);
        assert_eq!(TrendDirection::from_relative_slope(-0.9), TrendDirection::Falling);
    }

    #[test]
    fn test_direction_is_relative_to_mean_count() {
        // +10 a year on ~1000 incidents is flat, on ~20 it is strong
        let city = LinearFit::fit(&series(&[(2019, 990), (2020, 1000), (2021, 1010)])).unwrap();
        assert_eq!(city.direction(), TrendDirection::Stable);

        let precinct = LinearFit::fit(&series(&[(2019, 10), (2020, 20), (2021, 30)])).unwrap();
        assert_eq!(precinct.direction(), TrendDirection::Rising);
    }

    #[test]
    fn test_falling_series() {
        let data = series(&[(2018, 90), (2019, 60), (2020, 30)]);
        let fit = LinearFit::fit(&data).unwrap();
        assert_eq!(fit.slope, -30.0);
        assert_eq!(fit.direction(), TrendDirection::Falling);
    }
}
