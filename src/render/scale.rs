//! Band and linear scales for the chart axes

/// Discrete scale mapping each year to an evenly spaced band
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<i32>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Create a band scale over `domain` spanning `[0, width]`
    ///
    /// `padding` is applied both between bands and at the outer edges, as a
    /// fraction of the step.
    pub fn new(domain: Vec<i32>, width: f64, padding: f64) -> Self {
        let n = domain.len() as f64;
        let step = width / (n - padding + 2.0 * padding).max(1.0);
        let start = (width - step * (n - padding)) / 2.0;
        let bandwidth = step * (1.0 - padding);

        Self {
            domain,
            start,
            step,
            bandwidth,
        }
    }

    /// Left edge of the band for `year`
    pub fn position(&self, year: i32) -> Option<f64> {
        self.domain
            .iter()
            .position(|&y| y == year)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Center of the band for `year`
    pub fn center(&self, year: i32) -> Option<f64> {
        self.position(year).map(|x| x + self.bandwidth / 2.0)
    }

    /// Width of a single band
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

/// Continuous scale mapping counts onto the vertical plot axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale with domain `[0, max]` mapped onto `[height, 0]`
    ///
    /// A zero maximum is widened to `[0, 1]` so the scale stays invertible.
    pub fn for_counts(max: f64, height: f64) -> Self {
        let upper = if max > 0.0 && max.is_finite() { max } else { 1.0 };
        Self {
            domain: (0.0, upper),
            range: (height, 0.0),
        }
    }

    /// Map a domain value to a pixel coordinate
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Domain bounds
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Decimal power and 1/2/5/10 factor of the tick step for ~`count` ticks
    fn increment(&self, count: usize) -> (i32, f64) {
        let (d0, d1) = self.domain;
        let raw = (d1 - d0) / count.max(1) as f64;
        let power = raw.log10().floor() as i32;
        let error = raw / 10f64.powi(power);

        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        (power, factor)
    }

    /// Tick step for roughly `count` ticks, following the 1/2/5 × 10^k rule
    pub fn tick_step(&self, count: usize) -> f64 {
        let (power, factor) = self.increment(count);
        factor * 10f64.powi(power)
    }

    /// Tick values inside the domain, ascending
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let (power, factor) = self.increment(count);

        if power >= 0 {
            let step = factor * 10f64.powi(power);
            let first = (d0 / step).ceil() as i64;
            let last = (d1 / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else {
            // divide by an integral inverse so fractional ticks stay exact
            let inverse = 10f64.powi(-power) / factor;
            let first = (d0 * inverse).ceil() as i64;
            let last = (d1 * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_scale_layout() {
        let scale = BandScale::new(vec![2019, 2020, 2021, 2022], 800.0, 0.1);

        // step = 800 / (4 - 0.1 + 0.2) = 195.12...
        let step = 800.0 / 4.1;
        assert!((scale.bandwidth() - step * 0.9).abs() < 1e-9);
        assert!((scale.position(2019).unwrap() - step * 0.1).abs() < 1e-9);
        assert!((scale.position(2020).unwrap() - step * 1.1).abs() < 1e-9);
        assert_eq!(scale.position(1999), None);

        // bands are symmetric inside the range
        let last_right = scale.position(2022).unwrap() + scale.bandwidth();
        assert!((800.0 - last_right - scale.position(2019).unwrap()).abs() < 1e-9);
    }

    #[test]
    fn test_band_center() {
        let scale = BandScale::new(vec![2020], 100.0, 0.0);
        assert_eq!(scale.center(2020), Some(50.0));
    }

    #[test]
    fn test_linear_scale_inverts_axis() {
        let scale = LinearScale::for_counts(200.0, 300.0);
        assert_eq!(scale.scale(0.0), 300.0);
        assert_eq!(scale.scale(200.0), 0.0);
        assert_eq!(scale.scale(100.0), 150.0);
    }

    #[test]
    fn test_zero_max_is_widened() {
        let scale = LinearScale::for_counts(0.0, 100.0);
        assert_eq!(scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_nice_ticks() {
        let scale = LinearScale::for_counts(1234.0, 300.0);
        assert_eq!(scale.tick_step(10), 100.0);
        assert_eq!(scale.ticks(10).len(), 13);

        let scale = LinearScale::for_counts(1800.0, 300.0);
        assert_eq!(scale.tick_step(10), 200.0);
        assert_eq!(
            scale.ticks(10),
            vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0, 1400.0, 1600.0, 1800.0]
        );
    }

    #[test]
    fn test_small_domain_ticks() {
        let scale = LinearScale::for_counts(3.0, 300.0);
        assert!((scale.tick_step(10) - 0.2).abs() < 1e-12);

        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 16);
        assert_eq!(ticks[5], 1.0);
        assert_eq!(ticks[15], 3.0);
    }
}
