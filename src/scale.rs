//! Linear scales for the render step, on top of plotters' `f64` coordinate.
//!
//! [`RangedCoordf64`] does the value → pixel mapping and picks the key points used as
//! ticks; the scene only keeps the plain domain and pixel range around it.

use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;

/// Linear mapping from a data interval onto a pixel interval. The pixel interval may be
/// inverted (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    fn coord(&self) -> RangedCoordf64 {
        (self.domain.0..self.domain.1).into()
    }

    fn pixels(&self) -> (i32, i32) {
        (self.range.0.round() as i32, self.range.1.round() as i32)
    }

    /// Map a domain value to a whole pixel in the range.
    ///
    /// A zero-width domain maps everything to the middle of the range.
    pub fn apply(&self, v: f64) -> f64 {
        if self.domain.0 == self.domain.1 {
            return (self.range.0 + self.range.1) / 2.0;
        }
        self.coord().map(&v, self.pixels()) as f64
    }

    /// At most `count` round values inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        if count == 0 || !a.is_finite() || !b.is_finite() {
            return Vec::new();
        }
        self.coord().key_points(count)
    }

    /// Ticks for a domain of whole years: never more than one per year, integers only.
    pub fn year_ticks(&self, count: usize) -> Vec<f64> {
        let span = (self.domain.1 - self.domain.0).abs().round() as usize;
        self.ticks(count.min(span + 1))
            .into_iter()
            .filter(|v| v.fract() == 0.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints_and_inverts() {
        let x = LinearScale::new((1960.0, 2020.0), (100.0, 700.0));
        assert_eq!(x.apply(1960.0), 100.0);
        assert_eq!(x.apply(2020.0), 700.0);
        assert_eq!(x.apply(1990.0), 400.0);

        let y = LinearScale::new((0.0, 20.0), (400.0, 100.0));
        assert_eq!(y.apply(0.0), 400.0);
        assert_eq!(y.apply(20.0), 100.0);
        assert_eq!(y.apply(10.0), 250.0);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let s = LinearScale::new((2020.0, 2020.0), (100.0, 700.0));
        assert_eq!(s.apply(2020.0), 400.0);
        assert_eq!(s.ticks(10), vec![2020.0]);
        assert_eq!(s.year_ticks(10), vec![2020.0]);
    }

    #[test]
    fn year_ticks_step_by_five() {
        let s = LinearScale::new((1974.0, 2023.0), (100.0, 700.0));
        let t = s.year_ticks(10);
        assert_eq!(t.first(), Some(&1975.0));
        assert_eq!(t.last(), Some(&2020.0));
        assert_eq!(t.len(), 10);
    }

    #[test]
    fn short_year_span_has_no_fractional_years() {
        let s = LinearScale::new((2019.0, 2020.0), (100.0, 700.0));
        assert_eq!(s.year_ticks(10), vec![2019.0, 2020.0]);
    }

    #[test]
    fn value_ticks_are_round() {
        let s = LinearScale::new((0.0, 2.77e13), (400.0, 100.0));
        let t = s.ticks(10);
        assert_eq!(t.first(), Some(&0.0));
        assert!(t.len() <= 10);
        for pair in t.windows(2) {
            assert_eq!(pair[1] - pair[0], t[1] - t[0]);
        }
        assert!(*t.last().unwrap() <= 2.77e13);
    }

    #[test]
    fn tiny_positive_domain_does_not_panic() {
        let s = LinearScale::new((0.0, 1e-310), (400.0, 100.0));
        let t = s.ticks(10);
        assert!(t.len() <= 10);
        assert_eq!(s.apply(1e-310), 100.0);
        assert_eq!(s.apply(0.0), 400.0);
    }
}
