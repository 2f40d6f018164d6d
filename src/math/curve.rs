use super::Point2d;
use crate::util::Interval;

/// A parametric curve in 2D space.
pub trait ParametricCurve2d {
    /// Samples the parametric curve.
    fn sample(&self, t: f64) -> Point2d;

    /// Returns the minimum and maximum t-values that define the bounds of the curve.
    fn bounds(&self) -> Interval<f64>;
}

/// Samples `count` points strictly inside the curve's bounds, at evenly spaced
/// parameter values `i / (count + 1)` for `i` in `1..=count`.
///
/// Neither end point is included.
pub fn interior_samples(
    curve: &impl ParametricCurve2d,
    count: usize,
) -> impl Iterator<Item = Point2d> + '_ {
    let bounds = curve.bounds();
    let denom = (count + 1) as f64;
    (1..=count).map(move |i| curve.sample(bounds.lerp(i as f64 / denom)))
}

#[cfg(test)]
mod test {
    use super::interior_samples;
    use crate::math::{Point2d, QuadraticBezier2d};

    #[test]
    fn interior_samples_exclude_end_points() {
        let curve = QuadraticBezier2d::new(&[
            Point2d::new(0.0, 0.0),
            Point2d::new(1.5, 0.0),
            Point2d::new(3.0, 0.0),
        ]);
        let xs: Vec<_> = interior_samples(&curve, 2).map(|p| p.x).collect();
        assert_eq!(xs.len(), 2);
        assert!((xs[0] - 1.0).abs() < 1e-9);
        assert!((xs[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_samples_is_empty() {
        let curve = QuadraticBezier2d::new(&[Point2d::new(0.0, 0.0); 3]);
        assert_eq!(interior_samples(&curve, 0).count(), 0);
    }
}
