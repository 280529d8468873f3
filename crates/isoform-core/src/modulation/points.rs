//! Piecewise-linear profile read off a sequence of 3D points

use super::lerp_segment;
use crate::sdf::Coord;
use crate::{Error, Result};
use glam::Vec3;

/// Axis positions of the guard points appended after the last real point
const GUARD_POSITIONS: [f32; 2] = [1.01, 1.1];

/// Points projected onto an axis (the ratio) and a coordinate (the value)
///
/// Two guard points carrying the last point's value are appended past ratio
/// one, so queries near the end hold the last value instead of wrapping back
/// to the start.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    /// Real points followed by the two guards
    points: Vec<Vec3>,
    value: Coord,
    axis: Coord,
}

impl PointTable {
    /// Build a table reading `value` from each point at position `axis`.
    ///
    /// Points are searched in the order given; they are not sorted.
    pub fn new(mut points: Vec<Vec3>, value: Coord, axis: Coord) -> Result<Self> {
        if value == axis {
            return Err(Error::SameAxis(axis));
        }
        let Some(&last) = points.last() else {
            return Err(Error::TooFewSamples {
                required: 1,
                found: 0,
            });
        };

        let last_value = value.of(last);
        points.extend(
            GUARD_POSITIONS.map(|at| value.unit() * last_value + axis.unit() * at),
        );
        tracing::debug!(points = points.len() - 2, last_value, "appended point table guards");

        Ok(Self {
            points,
            value,
            axis,
        })
    }

    /// The caller's points, guards excluded
    pub fn points(&self) -> &[Vec3] {
        &self.points[..self.len()]
    }

    /// Real points together with the two trailing guards
    pub fn guarded_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Coordinate the profile value is read from
    pub fn value_coord(&self) -> Coord {
        self.value
    }

    /// Coordinate the ratio is searched along
    pub fn axis_coord(&self) -> Coord {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.points.len() - GUARD_POSITIONS.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the point at `index`; replacing the last point moves the guards
    pub fn set_point(&mut self, index: usize, point: Vec3) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        self.points[index] = point;
        if index == len - 1 {
            let (value, axis) = (self.value, self.axis);
            for (guard, at) in self.points[len..].iter_mut().zip(GUARD_POSITIONS) {
                *guard = value.unit() * value.of(point) + axis.unit() * at;
            }
        }
        Ok(())
    }

    /// Index of the segment used to evaluate `ratio`, as `(lower, upper)`.
    ///
    /// The upper end is the first point, in iteration order, whose axis
    /// position is at or past `ratio`, and the lower end is the point before
    /// it. This is not the `(match, next)` pairing, which would extrapolate
    /// backwards from the segment after the ratio: with points at 0, 0.5 and 1
    /// carrying 0, 10 and 0, ratio 0.25 gives 5 here where that pairing gives
    /// 15. With unsorted points this is the first match, not the nearest
    /// segment.
    pub fn segment(&self, ratio: f32) -> (usize, usize) {
        let last = self.points.len() - 1;
        let upper = self
            .points
            .iter()
            .position(|&p| self.axis.of(p) >= ratio)
            .unwrap_or(last)
            .max(1);
        (upper - 1, upper)
    }

    /// Linearly interpolate the value coordinate at `ratio`
    ///
    /// Non-finite points or a NaN ratio fail with [`Error::InconsistentTable`].
    pub fn evaluate(&self, ratio: f32) -> Result<f32> {
        let (lower, upper) = self.segment(ratio);
        let (p0, p1) = (self.points[lower], self.points[upper]);

        let value = lerp_segment(
            ratio,
            (self.axis.of(p0), self.value.of(p0)),
            (self.axis.of(p1), self.value.of(p1)),
        )
        .ok_or(Error::DegenerateSegment { ratio, at: lower })?;

        if !value.is_finite() {
            return Err(Error::InconsistentTable { ratio, value });
        }
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Radius (Y) along Z
    fn profile() -> PointTable {
        let points = vec![
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 3.0, 0.5),
            Vec3::new(0.0, 2.0, 1.0),
        ];
        PointTable::new(points, Coord::Y, Coord::Z).unwrap()
    }

    #[test]
    fn guards_extend_last_value_past_one() {
        let t = profile();
        let guards = &t.guarded_points()[3..];

        assert_eq!(t.len(), 3);
        assert_eq!(t.points().len(), 3);
        assert_eq!(guards, &[Vec3::new(0.0, 2.0, 1.01), Vec3::new(0.0, 2.0, 1.1)]);
    }

    #[test]
    fn interpolates_along_axis() {
        let t = profile();

        assert_relative_eq!(t.evaluate(0.0).unwrap(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(t.evaluate(0.25).unwrap(), 2.0, epsilon = 1e-6);
        assert_relative_eq!(t.evaluate(0.5).unwrap(), 3.0, epsilon = 1e-6);
        assert_relative_eq!(t.evaluate(0.75).unwrap(), 2.5, epsilon = 1e-6);
        assert_relative_eq!(t.evaluate(1.0).unwrap(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn near_one_does_not_wrap_to_first_point() {
        let t = profile();

        for ratio in [0.999, 1.0, 1.005, 1.05, 1.5, 10.0] {
            let v = t.evaluate(ratio).unwrap();
            assert!((v - 1.0).abs() > 0.5, "ratio {ratio} wrapped to {v}");
            assert_relative_eq!(v, 2.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn below_first_point_uses_first_segment() {
        let t = profile();
        assert_eq!(t.segment(-1.0), (0, 1));
        assert_relative_eq!(t.evaluate(-0.25).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn single_point_is_constant() {
        let t = PointTable::new(vec![Vec3::new(4.0, 0.0, 0.0)], Coord::X, Coord::Y).unwrap();

        assert_eq!(t.evaluate(0.0).unwrap(), 4.0);
        assert_eq!(t.evaluate(0.5).unwrap(), 4.0);
        assert_eq!(t.evaluate(1.0).unwrap(), 4.0);
    }

    #[test]
    fn unsorted_points_take_first_match() {
        // Axis positions 0.0, 0.8, 0.4, 1.0
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.8, 8.0, 0.0),
            Vec3::new(0.4, 0.0, 0.0),
            Vec3::new(1.0, 10.0, 0.0),
        ];
        let t = PointTable::new(points, Coord::Y, Coord::X).unwrap();

        // First point at or past 0.6 is the one at 0.8, not the one at 1.0
        assert_eq!(t.segment(0.6), (0, 1));
        assert_relative_eq!(t.evaluate(0.6).unwrap(), 6.0, epsilon = 1e-5);
    }

    #[test]
    fn repeated_axis_position_is_degenerate() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.5),
            Vec3::new(1.0, 0.0, 0.5),
            Vec3::new(2.0, 0.0, 1.0),
        ];
        let t = PointTable::new(points, Coord::X, Coord::Z).unwrap();

        // The first point at 0.5 closes the segment from 0.0, so the
        // zero-width pair behind it is never selected
        assert!(t.evaluate(0.5).is_ok());
        assert!(matches!(
            t.evaluate(0.75),
            Ok(v) if (v - 1.5).abs() < 1e-5
        ));

        let flat = PointTable::new(
            vec![Vec3::new(0.0, 0.0, 0.3), Vec3::new(1.0, 0.0, 0.3)],
            Coord::X,
            Coord::Z,
        )
        .unwrap();
        assert!(matches!(
            flat.evaluate(0.1),
            Err(Error::DegenerateSegment { at: 0, .. })
        ));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let nan_point = PointTable::new(
            vec![Vec3::new(0.0, f32::NAN, 0.0), Vec3::new(0.0, 1.0, 1.0)],
            Coord::Y,
            Coord::Z,
        )
        .unwrap();
        assert!(matches!(
            nan_point.evaluate(0.5),
            Err(Error::InconsistentTable { .. })
        ));

        let infinite_point = PointTable::new(
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, f32::INFINITY, 1.0)],
            Coord::Y,
            Coord::Z,
        )
        .unwrap();
        assert!(matches!(
            infinite_point.evaluate(0.5),
            Err(Error::InconsistentTable { .. })
        ));

        assert!(matches!(
            profile().evaluate(f32::NAN),
            Err(Error::InconsistentTable { .. })
        ));
    }

    #[test]
    fn set_last_point_moves_guards() {
        let mut t = profile();
        t.set_point(2, Vec3::new(0.0, 5.0, 1.0)).unwrap();

        assert_relative_eq!(t.evaluate(1.0).unwrap(), 5.0, epsilon = 1e-6);
        assert_relative_eq!(t.evaluate(1.05).unwrap(), 5.0, epsilon = 1e-6);
        assert_eq!(
            t.set_point(3, Vec3::ZERO),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn rejects_empty_and_same_axis() {
        assert_eq!(
            PointTable::new(Vec::new(), Coord::Y, Coord::Z),
            Err(Error::TooFewSamples { required: 1, found: 0 })
        );
        assert_eq!(
            PointTable::new(vec![Vec3::ONE], Coord::Z, Coord::Z),
            Err(Error::SameAxis(Coord::Z))
        );
    }
}
