//! Line modulations: scalar profiles over a normalized length ratio
//!
//! A [`LineModulation`] maps a ratio in `[0, 1]` to a value, typically to vary
//! a geometric parameter (a radius, a wall thickness) along a shape. It is
//! backed by exactly one of:
//!
//! - a constant
//! - a continuous function of the ratio
//! - a [`ValueTable`] of values at explicit length ratios
//! - a [`PointTable`] of 3D points projected onto an axis and a coordinate
//! - the sum or difference of two other modulations
//!
//! ## Example
//!
//! ```rust,ignore
//! use isoform_core::prelude::*;
//!
//! let base = LineModulation::from_values(vec![1.0, 2.0, 1.0], vec![0.0, 0.5, 1.0])?;
//! let ripple = LineModulation::from_fn(|r| 0.1 * (r * std::f32::consts::TAU * 4.0).sin());
//! let radius = base + ripple;
//! assert!(radius.evaluate(0.5)? > 1.9);
//! ```
//!
//! ## Sharing
//!
//! Cloning a modulation duplicates its tables, so editing a clone's table
//! never affects the original. Functions are shared as-is and must be free of
//! side effects. Composites hold their operands through [`Arc`], and every
//! composite sharing an operand sees the same operand. An operand cannot be
//! mutated after composition: `value_table_mut` and `point_table_mut` need
//! `&mut`, which a shared `Arc` never hands out. To change a composite, build
//! a new one from the edited operand.

mod points;
mod table;

pub use points::PointTable;
pub use table::ValueTable;

use crate::sdf::Coord;
use crate::{Error, Result};
use glam::Vec3;
use std::fmt;
use std::ops::{Add, Sub};
use std::sync::Arc;

/// A continuous ratio-to-value function
pub type RatioFn = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Which representation backs a modulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulationKind {
    Constant,
    Function,
    ValueTable,
    PointTable,
    Composite,
}

/// How a composite combines its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn apply(self, lhs: f32, rhs: f32) -> f32 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
        }
    }
}

/// A profile over the length ratio
#[derive(Clone)]
pub struct LineModulation {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Constant(f32),
    Function(RatioFn),
    Values(ValueTable),
    Points(PointTable),
    Composite {
        op: Operator,
        lhs: Arc<LineModulation>,
        rhs: Arc<LineModulation>,
    },
}

impl LineModulation {
    /// Modulation that returns `value` for every ratio
    pub fn constant(value: f32) -> Self {
        Self {
            repr: Repr::Constant(value),
        }
    }

    /// Modulation backed by a continuous function.
    ///
    /// The function is called with the ratio exactly as given; nothing is
    /// clamped to `[0, 1]` on its behalf.
    pub fn from_fn<F>(func: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Self {
            repr: Repr::Function(Arc::new(func)),
        }
    }

    /// Modulation through `values` at ascending length `ratios`
    pub fn from_values(values: Vec<f32>, ratios: Vec<f32>) -> Result<Self> {
        Ok(Self {
            repr: Repr::Values(ValueTable::new(values, ratios)?),
        })
    }

    /// Modulation reading coordinate `value` of each point positioned by
    /// coordinate `axis`
    pub fn from_points(points: Vec<Vec3>, value: Coord, axis: Coord) -> Result<Self> {
        Ok(Self {
            repr: Repr::Points(PointTable::new(points, value, axis)?),
        })
    }

    /// Combine two modulations with `op`, sharing both operands
    pub fn combine(
        op: Operator,
        lhs: impl Into<Arc<LineModulation>>,
        rhs: impl Into<Arc<LineModulation>>,
    ) -> Self {
        Self {
            repr: Repr::Composite {
                op,
                lhs: lhs.into(),
                rhs: rhs.into(),
            },
        }
    }

    /// `lhs(r) + rhs(r)`
    pub fn sum(lhs: impl Into<Arc<LineModulation>>, rhs: impl Into<Arc<LineModulation>>) -> Self {
        Self::combine(Operator::Add, lhs, rhs)
    }

    /// `lhs(r) - rhs(r)`
    pub fn difference(
        lhs: impl Into<Arc<LineModulation>>,
        rhs: impl Into<Arc<LineModulation>>,
    ) -> Self {
        Self::combine(Operator::Subtract, lhs, rhs)
    }

    /// The active backing representation
    pub fn kind(&self) -> ModulationKind {
        match &self.repr {
            Repr::Constant(_) => ModulationKind::Constant,
            Repr::Function(_) => ModulationKind::Function,
            Repr::Values(_) => ModulationKind::ValueTable,
            Repr::Points(_) => ModulationKind::PointTable,
            Repr::Composite { .. } => ModulationKind::Composite,
        }
    }

    /// Value of the modulation at `ratio`
    pub fn evaluate(&self, ratio: f32) -> Result<f32> {
        match &self.repr {
            Repr::Constant(value) => Ok(*value),
            Repr::Function(func) => Ok(func(ratio)),
            Repr::Values(table) => table.evaluate(ratio),
            Repr::Points(table) => table.evaluate(ratio),
            Repr::Composite { op, lhs, rhs } => {
                Ok(op.apply(lhs.evaluate(ratio)?, rhs.evaluate(ratio)?))
            }
        }
    }

    /// Ratios where the profile changes segment: both ends of `[0, 1]` plus
    /// every table entry, in no particular order and possibly repeated
    pub fn breakpoints(&self) -> Vec<f32> {
        let mut ratios = vec![0.0, 1.0];
        self.collect_breakpoints(&mut ratios);
        ratios
    }

    fn collect_breakpoints(&self, ratios: &mut Vec<f32>) {
        match &self.repr {
            Repr::Constant(_) | Repr::Function(_) => {}
            Repr::Values(table) => ratios.extend_from_slice(table.ratios()),
            Repr::Points(table) => {
                let axis = table.axis_coord();
                ratios.extend(table.points().iter().map(|&p| axis.of(p)));
            }
            Repr::Composite { lhs, rhs, .. } => {
                lhs.collect_breakpoints(ratios);
                rhs.collect_breakpoints(ratios);
            }
        }
    }

    /// Evaluate at every breakpoint and fail on the first error or
    /// non-finite value.
    ///
    /// Between breakpoints a profile interpolates linearly, so a profile that
    /// passes cannot fail for a ratio in `[0, 1]` unless it contains a
    /// function that does.
    pub fn validate(&self) -> Result<()> {
        for ratio in self.breakpoints() {
            let value = self.evaluate(ratio)?;
            if !value.is_finite() {
                return Err(Error::InconsistentTable { ratio, value });
            }
        }
        Ok(())
    }

    /// Evaluate at `count` evenly spaced ratios from 0 to 1 inclusive
    pub fn sample(&self, count: usize) -> Result<Vec<f32>> {
        match count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![self.evaluate(0.0)?]),
            _ => (0..count)
                .map(|i| self.evaluate(i as f32 / (count - 1) as f32))
                .collect(),
        }
    }

    pub fn constant_value(&self) -> Option<f32> {
        match self.repr {
            Repr::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn function(&self) -> Option<&RatioFn> {
        match &self.repr {
            Repr::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn value_table(&self) -> Option<&ValueTable> {
        match &self.repr {
            Repr::Values(table) => Some(table),
            _ => None,
        }
    }

    pub fn value_table_mut(&mut self) -> Option<&mut ValueTable> {
        match &mut self.repr {
            Repr::Values(table) => Some(table),
            _ => None,
        }
    }

    pub fn point_table(&self) -> Option<&PointTable> {
        match &self.repr {
            Repr::Points(table) => Some(table),
            _ => None,
        }
    }

    pub fn point_table_mut(&mut self) -> Option<&mut PointTable> {
        match &mut self.repr {
            Repr::Points(table) => Some(table),
            _ => None,
        }
    }

    /// Length ratios of a value table
    pub fn length_ratios(&self) -> Option<&[f32]> {
        self.value_table().map(ValueTable::ratios)
    }

    /// Values of a value table
    pub fn values(&self) -> Option<&[f32]> {
        self.value_table().map(ValueTable::values)
    }

    /// Points of a point table, guards excluded
    pub fn points(&self) -> Option<&[Vec3]> {
        self.point_table().map(PointTable::points)
    }

    /// Operator and shared operands of a composite
    pub fn operands(&self) -> Option<(Operator, &Arc<LineModulation>, &Arc<LineModulation>)> {
        match &self.repr {
            Repr::Composite { op, lhs, rhs } => Some((*op, lhs, rhs)),
            _ => None,
        }
    }
}

impl From<f32> for LineModulation {
    fn from(value: f32) -> Self {
        Self::constant(value)
    }
}

impl fmt::Debug for LineModulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Repr::Function(_) => f.write_str("Function(..)"),
            Repr::Values(table) => f.debug_tuple("Values").field(table).finish(),
            Repr::Points(table) => f.debug_tuple("Points").field(table).finish(),
            Repr::Composite { op, lhs, rhs } => f
                .debug_struct("Composite")
                .field("op", op)
                .field("lhs", lhs)
                .field("rhs", rhs)
                .finish(),
        }
    }
}

impl Add for LineModulation {
    type Output = LineModulation;

    fn add(self, rhs: LineModulation) -> LineModulation {
        LineModulation::sum(self, rhs)
    }
}

impl Sub for LineModulation {
    type Output = LineModulation;

    fn sub(self, rhs: LineModulation) -> LineModulation {
        LineModulation::difference(self, rhs)
    }
}

/// Interpolate linearly through `(x0, y0)` and `(x1, y1)` at `x`.
///
/// Returns `None` for a zero-width segment.
fn lerp_segment(x: f32, (x0, y0): (f32, f32), (x1, y1): (f32, f32)) -> Option<f32> {
    if x1 == x0 {
        return None;
    }
    Some(y0 + (x - x0) * (y1 - y0) / (x1 - x0))
}
