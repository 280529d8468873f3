//! Piecewise-linear profile keyed by explicit length ratios

use super::lerp_segment;
use crate::{Error, Result};
use std::cmp::Ordering;

/// Values sampled at ascending length ratios
///
/// Ratios may repeat, which models a step. Evaluating exactly on a step, or
/// inside a zero-width segment, fails with [`Error::DegenerateSegment`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f32>,
    ratios: Vec<f32>,
}

impl ValueTable {
    /// Build a table from `values` at `ratios`.
    ///
    /// Both lists must have the same length, hold at least two entries, and
    /// the ratios must never decrease.
    pub fn new(values: Vec<f32>, ratios: Vec<f32>) -> Result<Self> {
        if values.len() != ratios.len() {
            return Err(Error::LengthMismatch {
                values: values.len(),
                ratios: ratios.len(),
            });
        }
        if ratios.len() < 2 {
            return Err(Error::TooFewSamples {
                required: 2,
                found: ratios.len(),
            });
        }
        // NaN compares as unordered and is rejected along with descending pairs
        if let Some(index) = (1..ratios.len()).find(|&i| {
            matches!(
                ratios[i].partial_cmp(&ratios[i - 1]),
                None | Some(Ordering::Less)
            )
        }) {
            return Err(Error::UnsortedRatios { index });
        }

        Ok(Self { values, ratios })
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn ratios(&self) -> &[f32] {
        &self.ratios
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace the value at `index`, keeping its ratio
    pub fn set_value(&mut self, index: usize, value: f32) -> Result<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Index of the segment used to evaluate `ratio`.
    ///
    /// Ratios at or below zero use the first segment, ratios at or above one
    /// use the last. Anything in between takes the first segment containing it,
    /// or the nearest end segment if the table does not reach that far.
    pub fn segment(&self, ratio: f32) -> usize {
        let last = self.ratios.len() - 2;
        if ratio <= 0.0 {
            return 0;
        }
        if ratio >= 1.0 {
            return last;
        }

        self.ratios
            .windows(2)
            .position(|w| w[0] <= ratio && ratio <= w[1])
            .unwrap_or(if ratio > self.ratios[last + 1] { last } else { 0 })
    }

    /// Linearly interpolate the table at `ratio`
    pub fn evaluate(&self, ratio: f32) -> Result<f32> {
        // A ratio sitting on a repeated entry has no single value
        if let Some(at) = self
            .ratios
            .windows(2)
            .position(|w| w[0] == w[1] && w[0] == ratio)
        {
            return Err(Error::DegenerateSegment { ratio, at });
        }

        let i = self.segment(ratio);
        let (x0, x1) = (self.ratios[i], self.ratios[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);

        let value = lerp_segment(ratio, (x0, y0), (x1, y1))
            .ok_or(Error::DegenerateSegment { ratio, at: i })?;

        if !value.is_finite() || (x0 <= ratio && ratio <= x1 && !within(value, y0, y1)) {
            return Err(Error::InconsistentTable { ratio, value });
        }

        Ok(value)
    }
}

/// `value` lies between `a` and `b`, with room for rounding
fn within(value: f32, a: f32, b: f32) -> bool {
    let tolerance = 1e-5 * a.abs().max(b.abs()).max(1.0);
    value >= a.min(b) - tolerance && value <= a.max(b) + tolerance
}
