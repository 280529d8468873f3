//! Error types for isoform

use crate::sdf::Coord;
use thiserror::Error;

/// Result type alias using isoform's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in isoform operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Value and length-ratio tables of different lengths
    #[error("Values and length ratio lists must have the same length ({values} values, {ratios} ratios)")]
    LengthMismatch { values: usize, ratios: usize },

    /// Not enough entries to form a single segment
    #[error("Modulation table needs at least {required} entries, found {found}")]
    TooFewSamples { required: usize, found: usize },

    /// Length ratios must never decrease
    #[error("Length ratios must be ascending (ratio at index {index} is smaller than its predecessor)")]
    UnsortedRatios { index: usize },

    /// Point table reads its values from the axis it searches along
    #[error("Point modulation value coordinate and axis coordinate are both {0:?}")]
    SameAxis(Coord),

    /// Interpolation landed on a segment of zero width
    #[error("Degenerate segment at index {at} while evaluating ratio {ratio}")]
    DegenerateSegment { ratio: f32, at: usize },

    /// Interpolated value failed the table sanity check
    #[error("Inconsistent modulation table: ratio {ratio} produced {value}")]
    InconsistentTable { ratio: f32, value: f32 },

    /// Table mutation outside the table
    #[error("Index {index} out of range for table of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Volume realization failed
    #[error("Realization failed: {0}")]
    Realization(String),

    /// Surface extraction failed
    #[error("Extraction failed: {0}")]
    Extraction(String),
}
