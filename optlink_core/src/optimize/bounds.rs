//! Classification of (lower, upper) limit pairs into solver bound kinds
use serde::{Deserialize, Serialize};

/// The five bound kinds a limit pair can register as on the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundKind {
    /// Both limits present and numerically equal
    Fixed,
    /// Both limits present and different
    Ranged,
    /// Only the lower limit present
    Lower,
    /// Only the upper limit present
    Upper,
    /// Neither limit present
    Free,
}

/// A classified bound: the kind plus the two limit values to register.
/// An absent side registers as the infinity of that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundInfo {
    pub kind: BoundKind,
    pub lower: f64,
    pub upper: f64,
}

/// Classify a limit pair.
///
/// Total over all inputs; equality is exact numeric equality, no tolerance
/// is applied.
pub fn classify(lower: Option<f64>, upper: Option<f64>) -> BoundInfo {
    let kind = match (lower, upper) {
        (Some(l), Some(u)) => {
            if l == u {
                BoundKind::Fixed
            } else {
                BoundKind::Ranged
            }
        }
        (Some(_), None) => BoundKind::Lower,
        (None, Some(_)) => BoundKind::Upper,
        (None, None) => BoundKind::Free,
    };
    BoundInfo {
        kind,
        lower: lower.unwrap_or(f64::NEG_INFINITY),
        upper: upper.unwrap_or(f64::INFINITY),
    }
}
