use thiserror::Error;

/// Caller-contract violations raised by the chart computations.
///
/// The controls are constrained so these never occur during normal use;
/// when they do, the presentation layer reports them instead of retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashError {
    /// Site name is neither a known launch site nor the "all sites" sentinel.
    #[error("invalid site selection: '{0}'")]
    InvalidSelection(String),

    /// Range is inverted, non-finite, or outside the observed payload bounds.
    #[error("invalid payload range [{low}, {high}]: {reason}")]
    InvalidRange {
        low: f64,
        high: f64,
        reason: String,
    },
}

/// Type alias for results of the chart computations.
pub type Result<T> = std::result::Result<T, DashError>;
