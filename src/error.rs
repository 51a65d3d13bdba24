use thiserror::Error;

#[cfg(doc)]
use crate::{config::SingularInertiaPolicy, Axes, RotationAxis};

/// Everything that can go wrong in this crate.
///
/// Most operations here are total. The only failures are malformed inputs (unknown axis tokens,
/// batches whose lengths cannot be broadcast against each other) and, when
/// [`SingularInertiaPolicy::FailFast`] is selected, an inertia tensor that cannot be inverted.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A string did not name one of the five [`Axes`].
    #[error("unknown axes `{0}`; expected one of `geometry`, `body`, `wind`, `stability`, or `earth`")]
    UnknownAxes(String),

    /// A string did not name one of the elementary [`RotationAxis`] values.
    #[error("unknown rotation axis `{0}`; expected `x`, `y`, or `z`")]
    UnknownRotationAxis(String),

    /// Two batched inputs had lengths that cannot be broadcast against each other.
    #[error("cannot broadcast a batch of {left} against a batch of {right}")]
    BatchShapeMismatch { left: usize, right: usize },

    /// The inertia tensor is singular or not positive-definite.
    #[error("inertia tensor is not positive-definite (determinant {determinant:e})")]
    DegenerateInertia { determinant: f64 },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller handed in something malformed.
    InvalidArgument,
    /// The inputs are well-formed but describe a physically meaningless body.
    Degenerate,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownAxes(_)
            | Self::UnknownRotationAxis(_)
            | Self::BatchShapeMismatch { .. } => ErrorKind::InvalidArgument,
            Self::DegenerateInertia { .. } => ErrorKind::Degenerate,
        }
    }
}
