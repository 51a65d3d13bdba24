use uom::si::acceleration::meter_per_second_squared;
use uom::si::angle::radian;
use uom::si::f64::{Acceleration, Angle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::{error::Error, Inertia, RigidBody, StateDerivatives};

/// Knobs for [`RigidBody`] that are not part of its physical state.
///
/// The defaults reproduce the conventional behavior, so most callers never need to construct
/// one. With the `serde` feature enabled, every field is optional when deserializing and
/// quantities are given in SI base units:
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use gimbal::config::{DynamicsConfig, SingularInertiaPolicy};
/// use uom::si::acceleration::meter_per_second_squared;
///
/// let config: DynamicsConfig = serde_yaml::from_str("
/// gravity: 3.71
/// singular_inertia: fail-fast
/// ").unwrap();
///
/// assert_eq!(config.gravity.get::<meter_per_second_squared>(), 3.71);
/// assert_eq!(config.singular_inertia, SingularInertiaPolicy::FailFast);
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DynamicsConfig {
    /// Gravitational acceleration used for potential energy.
    pub gravity: Acceleration,

    /// How close (in either direction) an Euler angle must be to a quarter turn for its sine
    /// and cosine to be replaced by the exact values `0` and `±1`.
    ///
    /// This is what lets the gimbal-lock check in the equations of motion recognize a pitch of
    /// exactly ±90°, which floating point cosine does not return as zero.
    pub axis_snap_tolerance: Angle,

    /// What to do when the inertia tensor cannot be inverted.
    pub singular_inertia: SingularInertiaPolicy,
}

/// How [`RigidBody::state_derivatives`] treats an [`Inertia`] tensor that is singular or not
/// positive-definite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SingularInertiaPolicy {
    /// Invert it anyway; the angular-rate derivatives come out infinite or NaN, which
    /// [`StateDerivatives::is_finite`] detects.
    #[default]
    Propagate,

    /// Refuse with [`Error::DegenerateInertia`].
    FailFast,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
            axis_snap_tolerance: Angle::new::<radian>(1e-10),
            singular_inertia: SingularInertiaPolicy::default(),
        }
    }
}

impl DynamicsConfig {
    #[must_use]
    pub fn with_gravity(mut self, gravity: impl Into<Acceleration>) -> Self {
        self.gravity = gravity.into();
        self
    }

    #[must_use]
    pub fn with_axis_snap_tolerance(mut self, tolerance: impl Into<Angle>) -> Self {
        self.axis_snap_tolerance = tolerance.into();
        self
    }

    #[must_use]
    pub fn with_singular_inertia(mut self, policy: SingularInertiaPolicy) -> Self {
        self.singular_inertia = policy;
        self
    }
}
