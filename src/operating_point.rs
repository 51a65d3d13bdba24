use crate::axes::AeroAxes;
use crate::{Matrix3, Vector3};
use uom::si::angle::radian;
use uom::si::f64::{Angle, AngularVelocity, Length, Velocity};
use uom::ConstZero;

/// Converts vectors between the [`AeroAxes`].
///
/// This is the seam through which [`RigidBody::convert_axes_with`](crate::RigidBody::convert_axes_with)
/// reaches everything that is not [`Axes::Earth`](crate::Axes::Earth). The crate ships
/// [`OperatingPoint`] as the standard implementation; callers with their own aerodynamic model
/// can plug in theirs.
///
/// Implementations must treat the conversions as pure rotations: converting a vector into body
/// axes and back must return the original vector.
pub trait AeroFrames {
    /// Expresses `v`, given in `from` axes, in body axes.
    fn to_body(&self, v: Vector3, from: AeroAxes) -> Vector3;

    /// Expresses `v`, given in body axes, in `to` axes.
    fn from_body(&self, v: Vector3, to: AeroAxes) -> Vector3;

    /// Expresses `v`, given in `from` axes, in `to` axes.
    fn convert(&self, v: Vector3, from: AeroAxes, to: AeroAxes) -> Vector3 {
        if from == to {
            return v;
        }
        self.from_body(self.to_body(v, from), to)
    }
}

/// The aerodynamic state of a body at an instant: how fast and at what angles it meets the air.
///
/// Only [`alpha`](Self::alpha) and [`beta`](Self::beta) matter for axis conversions; the other
/// fields are carried for callers building aerodynamic models on top.
///
/// Usually obtained from [`RigidBody::operating_point`](crate::RigidBody::operating_point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Altitude above the reference surface (positive up).
    pub altitude: Length,
    /// Airspeed.
    pub velocity: Velocity,
    /// Angle of attack.
    pub alpha: Angle,
    /// Sideslip angle.
    pub beta: Angle,
    pub p: AngularVelocity,
    pub q: AngularVelocity,
    pub r: AngularVelocity,
}

impl Default for OperatingPoint {
    fn default() -> Self {
        Self {
            altitude: Length::ZERO,
            velocity: Velocity::ZERO,
            alpha: Angle::ZERO,
            beta: Angle::ZERO,
            p: AngularVelocity::ZERO,
            q: AngularVelocity::ZERO,
            r: AngularVelocity::ZERO,
        }
    }
}

impl OperatingPoint {
    /// Returns the rotation matrix taking body-axes components to stability-axes components.
    #[must_use]
    #[rustfmt::skip]
    pub fn body_to_stability(&self) -> Matrix3 {
        let (sa, ca) = self.alpha.get::<radian>().sin_cos();
        Matrix3::new(
            ca, 0., sa,
            0., 1., 0.,
            -sa, 0., ca,
        )
    }

    /// Returns the rotation matrix taking body-axes components to wind-axes components.
    #[must_use]
    #[rustfmt::skip]
    pub fn body_to_wind(&self) -> Matrix3 {
        let (sa, ca) = self.alpha.get::<radian>().sin_cos();
        let (sb, cb) = self.beta.get::<radian>().sin_cos();
        Matrix3::new(
            cb * ca, sb, cb * sa,
            -sb * ca, cb, -sb * sa,
            -sa, 0., ca,
        )
    }
}

// geometry axes are body axes turned half a turn about Y, which is its own inverse
fn flip_geometry(v: Vector3) -> Vector3 {
    Vector3::new(-v.x, v.y, -v.z)
}

impl AeroFrames for OperatingPoint {
    fn to_body(&self, v: Vector3, from: AeroAxes) -> Vector3 {
        match from {
            AeroAxes::Geometry => flip_geometry(v),
            AeroAxes::Body => v,
            AeroAxes::Wind => self.body_to_wind().transpose() * v,
            AeroAxes::Stability => self.body_to_stability().transpose() * v,
        }
    }

    fn from_body(&self, v: Vector3, to: AeroAxes) -> Vector3 {
        match to {
            AeroAxes::Geometry => flip_geometry(v),
            AeroAxes::Body => v,
            AeroAxes::Wind => self.body_to_wind() * v,
            AeroAxes::Stability => self.body_to_stability() * v,
        }
    }
}
