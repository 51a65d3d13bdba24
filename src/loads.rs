//! Accumulation of the external loads acting on a [`RigidBody`].
//!
//! Loads usually come from several sources (aerodynamics, propulsion, gravity, ...), each of
//! which naturally produces its contribution in its own axes. A [`LoadsBuilder`] obtained from
//! [`RigidBody::loads`] takes each contribution in whatever [`Axes`] it was computed in,
//! converts it into body axes using the body's current attitude and aerodynamic angles, and
//! sums it up. Once all contributions are in, [`LoadsBuilder::build`] yields the [`Loads`]
//! snapshot that [`RigidBody::state_derivatives`] consumes.
//!
//! ```
//! use gimbal::{Axes, Inertia, MassProperties, RigidBody, RigidBodyState};
//! use uom::si::f64::{Force, Mass, MomentOfInertia, Torque, Velocity};
//! use uom::si::{force::newton, mass::kilogram, moment_of_inertia::kilogram_square_meter};
//! use uom::si::{torque::newton_meter, velocity::meter_per_second};
//!
//! let kgm2 = MomentOfInertia::new::<kilogram_square_meter>;
//! let body = RigidBody::new(
//!     RigidBodyState {
//!         u_b: Velocity::new::<meter_per_second>(30.),
//!         ..Default::default()
//!     },
//!     MassProperties {
//!         mass: Mass::new::<kilogram>(2.),
//!         inertia: Inertia::principal(kgm2(0.1), kgm2(0.2), kgm2(0.25)),
//!     },
//! );
//!
//! let n = Force::new::<newton>;
//! let loads = body
//!     .loads()
//!     // weight
//!     .add_force([n(0.), n(0.), n(2. * 9.81)], Axes::Earth)
//!     // drag and lift
//!     .add_force([n(-1.5), n(0.), n(-19.62)], Axes::Wind)
//!     // thrust
//!     .add_force([n(1.5), n(0.), n(0.)], Axes::Body)
//!     .add_moment([Torque::new::<newton_meter>(0.); 3], Axes::Body)
//!     .build();
//!
//! // in trimmed level flight, everything cancels out
//! let derivatives = body.state_derivatives(&loads).unwrap();
//! approx::assert_abs_diff_eq!(derivatives.to_array()[3..].iter().map(|d| d.abs()).sum::<f64>(), 0., epsilon = 1e-12);
//! ```

use crate::axes::Axes;
use crate::operating_point::{AeroFrames, OperatingPoint};
use crate::state::RigidBody;
use crate::Vector3;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use uom::si::angular_momentum::kilogram_square_meter_per_second;
use uom::si::f64::{AngularMomentum, Force, Torque};
use uom::si::force::newton;
use uom::si::torque::newton_meter;

/// The net external loads on a body, in body axes.
///
/// `Loads` are plain values: they can be added together (`+`, [`Sum`]), so contributions from
/// independent sources can be accumulated separately and combined at the end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Loads {
    /// Net force, in N.
    force_b: Vector3,
    /// Net moment about the center of mass, in N·m.
    moment_b: Vector3,
    /// Angular momentum of spinning internal masses (eg, propellers), in kg·m²/s.
    angular_momentum_b: Vector3,
}

impl Loads {
    /// Returns loads with no force, no moment, and no internal angular momentum.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Constructs loads from totals that are already in body axes.
    #[must_use]
    pub fn from_body_axes(
        force: [Force; 3],
        moment: [Torque; 3],
        angular_momentum: [AngularMomentum; 3],
    ) -> Self {
        Self {
            force_b: Vector3::from(force.map(|f| f.get::<newton>())),
            moment_b: Vector3::from(moment.map(|m| m.get::<newton_meter>())),
            angular_momentum_b: Vector3::from(
                angular_momentum.map(|h| h.get::<kilogram_square_meter_per_second>()),
            ),
        }
    }

    /// Returns the net force `[Fx_b, Fy_b, Fz_b]`.
    #[must_use]
    pub fn force_b(&self) -> [Force; 3] {
        <[f64; 3]>::from(self.force_b).map(Force::new::<newton>)
    }

    /// Returns the net moment about the center of mass `[Mx_b, My_b, Mz_b]`.
    #[must_use]
    pub fn moment_b(&self) -> [Torque; 3] {
        <[f64; 3]>::from(self.moment_b).map(Torque::new::<newton_meter>)
    }

    /// Returns the internal angular momentum `[hx_b, hy_b, hz_b]`.
    #[must_use]
    pub fn angular_momentum_b(&self) -> [AngularMomentum; 3] {
        <[f64; 3]>::from(self.angular_momentum_b)
            .map(AngularMomentum::new::<kilogram_square_meter_per_second>)
    }

    pub(crate) fn force_b_si(&self) -> Vector3 {
        self.force_b
    }

    pub(crate) fn moment_b_si(&self) -> Vector3 {
        self.moment_b
    }

    pub(crate) fn angular_momentum_b_si(&self) -> Vector3 {
        self.angular_momentum_b
    }
}

impl Add for Loads {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            force_b: self.force_b + rhs.force_b,
            moment_b: self.moment_b + rhs.moment_b,
            angular_momentum_b: self.angular_momentum_b + rhs.angular_momentum_b,
        }
    }
}

impl AddAssign for Loads {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Loads {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// Accumulates loads given in arbitrary [`Axes`] into body-axes [`Loads`].
///
/// Construct one through [`RigidBody::loads`] or [`RigidBody::loads_with`], and finalize with
/// [`LoadsBuilder::build`].
#[derive(Debug, Clone)]
#[must_use]
pub struct LoadsBuilder<'a, A = OperatingPoint> {
    body: &'a RigidBody,
    aero: A,
    loads: Loads,
}

impl RigidBody {
    /// Starts accumulating loads on this body, using its own [`OperatingPoint`] to convert
    /// loads given in aerodynamic axes.
    pub fn loads(&self) -> LoadsBuilder<'_> {
        self.loads_with(self.operating_point())
    }

    /// Starts accumulating loads on this body, using `aero` to convert loads given in
    /// aerodynamic axes.
    pub fn loads_with<A: AeroFrames>(&self, aero: A) -> LoadsBuilder<'_, A> {
        LoadsBuilder {
            body: self,
            aero,
            loads: Loads::zero(),
        }
    }
}

impl<A: AeroFrames> LoadsBuilder<'_, A> {
    fn in_body_axes(&self, v: Vector3, axes: Axes) -> Vector3 {
        self.body.convert_axes_with(v, axes, Axes::Body, &self.aero)
    }

    /// Adds a force given in `axes`, assumed to act through the center of mass.
    pub fn add_force(mut self, force: [Force; 3], axes: Axes) -> Self {
        let force = Vector3::from(force.map(|f| f.get::<newton>()));
        self.loads.force_b += self.in_body_axes(force, axes);
        self
    }

    /// Adds a moment about the center of mass given in `axes`.
    pub fn add_moment(mut self, moment: [Torque; 3], axes: Axes) -> Self {
        let moment = Vector3::from(moment.map(|m| m.get::<newton_meter>()));
        self.loads.moment_b += self.in_body_axes(moment, axes);
        self
    }

    /// Adds body-axes angular momentum of internal spinning masses (eg, propellers or rotors).
    ///
    /// This momentum is not integrated; it only couples into the rotational equations as a
    /// gyroscopic term. If it changes over time, the caller provides the current value each
    /// step.
    pub fn add_internal_angular_momentum(mut self, angular_momentum: [AngularMomentum; 3]) -> Self {
        self.loads.angular_momentum_b += Vector3::from(
            angular_momentum.map(|h| h.get::<kilogram_square_meter_per_second>()),
        );
        self
    }

    /// Adds loads that are already in body axes.
    pub fn add_loads(mut self, loads: Loads) -> Self {
        self.loads += loads;
        self
    }

    /// Returns the accumulated loads.
    #[must_use]
    pub fn build(self) -> Loads {
        self.loads
    }
}
