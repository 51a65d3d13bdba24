//! Derived quantities of a [`RigidBody`]'s state: aerodynamic angles, speed, and energy.
//!
//! These are all pure functions of the current state (and, for rates of change, of the loads
//! acting on the body). They are mostly useful for sanity-checking a simulation: with only
//! gravity acting, for example, [`RigidBody::d_translational_kinetic_energy`] and
//! [`RigidBody::d_potential_energy`] should cancel out.

use crate::loads::Loads;
use crate::operating_point::OperatingPoint;
use crate::state::RigidBody;
use uom::si::acceleration::meter_per_second_squared;
use uom::si::angle::radian;
use uom::si::energy::joule;
use uom::si::f64::{Acceleration, Angle, Energy, Length, Power, Velocity};
use uom::si::mass::kilogram;
use uom::si::power::watt;
use uom::si::velocity::meter_per_second;

impl RigidBody {
    /// Returns the body's current aerodynamic [`OperatingPoint`].
    #[must_use]
    pub fn operating_point(&self) -> OperatingPoint {
        OperatingPoint {
            altitude: self.altitude(),
            velocity: self.speed(),
            alpha: self.alpha(),
            beta: self.beta(),
            p: self.state.p,
            q: self.state.q,
            r: self.state.r,
        }
    }

    /// Returns the angle of attack, `atan2(w, u)`.
    ///
    /// This is zero when the body is at rest.
    #[must_use]
    pub fn alpha(&self) -> Angle {
        let v = self.state.velocity_b();
        Angle::new::<radian>(v.z.atan2(v.x))
    }

    /// Returns the sideslip angle, `atan2(v, √(u² + w²))`.
    ///
    /// This is zero when the body is at rest.
    #[must_use]
    pub fn beta(&self) -> Angle {
        let v = self.state.velocity_b();
        Angle::new::<radian>(v.y.atan2(v.x.hypot(v.z)))
    }

    #[must_use]
    pub fn speed(&self) -> Velocity {
        Velocity::new::<meter_per_second>(self.state.velocity_b().norm())
    }

    /// Returns the height above the earth-axes origin (ie, `-z_e`).
    #[must_use]
    pub fn altitude(&self) -> Length {
        -self.state.z_e
    }

    #[must_use]
    pub fn translational_kinetic_energy(&self) -> Energy {
        let speed = self.state.velocity_b().norm();
        Energy::new::<joule>(0.5 * self.mass_si() * speed * speed)
    }

    /// Returns the rotational kinetic energy from the principal moments only.
    ///
    /// Products of inertia are ignored, so this is exact only when the body axes are principal
    /// axes.
    #[must_use]
    pub fn rotational_kinetic_energy(&self) -> Energy {
        let (ixx, iyy, izz, ..) = self.mass_properties.inertia.components();
        let rates = self.state.rates_b();
        Energy::new::<joule>(
            0.5 * (ixx * rates.x * rates.x + iyy * rates.y * rates.y + izz * rates.z * rates.z),
        )
    }

    /// Returns [translational](Self::translational_kinetic_energy) plus
    /// [rotational](Self::rotational_kinetic_energy) kinetic energy.
    #[must_use]
    pub fn kinetic_energy(&self) -> Energy {
        self.translational_kinetic_energy() + self.rotational_kinetic_energy()
    }

    /// Returns the gravitational potential energy relative to the earth-axes origin, using
    /// [`DynamicsConfig::gravity`](crate::config::DynamicsConfig::gravity).
    #[must_use]
    pub fn potential_energy(&self) -> Energy {
        self.mass_properties.mass * self.config().gravity * self.altitude()
    }

    /// Returns the rate of change of translational kinetic energy under `loads`, which is the
    /// power delivered by the net force.
    #[must_use]
    pub fn d_translational_kinetic_energy(&self, loads: &Loads) -> Power {
        Power::new::<watt>(loads.force_b_si().dot(&self.state.velocity_b()))
    }

    /// Returns the rate of change of [speed](Self::speed) under `loads`.
    ///
    /// Returns `None` when the body is at rest, where the direction of motion (and therefore
    /// the rate of change of its magnitude) is undefined.
    #[must_use]
    pub fn d_speed(&self, loads: &Loads) -> Option<Acceleration> {
        let speed = self.state.velocity_b().norm();
        if speed == 0. {
            return None;
        }
        let power = self.d_translational_kinetic_energy(loads).get::<watt>();
        Some(Acceleration::new::<meter_per_second_squared>(
            power / (self.mass_si() * speed),
        ))
    }

    /// Returns the rate of change of [potential energy](Self::potential_energy) from the
    /// body's current vertical velocity.
    #[must_use]
    pub fn d_potential_energy(&self) -> Power {
        let d_z_e = (self.direction_cosine_matrix() * self.state.velocity_b()).z;
        Power::new::<watt>(
            -self.mass_si() * self.config().gravity.get::<meter_per_second_squared>() * d_z_e,
        )
    }

    fn mass_si(&self) -> f64 {
        self.mass_properties.mass.get::<kilogram>()
    }
}
