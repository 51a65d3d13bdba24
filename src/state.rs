use crate::axes::Axes;
use crate::config::DynamicsConfig;
use crate::mass::MassProperties;
use crate::operating_point::AeroFrames;
use crate::util::sin_cos_snapped;
use crate::{Matrix3, Vector3};
use uom::si::angle::radian;
use uom::si::angular_velocity::radian_per_second;
use uom::si::f64::{Angle, AngularVelocity, Length, Velocity};
use uom::si::length::meter;
use uom::si::velocity::meter_per_second;
use uom::ConstZero;

#[cfg(doc)]
use crate::OperatingPoint;

/// The twelve state variables of a rigid body using yaw-pitch-roll Euler angles.
///
/// Position is in [`Axes::Earth`], velocity and angular rates are in [`Axes::Body`].
///
/// The Euler angles describe the body's attitude relative to [`Axes::Earth`] as an intrinsic
/// rotation by yaw ([`psi`](Self::psi)) about Z, then pitch ([`theta`](Self::theta)) about the
/// new Y, then roll ([`phi`](Self::phi)) about the resulting X. A pitch of ±90° is gimbal lock,
/// where yaw and roll become indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyState {
    pub x_e: Length,
    pub y_e: Length,
    pub z_e: Length,
    pub u_b: Velocity,
    pub v_b: Velocity,
    pub w_b: Velocity,
    /// Roll.
    pub phi: Angle,
    /// Pitch.
    pub theta: Angle,
    /// Yaw.
    pub psi: Angle,
    pub p: AngularVelocity,
    pub q: AngularVelocity,
    pub r: AngularVelocity,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            x_e: Length::ZERO,
            y_e: Length::ZERO,
            z_e: Length::ZERO,
            u_b: Velocity::ZERO,
            v_b: Velocity::ZERO,
            w_b: Velocity::ZERO,
            phi: Angle::ZERO,
            theta: Angle::ZERO,
            psi: Angle::ZERO,
            p: AngularVelocity::ZERO,
            q: AngularVelocity::ZERO,
            r: AngularVelocity::ZERO,
        }
    }
}

impl RigidBodyState {
    /// Returns the state as SI values in the order
    /// `[x_e, y_e, z_e, u_b, v_b, w_b, phi, theta, psi, p, q, r]`.
    ///
    /// This, [`RigidBodyState::from_array`], and
    /// [`StateDerivatives::to_array`](crate::StateDerivatives::to_array) are what an integrator
    /// works with.
    #[must_use]
    pub fn to_array(&self) -> [f64; 12] {
        [
            self.x_e.get::<meter>(),
            self.y_e.get::<meter>(),
            self.z_e.get::<meter>(),
            self.u_b.get::<meter_per_second>(),
            self.v_b.get::<meter_per_second>(),
            self.w_b.get::<meter_per_second>(),
            self.phi.get::<radian>(),
            self.theta.get::<radian>(),
            self.psi.get::<radian>(),
            self.p.get::<radian_per_second>(),
            self.q.get::<radian_per_second>(),
            self.r.get::<radian_per_second>(),
        ]
    }

    /// The inverse of [`RigidBodyState::to_array`].
    #[must_use]
    pub fn from_array(
        [x_e, y_e, z_e, u_b, v_b, w_b, phi, theta, psi, p, q, r]: [f64; 12],
    ) -> Self {
        Self {
            x_e: Length::new::<meter>(x_e),
            y_e: Length::new::<meter>(y_e),
            z_e: Length::new::<meter>(z_e),
            u_b: Velocity::new::<meter_per_second>(u_b),
            v_b: Velocity::new::<meter_per_second>(v_b),
            w_b: Velocity::new::<meter_per_second>(w_b),
            phi: Angle::new::<radian>(phi),
            theta: Angle::new::<radian>(theta),
            psi: Angle::new::<radian>(psi),
            p: AngularVelocity::new::<radian_per_second>(p),
            q: AngularVelocity::new::<radian_per_second>(q),
            r: AngularVelocity::new::<radian_per_second>(r),
        }
    }

    /// Body-axes velocity in m/s.
    pub(crate) fn velocity_b(&self) -> Vector3 {
        Vector3::new(
            self.u_b.get::<meter_per_second>(),
            self.v_b.get::<meter_per_second>(),
            self.w_b.get::<meter_per_second>(),
        )
    }

    /// Body-axes angular rates in rad/s.
    pub(crate) fn rates_b(&self) -> Vector3 {
        Vector3::new(
            self.p.get::<radian_per_second>(),
            self.q.get::<radian_per_second>(),
            self.r.get::<radian_per_second>(),
        )
    }
}

/// Sines and cosines of the three Euler angles.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EulerTrig {
    pub(crate) sphi: f64,
    pub(crate) cphi: f64,
    pub(crate) sthe: f64,
    pub(crate) cthe: f64,
    pub(crate) spsi: f64,
    pub(crate) cpsi: f64,
}

impl EulerTrig {
    /// The body-to-earth direction cosine matrix.
    #[rustfmt::skip]
    pub(crate) fn body_to_earth(&self) -> Matrix3 {
        let Self { sphi, cphi, sthe, cthe, spsi, cpsi } = *self;
        Matrix3::new(
            cthe * cpsi, sphi * sthe * cpsi - cphi * spsi, cphi * sthe * cpsi + sphi * spsi,
            cthe * spsi, sphi * sthe * spsi + cphi * cpsi, cphi * sthe * spsi - sphi * cpsi,
            -sthe,       sphi * cthe,                      cphi * cthe,
        )
    }
}

/// A rigid body: its current [`RigidBodyState`] together with its [`MassProperties`].
///
/// This is where the state is interpreted: frame conversions
/// ([`convert_axes`](Self::convert_axes)), load accumulation ([`loads`](Self::loads)), the
/// equations of motion ([`state_derivatives`](Self::state_derivatives)), and the diagnostics
/// all hang off of it. A `RigidBody` never advances itself in time; the caller's integrator
/// produces the next state and places it in [`state`](Self::state) (or builds a new body).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub state: RigidBodyState,
    pub mass_properties: MassProperties,
    config: DynamicsConfig,
}

impl RigidBody {
    /// Constructs a body with the default [`DynamicsConfig`].
    #[must_use]
    pub fn new(state: RigidBodyState, mass_properties: MassProperties) -> Self {
        Self {
            state,
            mass_properties,
            config: DynamicsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DynamicsConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    /// Returns the same body in a different state.
    #[must_use]
    pub fn with_state(mut self, state: RigidBodyState) -> Self {
        self.state = state;
        self
    }

    pub(crate) fn euler_trig(&self) -> EulerTrig {
        let tolerance = self.config.axis_snap_tolerance.get::<radian>();
        let (sphi, cphi) = sin_cos_snapped(self.state.phi.get::<radian>(), tolerance);
        let (sthe, cthe) = sin_cos_snapped(self.state.theta.get::<radian>(), tolerance);
        let (spsi, cpsi) = sin_cos_snapped(self.state.psi.get::<radian>(), tolerance);
        EulerTrig {
            sphi,
            cphi,
            sthe,
            cthe,
            spsi,
            cpsi,
        }
    }

    /// Returns the direction cosine matrix that takes body-axes components to earth-axes
    /// components.
    ///
    /// Its transpose goes the other way. Sines and cosines of Euler angles at (or within
    /// [`DynamicsConfig::axis_snap_tolerance`] of) quarter turns are exact.
    #[must_use]
    pub fn direction_cosine_matrix(&self) -> Matrix3 {
        self.euler_trig().body_to_earth()
    }

    /// Expresses `v`, given in `from` axes, in `to` axes.
    ///
    /// [`Axes::Earth`] is handled using the body's attitude; all other axes go through the
    /// body's [`OperatingPoint`]. See [`RigidBody::convert_axes_with`] to use a different
    /// aerodynamic model for the latter.
    ///
    /// ```
    /// use gimbal::{Axes, Inertia, MassProperties, RigidBody, RigidBodyState, Vector3};
    /// use uom::si::angle::degree;
    /// use uom::si::f64::{Angle, Mass, MomentOfInertia};
    /// use uom::si::{mass::kilogram, moment_of_inertia::kilogram_square_meter};
    ///
    /// let kgm2 = MomentOfInertia::new::<kilogram_square_meter>(1.);
    /// let body = RigidBody::new(
    ///     RigidBodyState {
    ///         // facing East
    ///         psi: Angle::new::<degree>(90.),
    ///         ..Default::default()
    ///     },
    ///     MassProperties {
    ///         mass: Mass::new::<kilogram>(1.),
    ///         inertia: Inertia::principal(kgm2, kgm2, kgm2),
    ///     },
    /// );
    ///
    /// // straight ahead is East
    /// let ahead = body.convert_axes(Vector3::x(), Axes::Body, Axes::Earth);
    /// assert_eq!(ahead, Vector3::y());
    /// ```
    #[must_use]
    pub fn convert_axes(&self, v: Vector3, from: Axes, to: Axes) -> Vector3 {
        self.convert_axes_with(v, from, to, &self.operating_point())
    }

    /// Like [`RigidBody::convert_axes`], but delegates conversions that do not involve
    /// [`Axes::Earth`] to `aero`.
    #[must_use]
    pub fn convert_axes_with(
        &self,
        v: Vector3,
        from: Axes,
        to: Axes,
        aero: &impl AeroFrames,
    ) -> Vector3 {
        if from == to {
            return v;
        }

        let body = match from.aero() {
            Some(from) => aero.to_body(v, from),
            None => self.direction_cosine_matrix().transpose() * v,
        };

        match to.aero() {
            Some(to) => aero.from_body(body, to),
            None => self.direction_cosine_matrix() * body,
        }
    }
}
