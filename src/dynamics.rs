//! The 6-degree-of-freedom equations of motion.
//!
//! [`RigidBody::state_derivatives`] maps a body's current state and the [`Loads`] acting on it to
//! the time derivative of every state variable. Nothing here steps time forward; feed the
//! derivatives to an integrator of your choosing (see
//! [`StateDerivatives::to_array`] and [`RigidBodyState::from_array`]).

use crate::config::SingularInertiaPolicy;
use crate::error::Error;
use crate::loads::Loads;
use crate::mass::InverseInertia;
use crate::state::RigidBody;
use crate::Vector3;
use tracing::{debug, trace, warn};
use uom::si::acceleration::meter_per_second_squared;
use uom::si::angle::radian;
use uom::si::angular_acceleration::radian_per_second_squared;
use uom::si::angular_velocity::radian_per_second;
use uom::si::f64::{Acceleration, AngularAcceleration, AngularVelocity, Velocity};
use uom::si::mass::kilogram;
use uom::si::velocity::meter_per_second;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(doc)]
use crate::{config::DynamicsConfig, RigidBodyState};

/// The time derivative of a [`RigidBodyState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateDerivatives {
    pub d_x_e: Velocity,
    pub d_y_e: Velocity,
    pub d_z_e: Velocity,
    pub d_u_b: Acceleration,
    pub d_v_b: Acceleration,
    pub d_w_b: Acceleration,
    pub d_phi: AngularVelocity,
    pub d_theta: AngularVelocity,
    pub d_psi: AngularVelocity,
    pub d_p: AngularAcceleration,
    pub d_q: AngularAcceleration,
    pub d_r: AngularAcceleration,
}

impl StateDerivatives {
    /// Returns the derivatives as SI values, in the same order as
    /// [`RigidBodyState::to_array`].
    #[must_use]
    pub fn to_array(&self) -> [f64; 12] {
        [
            self.d_x_e.get::<meter_per_second>(),
            self.d_y_e.get::<meter_per_second>(),
            self.d_z_e.get::<meter_per_second>(),
            self.d_u_b.get::<meter_per_second_squared>(),
            self.d_v_b.get::<meter_per_second_squared>(),
            self.d_w_b.get::<meter_per_second_squared>(),
            self.d_phi.get::<radian_per_second>(),
            self.d_theta.get::<radian_per_second>(),
            self.d_psi.get::<radian_per_second>(),
            self.d_p.get::<radian_per_second_squared>(),
            self.d_q.get::<radian_per_second_squared>(),
            self.d_r.get::<radian_per_second_squared>(),
        ]
    }

    /// Returns true if no derivative is infinite or NaN.
    ///
    /// A degenerate inertia tensor evaluated under [`SingularInertiaPolicy::Propagate`] shows up
    /// here.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|d| d.is_finite())
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for StateDerivatives {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| a.abs_diff_eq(&b, epsilon))
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for StateDerivatives {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| a.relative_eq(&b, epsilon, max_relative))
    }
}

impl RigidBody {
    /// Evaluates the equations of motion for this body under `loads`.
    ///
    /// Translational motion is Newton's second law in the rotating body axes. Rotational motion
    /// is Euler's equation for the full (non-principal) inertia tensor, with the gyroscopic
    /// coupling of any internal angular momentum in `loads`. The Euler angle rates follow from
    /// the body rates; at gimbal lock (`cos θ == 0`), where they are undefined, the roll and yaw
    /// rates are reported as zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInertia`] if the body's inertia tensor is not positive-definite
    /// and its [`DynamicsConfig::singular_inertia`] is [`SingularInertiaPolicy::FailFast`].
    pub fn state_derivatives(&self, loads: &Loads) -> Result<StateDerivatives, Error> {
        let inverse = self.inverse_inertia()?;
        let trig = self.euler_trig();
        let mass = self.mass_properties.mass.get::<kilogram>();

        let velocity = self.state.velocity_b();
        let rates = self.state.rates_b();
        let (p, q, r) = (rates.x, rates.y, rates.z);

        let d_position = trig.body_to_earth() * velocity;

        // ω × v is the apparent acceleration from expressing velocity in rotating axes
        let d_velocity = loads.force_b_si() / mass - rates.cross(&velocity);

        let (d_phi, d_psi) = if trig.cthe == 0. {
            debug!(
                theta = self.state.theta.get::<radian>(),
                "pitch is at gimbal lock; roll and yaw rates are reported as zero"
            );
            (0., 0.)
        } else {
            let ttheta = trig.sthe / trig.cthe;
            (
                p + q * trig.sphi * ttheta + r * trig.cphi * ttheta,
                q * trig.sphi / trig.cthe + r * trig.cphi / trig.cthe,
            )
        };
        let d_theta = q * trig.cphi - r * trig.sphi;

        let d_rates = inverse.apply(self.euler_moments(loads));

        Ok(StateDerivatives {
            d_x_e: Velocity::new::<meter_per_second>(d_position.x),
            d_y_e: Velocity::new::<meter_per_second>(d_position.y),
            d_z_e: Velocity::new::<meter_per_second>(d_position.z),
            d_u_b: Acceleration::new::<meter_per_second_squared>(d_velocity.x),
            d_v_b: Acceleration::new::<meter_per_second_squared>(d_velocity.y),
            d_w_b: Acceleration::new::<meter_per_second_squared>(d_velocity.z),
            d_phi: AngularVelocity::new::<radian_per_second>(d_phi),
            d_theta: AngularVelocity::new::<radian_per_second>(d_theta),
            d_psi: AngularVelocity::new::<radian_per_second>(d_psi),
            d_p: AngularAcceleration::new::<radian_per_second_squared>(d_rates.x),
            d_q: AngularAcceleration::new::<radian_per_second_squared>(d_rates.y),
            d_r: AngularAcceleration::new::<radian_per_second_squared>(d_rates.z),
        })
    }

    /// The right-hand side of Euler's rotation equation: applied moments less the gyroscopic
    /// terms of the body itself and of its internal angular momentum.
    fn euler_moments(&self, loads: &Loads) -> Vector3 {
        let (ixx, iyy, izz, ixy, iyz, ixz) = self.mass_properties.inertia.components();
        let rates = self.state.rates_b();
        let (p, q, r) = (rates.x, rates.y, rates.z);
        let moment = loads.moment_b_si();
        let h = loads.angular_momentum_b_si();

        Vector3::new(
            moment.x - (izz - iyy) * q * r - iyz * (q * q - r * r) - ixz * p * q + ixy * p * r
                - h.z * q
                + h.y * r,
            moment.y - (ixx - izz) * r * p - ixz * (r * r - p * p) - ixy * q * r + iyz * q * p
                - h.x * r
                + h.z * p,
            moment.z - (iyy - ixx) * p * q - ixy * (p * p - q * q) - iyz * r * p + ixz * r * q
                - h.y * p
                + h.x * q,
        )
    }

    fn inverse_inertia(&self) -> Result<InverseInertia, Error> {
        let inertia = &self.mass_properties.inertia;
        match self.config().singular_inertia {
            SingularInertiaPolicy::Propagate => {
                if !inertia.is_positive_definite() {
                    warn!(
                        determinant = inertia.determinant(),
                        "inertia tensor is not positive-definite; angular accelerations may not be finite"
                    );
                }
                Ok(inertia.inverse())
            }
            SingularInertiaPolicy::FailFast => inertia.try_inverse(),
        }
    }
}

/// Evaluates [`RigidBody::state_derivatives`] for many bodies at once.
///
/// `bodies[i]` is evaluated under `loads[i]`. If either slice has exactly one element, that
/// element is used for every entry of the other. With the `rayon` feature, entries are
/// evaluated in parallel.
///
/// # Errors
///
/// Returns [`Error::BatchShapeMismatch`] if the slice lengths differ and neither is one, or the
/// first error any single evaluation produces.
pub fn state_derivatives_batch(
    bodies: &[RigidBody],
    loads: &[Loads],
) -> Result<Vec<StateDerivatives>, Error> {
    let len = match (bodies.len(), loads.len()) {
        (left, right) if left == right => left,
        (1, right) => right,
        (left, 1) => left,
        (left, right) => return Err(Error::BatchShapeMismatch { left, right }),
    };
    trace!(
        len,
        bodies = bodies.len(),
        loads = loads.len(),
        "evaluating batch of state derivatives"
    );

    let broadcast = |i: usize, of: usize| if of == 1 { 0 } else { i };
    let point = |i: usize| {
        bodies[broadcast(i, bodies.len())].state_derivatives(&loads[broadcast(i, loads.len())])
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        (0..len).into_par_iter().map(point).collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        (0..len).map(point).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{state_derivatives_batch, StateDerivatives};
    use crate::axes::Axes;
    use crate::config::{DynamicsConfig, SingularInertiaPolicy};
    use crate::error::{Error, ErrorKind};
    use crate::loads::Loads;
    use crate::mass::{Inertia, MassProperties};
    use crate::state::tests::{d, mps, unit_mass};
    use crate::state::{RigidBody, RigidBodyState};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::quickcheck;
    use rstest::rstest;
    use uom::si::angle::radian;
    use uom::si::angular_acceleration::radian_per_second_squared;
    use uom::si::angular_momentum::kilogram_square_meter_per_second;
    use uom::si::angular_velocity::radian_per_second;
    use uom::si::f64::{
        AngularAcceleration, AngularMomentum, AngularVelocity, Force, Mass, MomentOfInertia, Torque,
    };
    use uom::si::force::newton;
    use uom::si::mass::kilogram;
    use uom::si::moment_of_inertia::kilogram_square_meter;
    use uom::si::torque::newton_meter;

    fn rps(value: f64) -> AngularVelocity {
        AngularVelocity::new::<radian_per_second>(value)
    }

    fn kgm2(value: f64) -> MomentOfInertia {
        MomentOfInertia::new::<kilogram_square_meter>(value)
    }

    fn n(value: f64) -> Force {
        Force::new::<newton>(value)
    }

    fn at_rest() -> RigidBody {
        RigidBody::new(RigidBodyState::default(), unit_mass())
    }

    fn singular() -> MassProperties {
        MassProperties {
            inertia: Inertia::principal(kgm2(1.), kgm2(1.), kgm2(0.)),
            ..unit_mass()
        }
    }

    #[test]
    fn straight_and_level_coasting() {
        let body = RigidBody::new(
            RigidBodyState {
                u_b: mps(100.),
                ..Default::default()
            },
            MassProperties {
                mass: Mass::new::<kilogram>(1000.),
                ..unit_mass()
            },
        );
        let derivatives = body.state_derivatives(&Loads::zero()).unwrap();
        let mut expected = [0.; 12];
        expected[0] = 100.;
        assert_eq!(derivatives.to_array(), expected);
        assert!(derivatives.is_finite());
    }

    #[test]
    fn heading_east_moves_east() {
        let mut body = at_rest();
        body.state.psi = d(90.);
        body.state.u_b = mps(20.);
        let derivatives = body.state_derivatives(&Loads::zero()).unwrap();
        assert_eq!(derivatives.to_array()[..3], [0., 20., 0.]);
    }

    #[test]
    fn pure_roll_about_principal_axis() {
        let mut body = at_rest();
        body.state.p = rps(1.);
        let derivatives = body.state_derivatives(&Loads::zero()).unwrap().to_array();
        // only roll angle changes
        assert_eq!(derivatives[6], 1.);
        assert_eq!(derivatives[9..], [0., 0., 0.]);
    }

    #[test]
    fn force_accelerates_the_body() {
        let body = RigidBody::new(
            RigidBodyState::default(),
            MassProperties {
                mass: Mass::new::<kilogram>(4.),
                ..unit_mass()
            },
        );
        let loads = body.loads().add_force([n(8.), n(-4.), n(2.)], Axes::Body).build();
        let derivatives = body.state_derivatives(&loads).unwrap().to_array();
        assert_eq!(derivatives[3..6], [2., -1., 0.5]);
    }

    #[test]
    fn moving_in_rotating_axes() {
        // yawing at 1 rad/s while moving forward: velocity swings towards -Y in body axes
        let mut body = at_rest();
        body.state.u_b = mps(10.);
        body.state.r = rps(1.);
        let derivatives = body.state_derivatives(&Loads::zero()).unwrap().to_array();
        assert_eq!(derivatives[3..6], [0., -10., 0.]);
    }

    #[test]
    fn asymmetric_body_couples_rates() {
        let mut body = RigidBody::new(
            RigidBodyState::default(),
            MassProperties {
                inertia: Inertia::principal(kgm2(1.), kgm2(2.), kgm2(3.)),
                ..unit_mass()
            },
        );
        body.state.p = rps(1.);
        body.state.q = rps(1.);
        let derivatives = body.state_derivatives(&Loads::zero()).unwrap().to_array();
        assert_eq!(derivatives[9], 0.);
        assert_eq!(derivatives[10], 0.);
        assert_relative_eq!(derivatives[11], -1. / 3.);
    }

    #[test]
    fn spinning_rotor_precesses() {
        let mut body = at_rest();
        body.state.q = rps(0.5);
        let loads = body
            .loads()
            .add_internal_angular_momentum([
                AngularMomentum::new::<kilogram_square_meter_per_second>(2.),
                AngularMomentum::new::<kilogram_square_meter_per_second>(0.),
                AngularMomentum::new::<kilogram_square_meter_per_second>(0.),
            ])
            .build();
        let derivatives = body.state_derivatives(&loads).unwrap().to_array();
        assert_eq!(derivatives[9..], [0., 0., 1.]);
    }

    #[test]
    fn moment_with_product_of_inertia() {
        let mut body = at_rest();
        body.mass_properties.inertia.ixz = kgm2(0.5);
        let loads = body
            .loads()
            .add_moment(
                [
                    Torque::new::<newton_meter>(1.),
                    Torque::new::<newton_meter>(0.),
                    Torque::new::<newton_meter>(0.),
                ],
                Axes::Body,
            )
            .build();
        let derivatives = body.state_derivatives(&loads).unwrap();
        let expected = body
            .mass_properties
            .inertia
            .matrix()
            .try_inverse()
            .unwrap()
            .column(0)
            .into_owned();
        let d_rates = derivatives.to_array();
        assert_abs_diff_eq!(d_rates[9], expected.x, epsilon = 1e-12);
        assert_abs_diff_eq!(d_rates[10], expected.y, epsilon = 1e-12);
        assert_abs_diff_eq!(d_rates[11], expected.z, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.)]
    #[case(30.)]
    #[case(-135.)]
    fn gimbal_lock(#[case] roll: f64) {
        for pitch in [90., -90.] {
            let mut body = at_rest();
            body.state.theta = d(pitch);
            body.state.phi = d(roll);
            body.state.p = rps(0.1);
            body.state.q = rps(0.3);
            body.state.r = rps(0.2);
            let derivatives = body.state_derivatives(&Loads::zero()).unwrap();
            assert_eq!(derivatives.d_phi, rps(0.));
            assert_eq!(derivatives.d_psi, rps(0.));
            let (sphi, cphi) = d(roll).get::<radian>().sin_cos();
            assert_relative_eq!(
                derivatives.d_theta.get::<radian_per_second>(),
                0.3 * cphi - 0.2 * sphi,
                epsilon = 1e-15
            );
            assert!(derivatives.is_finite());
        }
    }

    #[test]
    fn near_gimbal_lock_is_finite() {
        let mut body = at_rest();
        body.state.theta = d(89.9);
        body.state.q = rps(0.3);
        body.state.phi = d(10.);
        let derivatives = body.state_derivatives(&Loads::zero()).unwrap();
        assert!(derivatives.is_finite());
        assert!(derivatives.d_psi.get::<radian_per_second>().abs() > 10.);
    }

    #[test]
    fn singular_inertia_propagates_by_default() {
        let mut body = RigidBody::new(RigidBodyState::default(), singular());
        body.state.u_b = mps(3.);
        let derivatives = body.state_derivatives(&Loads::zero()).unwrap();
        assert!(!derivatives.is_finite());
        // translational and kinematic results are unaffected
        assert!(derivatives.to_array()[..9].iter().all(|d| d.is_finite()));
    }

    #[test]
    fn singular_inertia_fails_fast() {
        let fail_fast = DynamicsConfig::default().with_singular_inertia(SingularInertiaPolicy::FailFast);
        let body = RigidBody::new(RigidBodyState::default(), singular()).with_config(fail_fast);
        let err = body.state_derivatives(&Loads::zero()).unwrap_err();
        assert_eq!(err, Error::DegenerateInertia { determinant: 0. });
        assert_eq!(err.kind(), ErrorKind::Degenerate);

        assert!(at_rest()
            .with_config(*body.config())
            .state_derivatives(&Loads::zero())
            .is_ok());
    }

    fn swarm() -> Vec<RigidBody> {
        (0..8_u8)
            .map(|i| {
                let i = f64::from(i);
                let mut body = at_rest();
                body.state.u_b = mps(10. * i);
                body.state.theta = d(5. * i);
                body.state.q = rps(0.1 * i);
                body
            })
            .collect()
    }

    #[test]
    fn batch_is_pointwise() {
        let bodies = swarm();
        let loads: Vec<Loads> = bodies
            .iter()
            .map(|body| body.loads().add_force([n(0.), n(0.), n(9.81)], Axes::Earth).build())
            .collect();
        let batch = state_derivatives_batch(&bodies, &loads).unwrap();
        assert_eq!(batch.len(), bodies.len());
        for ((body, loads), derivatives) in bodies.iter().zip(&loads).zip(&batch) {
            assert_eq!(*derivatives, body.state_derivatives(loads).unwrap());
        }
    }

    #[test]
    fn batch_broadcasts_single_entries() {
        let bodies = swarm();
        let thrust = Loads::from_body_axes(
            [n(5.), n(0.), n(0.)],
            [Torque::new::<newton_meter>(0.); 3],
            [AngularMomentum::new::<kilogram_square_meter_per_second>(0.); 3],
        );
        let batch = state_derivatives_batch(&bodies, &[thrust]).unwrap();
        for (body, derivatives) in bodies.iter().zip(&batch) {
            assert_eq!(*derivatives, body.state_derivatives(&thrust).unwrap());
        }

        let loads = vec![thrust, Loads::zero(), thrust];
        let batch = state_derivatives_batch(&bodies[3..4], &loads).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], batch[2]);
        assert_ne!(batch[0], batch[1]);
    }

    #[test]
    fn batch_shape_mismatch() {
        let bodies = swarm();
        let loads = [Loads::zero(); 3];
        let err = state_derivatives_batch(&bodies, &loads).unwrap_err();
        assert_eq!(err, Error::BatchShapeMismatch { left: 8, right: 3 });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert_eq!(state_derivatives_batch(&[], &[]), Ok(Vec::new()));
    }

    #[test]
    fn batch_reports_degenerate_points() {
        let mut bodies = swarm();
        bodies[5].mass_properties = singular();
        let bodies: Vec<_> = bodies
            .into_iter()
            .map(|body| {
                body.with_config(
                    DynamicsConfig::default().with_singular_inertia(SingularInertiaPolicy::FailFast),
                )
            })
            .collect();
        assert!(matches!(
            state_derivatives_batch(&bodies, &[Loads::zero()]),
            Err(Error::DegenerateInertia { .. })
        ));
    }

    #[test]
    fn approx_compares_all_derivatives() {
        let body = swarm()[3];
        let a = body.state_derivatives(&Loads::zero()).unwrap();
        let mut b: StateDerivatives = a;
        assert_relative_eq!(a, b);
        b.d_r += AngularAcceleration::new::<radian_per_second_squared>(1e-3);
        assert!(approx::relative_ne!(a, b));
        assert_abs_diff_eq!(a, b, epsilon = 1e-2);
    }

    quickcheck! {
        fn force_does_all_the_translational_work(
            velocity: (i8, i8, i8),
            rates: (i8, i8, i8),
            force: (i8, i8, i8),
            attitude: (i16, i16)
        ) -> () {
            let mut body = at_rest();
            body.mass_properties.mass = Mass::new::<kilogram>(3.);
            body.state.u_b = mps(f64::from(velocity.0));
            body.state.v_b = mps(f64::from(velocity.1));
            body.state.w_b = mps(f64::from(velocity.2));
            body.state.p = rps(f64::from(rates.0) / 10.);
            body.state.q = rps(f64::from(rates.1) / 10.);
            body.state.r = rps(f64::from(rates.2) / 10.);
            body.state.theta = d(f64::from(attitude.0) / 400.);
            body.state.phi = d(f64::from(attitude.1) / 200.);

            let force = [n(f64::from(force.0)), n(f64::from(force.1)), n(f64::from(force.2))];
            let loads = body.loads().add_force(force, Axes::Body).build();
            let derivatives = body.state_derivatives(&loads).unwrap().to_array();

            // the apparent (rotating-axes) terms are perpendicular to the velocity
            let v = body.state.velocity_b();
            let power = loads.force_b_si().dot(&v);
            let m = 3.;
            let work_rate = m * (v.x * derivatives[3] + v.y * derivatives[4] + v.z * derivatives[5]);
            assert_abs_diff_eq!(work_rate, power, epsilon = 1e-8);
        }
    }
}
