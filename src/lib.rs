//! This library provides the 6-degree-of-freedom equations of motion of a rigid body (think
//! aircraft, missile, or drone) for engineers who would rather write their vehicle model than
//! re-derive Newton and Euler in rotating axes.
//!
//! The body's state is the classic twelve-variable set held by [`RigidBodyState`]: position in
//! earth axes, velocity and angular rates in body axes, and attitude as yaw-pitch-roll Euler
//! angles. Combined with its [`MassProperties`], that gives a [`RigidBody`], which is where
//! everything else hangs off:
//!
//! - [`RigidBody::loads`] accumulates forces and moments given in any of the five [`Axes`]
//!   (geometry, body, wind, stability, and earth) into body-axes [`Loads`].
//! - [`RigidBody::state_derivatives`] evaluates the equations of motion under those loads, and
//!   [`state_derivatives_batch`] does so for many bodies at once.
//! - [`RigidBody::convert_axes`] moves vectors between axes.
//! - Diagnostics such as [`RigidBody::alpha`], [`RigidBody::speed`], and
//!   [`RigidBody::kinetic_energy`] describe the current state.
//!
//! The library never advances time itself. You own the integration loop: evaluate the
//! derivatives, step the state with whatever integrator suits your problem, and evaluate again.
//! All physical quantities at the API boundary are [`uom`] quantities, so units are never
//! ambiguous.
//!
//! # Examples
//!
//! A 1.2 kg glider is launched horizontally at 15 m/s from 100 m up. Only gravity and a crude
//! drag model act on it, and we step it forward with explicit Euler:
//!
//! ```
//! use gimbal::{Axes, Inertia, MassProperties, RigidBody, RigidBodyState};
//! use uom::si::f64::{Force, Length, Mass, MomentOfInertia, Velocity};
//! use uom::si::{force::newton, length::meter, mass::kilogram};
//! use uom::si::{moment_of_inertia::kilogram_square_meter, velocity::meter_per_second};
//!
//! let kgm2 = MomentOfInertia::new::<kilogram_square_meter>;
//! let mut glider = RigidBody::new(
//!     RigidBodyState {
//!         // recall that earth axes point _down_
//!         z_e: Length::new::<meter>(-100.),
//!         u_b: Velocity::new::<meter_per_second>(15.),
//!         ..Default::default()
//!     },
//!     MassProperties {
//!         mass: Mass::new::<kilogram>(1.2),
//!         inertia: Inertia::principal(kgm2(0.05), kgm2(0.08), kgm2(0.12)),
//!     },
//! );
//!
//! let dt = 0.01;
//! for _ in 0..100 {
//!     let weight = glider.mass_properties.mass * glider.config().gravity;
//!     let drag = -0.02 * glider.speed().get::<meter_per_second>().powi(2);
//!     let zero = Force::new::<newton>(0.);
//!     let loads = glider
//!         .loads()
//!         .add_force([zero, zero, weight], Axes::Earth)
//!         .add_force([Force::new::<newton>(drag), zero, zero], Axes::Wind)
//!         .build();
//!
//!     let derivatives = glider.state_derivatives(&loads)?;
//!     let mut state = glider.state.to_array();
//!     for (x, dx) in state.iter_mut().zip(derivatives.to_array()) {
//!         *x += dx * dt;
//!     }
//!     glider.state = RigidBodyState::from_array(state);
//! }
//!
//! // one second later, it has lost both height and airspeed
//! assert!(glider.altitude().get::<meter>() < 100.);
//! assert!(glider.state.u_b.get::<meter_per_second>() < 15.);
//! # Ok::<(), gimbal::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde` (default): (de)serialization of [`config::DynamicsConfig`].
//! - `approx` (default): [`approx`](https://docs.rs/approx) comparisons of
//!   [`StateDerivatives`].
//! - `rayon`: parallel evaluation in [`state_derivatives_batch`].

mod axes;
mod diagnostics;
mod dynamics;
mod error;
mod loads;
mod mass;
mod operating_point;
mod rotations;
mod state;
mod util;

pub mod config;

pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix2 = nalgebra::Matrix2<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;

pub use axes::{AeroAxes, Axes};
pub use dynamics::{state_derivatives_batch, StateDerivatives};
pub use error::{Error, ErrorKind};
pub use loads::{Loads, LoadsBuilder};
pub use mass::{Inertia, InverseInertia, MassProperties};
pub use operating_point::{AeroFrames, OperatingPoint};
pub use rotations::{
    rotation_matrices_2d, rotation_matrices_3d, rotation_matrix_2d, rotation_matrix_3d,
    RotationAxis,
};
pub use state::{RigidBody, RigidBodyState};
