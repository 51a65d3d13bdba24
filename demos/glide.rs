use gimbal::{Axes, Inertia, MassProperties, RigidBody, RigidBodyState};
use uom::si::angle::{degree, radian};
use uom::si::angular_velocity::radian_per_second;
use uom::si::energy::joule;
use uom::si::f64::{Force, Length, Mass, MomentOfInertia, Torque, Velocity};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::moment_of_inertia::kilogram_square_meter;
use uom::si::torque::newton_meter;
use uom::si::velocity::meter_per_second;

// a hand-launched balsa glider
const AIR_DENSITY: f64 = 1.225;
const WING_AREA: f64 = 0.3;
const CHORD: f64 = 0.2;

/// Lift, drag, and pitching moment for the glider's current state.
///
/// Lift and drag are in wind axes, the pitching moment is about the stability Y axis.
fn aerodynamics(glider: &RigidBody) -> ([Force; 3], [Torque; 3]) {
    let speed = glider.speed().get::<meter_per_second>();
    let alpha = glider.alpha().get::<radian>();
    let q = glider.state.q.get::<radian_per_second>();
    let dynamic_pressure = 0.5 * AIR_DENSITY * speed * speed;

    let cl = 0.3 + 5.0 * alpha;
    let cd = 0.02 + 0.05 * cl * cl;
    let damping = if speed > 0. { q * CHORD / (2. * speed) } else { 0. };
    let cm = 0.02 - 0.8 * alpha - 10. * damping;

    let n = Force::new::<newton>;
    let nm = Torque::new::<newton_meter>;
    (
        [
            n(-dynamic_pressure * WING_AREA * cd),
            n(0.),
            n(-dynamic_pressure * WING_AREA * cl),
        ],
        [nm(0.), nm(dynamic_pressure * WING_AREA * CHORD * cm), nm(0.)],
    )
}

fn main() -> Result<(), gimbal::Error> {
    let kgm2 = MomentOfInertia::new::<kilogram_square_meter>;
    let mut glider = RigidBody::new(
        RigidBodyState {
            // earth axes point down, so this is 50 m up
            z_e: Length::new::<meter>(-50.),
            u_b: Velocity::new::<meter_per_second>(12.),
            ..Default::default()
        },
        MassProperties {
            mass: Mass::new::<kilogram>(0.4),
            inertia: Inertia::principal(kgm2(0.01), kgm2(0.02), kgm2(0.03)),
        },
    );

    let dt = 0.005;
    let mut step = 0_u32;
    println!("   t      x      alt    speed   alpha   theta  energy");
    while glider.altitude().get::<meter>() > 0. && step < 12_000 {
        let weight = glider.mass_properties.mass * glider.config().gravity;
        let zero = Force::new::<newton>(0.);
        let (aero_force, aero_moment) = aerodynamics(&glider);
        let loads = glider
            .loads()
            .add_force([zero, zero, weight], Axes::Earth)
            .add_force(aero_force, Axes::Wind)
            .add_moment(aero_moment, Axes::Stability)
            .build();

        if step % 200 == 0 {
            println!(
                "{:5.1} {:6.1} {:6.1} {:6.2} {:6.2}° {:6.2}° {:6.1} J",
                f64::from(step) * dt,
                glider.state.x_e.get::<meter>(),
                glider.altitude().get::<meter>(),
                glider.speed().get::<meter_per_second>(),
                glider.alpha().get::<degree>(),
                glider.state.theta.get::<degree>(),
                (glider.kinetic_energy() + glider.potential_energy()).get::<joule>(),
            );
        }

        // explicit Euler; the caller picks the integrator
        let derivatives = glider.state_derivatives(&loads)?;
        let mut state = glider.state.to_array();
        for (x, dx) in state.iter_mut().zip(derivatives.to_array()) {
            *x += dx * dt;
        }
        glider.state = RigidBodyState::from_array(state);
        step += 1;
    }

    println!(
        "landed {:.1} m downrange after {:.1} s",
        glider.state.x_e.get::<meter>(),
        f64::from(step) * dt
    );
    Ok(())
}
