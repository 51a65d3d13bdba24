//! Construction of 2D and 3D rotation matrices.
//!
//! These are plain matrices rather than type-safe rotations between named frames: they are the
//! building blocks that the frame conversions in this crate (and callers doing their own
//! geometry) are expressed in terms of.
//!
//! All rotations are active and counter-clockwise under the [right-hand rule][rhrot], so
//! multiplying a column vector by the returned matrix rotates that vector by `angle` about the
//! axis.
//!
//! [rhrot]: https://en.wikipedia.org/wiki/Right-hand_rule#Rotations

use crate::error::Error;
use crate::{Matrix2, Matrix3, Vector3};
use std::str::FromStr;
use uom::si::angle::radian;
use uom::si::f64::Angle;

/// The axis to rotate about in [`rotation_matrix_3d`].
///
/// The named axes can also be parsed from the strings `"x"`, `"y"`, and `"z"` (in either case):
///
/// ```
/// use gimbal::RotationAxis;
///
/// assert_eq!("Y".parse::<RotationAxis>().unwrap(), RotationAxis::Y);
/// assert!("w".parse::<RotationAxis>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
    /// An arbitrary axis of unit length.
    Unit(Vector3),
}

impl RotationAxis {
    /// Constructs a rotation axis along the given direction.
    ///
    /// The direction is normalized, so its length does not matter (but it must not be zero; a
    /// zero direction produces a matrix full of NaNs).
    #[must_use]
    pub fn along(direction: Vector3) -> Self {
        Self::from_unit(direction / direction.norm())
    }

    /// Constructs a rotation axis along the given direction without normalizing it first.
    ///
    /// # Safety
    ///
    /// The caller asserts that `direction` has unit length. If it does not, the matrices built
    /// from this axis are not rotations (they are neither orthogonal nor of unit determinant),
    /// and anything transformed by them is silently wrong.
    #[must_use]
    pub unsafe fn along_normalized(direction: Vector3) -> Self {
        Self::from_unit(direction)
    }

    fn from_unit(unit: Vector3) -> Self {
        // basis vectors take the same numerical path as the named axes
        if unit == Vector3::x() {
            Self::X
        } else if unit == Vector3::y() {
            Self::Y
        } else if unit == Vector3::z() {
            Self::Z
        } else {
            Self::Unit(unit)
        }
    }
}

impl FromStr for RotationAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(Error::UnknownRotationAxis(s.to_owned())),
        }
    }
}

/// Returns the matrix of a counter-clockwise rotation by `angle` in the plane.
///
/// ```text
/// [cos θ, -sin θ]
/// [sin θ,  cos θ]
/// ```
#[must_use]
pub fn rotation_matrix_2d(angle: impl Into<Angle>) -> Matrix2 {
    let (s, c) = angle.into().get::<radian>().sin_cos();
    Matrix2::new(
        c, -s, //
        s, c,
    )
}

/// Returns the matrix of a rotation by `angle` about `axis`.
///
/// For the named axes, this is the corresponding [elementary rotation][elementary]. For
/// [`RotationAxis::Unit`], it is [Rodrigues' rotation formula][rodrigues] in matrix form.
///
/// ```
/// use gimbal::{rotation_matrix_3d, RotationAxis, Vector3};
/// use uom::si::{angle::degree, f64::Angle};
///
/// let quarter = rotation_matrix_3d(Angle::new::<degree>(90.), RotationAxis::Z);
/// let rotated = quarter * Vector3::x();
/// approx::assert_abs_diff_eq!(rotated, Vector3::y(), epsilon = 1e-15);
/// ```
///
/// [elementary]: https://en.wikipedia.org/wiki/Rotation_matrix#Basic_3D_rotations
/// [rodrigues]: https://en.wikipedia.org/wiki/Rotation_matrix#Rotation_matrix_from_axis_and_angle
#[must_use]
#[rustfmt::skip]
pub fn rotation_matrix_3d(angle: impl Into<Angle>, axis: RotationAxis) -> Matrix3 {
    let (s, c) = angle.into().get::<radian>().sin_cos();

    match axis {
        RotationAxis::X => Matrix3::new(
            1., 0., 0.,
            0., c, -s,
            0., s, c,
        ),
        RotationAxis::Y => Matrix3::new(
            c, 0., s,
            0., 1., 0.,
            -s, 0., c,
        ),
        RotationAxis::Z => Matrix3::new(
            c, -s, 0.,
            s, c, 0.,
            0., 0., 1.,
        ),
        RotationAxis::Unit(u) => {
            let (ux, uy, uz) = (u.x, u.y, u.z);
            let t = 1. - c;
            Matrix3::new(
                c + ux * ux * t, ux * uy * t - uz * s, ux * uz * t + uy * s,
                uy * ux * t + uz * s, c + uy * uy * t, uy * uz * t - ux * s,
                uz * ux * t - uy * s, uz * uy * t + ux * s, c + uz * uz * t,
            )
        }
    }
}

/// Returns one [`rotation_matrix_2d`] per angle.
pub fn rotation_matrices_2d<A>(angles: impl IntoIterator<Item = A>) -> Vec<Matrix2>
where
    A: Into<Angle>,
{
    angles.into_iter().map(|angle| rotation_matrix_2d(angle)).collect()
}

/// Returns one [`rotation_matrix_3d`] per angle, all about the same axis.
pub fn rotation_matrices_3d<A>(
    angles: impl IntoIterator<Item = A>,
    axis: RotationAxis,
) -> Vec<Matrix3>
where
    A: Into<Angle>,
{
    angles
        .into_iter()
        .map(|angle| rotation_matrix_3d(angle, axis))
        .collect()
}
