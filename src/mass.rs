use crate::error::Error;
use crate::{Matrix3, Vector3};
use uom::si::f64::{Mass, MomentOfInertia};
use uom::si::moment_of_inertia::kilogram_square_meter;

/// The mass and inertia of a rigid body about its center of mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    pub mass: Mass,
    pub inertia: Inertia,
}

/// The symmetric inertia tensor of a body about its center of mass, in body axes.
///
/// The tensor is assembled as
///
/// ```text
/// [ixx, ixy, ixz]
/// [ixy, iyy, iyz]
/// [ixz, iyz, izz]
/// ```
///
/// that is, the products of inertia enter with a positive sign. Callers whose data follows the
/// other common convention (`-∫xy dm` on the off-diagonal) must negate them.
///
/// For the tensor to describe a physical body it must be positive-definite. Nothing here
/// enforces that on construction; see [`Inertia::try_inverse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inertia {
    pub ixx: MomentOfInertia,
    pub iyy: MomentOfInertia,
    pub izz: MomentOfInertia,
    pub ixy: MomentOfInertia,
    pub iyz: MomentOfInertia,
    pub ixz: MomentOfInertia,
}

/// The inverse of an [`Inertia`] tensor, in 1/(kg·m²).
///
/// Only the six independent coefficients of the (again symmetric) inverse are kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseInertia {
    pub i11: f64,
    pub i22: f64,
    pub i33: f64,
    pub i12: f64,
    pub i23: f64,
    pub i13: f64,
}

impl Inertia {
    /// Constructs an inertia tensor whose body axes are its principal axes.
    #[must_use]
    pub fn principal(ixx: MomentOfInertia, iyy: MomentOfInertia, izz: MomentOfInertia) -> Self {
        let zero = MomentOfInertia::new::<kilogram_square_meter>(0.);
        Self {
            ixx,
            iyy,
            izz,
            ixy: zero,
            iyz: zero,
            ixz: zero,
        }
    }

    /// Returns the six components in kg·m², as `(ixx, iyy, izz, ixy, iyz, ixz)`.
    pub(crate) fn components(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.ixx.get::<kilogram_square_meter>(),
            self.iyy.get::<kilogram_square_meter>(),
            self.izz.get::<kilogram_square_meter>(),
            self.ixy.get::<kilogram_square_meter>(),
            self.iyz.get::<kilogram_square_meter>(),
            self.ixz.get::<kilogram_square_meter>(),
        )
    }

    /// Returns the full tensor in kg·m².
    #[must_use]
    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3 {
        let (ixx, iyy, izz, ixy, iyz, ixz) = self.components();
        Matrix3::new(
            ixx, ixy, ixz,
            ixy, iyy, iyz,
            ixz, iyz, izz,
        )
    }

    /// Returns the determinant of the tensor, in (kg·m²)³.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let (ixx, iyy, izz, ixy, iyz, ixz) = self.components();
        ixx * (iyy * izz - iyz * iyz) + ixy * (iyz * ixz - ixy * izz) + ixz * (ixy * iyz - iyy * ixz)
    }

    /// Returns true if the tensor is positive-definite (by Sylvester's criterion).
    #[must_use]
    pub fn is_positive_definite(&self) -> bool {
        let (ixx, iyy, _, ixy, _, _) = self.components();
        ixx > 0. && ixx * iyy - ixy * ixy > 0. && self.determinant() > 0.
    }

    /// Returns the closed-form inverse of the tensor.
    ///
    /// The inverse is computed from the cofactors of the symmetric matrix, divided by the
    /// determinant. No checking is done: a singular tensor yields infinite or NaN coefficients,
    /// which then propagate into anything computed from them. Use [`Inertia::try_inverse`] to
    /// fail instead.
    #[must_use]
    pub fn inverse(&self) -> InverseInertia {
        let (ixx, iyy, izz, ixy, iyz, ixz) = self.components();
        let det = self.determinant();
        InverseInertia {
            i11: (iyy * izz - iyz * iyz) / det,
            i22: (ixx * izz - ixz * ixz) / det,
            i33: (ixx * iyy - ixy * ixy) / det,
            i12: (iyz * ixz - ixy * izz) / det,
            i23: (ixy * ixz - ixx * iyz) / det,
            i13: (ixy * iyz - iyy * ixz) / det,
        }
    }

    /// Returns the inverse of the tensor if it is positive-definite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInertia`] if the tensor is singular or otherwise not
    /// positive-definite.
    pub fn try_inverse(&self) -> Result<InverseInertia, Error> {
        if self.is_positive_definite() {
            Ok(self.inverse())
        } else {
            Err(Error::DegenerateInertia {
                determinant: self.determinant(),
            })
        }
    }
}

impl InverseInertia {
    /// Multiplies the inverse tensor with `v`.
    #[must_use]
    pub fn apply(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.i11 * v.x + self.i12 * v.y + self.i13 * v.z,
            self.i12 * v.x + self.i22 * v.y + self.i23 * v.z,
            self.i13 * v.x + self.i23 * v.y + self.i33 * v.z,
        )
    }

    /// Returns the full inverse tensor.
    #[must_use]
    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3 {
        Matrix3::new(
            self.i11, self.i12, self.i13,
            self.i12, self.i22, self.i23,
            self.i13, self.i23, self.i33,
        )
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.i11, self.i22, self.i33, self.i12, self.i23, self.i13]
            .iter()
            .all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::Inertia;
    use crate::error::{Error, ErrorKind};
    use crate::{Matrix3, Vector3};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::quickcheck;
    use rstest::rstest;
    use uom::si::f64::MomentOfInertia;
    use uom::si::moment_of_inertia::kilogram_square_meter;

    fn kgm2(value: f64) -> MomentOfInertia {
        MomentOfInertia::new::<kilogram_square_meter>(value)
    }

    fn tensor(ixx: f64, iyy: f64, izz: f64, ixy: f64, iyz: f64, ixz: f64) -> Inertia {
        Inertia {
            ixx: kgm2(ixx),
            iyy: kgm2(iyy),
            izz: kgm2(izz),
            ixy: kgm2(ixy),
            iyz: kgm2(iyz),
            ixz: kgm2(ixz),
        }
    }

    #[test]
    fn diagonal_inverse() {
        let inverse = Inertia::principal(kgm2(2.), kgm2(4.), kgm2(8.)).inverse();
        assert_relative_eq!(inverse.i11, 0.5);
        assert_relative_eq!(inverse.i22, 0.25);
        assert_relative_eq!(inverse.i33, 0.125);
        assert_eq!(inverse.i12, 0.);
        assert_eq!(inverse.i23, 0.);
        assert_eq!(inverse.i13, 0.);
    }

    #[rstest]
    // a light aircraft, with the usual xz coupling
    #[case(tensor(1285., 1825., 2667., 0., 0., 0.))]
    #[case(tensor(1285., 1825., 2667., 0., 0., -60.))]
    #[case(tensor(10., 12., 15., 1., -2., 0.5))]
    #[case(tensor(3., 3., 3., 1., 1., 1.))]
    fn inverse_times_tensor_is_identity(#[case] inertia: Inertia) {
        let inverse = inertia.try_inverse().expect("tensor is positive-definite");
        assert_abs_diff_eq!(
            inverse.matrix() * inertia.matrix(),
            Matrix3::identity(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            inertia.determinant(),
            inertia.matrix().determinant(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn apply_matches_matrix_product() {
        let inverse = tensor(10., 12., 15., 1., -2., 0.5).inverse();
        let v = Vector3::new(3., -1., 2.);
        assert_abs_diff_eq!(inverse.apply(v), inverse.matrix() * v, epsilon = 1e-15);
    }

    #[rstest]
    #[case(tensor(0., 0., 0., 0., 0., 0.))]
    #[case(tensor(1., 1., 0., 0., 0., 0.))]
    // rank two: the third row is the sum of the first two
    #[case(tensor(1., 1., 2., 0., 1., 1.))]
    fn singular_tensors(#[case] inertia: Inertia) {
        assert!(!inertia.inverse().is_finite());
        let err = inertia.try_inverse().unwrap_err();
        assert!(matches!(err, Error::DegenerateInertia { .. }));
        assert_eq!(err.kind(), ErrorKind::Degenerate);
    }

    #[test]
    fn invertible_but_not_physical() {
        let inertia = tensor(1., -1., 1., 0., 0., 0.);
        assert!(inertia.inverse().is_finite());
        assert_eq!(
            inertia.try_inverse(),
            Err(Error::DegenerateInertia { determinant: -1. })
        );
    }

    quickcheck! {
        fn positive_definite_tensors_invert(a: Vec<i8>) -> () {
            if a.len() < 9 {
                return;
            }
            // A Aᵀ + I is always symmetric positive-definite
            let a = Matrix3::from_iterator(a.iter().take(9).map(|&v| f64::from(v) / 10.));
            let m = a * a.transpose() + Matrix3::identity();
            let inertia = tensor(m[(0, 0)], m[(1, 1)], m[(2, 2)], m[(0, 1)], m[(1, 2)], m[(0, 2)]);
            assert!(inertia.is_positive_definite());
            let inverse = inertia.try_inverse().expect("positive-definite");
            assert_abs_diff_eq!(inverse.matrix() * m, Matrix3::identity(), epsilon = 1e-6);
        }
    }
}
