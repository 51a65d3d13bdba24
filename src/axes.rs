use crate::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(doc)]
use crate::{OperatingPoint, RigidBody};

/// The axis systems that vectors (forces, moments, velocities, ...) can be expressed in.
///
/// All of them are right-handed and share their origin with the body's center of mass; they
/// differ only in orientation.
///
/// Conversions into and out of [`Axes::Earth`] need the body's attitude and are done by
/// [`RigidBody::convert_axes`]. Conversions between the remaining four only need the
/// aerodynamic angles, and are delegated to an [`AeroFrames`](crate::AeroFrames) implementation
/// such as [`OperatingPoint`].
///
/// Axes can be parsed from their lower-case names:
///
/// ```
/// use gimbal::Axes;
///
/// assert_eq!("stability".parse::<Axes>().unwrap(), Axes::Stability);
/// assert!("ned".parse::<Axes>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axes {
    /// The axes geometry is usually drawn in.
    ///
    /// - Positive X points aft (from nose to tail).
    /// - Positive Y points out the right wing.
    /// - Positive Z points up.
    ///
    /// This is [`Axes::Body`] rotated by 180° about Y.
    Geometry,

    /// Axes fixed to and rotating with the body (Forward, Right, Down).
    ///
    /// - Positive X points out the nose.
    /// - Positive Y points out the right wing.
    /// - Positive Z points out the belly.
    Body,

    /// Axes aligned with the oncoming flow.
    ///
    /// - Positive X points along the velocity of the body relative to the air.
    /// - Positive Z lies in the body's plane of symmetry, towards the belly.
    ///
    /// This is [`Axes::Body`] rotated by angle of attack and then by sideslip.
    Wind,

    /// [`Axes::Body`] rotated by angle of attack only (ie, [`Axes::Wind`] without sideslip).
    Stability,

    /// Axes fixed to the ground (North, East, Down).
    ///
    /// - Positive X points North.
    /// - Positive Y points East.
    /// - Positive Z points down, so altitude is `-z`.
    Earth,
}

impl Axes {
    /// Returns the equivalent [`AeroAxes`], or `None` for [`Axes::Earth`].
    #[must_use]
    pub fn aero(self) -> Option<AeroAxes> {
        match self {
            Self::Geometry => Some(AeroAxes::Geometry),
            Self::Body => Some(AeroAxes::Body),
            Self::Wind => Some(AeroAxes::Wind),
            Self::Stability => Some(AeroAxes::Stability),
            Self::Earth => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Geometry => "geometry",
            Self::Body => "body",
            Self::Wind => "wind",
            Self::Stability => "stability",
            Self::Earth => "earth",
        }
    }
}

impl FromStr for Axes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geometry" => Ok(Self::Geometry),
            "body" => Ok(Self::Body),
            "wind" => Ok(Self::Wind),
            "stability" => Ok(Self::Stability),
            "earth" => Ok(Self::Earth),
            _ => Err(Error::UnknownAxes(s.to_owned())),
        }
    }
}

impl Display for Axes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The subset of [`Axes`] whose orientation relative to the body depends only on the
/// aerodynamic angles (and not on the body's attitude relative to the ground).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeroAxes {
    Geometry,
    Body,
    Wind,
    Stability,
}

impl From<AeroAxes> for Axes {
    fn from(axes: AeroAxes) -> Self {
        match axes {
            AeroAxes::Geometry => Self::Geometry,
            AeroAxes::Body => Self::Body,
            AeroAxes::Wind => Self::Wind,
            AeroAxes::Stability => Self::Stability,
        }
    }
}

impl Display for AeroAxes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Axes::from(*self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::{AeroAxes, Axes};
    use crate::error::{Error, ErrorKind};
    use rstest::rstest;

    #[rstest]
    #[case(Axes::Geometry)]
    #[case(Axes::Body)]
    #[case(Axes::Wind)]
    #[case(Axes::Stability)]
    #[case(Axes::Earth)]
    fn display_parses_back(#[case] axes: Axes) {
        assert_eq!(axes.to_string().parse::<Axes>().unwrap(), axes);
    }

    #[rstest]
    #[case("Body")]
    #[case("ned")]
    #[case("")]
    fn unknown_axes(#[case] token: &str) {
        let err = token.parse::<Axes>().unwrap_err();
        assert_eq!(err, Error::UnknownAxes(token.to_owned()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn only_earth_is_not_aero() {
        assert_eq!(Axes::Earth.aero(), None);
        for aero in [
            AeroAxes::Geometry,
            AeroAxes::Body,
            AeroAxes::Wind,
            AeroAxes::Stability,
        ] {
            assert_eq!(Axes::from(aero).aero(), Some(aero));
            assert_eq!(aero.to_string(), Axes::from(aero).to_string());
        }
    }
}
