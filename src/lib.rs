// Copyright (c) 2024 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! vincenty-geodesy
//!
//! A library for solving the direct and inverse geodetic problems on the
//! surface of an ellipsoid of revolution, e.g. the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid.
//!
//! - the inverse problem: given a pair of points, find the length of the
//!   geodesic between them and its azimuths at both points;
//! - the direct problem: given a start point, an azimuth and a distance, find
//!   the end point of the geodesic and its azimuth there.
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//!
//! ## Design
//!
//! The library uses T. Vincenty's iterative solutions on the auxiliary sphere,
//! see [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application
//! of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! Vincenty's inverse iteration fails to converge for nearly antipodal points.
//! In that case the azimuth at the start point is found by bisection, so the
//! inverse solution converges for all pairs of finite points.
//!
//! A `GeodeticMeasurement` extends a `GeodeticCurve` between two `Position`s
//! with their elevation change and the straight line distance between them.
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid` which is used
//! by the top level functions of the library.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [log](https://crates.io/crates/log) - to report the use of bisection;
//! - [thiserror](https://crates.io/crates/thiserror) - to define `Error`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.
//!
//! ## Example
//!
//! ```
//! use vincenty_geodesy::*;
//!
//! let lincoln_memorial = Coordinate::new(Degrees(38.88922), Degrees(-77.04978));
//! let eiffel_tower = Coordinate::new(Degrees(48.85889), Degrees(2.29583));
//!
//! let curve = calculate_geodetic_curve(&WGS84_ELLIPSOID, &lincoln_memorial, &eiffel_tower).unwrap();
//! println!("Lincoln Memorial to Eiffel Tower: {curve}");
//!
//! let end = calculate_ending_coordinates(&WGS84_ELLIPSOID, &lincoln_memorial,
//!     curve.azimuth(), curve.ellipsoidal_distance()).unwrap();
//! assert!((end.lat().0 - eiffel_tower.lat().0).abs() < 1e-7);
//! assert!((end.lon().0 - eiffel_tower.lon().0).abs() < 1e-7);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;

pub mod coordinate;
pub mod curve;
pub mod direct;
pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod measurement;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use coordinate::{Coordinate, Position};
pub use curve::{GeodeticCurve, GeodeticMeasurement};
pub use error::{Error, Result};
pub use icao_units::si::Metres;

use lazy_static::lazy_static;

/// Convert an angle in degrees to radians.
#[must_use]
pub fn to_radians(angle: Degrees) -> Radians {
    Radians(angle.0.to_radians())
}

/// Convert an angle in radians to degrees.
#[must_use]
pub fn to_degrees(angle: Radians) -> Degrees {
    Degrees(angle.0.to_degrees())
}

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Validate for Ellipsoid {
    /// Test whether an `Ellipsoid` is valid.
    /// Whether 0 < `a` and 0 <= `f` < 1.
    fn is_valid(&self) -> bool {
        self.a.0.is_finite() && 0.0 < self.a.0 && (0.0..1.0).contains(&self.f)
    }
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    ///
    /// # Errors
    ///
    /// `Error::InvalidEllipsoid` if `a` is not positive and finite or
    /// `f` is not in the range [0, 1).
    pub fn new(a: Metres, f: f64) -> Result<Self> {
        let ellipsoid = Self::build(a, f);
        if ellipsoid.is_valid() {
            Ok(ellipsoid)
        } else {
            Err(Error::InvalidEllipsoid { a: a.0, f })
        }
    }

    /// Construct an `Ellipsoid` from its Semimajor axis and the reciprocal
    /// of its flattening.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `inverse_f` - the inverse flattening, infinite for a sphere.
    ///
    /// # Errors
    ///
    /// `Error::InvalidEllipsoid` if `a` is not positive and finite or
    /// `inverse_f` is not greater than one.
    pub fn from_a_and_inverse_f(a: Metres, inverse_f: f64) -> Result<Self> {
        Self::new(a, 1.0 / inverse_f)
    }

    /// Construct an `Ellipsoid` from parameters known to be valid.
    fn build(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::build(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// Construct an `Ellipsoid` with the GRS 80 parameters.
    #[must_use]
    pub fn grs80() -> Self {
        use ellipsoid::reference::{GRS80_A, GRS80_INVERSE_F};
        Self::build(GRS80_A, 1.0 / GRS80_INVERSE_F)
    }

    /// Construct an `Ellipsoid` with the GRS 67 parameters.
    #[must_use]
    pub fn grs67() -> Self {
        use ellipsoid::reference::{GRS67_A, GRS67_INVERSE_F};
        Self::build(GRS67_A, 1.0 / GRS67_INVERSE_F)
    }

    /// Construct an `Ellipsoid` with the Australian National Spheroid parameters.
    #[must_use]
    pub fn ans() -> Self {
        use ellipsoid::reference::{ANS_A, ANS_INVERSE_F};
        Self::build(ANS_A, 1.0 / ANS_INVERSE_F)
    }

    /// Construct an `Ellipsoid` with the WGS 72 parameters.
    #[must_use]
    pub fn wgs72() -> Self {
        use ellipsoid::reference::{WGS72_A, WGS72_INVERSE_F};
        Self::build(WGS72_A, 1.0 / WGS72_INVERSE_F)
    }

    /// Construct an `Ellipsoid` with the Clarke 1858 parameters.
    #[must_use]
    pub fn clarke1858() -> Self {
        use ellipsoid::reference::{CLARKE1858_A, CLARKE1858_INVERSE_F};
        Self::build(CLARKE1858_A, 1.0 / CLARKE1858_INVERSE_F)
    }

    /// Construct an `Ellipsoid` with the Clarke 1880 parameters.
    #[must_use]
    pub fn clarke1880() -> Self {
        use ellipsoid::reference::{CLARKE1880_A, CLARKE1880_INVERSE_F};
        Self::build(CLARKE1880_A, 1.0 / CLARKE1880_INVERSE_F)
    }

    /// Construct a sphere with the mean radius of the Earth.
    #[must_use]
    pub fn sphere() -> Self {
        Self::build(ellipsoid::reference::SPHERE_RADIUS, 0.0)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The reciprocal of the flattening, infinite for a sphere.
    #[must_use]
    pub fn inverse_f(&self) -> f64 {
        1.0 / self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        ellipsoid::calculate_parametric_latitude(lat, self.one_minus_f)
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}

/// Calculate the `GeodeticCurve` between a pair of coordinates on an
/// `Ellipsoid`.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `start`, `end` - the start and end coordinates.
///
/// returns the geodesic distance and the azimuths at `start` and at `end`
/// towards `start`.
///
/// # Errors
///
/// `Error::NotFinite` if a coordinate is not finite.
///
/// # Examples
/// ```
/// use vincenty_geodesy::*;
///
/// let istanbul = Coordinate::new(Degrees(42.0), Degrees(29.0));
/// let washington = Coordinate::new(Degrees(39.0), Degrees(-77.0));
/// let curve = calculate_geodetic_curve(&WGS84_ELLIPSOID, &istanbul, &washington).unwrap();
///
/// println!("Istanbul-Washington initial azimuth: {:?}", curve.azimuth().0);
/// println!("Istanbul-Washington distance: {:?}", curve.ellipsoidal_distance());
/// println!("Washington-Istanbul initial azimuth: {:?}", curve.reverse_azimuth().0);
/// ```
pub fn calculate_geodetic_curve(
    ellipsoid: &Ellipsoid,
    start: &Coordinate,
    end: &Coordinate,
) -> Result<GeodeticCurve> {
    geodesic::calculate_geodetic_curve(start, end, geodesic::TOLERANCE, ellipsoid)
}

/// Calculate the end coordinates of a geodesic on an `Ellipsoid`.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `start` - the start coordinate.
/// * `azimuth` - the azimuth at `start`, clockwise from North.
/// * `distance` - the geodesic distance.
///
/// # Errors
///
/// `Error::NotFinite` if the start point, azimuth or distance is not finite.
pub fn calculate_ending_coordinates(
    ellipsoid: &Ellipsoid,
    start: &Coordinate,
    azimuth: Degrees,
    distance: Metres,
) -> Result<Coordinate> {
    calculate_ending_coordinates_and_azimuth(ellipsoid, start, azimuth, distance)
        .map(|(end, _)| end)
}

/// Calculate the end coordinates and end azimuth of a geodesic on an `Ellipsoid`.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `start` - the start coordinate.
/// * `azimuth` - the azimuth at `start`, clockwise from North.
/// * `distance` - the geodesic distance.
///
/// returns the end coordinate and the azimuth of the geodesic at it.
///
/// # Errors
///
/// `Error::NotFinite` if the start point, azimuth or distance is not finite.
pub fn calculate_ending_coordinates_and_azimuth(
    ellipsoid: &Ellipsoid,
    start: &Coordinate,
    azimuth: Degrees,
    distance: Metres,
) -> Result<(Coordinate, Degrees)> {
    direct::calculate_end_point(start, azimuth, distance, geodesic::TOLERANCE, ellipsoid)
}

/// Calculate the `GeodeticMeasurement` between a pair of positions above
/// an `Ellipsoid`.
/// * `ellipsoid` - the reference `Ellipsoid`.
/// * `start`, `end` - the start and end positions.
///
/// # Errors
///
/// `Error::NotFinite` if a position is not finite,
/// `Error::InvalidEllipsoid` if the mean elevation is below the centre of
/// the `Ellipsoid`.
pub fn calculate_geodetic_measurement(
    ellipsoid: &Ellipsoid,
    start: &Position,
    end: &Position,
) -> Result<GeodeticMeasurement> {
    measurement::calculate_geodetic_measurement(start, end, geodesic::TOLERANCE, ellipsoid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_ellipsoid_wgs84() {
        let geoid = Ellipsoid::wgs84();
        assert!(geoid.is_valid());
        assert_eq!(ellipsoid::wgs84::A, geoid.a());
        assert_eq!(ellipsoid::wgs84::F, geoid.f());
        assert_eq!(
            ellipsoid::calculate_minor_axis(ellipsoid::wgs84::A, ellipsoid::wgs84::F),
            geoid.b()
        );
        assert_eq!(1.0 - ellipsoid::wgs84::F, geoid.one_minus_f());
        assert!(is_within_tolerance(
            ellipsoid::wgs84::INVERSE_F,
            geoid.inverse_f(),
            1e-9
        ));
        assert_eq!(
            ellipsoid::calculate_sq_2nd_eccentricity(ellipsoid::wgs84::F),
            geoid.ep_2()
        );

        assert_eq!(geoid, *WGS84_ELLIPSOID);
        assert_eq!(
            Ok(geoid),
            Ellipsoid::from_a_and_inverse_f(ellipsoid::wgs84::A, ellipsoid::wgs84::INVERSE_F)
        );
    }

    #[test]
    fn test_reference_ellipsoids() {
        let ellipsoids = [
            Ellipsoid::grs80(),
            Ellipsoid::grs67(),
            Ellipsoid::ans(),
            Ellipsoid::wgs72(),
            Ellipsoid::clarke1858(),
            Ellipsoid::clarke1880(),
        ];
        for geoid in &ellipsoids {
            assert!(geoid.is_valid());
            assert!(geoid.b().0 < geoid.a().0);
            assert!(0.0 < geoid.ep_2());
        }
        assert_eq!(Metres(6_378_249.145), Ellipsoid::clarke1880().a());
        assert!(is_within_tolerance(293.465, Ellipsoid::clarke1880().inverse_f(), 1e-9));

        let sphere = Ellipsoid::sphere();
        assert!(sphere.is_valid());
        assert_eq!(sphere.a(), sphere.b());
        assert_eq!(0.0, sphere.ep_2());
        assert!(sphere.inverse_f().is_infinite());
        assert_eq!(
            Ok(sphere),
            Ellipsoid::from_a_and_inverse_f(Metres(6_371_000.0), f64::INFINITY)
        );
    }

    #[test]
    fn test_invalid_ellipsoids() {
        assert_eq!(
            Err(Error::InvalidEllipsoid { a: 0.0, f: 0.0 }),
            Ellipsoid::new(Metres(0.0), 0.0)
        );
        assert!(Ellipsoid::new(Metres(-1.0), 0.001).is_err());
        assert!(Ellipsoid::new(Metres(f64::NAN), 0.001).is_err());
        assert!(Ellipsoid::new(Metres(f64::INFINITY), 0.001).is_err());
        assert!(Ellipsoid::new(Metres(6_378_137.0), 1.0).is_err());
        assert!(Ellipsoid::new(Metres(6_378_137.0), -0.001).is_err());
        assert!(Ellipsoid::new(Metres(6_378_137.0), f64::NAN).is_err());
        assert!(Ellipsoid::from_a_and_inverse_f(Metres(6_378_137.0), 0.5).is_err());
    }

    #[test]
    fn test_ellipsoid_traits() {
        let geoid = Ellipsoid::wgs84();
        let geoid_copy = geoid;
        assert_eq!(geoid_copy, geoid);
        assert_ne!(Ellipsoid::grs80(), geoid);

        println!("Ellipsoid: {geoid:?}");
    }

    #[test]
    fn test_calculate_parametric_latitude() {
        let geoid = Ellipsoid::wgs84();
        let beta = geoid.calculate_parametric_latitude(Angle::from(Degrees(45.0)));
        assert!(is_within_tolerance(
            44.903_787_849_420_226,
            Degrees::from(beta).0,
            32.0 * f64::EPSILON
        ));
    }

    #[test]
    fn test_angle_conversions() {
        assert_eq!(Radians(core::f64::consts::PI), to_radians(Degrees(180.0)));
        assert_eq!(Degrees(180.0), to_degrees(Radians(core::f64::consts::PI)));
        assert_eq!(Degrees(90.0), to_degrees(Radians(core::f64::consts::FRAC_PI_2)));
    }

    #[test]
    fn test_top_level_functions() {
        let start = Coordinate::new(Degrees(38.88922), Degrees(-77.04978));
        let end = Coordinate::new(Degrees(48.85889), Degrees(2.29583));
        let curve = calculate_geodetic_curve(&WGS84_ELLIPSOID, &start, &end)
            .expect("inverse should converge");
        assert!(is_within_tolerance(
            6_179_016.136,
            curve.ellipsoidal_distance().0,
            1e-3
        ));

        let (result, azimuth) = calculate_ending_coordinates_and_azimuth(
            &WGS84_ELLIPSOID,
            &start,
            curve.azimuth(),
            curve.ellipsoidal_distance(),
        )
        .expect("direct should converge");
        assert!(is_within_tolerance(end.lat().0, result.lat().0, 1e-7));
        assert!(is_within_tolerance(end.lon().0, result.lon().0, 1e-7));
        assert!((0.0..360.0).contains(&azimuth.0));

        let coordinate = calculate_ending_coordinates(
            &WGS84_ELLIPSOID,
            &start,
            curve.azimuth(),
            curve.ellipsoidal_distance(),
        )
        .expect("direct should converge");
        assert_eq!(result, coordinate);

        let a = Position::from_coordinate(start, Metres(0.0));
        let b = Position::from_coordinate(end, Metres(0.0));
        let measurement = calculate_geodetic_measurement(&WGS84_ELLIPSOID, &a, &b)
            .expect("measurement should converge");
        assert_eq!(curve, *measurement.curve());
    }
}
