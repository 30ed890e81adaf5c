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

//! The direct module contains functions for solving the direct geodetic
//! problem: the end point and azimuth of a geodesic of a given length from
//! a start point along a given azimuth.
//!
//! It uses T. Vincenty's iterative solution on the auxiliary sphere, see
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application
//! of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! A geodesic that passes over a pole yields a latitude and longitude that
//! are canonicalized by `Coordinate::new`.

#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

use crate::coordinate::Coordinate;
use crate::ellipsoid::coefficients::{
    calculate_delta_sigma, calculate_longitude_correction, evaluate_a, evaluate_b,
};
use crate::error::{Error, Result};
use crate::geodesic::{calculate_azimuth_degrees, MAX_ITERATIONS};
use crate::{to_degrees, Ellipsoid, Metres};
use angle_sc::{Angle, Degrees, Radians};

/// Calculate the great circle distance on the auxiliary sphere.
/// Vincenty, Eqs. 5, 6 and 7.
/// * `sigma0` - the geodesic distance divided by `b * A`.
/// * `sigma1` - the great circle distance from the Equator to the start point.
/// * `b` - the coefficient `B`.
/// * `tolerance` - the convergence tolerance.
///
/// returns the great circle distance, or None if it did not converge.
fn calculate_sigma(sigma0: f64, sigma1: f64, b: f64, tolerance: Radians) -> Option<f64> {
    let mut sigma = sigma0;
    for _ in 0..MAX_ITERATIONS {
        let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);
        let delta_sigma =
            calculate_delta_sigma(b, libm::sin(sigma), libm::cos(sigma), cos_2sigma_m);
        let next = sigma0 + delta_sigma;
        let delta = libm::fabs(next - sigma);
        sigma = next;
        if delta < tolerance.0 {
            return Some(sigma);
        }
    }
    None
}

/// Calculate the end point and azimuth of a geodesic: the solution of the
/// direct geodetic problem.
/// * `start` - the start coordinate.
/// * `azimuth` - the azimuth at the start point, clockwise from North.
/// * `distance` - the geodesic distance.
/// * `tolerance` - the tolerance of the great circle distance on the auxiliary sphere.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the end coordinate and the azimuth at the end point in the range [0, 360).
///
/// # Errors
///
/// `Error::NotFinite` if the start point, azimuth or distance is not finite,
/// `Error::NonConvergence` if the great circle distance did not converge.
///
/// # Examples
/// ```
/// use vincenty_geodesy::direct::calculate_end_point;
/// use vincenty_geodesy::geodesic::TOLERANCE;
/// use vincenty_geodesy::{Coordinate, Degrees, Ellipsoid, Metres};
///
/// let start = Coordinate::new(Degrees(0.0), Degrees(0.0));
/// let (end, azimuth) = calculate_end_point(&start, Degrees(90.0), Metres(1_000_000.0),
///     TOLERANCE, &Ellipsoid::wgs84()).unwrap();
/// assert_eq!(0.0, end.lat().0);
/// assert!((end.lon().0 - 8.983_152_841).abs() < 1e-9);
/// assert_eq!(90.0, azimuth.0);
/// ```
pub fn calculate_end_point(
    start: &Coordinate,
    azimuth: Degrees,
    distance: Metres,
    tolerance: Radians,
    ellipsoid: &Ellipsoid,
) -> Result<(Coordinate, Degrees)> {
    if !start.is_finite() {
        return Err(Error::NotFinite { name: "coordinate" });
    }
    if !azimuth.0.is_finite() {
        return Err(Error::NotFinite { name: "azimuth" });
    }
    if !distance.0.is_finite() {
        return Err(Error::NotFinite { name: "distance" });
    }
    if distance.0 == 0.0 {
        return Ok((*start, azimuth));
    }

    let alpha1 = Angle::from(azimuth);
    let sin_alpha1 = alpha1.sin().0;
    let cos_alpha1 = alpha1.cos().0;

    let beta1 = ellipsoid.calculate_parametric_latitude(Angle::from(start.lat()));
    let sin_u1 = beta1.sin().0;
    let cos_u1 = beta1.cos().0;

    // The great circle distance from the Equator to the start point, Eq. 1
    let sigma1 = libm::atan2(sin_u1, cos_u1 * cos_alpha1);

    // The azimuth at the Equator, Eq. 2
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = (1.0 - sin_alpha) * (1.0 + sin_alpha);

    let u_sq = cos_sq_alpha * ellipsoid.ep_2();
    let a = evaluate_a(u_sq);
    let b = evaluate_b(u_sq);

    let sigma0 = distance.0 / (ellipsoid.b().0 * a);
    let sigma = calculate_sigma(sigma0, sigma1, b, tolerance).ok_or(Error::NonConvergence {
        iterations: MAX_ITERATIONS,
    })?;

    let sin_sigma = libm::sin(sigma);
    let cos_sigma = libm::cos(sigma);
    let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);

    // The end latitude, Eq. 8
    let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat2 = libm::atan2(
        sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1,
        ellipsoid.one_minus_f() * libm::hypot(sin_alpha, x),
    );

    // The longitude difference, Eqs. 9 to 11
    let lambda = libm::atan2(
        sin_sigma * sin_alpha1,
        cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1,
    );
    let l = lambda
        - calculate_longitude_correction(
            ellipsoid.f(),
            sin_alpha,
            cos_sq_alpha,
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        );

    // The end azimuth, Eq. 12
    let alpha2 = libm::atan2(sin_alpha, -x);

    let end = Coordinate::new(
        to_degrees(Radians(lat2)),
        Degrees(start.lon().0 + to_degrees(Radians(l)).0),
    );
    Ok((end, calculate_azimuth_degrees(Radians(alpha2))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesic::{calculate_geodetic_curve, TOLERANCE};
    use angle_sc::is_within_tolerance;

    fn direct(lat: f64, lon: f64, azimuth: f64, distance: f64) -> (Coordinate, Degrees) {
        let start = Coordinate::new(Degrees(lat), Degrees(lon));
        calculate_end_point(
            &start,
            Degrees(azimuth),
            Metres(distance),
            TOLERANCE,
            &Ellipsoid::wgs84(),
        )
        .expect("direct should converge")
    }

    #[test]
    fn test_calculate_sigma() {
        // On a sphere B is zero
        assert_eq!(Some(0.5), calculate_sigma(0.5, 0.0, 0.0, TOLERANCE));
        assert_eq!(None, calculate_sigma(f64::NAN, 0.0, 0.001, TOLERANCE));
    }

    #[test]
    fn test_pole_crossing() {
        let (end, azimuth) = direct(38.88922, -77.04978, 1.0, 6_179_016.135_86);
        assert!(is_within_tolerance(85.600_064_327_317_85, end.lat().0, 1e-7));
        assert!(is_within_tolerance(92.172_439_428_329_08, end.lon().0, 1e-7));
        assert!(is_within_tolerance(169.821_757_135_398_63, azimuth.0, 1e-7));
    }

    #[test]
    fn test_zero_distance() {
        let (end, azimuth) = direct(38.88922, -77.04978, 123.0, 0.0);
        assert_eq!(Coordinate::new(Degrees(38.88922), Degrees(-77.04978)), end);
        assert_eq!(123.0, azimuth.0);
    }

    #[test]
    fn test_cardinal_directions() {
        let (end, azimuth) = direct(0.0, 0.0, 90.0, 1_000_000.0);
        assert_eq!(0.0, end.lat().0);
        assert!(is_within_tolerance(8.983_152_841_195_22, end.lon().0, 1e-9));
        assert_eq!(90.0, azimuth.0);

        let (end, azimuth) = direct(0.0, 0.0, 270.0, 1_000_000.0);
        assert_eq!(0.0, end.lat().0);
        assert!(is_within_tolerance(-8.983_152_841_195_22, end.lon().0, 1e-9));
        assert_eq!(270.0, azimuth.0);

        let (end, azimuth) = direct(0.0, 0.0, 0.0, 1_000_000.0);
        assert!(is_within_tolerance(9.042_944_436_330_004, end.lat().0, 1e-9));
        assert_eq!(0.0, end.lon().0);
        assert_eq!(0.0, azimuth.0);

        let (end, azimuth) = direct(0.0, 0.0, 180.0, 1_000_000.0);
        assert!(is_within_tolerance(-9.042_944_436_330_004, end.lat().0, 1e-9));
        assert_eq!(0.0, end.lon().0);
        assert_eq!(180.0, azimuth.0);

        let (end, _) = direct(45.0, 10.0, 0.0, 1_000_000.0);
        assert!(is_within_tolerance(53.991_270_373_228_36, end.lat().0, 1e-9));
        assert!(is_within_tolerance(10.0, end.lon().0, 1e-12));

        let (end, azimuth) = direct(45.0, 10.0, 90.0, 1_000_000.0);
        assert!(is_within_tolerance(44.301_402_946_949_45, end.lat().0, 1e-9));
        assert!(is_within_tolerance(22.581_230_428_099_19, end.lon().0, 1e-9));
        assert!(is_within_tolerance(98.860_101_394_915_67, azimuth.0, 1e-9));
    }

    #[test]
    fn test_from_the_north_pole() {
        let (end, _) = direct(90.0, 0.0, 180.0, 1_000_000.0);
        assert!(is_within_tolerance(81.046_232_815_954_34, end.lat().0, 1e-9));
        assert!(is_within_tolerance(0.0, end.lon().0, 1e-9));
    }

    #[test]
    fn test_round_trip() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();
        let a = Coordinate::new(Degrees(38.88922), Degrees(-77.04978));
        let b = Coordinate::new(Degrees(48.85889), Degrees(2.29583));
        let curve = calculate_geodetic_curve(&a, &b, TOLERANCE, &wgs84_ellipsoid)
            .expect("inverse should converge");
        let (end, azimuth) = calculate_end_point(
            &a,
            curve.azimuth(),
            curve.ellipsoidal_distance(),
            TOLERANCE,
            &wgs84_ellipsoid,
        )
        .expect("direct should converge");
        assert!(is_within_tolerance(b.lat().0, end.lat().0, 1e-7));
        assert!(is_within_tolerance(b.lon().0, end.lon().0, 1e-7));

        // The end azimuth is opposite to the reverse azimuth
        assert!(is_within_tolerance(
            curve.reverse_azimuth().0 - 180.0,
            azimuth.0,
            1e-7
        ));
    }

    #[test]
    fn test_antipodal_round_trip() {
        let (end, azimuth) = direct(10.0, 80.0, 0.0, 20_003_931.458_623_584);
        assert!(is_within_tolerance(-10.0, end.lat().0, 1e-7));
        assert!(is_within_tolerance(-100.0, end.lon().0, 1e-7));
        assert!(is_within_tolerance(180.0, azimuth.0, 1e-7));

        let (end, _) = direct(0.0, 0.0, 15.556_882_785_718_269, 19_944_127.420_753_635);
        assert!(is_within_tolerance(0.5, end.lat().0, 1e-7));
        assert!(is_within_tolerance(179.7, end.lon().0, 1e-7));
    }

    #[test]
    fn test_non_finite_values() {
        let wgs84_ellipsoid = Ellipsoid::wgs84();
        let start = Coordinate::new(Degrees(10.0), Degrees(10.0));
        let result = calculate_end_point(
            &start,
            Degrees(45.0),
            Metres(f64::NAN),
            TOLERANCE,
            &wgs84_ellipsoid,
        );
        assert_eq!(Err(Error::NotFinite { name: "distance" }), result);

        let result = calculate_end_point(
            &start,
            Degrees(f64::NAN),
            Metres(1_000.0),
            TOLERANCE,
            &wgs84_ellipsoid,
        );
        assert_eq!(Err(Error::NotFinite { name: "azimuth" }), result);

        let result = calculate_end_point(
            &start,
            Degrees(f64::INFINITY),
            Metres(0.0),
            TOLERANCE,
            &wgs84_ellipsoid,
        );
        assert_eq!(Err(Error::NotFinite { name: "azimuth" }), result);

        let nan_start = Coordinate::new(Degrees(f64::NAN), Degrees(10.0));
        let result = calculate_end_point(
            &nan_start,
            Degrees(45.0),
            Metres(1_000.0),
            TOLERANCE,
            &wgs84_ellipsoid,
        );
        assert_eq!(Err(Error::NotFinite { name: "coordinate" }), result);
    }

    #[test]
    fn test_non_convergence() {
        // No iteration can reach a zero tolerance
        let start = Coordinate::new(Degrees(10.0), Degrees(10.0));
        let result = calculate_end_point(
            &start,
            Degrees(45.0),
            Metres(1_000_000.0),
            Radians(0.0),
            &Ellipsoid::wgs84(),
        );
        assert_eq!(
            Err(Error::NonConvergence {
                iterations: MAX_ITERATIONS
            }),
            result
        );
    }
}
