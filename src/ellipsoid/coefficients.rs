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

//! This module contains the series coefficients of Vincenty's formulae for
//! the direct and inverse geodetic problems.
//!
//! It uses the equations (3), (4), (6), (10) and (11) given by T. Vincenty in
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application
//! of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! The same series are used by both the direct and inverse solutions.

#![allow(clippy::suboptimal_flops)]

/// The coefficients of Vincenty's `A` as a polynomial in `u^2`.
/// Vincenty, Eq. 3.
const A_COEFFS: [f64; 5] = [
    1.0,
    4096.0 / 16384.0,
    -768.0 / 16384.0,
    320.0 / 16384.0,
    -175.0 / 16384.0,
];

/// The coefficients of Vincenty's `B` as a polynomial in `u^2`.
/// Vincenty, Eq. 4.
const B_COEFFS: [f64; 5] = [
    0.0,
    256.0 / 1024.0,
    -128.0 / 1024.0,
    74.0 / 1024.0,
    -47.0 / 1024.0,
];

/// The scale factor `A` between the great circle distance on the auxiliary
/// sphere and the geodesic distance on the ellipsoid.
/// Vincenty, Eq. 3.
/// * `u_sq` - `u^2`, the square of the cosine of the equatorial azimuth
///   times the square of the second eccentricity.
/// # Examples
/// ```
/// use vincenty_geodesy::ellipsoid::coefficients::evaluate_a;
///
/// assert_eq!(1.0, evaluate_a(0.0));
/// ```
#[must_use]
pub fn evaluate_a(u_sq: f64) -> f64 {
    evaluate_polynomial(&A_COEFFS, u_sq)
}

/// The coefficient `B` of the distance correction series.
/// Vincenty, Eq. 4.
/// * `u_sq` - `u^2`, see `evaluate_a`.
/// # Examples
/// ```
/// use vincenty_geodesy::ellipsoid::coefficients::evaluate_b;
///
/// assert_eq!(0.0, evaluate_b(0.0));
/// ```
#[must_use]
pub fn evaluate_b(u_sq: f64) -> f64 {
    evaluate_polynomial(&B_COEFFS, u_sq)
}

/// The coefficient `C` of the longitude correction series.
/// Vincenty, Eq. 10.
/// * `f` - the flattening of the ellipsoid.
/// * `cos_sq_alpha` - the square of the cosine of the equatorial azimuth.
#[must_use]
pub fn evaluate_c(f: f64, cos_sq_alpha: f64) -> f64 {
    f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha))
}

/// Calculate `delta sigma`, the difference between the great circle
/// distance on the auxiliary sphere and the scaled geodesic distance.
/// Vincenty, Eq. 6.
/// * `b` - the coefficient `B`.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of the great circle
///   distance on the auxiliary sphere.
/// * `cos_2sigma_m` - the cosine of twice the great circle distance from the
///   equator to the mid point of the geodesic.
#[must_use]
pub fn calculate_delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos_sq_2sigma_m = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_sq_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_sq_2sigma_m)))
}

/// Calculate the difference between the longitude difference on the
/// auxiliary sphere and the longitude difference on the ellipsoid.
/// Vincenty, Eq. 11.
/// * `f` - the flattening of the ellipsoid.
/// * `sin_alpha` - the sine of the equatorial azimuth.
/// * `cos_sq_alpha` - the square of the cosine of the equatorial azimuth.
/// * `sigma` - the great circle distance on the auxiliary sphere in radians.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of `sigma`.
/// * `cos_2sigma_m` - see `calculate_delta_sigma`.
#[must_use]
pub fn calculate_longitude_correction(
    f: f64,
    sin_alpha: f64,
    cos_sq_alpha: f64,
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sigma_m: f64,
) -> f64 {
    let c = evaluate_c(f, cos_sq_alpha);
    (1.0 - c)
        * f
        * sin_alpha
        * (sigma
            + c * sin_sigma
                * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)))
}

/// Evaluate the polynomial in x using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients, lowest order first.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .split_last()
        .map_or(0.0, |(last, elements)| {
            elements
                .iter()
                .rev()
                .fold(*last, |result, element| libm::fma(result, x, *element))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_evaluate_a_and_b() {
        // A meridional geodesic on the WGS 84 ellipsoid: cos^2 alpha = 1
        let u_sq = calculate_sq_2nd_eccentricity(wgs84::F);

        assert!(is_within_tolerance(
            1.0016827510415456,
            evaluate_a(u_sq),
            4.0 * f64::EPSILON
        ));
        assert!(is_within_tolerance(
            0.0016792186103152505,
            evaluate_b(u_sq),
            4.0 * f64::EPSILON
        ));

        // An equatorial geodesic: cos^2 alpha = 0
        assert_eq!(1.0, evaluate_a(0.0));
        assert_eq!(0.0, evaluate_b(0.0));
    }

    #[test]
    fn test_evaluate_c() {
        assert!(is_within_tolerance(
            0.0008389052498964729,
            evaluate_c(wgs84::F, 1.0),
            f64::EPSILON
        ));
        assert_eq!(0.0, evaluate_c(wgs84::F, 0.0));
        assert_eq!(0.0, evaluate_c(0.0, 1.0));
    }

    #[test]
    fn test_calculate_delta_sigma() {
        let b = evaluate_b(calculate_sq_2nd_eccentricity(wgs84::F));
        let sigma = 1.0_f64;
        let result = calculate_delta_sigma(b, libm::sin(sigma), libm::cos(sigma), libm::cos(0.5));
        assert!(is_within_tolerance(0.0012402093857660792, result, 1e-17));

        // No correction on a sphere
        assert_eq!(0.0, calculate_delta_sigma(0.0, libm::sin(sigma), libm::cos(sigma), 0.5));
    }

    #[test]
    fn test_calculate_longitude_correction() {
        // Along a meridian the equatorial azimuth is zero.
        assert_eq!(
            0.0,
            calculate_longitude_correction(wgs84::F, 0.0, 1.0, 1.0, 0.5, 0.5, 0.5)
        );

        // Along the equator the correction is f * sigma.
        let sigma = core::f64::consts::FRAC_PI_2;
        let result = calculate_longitude_correction(wgs84::F, 1.0, 0.0, sigma, 1.0, 0.0, 0.0);
        assert!(is_within_tolerance(wgs84::F * sigma, result, f64::EPSILON));
    }

    #[test]
    fn test_evaluate_polynomial() {
        let coeffs = [1.0, 2.0, 3.0];
        assert_eq!(1.0, evaluate_polynomial(&coeffs, 0.0));
        assert_eq!(6.0, evaluate_polynomial(&coeffs, 1.0));
        assert_eq!(17.0, evaluate_polynomial(&coeffs, 2.0));

        assert_eq!(5.0, evaluate_polynomial(&[5.0], 3.0));

        let empty: &[f64] = &[];
        assert_eq!(0.0, evaluate_polynomial(empty, 2.0));
    }
}
