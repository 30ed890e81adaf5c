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

//! The geodesic module contains functions for solving the inverse geodetic
//! problem: the distance and azimuths of the geodesic between a pair of
//! points on the surface of an ellipsoid.
//!
//! It uses T. Vincenty's iterative solution on the auxiliary sphere, see
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application
//! of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! Vincenty's fixed point iteration for the longitude difference on the
//! auxiliary sphere oscillates or diverges for nearly antipodal points.
//! When it fails to converge within `MAX_ITERATIONS`, the azimuth at the
//! start point is found by bisection instead: the longitude difference
//! reached at the latitude of the finish point increases monotonically
//! with the start azimuth, see C. F. F. Karney,
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf), Section 4.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

use crate::coordinate::Coordinate;
use crate::curve::GeodeticCurve;
use crate::ellipsoid::coefficients::{
    calculate_delta_sigma, calculate_longitude_correction, evaluate_a, evaluate_b,
};
use crate::error::{Error, Result};
use crate::{to_degrees, to_radians, Ellipsoid, Metres};
use angle_sc::{Angle, Degrees, Radians};
use core::f64::consts::{PI, TAU};

/// The default convergence tolerance of the iterations, in radians.
pub const TOLERANCE: Radians = Radians(1e-12);

/// The maximum number of Vincenty iterations before resorting to bisection.
pub const MAX_ITERATIONS: u32 = 200;

/// The maximum number of bisection iterations.
pub const MAX_BISECTIONS: u32 = 100;

/// The square of the sine of the great circle distance below which the
/// azimuth at the Equator is undefined, i.e. coincident or antipodal points.
pub const MIN_SIN_SQ_SIGMA: f64 = 1e-24;

/// Convert an azimuth in radians to degrees, clockwise from North.
/// * `azimuth` - the azimuth in the range [-2π, 2π].
///
/// returns the azimuth in the range [0, 360).
/// # Examples
/// ```
/// use vincenty_geodesy::geodesic::calculate_azimuth_degrees;
/// use vincenty_geodesy::Radians;
///
/// let west = calculate_azimuth_degrees(Radians(-core::f64::consts::FRAC_PI_2));
/// assert_eq!(270.0, west.0);
/// ```
#[must_use]
pub fn calculate_azimuth_degrees(azimuth: Radians) -> Degrees {
    let radians = if azimuth.0 < 0.0 {
        azimuth.0 + TAU
    } else {
        azimuth.0
    };
    let degrees = to_degrees(Radians(radians)).0;
    Degrees(if 360.0 <= degrees { degrees - 360.0 } else { degrees } + 0.0)
}

/// The terms of Vincenty's inverse solution at a longitude difference on
/// the auxiliary sphere.
#[derive(Clone, Copy, Debug)]
struct AuxiliaryTerms {
    /// The longitude difference on the auxiliary sphere that these terms imply.
    lambda: f64,
    /// The great circle distance on the auxiliary sphere.
    sigma: f64,
    sin_sq_sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    /// The square of the cosine of the azimuth at the Equator.
    cos_sq_alpha: f64,
    /// The cosine of twice the distance from the Equator to the mid point.
    cos_2sigma_m: f64,
}

/// A pair of points projected onto the auxiliary sphere.
#[derive(Clone, Copy, Debug)]
struct InverseProblem<'a> {
    sin_u1: f64,
    cos_u1: f64,
    sin_u2: f64,
    cos_u2: f64,
    /// The longitude difference on the ellipsoid, in radians.
    l: f64,
    ellipsoid: &'a Ellipsoid,
}

impl<'a> InverseProblem<'a> {
    fn new(a: &Coordinate, b: &Coordinate, ellipsoid: &'a Ellipsoid) -> Self {
        let beta1 = ellipsoid.calculate_parametric_latitude(Angle::from(a.lat()));
        let beta2 = ellipsoid.calculate_parametric_latitude(Angle::from(b.lat()));
        Self {
            sin_u1: beta1.sin().0,
            cos_u1: beta1.cos().0,
            sin_u2: beta2.sin().0,
            cos_u2: beta2.cos().0,
            l: to_radians(b.lon()).0 - to_radians(a.lon()).0,
            ellipsoid,
        }
    }

    /// Evaluate Vincenty's equations 14 to 18 and 11 at `lambda`.
    fn evaluate(&self, lambda: f64) -> AuxiliaryTerms {
        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);

        let y = self.cos_u2 * sin_lambda;
        let x = self.cos_u1 * self.sin_u2 - self.sin_u1 * self.cos_u2 * cos_lambda;
        let sin_sq_sigma = y * y + x * x;
        let sin_sigma = libm::sqrt(sin_sq_sigma);
        let cos_sigma = self.sin_u1 * self.sin_u2 + self.cos_u1 * self.cos_u2 * cos_lambda;
        let sigma = libm::atan2(sin_sigma, cos_sigma);

        let sin_alpha = if sin_sq_sigma < MIN_SIN_SQ_SIGMA {
            0.0
        } else {
            (self.cos_u1 * self.cos_u2 * sin_lambda / sin_sigma).clamp(-1.0, 1.0)
        };
        let cos_sq_alpha = (1.0 - sin_alpha) * (1.0 + sin_alpha);

        // Both points on the Equator
        let cos_2sigma_m = if cos_sq_alpha <= 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * self.sin_u1 * self.sin_u2 / cos_sq_alpha
        };

        AuxiliaryTerms {
            lambda: self.l
                + calculate_longitude_correction(
                    self.ellipsoid.f(),
                    sin_alpha,
                    cos_sq_alpha,
                    sigma,
                    sin_sigma,
                    cos_sigma,
                    cos_2sigma_m,
                ),
            sigma,
            sin_sq_sigma,
            sin_sigma,
            cos_sigma,
            cos_sq_alpha,
            cos_2sigma_m,
        }
    }

    /// Vincenty's fixed point iteration for the longitude difference on the
    /// auxiliary sphere, starting from the longitude difference on the ellipsoid.
    ///
    /// returns the longitude difference and the terms of the last evaluation,
    /// or None if it did not converge within `MAX_ITERATIONS`.
    fn iterate(&self, tolerance: Radians) -> Option<(f64, AuxiliaryTerms)> {
        let mut lambda = self.l;
        for _ in 0..MAX_ITERATIONS {
            let terms = self.evaluate(lambda);
            let delta = libm::fabs(terms.lambda - lambda);
            lambda = terms.lambda;
            if delta < tolerance.0 {
                return Some((lambda, terms));
            }
        }
        None
    }

    /// The geodesic distance, Vincenty Eqs. 3, 4, 6 and 19.
    fn distance(&self, terms: &AuxiliaryTerms) -> Metres {
        let u_sq = terms.cos_sq_alpha * self.ellipsoid.ep_2();
        let a = evaluate_a(u_sq);
        let b = evaluate_b(u_sq);
        let delta_sigma =
            calculate_delta_sigma(b, terms.sin_sigma, terms.cos_sigma, terms.cos_2sigma_m);
        Metres(self.ellipsoid.b().0 * a * (terms.sigma - delta_sigma))
    }

    /// The forward and reverse azimuths, Vincenty Eqs. 20 and 21.
    fn azimuths(&self, lambda: f64, terms: &AuxiliaryTerms) -> (Degrees, Degrees) {
        // Antipodal points are joined by a meridian, take the one over the North pole
        if terms.sin_sq_sigma < MIN_SIN_SQ_SIGMA && terms.cos_sigma < 0.0 {
            return (Degrees(0.0), Degrees(0.0));
        }

        let sin_lambda = libm::sin(lambda);
        let cos_lambda = libm::cos(lambda);
        let alpha1 = libm::atan2(
            self.cos_u2 * sin_lambda,
            self.cos_u1 * self.sin_u2 - self.sin_u1 * self.cos_u2 * cos_lambda,
        );
        let alpha2 = libm::atan2(
            self.cos_u1 * sin_lambda,
            self.cos_u1 * self.sin_u2 * cos_lambda - self.sin_u1 * self.cos_u2,
        ) + PI;

        (
            calculate_azimuth_degrees(Radians(alpha1)),
            calculate_azimuth_degrees(Radians(alpha2)),
        )
    }
}

/// The terms of a geodesic from the first point of an `AntipodalProblem`
/// to the latitude of its second point.
#[derive(Clone, Copy, Debug)]
struct ClairautTerms {
    /// The longitude difference on the ellipsoid.
    lambda: f64,
    /// The great circle distance on the auxiliary sphere.
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    /// The cosine of twice the distance from the Equator to the mid point.
    cos_2sigma_m: f64,
    /// The sine of the azimuth at the Equator, Clairaut's constant.
    sin_alpha0: f64,
    cos_sq_alpha0: f64,
    /// The cosine of the azimuth at the second point times the cosine of
    /// its parametric latitude.
    cos_alpha2_cos_beta2: f64,
}

/// A pair of nearly antipodal points on the auxiliary sphere, in a standard
/// orientation: the first point is South of the Equator and at least as far
/// from it as the second point, which is East of the first point.
#[derive(Clone, Copy, Debug)]
struct AntipodalProblem<'a> {
    sin_beta1: f64,
    cos_beta1: f64,
    sin_beta2: f64,
    cos_beta2: f64,
    /// The longitude difference on the ellipsoid, in the range [0, π].
    l: f64,
    /// The points were swapped.
    swapped: bool,
    /// The latitudes were reflected in the Equator.
    mirrored: bool,
    /// The longitude difference was negated.
    reversed: bool,
    /// Both points are on the Equator.
    equatorial: bool,
    ellipsoid: &'a Ellipsoid,
}

impl<'a> AntipodalProblem<'a> {
    fn new(a: &Coordinate, b: &Coordinate, ellipsoid: &'a Ellipsoid) -> Self {
        // Start at the latitude furthest from the Equator
        let swapped = libm::fabs(a.lat().0) < libm::fabs(b.lat().0);
        let (first, second) = if swapped { (b, a) } else { (a, b) };

        // Start South of the Equator
        let mirrored = 0.0 < first.lat().0;
        let sign = if mirrored { -1.0 } else { 1.0 };
        let beta1 = ellipsoid.calculate_parametric_latitude(Angle::from(Degrees(sign * first.lat().0)));
        let beta2 =
            ellipsoid.calculate_parametric_latitude(Angle::from(Degrees(sign * second.lat().0)));

        // Use a positive longitude difference, so all azimuths are positive
        let l = libm::remainder(to_radians(second.lon()).0 - to_radians(first.lon()).0, TAU);
        Self {
            // -0.0 on the Equator, so that a southbound start is at -π
            sin_beta1: -libm::fabs(beta1.sin().0),
            cos_beta1: beta1.cos().0,
            sin_beta2: beta2.sin().0,
            cos_beta2: beta2.cos().0,
            l: libm::fabs(l),
            swapped,
            mirrored,
            reversed: l < 0.0,
            equatorial: first.lat().0 == 0.0,
            ellipsoid,
        }
    }

    /// Follow the geodesic from the first point along `alpha1` to where it
    /// next crosses the latitude of the second point northbound.
    /// * `alpha1` - the azimuth at the first point in the range [0, π].
    fn evaluate(&self, alpha1: f64) -> ClairautTerms {
        let sin_alpha1 = libm::sin(alpha1);
        let cos_alpha1 = libm::cos(alpha1);

        let sin_alpha0 = sin_alpha1 * self.cos_beta1;
        let cos_sq_alpha0 = (1.0 - sin_alpha0) * (1.0 + sin_alpha0);

        // Clairaut's relation, Karney Eq. 45
        let cos_alpha2_cos_beta2 = if self.cos_beta2 == self.cos_beta1 {
            libm::fabs(cos_alpha1) * self.cos_beta1
        } else {
            let delta = if self.cos_beta1 < -self.sin_beta1 {
                (self.cos_beta2 - self.cos_beta1) * (self.cos_beta1 + self.cos_beta2)
            } else {
                (self.sin_beta1 - self.sin_beta2) * (self.sin_beta1 + self.sin_beta2)
            };
            let x = cos_alpha1 * self.cos_beta1;
            libm::sqrt((x * x + delta).max(0.0))
        };

        let sigma1 = libm::atan2(self.sin_beta1, cos_alpha1 * self.cos_beta1);
        let sigma2 = libm::atan2(self.sin_beta2, cos_alpha2_cos_beta2);
        let omega1 = libm::atan2(sin_alpha0 * libm::sin(sigma1), libm::cos(sigma1));
        let omega2 = libm::atan2(sin_alpha0 * libm::sin(sigma2), libm::cos(sigma2));

        let sigma = sigma2 - sigma1;
        let sin_sigma = libm::sin(sigma);
        let cos_sigma = libm::cos(sigma);
        let cos_2sigma_m = libm::cos(sigma1 + sigma2);

        ClairautTerms {
            lambda: omega2
                - omega1
                - calculate_longitude_correction(
                    self.ellipsoid.f(),
                    sin_alpha0,
                    cos_sq_alpha0,
                    sigma,
                    sin_sigma,
                    cos_sigma,
                    cos_2sigma_m,
                ),
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
            sin_alpha0,
            cos_sq_alpha0,
            cos_alpha2_cos_beta2,
        }
    }

    /// Find the azimuth at the first point by bisection of [0, π].
    ///
    /// The longitude difference is zero for a northbound start and π for a
    /// southbound start, so it reaches `l` in between.
    fn bisect(&self, tolerance: Radians) -> Result<(f64, ClairautTerms)> {
        let (mut lower, mut upper) = (0.0, PI);
        for i in 0..MAX_BISECTIONS {
            let alpha1 = 0.5 * (lower + upper);
            let terms = self.evaluate(alpha1);
            if upper - lower < tolerance.0 {
                log::trace!("bisection converged after {i} iterations");
                return Ok((alpha1, terms));
            }

            if !terms.lambda.is_finite() {
                return Err(Error::NonConvergence {
                    iterations: MAX_ITERATIONS + i + 1,
                });
            }
            if terms.lambda < self.l {
                lower = alpha1;
            } else {
                upper = alpha1;
            }
        }

        Err(Error::NonConvergence {
            iterations: MAX_ITERATIONS + MAX_BISECTIONS,
        })
    }

    /// The `GeodeticCurve` of the geodesic along `alpha1`, in the original
    /// orientation of the points.
    fn curve(&self, alpha1: f64, terms: &ClairautTerms) -> GeodeticCurve {
        let u_sq = terms.cos_sq_alpha0 * self.ellipsoid.ep_2();
        let a = evaluate_a(u_sq);
        let b = evaluate_b(u_sq);
        let delta_sigma =
            calculate_delta_sigma(b, terms.sin_sigma, terms.cos_sigma, terms.cos_2sigma_m);
        let distance = Metres(self.ellipsoid.b().0 * a * (terms.sigma - delta_sigma));

        // The sines and cosines of the azimuths at the first and second points
        let mut start = (libm::sin(alpha1), libm::cos(alpha1));
        let mut end = (terms.sin_alpha0, terms.cos_alpha2_cos_beta2);
        if self.reversed {
            start.0 = -start.0;
            end.0 = -end.0;
        }
        // Take the Northern route between points on the Equator
        if self.mirrored != self.equatorial {
            start.1 = -start.1;
            end.1 = -end.1;
        }
        let (start, end) = if self.swapped {
            ((-end.0, -end.1), (-start.0, -start.1))
        } else {
            (start, end)
        };

        GeodeticCurve::new(
            distance,
            calculate_azimuth_degrees(Radians(libm::atan2(start.0, start.1))),
            calculate_azimuth_degrees(Radians(libm::atan2(-end.0, -end.1))),
        )
    }
}

/// Calculate the `GeodeticCurve` between a pair of coordinates: the solution
/// of the inverse geodetic problem.
/// * `a`, `b` - the start and finish coordinates.
/// * `tolerance` - the convergence tolerance, in radians.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the geodesic distance and the azimuths at the start and finish
/// points.
///
/// # Errors
///
/// `Error::NotFinite` if a coordinate is not finite,
/// `Error::NonConvergence` if neither Vincenty's iteration nor the bisection
/// converged.
pub fn calculate_geodetic_curve(
    a: &Coordinate,
    b: &Coordinate,
    tolerance: Radians,
    ellipsoid: &Ellipsoid,
) -> Result<GeodeticCurve> {
    if !a.is_finite() || !b.is_finite() {
        return Err(Error::NotFinite { name: "coordinate" });
    }
    if a == b {
        return Ok(GeodeticCurve::new(Metres(0.0), Degrees(0.0), Degrees(0.0)));
    }

    let problem = InverseProblem::new(a, b, ellipsoid);
    if let Some((lambda, terms)) = problem.iterate(tolerance) {
        let (azimuth, reverse_azimuth) = problem.azimuths(lambda, &terms);
        return Ok(GeodeticCurve::new(
            problem.distance(&terms),
            azimuth,
            reverse_azimuth,
        ));
    }

    log::debug!("Vincenty iteration did not converge from {a} to {b}, using bisection");
    let problem = AntipodalProblem::new(a, b, ellipsoid);
    let (alpha1, terms) = problem.bisect(tolerance)?;
    Ok(problem.curve(alpha1, &terms))
}
