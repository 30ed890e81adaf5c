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

//! The measurement module combines the solution of the inverse geodetic
//! problem with the elevations of a pair of positions.
//!
//! The geodesic is calculated on an ellipsoid raised to the mean elevation
//! of the positions. The point to point distance is the hypotenuse of the
//! geodesic distance and the elevation change.

use crate::coordinate::Position;
use crate::curve::GeodeticMeasurement;
use crate::error::{Error, Result};
use crate::geodesic::calculate_geodetic_curve;
use crate::{to_radians, Degrees, Ellipsoid, Metres, Radians};

/// Raise an `Ellipsoid` to an elevation at a latitude.
/// * `ellipsoid` - the reference `Ellipsoid`.
/// * `elevation` - the elevation above the reference `Ellipsoid`.
/// * `lat` - the latitude of the elevation.
///
/// returns an `Ellipsoid` with the same flattening and a Semimajor axis
/// increased by the elevation.
///
/// # Errors
///
/// `Error::InvalidEllipsoid` if the elevation reduces the Semimajor axis
/// to zero or less.
pub fn calculate_elevated_ellipsoid(
    ellipsoid: &Ellipsoid,
    elevation: Metres,
    lat: Degrees,
) -> Result<Ellipsoid> {
    let sin_lat = libm::sin(to_radians(lat).0);
    let a = ellipsoid.a().0 + elevation.0 * (1.0 + ellipsoid.f() * sin_lat);
    Ellipsoid::new(Metres(a), ellipsoid.f())
}

/// Calculate the `GeodeticMeasurement` between a pair of positions.
/// * `start`, `end` - the start and end positions.
/// * `tolerance` - the tolerance of the longitude difference on the auxiliary sphere.
/// * `ellipsoid` - the reference `Ellipsoid`.
///
/// returns the `GeodeticCurve` at the mean elevation of the positions, the
/// elevation change from `start` to `end` and the point to point distance.
///
/// # Errors
///
/// `Error::NotFinite` if a position is not finite,
/// `Error::InvalidEllipsoid` if the mean elevation is below the centre of
/// the `Ellipsoid`, `Error::NonConvergence` if the inverse problem could not
/// be solved.
///
/// # Examples
/// ```
/// use vincenty_geodesy::geodesic::TOLERANCE;
/// use vincenty_geodesy::measurement::calculate_geodetic_measurement;
/// use vincenty_geodesy::{Degrees, Metres, Position, WGS84_ELLIPSOID};
///
/// let pikes_peak = Position::new(Degrees(38.840_511), Degrees(-105.044_589_6), Metres(4301.0));
/// let alcatraz = Position::new(Degrees(37.826_389), Degrees(-122.4225), Metres(0.0));
/// let measurement =
///     calculate_geodetic_measurement(&pikes_peak, &alcatraz, TOLERANCE, &WGS84_ELLIPSOID).unwrap();
/// assert_eq!(Metres(-4301.0), measurement.elevation_change());
/// assert!(measurement.ellipsoidal_distance().0 < measurement.point_to_point_distance().0);
/// ```
pub fn calculate_geodetic_measurement(
    start: &Position,
    end: &Position,
    tolerance: Radians,
    ellipsoid: &Ellipsoid,
) -> Result<GeodeticMeasurement> {
    if !start.is_finite() || !end.is_finite() {
        return Err(Error::NotFinite { name: "position" });
    }

    let mean_elevation = Metres(0.5 * (start.elevation().0 + end.elevation().0));
    let mean_lat = Degrees(0.5 * (start.lat().0 + end.lat().0));
    let elevated = calculate_elevated_ellipsoid(ellipsoid, mean_elevation, mean_lat)?;

    let curve = calculate_geodetic_curve(start.coordinate(), end.coordinate(), tolerance, &elevated)?;
    Ok(GeodeticMeasurement::new(
        curve,
        Metres(end.elevation().0 - start.elevation().0),
    ))
}
