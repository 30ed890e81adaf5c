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

//! The curve module contains the results of the geodetic calculations.
//!
//! A `GeodeticCurve` is the solution of the inverse problem on the surface of
//! the ellipsoid. A `GeodeticMeasurement` adds the change in elevation
//! between a pair of `Position`s.

use crate::{Degrees, Metres};
use core::fmt;

/// The ellipsoidal distance and azimuths of the geodesic between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticCurve {
    /// The geodesic distance on the ellipsoid.
    ellipsoidal_distance: Metres,
    /// The azimuth at the start point, clockwise from North.
    azimuth: Degrees,
    /// The azimuth from the end point back to the start point.
    reverse_azimuth: Degrees,
}

impl GeodeticCurve {
    /// Constructor.
    /// * `ellipsoidal_distance` - the geodesic distance on the ellipsoid.
    /// * `azimuth` - the azimuth at the start point.
    /// * `reverse_azimuth` - the azimuth from the end point to the start point.
    #[must_use]
    pub const fn new(ellipsoidal_distance: Metres, azimuth: Degrees, reverse_azimuth: Degrees) -> Self {
        Self {
            ellipsoidal_distance,
            azimuth,
            reverse_azimuth,
        }
    }

    /// The geodesic distance on the ellipsoid.
    #[must_use]
    pub const fn ellipsoidal_distance(&self) -> Metres {
        self.ellipsoidal_distance
    }

    /// The azimuth at the start point, in the range [0, 360).
    #[must_use]
    pub const fn azimuth(&self) -> Degrees {
        self.azimuth
    }

    /// The azimuth from the end point back to the start point,
    /// in the range [0, 360).
    #[must_use]
    pub const fn reverse_azimuth(&self) -> Degrees {
        self.reverse_azimuth
    }
}

impl fmt::Display for GeodeticCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s={};a12={};a21={};",
            self.ellipsoidal_distance.0, self.azimuth.0, self.reverse_azimuth.0
        )
    }
}

/// A `GeodeticCurve` combined with the elevation change between its ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticMeasurement {
    curve: GeodeticCurve,
    /// The elevation change going from the start to the end point.
    elevation_change: Metres,
    /// The straight line distance between the start and end points.
    point_to_point_distance: Metres,
}

impl GeodeticMeasurement {
    /// Constructor.
    /// * `curve` - the geodetic curve between the points.
    /// * `elevation_change` - the elevation change from the start to the end point.
    /// # Examples
    /// ```
    /// use vincenty_geodesy::{Degrees, GeodeticCurve, GeodeticMeasurement, Metres};
    ///
    /// let curve = GeodeticCurve::new(Metres(400.0), Degrees(90.0), Degrees(270.0));
    /// let measurement = GeodeticMeasurement::new(curve, Metres(300.0));
    /// assert_eq!(Metres(500.0), measurement.point_to_point_distance());
    /// ```
    #[must_use]
    pub fn new(curve: GeodeticCurve, elevation_change: Metres) -> Self {
        let point_to_point_distance =
            Metres(libm::hypot(curve.ellipsoidal_distance.0, elevation_change.0));
        Self {
            curve,
            elevation_change,
            point_to_point_distance,
        }
    }

    /// The geodetic curve at the mean elevation of the points.
    #[must_use]
    pub const fn curve(&self) -> &GeodeticCurve {
        &self.curve
    }

    /// The geodesic distance at the mean elevation of the points.
    #[must_use]
    pub const fn ellipsoidal_distance(&self) -> Metres {
        self.curve.ellipsoidal_distance
    }

    /// The azimuth of the curve at the start point.
    #[must_use]
    pub const fn azimuth(&self) -> Degrees {
        self.curve.azimuth
    }

    /// The azimuth of the curve from the end point back to the start point.
    #[must_use]
    pub const fn reverse_azimuth(&self) -> Degrees {
        self.curve.reverse_azimuth
    }

    /// The elevation change going from the start to the end point.
    #[must_use]
    pub const fn elevation_change(&self) -> Metres {
        self.elevation_change
    }

    /// The distance travelled going from the start to the end point,
    /// `sqrt(s^2 + dh^2)`.
    #[must_use]
    pub const fn point_to_point_distance(&self) -> Metres {
        self.point_to_point_distance
    }
}

impl fmt::Display for GeodeticMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}elev12={};p2p={}",
            self.curve, self.elevation_change.0, self.point_to_point_distance.0
        )
    }
}
