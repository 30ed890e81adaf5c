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

//! The coordinate module contains the `Coordinate` and `Position` value types.
//!
//! A `Coordinate` is a geodetic latitude and longitude in degrees. The values
//! are canonicalized on construction, such that:
//!
//! - -90° <= latitude <= 90°
//! - -180° < longitude <= 180°
//!
//! A latitude beyond a pole is mirrored back across the pole, which also
//! moves the longitude by 180°.
//!
//! A `Position` is a `Coordinate` with an elevation above the ellipsoid.

use crate::Metres;
use angle_sc::{Degrees, Validate};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// Canonicalize a latitude and longitude pair.
/// * `lat` - the latitude.
/// * `lon` - the longitude.
///
/// returns the latitude in the range [-90, 90] and the longitude in the
/// range (-180, 180].
///
/// Values already in range are returned unchanged, so canonicalization is
/// idempotent.
/// # Examples
/// ```
/// use vincenty_geodesy::Degrees;
/// use vincenty_geodesy::coordinate::canonicalize;
///
/// // 20 degrees beyond the North pole
/// let (lat, lon) = canonicalize(Degrees(110.0), Degrees(10.0));
/// assert_eq!(70.0, lat.0);
/// assert_eq!(-170.0, lon.0);
/// ```
#[must_use]
pub fn canonicalize(lat: Degrees, lon: Degrees) -> (Degrees, Degrees) {
    let mut latitude = lat.0;
    let mut longitude = lon.0;

    if !(-90.0..=90.0).contains(&latitude) {
        latitude = libm::fmod(latitude + 180.0, 360.0);
        if latitude < 0.0 {
            latitude += 360.0;
        }
        latitude -= 180.0;

        if 90.0 < latitude {
            latitude = 180.0 - latitude;
            longitude += 180.0;
        } else if latitude < -90.0 {
            latitude = -180.0 - latitude;
            longitude += 180.0;
        }
    }

    if !(-180.0 < longitude && longitude <= 180.0) {
        longitude = libm::fmod(longitude + 180.0, 360.0);
        if longitude <= 0.0 {
            longitude += 360.0;
        }
        longitude -= 180.0;
    }

    // Adding zero converts -0.0 to 0.0
    (Degrees(latitude + 0.0), Degrees(longitude + 0.0))
}

/// A geodetic latitude and longitude.
#[derive(Clone, Copy, Debug)]
pub struct Coordinate {
    lat: Degrees,
    lon: Degrees,
}

impl Validate for Coordinate {
    /// Test whether a `Coordinate` is valid.
    /// Whether -90° <= `lat` <= 90° and -180° < `lon` <= 180°.
    fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat.0) && -180.0 < self.lon.0 && self.lon.0 <= 180.0
    }
}

impl Coordinate {
    /// Construct a `Coordinate`, canonicalizing the latitude and longitude.
    /// * `lat` - the latitude in degrees.
    /// * `lon` - the longitude in degrees.
    #[must_use]
    pub fn new(lat: Degrees, lon: Degrees) -> Self {
        let (lat, lon) = canonicalize(lat, lon);
        Self { lat, lon }
    }

    /// The latitude, negative in the Southern hemisphere.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.lat
    }

    /// The longitude, negative in the Western hemisphere.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.lon
    }

    /// Whether both the latitude and longitude are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.0.is_finite() && self.lon.0.is_finite()
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coordinate {}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    /// Western longitudes are less than Eastern longitudes.
    /// If the longitudes are equal, Southern latitudes are less than
    /// Northern latitudes.
    fn cmp(&self, other: &Self) -> Ordering {
        self.lon
            .0
            .total_cmp(&other.lon.0)
            .then_with(|| self.lat.0.total_cmp(&other.lat.0))
    }
}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.0.to_bits().hash(state);
        self.lon.0.to_bits().hash(state);
    }
}

impl fmt::Display for Coordinate {
    /// E.g. `38.88922N;77.04978W;`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if 0.0 <= self.lat.0 { 'N' } else { 'S' };
        let ew = if 0.0 <= self.lon.0 { 'E' } else { 'W' };
        write!(
            f,
            "{}{};{}{};",
            libm::fabs(self.lat.0),
            ns,
            libm::fabs(self.lon.0),
            ew
        )
    }
}

/// A `Coordinate` with an elevation above the surface of the ellipsoid.
#[derive(Clone, Copy, Debug)]
pub struct Position {
    coordinate: Coordinate,
    elevation: Metres,
}

impl Position {
    /// Construct a `Position`, canonicalizing the latitude and longitude.
    /// * `lat` - the latitude in degrees.
    /// * `lon` - the longitude in degrees.
    /// * `elevation` - the elevation above the ellipsoid, may be negative.
    #[must_use]
    pub fn new(lat: Degrees, lon: Degrees, elevation: Metres) -> Self {
        Self::from_coordinate(Coordinate::new(lat, lon), elevation)
    }

    /// Construct a `Position` from a `Coordinate` and an elevation.
    #[must_use]
    pub fn from_coordinate(coordinate: Coordinate, elevation: Metres) -> Self {
        Self {
            coordinate,
            elevation: Metres(elevation.0 + 0.0),
        }
    }

    /// The latitude and longitude.
    #[must_use]
    pub const fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// The latitude of the coordinate.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.coordinate.lat
    }

    /// The longitude of the coordinate.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.coordinate.lon
    }

    /// The elevation above the ellipsoid.
    #[must_use]
    pub const fn elevation(&self) -> Metres {
        self.elevation
    }

    /// Whether the coordinate and the elevation are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.coordinate.is_finite() && self.elevation.0.is_finite()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    /// As `Coordinate`, then lower elevations are less than higher elevations.
    fn cmp(&self, other: &Self) -> Ordering {
        self.coordinate
            .cmp(&other.coordinate)
            .then_with(|| self.elevation.0.total_cmp(&other.elevation.0))
    }
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
        self.elevation.0.to_bits().hash(state);
    }
}

impl fmt::Display for Position {
    /// E.g. `38.840511N;105.0445896W;elevation=4301m`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}elevation={}m", self.coordinate, self.elevation.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canonicalize_in_range() {
        let (lat, lon) = canonicalize(Degrees(38.88922), Degrees(-77.04978));
        assert_eq!(38.88922, lat.0);
        assert_eq!(-77.04978, lon.0);

        let (lat, lon) = canonicalize(Degrees(-90.0), Degrees(180.0));
        assert_eq!(-90.0, lat.0);
        assert_eq!(180.0, lon.0);

        // Negative zero
        let (lat, lon) = canonicalize(Degrees(-0.0), Degrees(-0.0));
        assert!(lat.0.is_sign_positive());
        assert!(lon.0.is_sign_positive());
    }

    #[test]
    fn test_canonicalize_longitude() {
        assert_eq!(180.0, canonicalize(Degrees(0.0), Degrees(-180.0)).1 .0);
        assert_eq!(180.0, canonicalize(Degrees(0.0), Degrees(540.0)).1 .0);
        assert_eq!(-170.0, canonicalize(Degrees(0.0), Degrees(190.0)).1 .0);
        assert_eq!(10.0, canonicalize(Degrees(0.0), Degrees(-350.0)).1 .0);
        assert_eq!(0.0, canonicalize(Degrees(0.0), Degrees(720.0)).1 .0);
    }

    #[test]
    fn test_canonicalize_latitude() {
        // Over the North pole
        let (lat, lon) = canonicalize(Degrees(95.0), Degrees(10.0));
        assert_eq!(85.0, lat.0);
        assert_eq!(-170.0, lon.0);

        // Over the South pole
        let (lat, lon) = canonicalize(Degrees(-95.0), Degrees(-170.0));
        assert_eq!(-85.0, lat.0);
        assert_eq!(10.0, lon.0);

        // Over both poles
        let (lat, lon) = canonicalize(Degrees(200.0), Degrees(10.0));
        assert_eq!(-20.0, lat.0);
        assert_eq!(-170.0, lon.0);

        // A full turn
        let (lat, lon) = canonicalize(Degrees(360.0), Degrees(10.0));
        assert_eq!(0.0, lat.0);
        assert_eq!(10.0, lon.0);

        let (lat, lon) = canonicalize(Degrees(-400.0), Degrees(0.0));
        assert_eq!(-40.0, lat.0);
        assert_eq!(0.0, lon.0);
    }

    #[test]
    fn test_canonicalize_idempotent() {
        for i in -12..=12 {
            for j in -12..=12 {
                let lat = Degrees(f64::from(i) * 33.3);
                let lon = Degrees(f64::from(j) * 47.7);
                let a = Coordinate::new(lat, lon);
                assert!(a.is_valid());

                let b = Coordinate::new(a.lat(), a.lon());
                assert_eq!(a, b);
                assert_eq!(a.lat().0.to_bits(), b.lat().0.to_bits());
                assert_eq!(a.lon().0.to_bits(), b.lon().0.to_bits());
            }
        }
    }

    #[test]
    fn test_coordinate_traits() {
        let a = Coordinate::new(Degrees(10.0), Degrees(20.0));
        let b = Coordinate::new(Degrees(170.0), Degrees(-160.0));
        assert_eq!(a, b);

        // Longitude first, then latitude
        let west = Coordinate::new(Degrees(50.0), Degrees(-1.0));
        let east = Coordinate::new(Degrees(-50.0), Degrees(1.0));
        assert!(west < east);

        let south = Coordinate::new(Degrees(-50.0), Degrees(1.0));
        let north = Coordinate::new(Degrees(50.0), Degrees(1.0));
        assert!(south < north);
        assert_eq!(Ordering::Equal, south.cmp(&east));

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(Coordinate::new(Degrees(0.0), Degrees(0.0)));
        set.insert(Coordinate::new(Degrees(-0.0), Degrees(-360.0)));
        assert_eq!(2, set.len());
    }

    #[test]
    fn test_coordinate_display() {
        let lincoln_memorial = Coordinate::new(Degrees(38.88922), Degrees(-77.04978));
        assert_eq!("38.88922N;77.04978W;", lincoln_memorial.to_string());

        let south_east = Coordinate::new(Degrees(-33.5), Degrees(151.25));
        assert_eq!("33.5S;151.25E;", south_east.to_string());
    }

    #[test]
    fn test_position() {
        let pikes_peak = Position::new(Degrees(38.840511), Degrees(-105.0445896), Metres(4301.0));
        assert_eq!(38.840511, pikes_peak.lat().0);
        assert_eq!(-105.0445896, pikes_peak.lon().0);
        assert_eq!(Metres(4301.0), pikes_peak.elevation());
        assert_eq!(
            "38.840511N;105.0445896W;elevation=4301m",
            pikes_peak.to_string()
        );

        let base = Position::from_coordinate(*pikes_peak.coordinate(), Metres(0.0));
        assert!(base < pikes_peak);
        assert_ne!(base, pikes_peak);
        assert_eq!(base.coordinate(), pikes_peak.coordinate());

        let below = Position::from_coordinate(*pikes_peak.coordinate(), Metres(-0.0));
        assert_eq!(base, below);
    }

    #[test]
    fn test_is_finite() {
        assert!(Coordinate::new(Degrees(90.0), Degrees(-180.0)).is_finite());
        assert!(!Coordinate::new(Degrees(f64::NAN), Degrees(0.0)).is_finite());
        assert!(!Coordinate::new(Degrees(0.0), Degrees(f64::INFINITY)).is_finite());

        // A NaN coordinate equals itself, so equality cannot detect it
        let nan = Coordinate::new(Degrees(f64::NAN), Degrees(f64::NAN));
        assert_eq!(nan, nan);
        assert!(!nan.is_finite());

        assert!(Position::new(Degrees(10.0), Degrees(10.0), Metres(-100.0)).is_finite());
        assert!(!Position::new(Degrees(10.0), Degrees(10.0), Metres(f64::NAN)).is_finite());
        assert!(!Position::new(Degrees(f64::NAN), Degrees(10.0), Metres(0.0)).is_finite());
    }
}
