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

//! The error module contains the errors reported by the library.

use thiserror::Error;

/// The errors that may occur when constructing an `Ellipsoid` or solving
/// a geodetic problem.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// The Semimajor axis is not positive or the flattening is outside [0, 1).
    #[error("invalid ellipsoid: semimajor axis {a} m, flattening {f}")]
    InvalidEllipsoid { a: f64, f: f64 },

    /// A coordinate, azimuth, distance or elevation is NaN or infinite.
    #[error("{name} is not finite")]
    NotFinite { name: &'static str },

    /// The iteration did not reach the required tolerance.
    /// `iterations` is the number of iterations performed.
    #[error("geodesic calculation failed to converge after {iterations} iterations")]
    NonConvergence { iterations: u32 },
}

/// The `Result` of a geodetic calculation.
pub type Result<T> = core::result::Result<T, Error>;
