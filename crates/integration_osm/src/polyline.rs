//! Encoded polyline decoding
//!
//! Decodes the Google encoded polyline format used by OSRM when
//! `geometries=polyline` is requested. Coordinates come out in
//! (latitude, longitude) order.

use domain::GeoPoint;
use thiserror::Error;

/// Precision used by OSRM's `polyline` geometry
pub const OSRM_PRECISION: u32 = 5;

/// Errors that can occur while decoding a polyline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// Input ended in the middle of a value
    #[error("Polyline truncated at byte {0}")]
    Truncated(usize),

    /// Byte outside the encoding alphabet
    #[error("Invalid polyline byte at {0}")]
    InvalidByte(usize),

    /// Value does not fit in 64 bits
    #[error("Polyline value overflow at byte {0}")]
    Overflow(usize),

    /// Decoded coordinate outside the valid range
    #[error("Polyline coordinate out of range at point {0}")]
    OutOfRange(usize),
}

/// Decode an encoded polyline into points
///
/// # Errors
///
/// Returns a [`PolylineError`] if the input is malformed.
#[allow(clippy::cast_precision_loss)]
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<GeoPoint>, PolylineError> {
    let factor = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        let start = index;
        lat = lat
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow(start))?;
        lon = lon
            .checked_add(next_value(bytes, &mut index)?)
            .ok_or(PolylineError::Overflow(start))?;

        let point = GeoPoint::new(lat as f64 / factor, lon as f64 / factor)
            .map_err(|_| PolylineError::OutOfRange(points.len()))?;
        points.push(point);
    }

    Ok(points)
}

/// Read one zig-zag encoded delta
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError::Truncated(*index))?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte(*index));
        }
        if shift > 60 {
            return Err(PolylineError::Overflow(*index));
        }

        let chunk = i64::from(byte - 63);
        *index += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 0 {
        result >> 1
    } else {
        !(result >> 1)
    })
}
