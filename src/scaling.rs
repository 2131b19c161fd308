// Conversion between raw samples and physical (time, value) pairs.
//
// Time is per-waveform: t[i] = x_origin + i * x_increment. Values are
// per-buffer: integer encodings carry a linear scale, float encodings store
// physical values directly. Coefficients are per-buffer constants, so every
// conversion is O(1) with no shared state.

use crate::error::{FormatError, Result};
use crate::format::SampleEncoding;
use crate::model::{DataBuffer, Waveform};

/// Time of the sample at `index` on the waveform's X axis.
pub fn sample_time(waveform: &Waveform, index: usize) -> f64 {
    waveform.x_origin + index as f64 * waveform.x_increment
}

/// Physical value of one raw sample.
pub fn physical_value(buffer: &DataBuffer, raw: f64) -> f64 {
    if buffer.samples.encoding().is_integer() {
        raw * buffer.y_increment + buffer.y_origin
    } else {
        raw
    }
}

/// Physical (time, value) of the sample at `index`, or None past the end.
pub fn to_physical(waveform: &Waveform, buffer: &DataBuffer, index: usize) -> Option<(f64, f64)> {
    let raw = buffer.samples.raw(index)?;
    Some((sample_time(waveform, index), physical_value(buffer, raw)))
}

/// Raw sample that stores `value` in the buffer's encoding. For integer
/// encodings the result is rounded and range-checked; for float encodings the
/// value passes through unchanged.
pub fn to_raw(buffer: &DataBuffer, index: usize, value: f64) -> Result<f64> {
    let encoding = buffer.samples.encoding();
    invert(encoding, buffer.y_increment, buffer.y_origin, index, value)
}

/// Inverse scale for a target encoding that may not have a buffer yet.
pub fn invert(
    encoding: SampleEncoding,
    y_increment: f64,
    y_origin: f64,
    index: usize,
    value: f64,
) -> Result<f64> {
    if !encoding.is_integer() {
        return Ok(value);
    }
    let raw = ((value - y_origin) / y_increment).round();
    if !raw.is_finite() || raw < encoding.min_raw() || raw > encoding.max_raw() {
        return Err(FormatError::OutOfRange {
            index,
            value,
            encoding,
        });
    }
    Ok(raw)
}
