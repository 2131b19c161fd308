// CSV rendering and parsing of waveform collections.
//
// One time/value column pair per (waveform, buffer) in collection order.
// Values are written in scientific notation with Rust's shortest
// round-trippable float formatting, so re-parsing a rendered file recovers
// the exact physical values. CSV carries no encoding or scaling information;
// parsed collections always hold Float64 samples with identity scaling.

use std::cmp::Ordering;

use crate::error::{FormatError, Result};
use crate::format::{BufferType, Units, WaveformType};
use crate::model::{DataBuffer, Waveform, WaveformCollection};
use crate::scaling;

/// Render a collection as CSV text.
///
/// Channels with fewer points than the longest one get empty trailing cells;
/// nothing is truncated.
pub fn render(collection: &WaveformCollection) -> String {
    let pairs: Vec<(&Waveform, &DataBuffer)> = collection
        .waveforms
        .iter()
        .flat_map(|wf| wf.buffers.iter().map(move |buf| (wf, buf)))
        .collect();

    if pairs.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let header: Vec<String> = (0..pairs.len())
        .flat_map(|i| [format!("X{}", i), format!("Y{}", i)])
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    let rows = pairs
        .iter()
        .map(|(_, buf)| buf.samples.len())
        .max()
        .unwrap_or(0);

    let mut cells: Vec<String> = Vec::with_capacity(pairs.len() * 2);
    for row in 0..rows {
        cells.clear();
        for &(wf, buf) in &pairs {
            match scaling::to_physical(wf, buf, row) {
                Some((t, v)) => {
                    cells.push(format!("{:e}", t));
                    cells.push(format!("{:e}", v));
                }
                None => {
                    cells.push(String::new());
                    cells.push(String::new());
                }
            }
        }
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

struct Channel {
    label: String,
    times: Vec<f64>,
    values: Vec<f64>,
}

/// Parse CSV text into a waveform collection.
///
/// Each column pair becomes one waveform holding a single Float64 buffer.
/// The time axis is reconstructed from the time column, which must be
/// uniformly spaced. An empty cell pair marks rows past a channel's end.
pub fn parse(text: &str) -> Result<WaveformCollection> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

    let header = lines
        .next()
        .ok_or_else(|| FormatError::MalformedHeader("empty input".to_string()))?;
    let columns: Vec<&str> = header.split(',').collect();
    if columns.len() % 2 != 0 {
        return Err(FormatError::MalformedHeader(format!(
            "expected time/value column pairs, got {} columns",
            columns.len()
        )));
    }
    if columns.iter().any(|c| c.trim().is_empty()) {
        return Err(FormatError::MalformedHeader(
            "empty column name".to_string(),
        ));
    }

    let mut channels: Vec<Channel> = columns
        .chunks(2)
        .map(|pair| Channel {
            label: pair[1].trim().to_string(),
            times: Vec::new(),
            values: Vec::new(),
        })
        .collect();

    // 1-based positions for error context; the header is row 1.
    for (lx, line) in lines.enumerate() {
        let row = lx + 2;
        let cells: Vec<&str> = line.split(',').collect();
        if cells.len() != columns.len() {
            return Err(FormatError::InconsistentColumnCount {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        for (cx, channel) in channels.iter_mut().enumerate() {
            let time_cell = cells[2 * cx].trim();
            let value_cell = cells[2 * cx + 1].trim();
            if time_cell.is_empty() && value_cell.is_empty() {
                continue;
            }
            let t = parse_cell(time_cell, row, 2 * cx + 1)?;
            // nan/inf parse as f64 but cannot form a time axis.
            if !t.is_finite() {
                return Err(FormatError::NonNumericCell {
                    row,
                    col: 2 * cx + 1,
                    cell: time_cell.to_string(),
                });
            }
            channel.times.push(t);
            channel.values.push(parse_cell(value_cell, row, 2 * cx + 2)?);
        }
    }

    let waveforms = channels
        .into_iter()
        .enumerate()
        .map(|(cx, ch)| build_waveform(cx, ch))
        .collect::<Result<Vec<_>>>()?;

    Ok(WaveformCollection::new(waveforms))
}

fn parse_cell(cell: &str, row: usize, col: usize) -> Result<f64> {
    cell.parse::<f64>().map_err(|_| FormatError::NonNumericCell {
        row,
        col,
        cell: cell.to_string(),
    })
}

fn build_waveform(channel_index: usize, channel: Channel) -> Result<Waveform> {
    let (x_origin, x_increment) = reconstruct_axis(channel_index, &channel.times)?;
    let points = channel.values.len() as u32;

    Ok(Waveform {
        waveform_type: WaveformType::Normal,
        points,
        count: 0,
        x_display_range: (x_increment * points as f64) as f32,
        x_display_origin: x_origin,
        x_increment,
        x_origin,
        x_units: Units::Seconds,
        y_units: Units::Volts,
        label: channel.label,
        buffers: vec![DataBuffer::from_values(BufferType::Normal, channel.values)],
        ..Default::default()
    })
}

/// Recover (origin, increment) from a time column. The increment is averaged
/// over the whole span, then every adjacent step is checked against it.
fn reconstruct_axis(channel_index: usize, times: &[f64]) -> Result<(f64, f64)> {
    let n = times.len();
    if n == 0 {
        return Ok((0.0, 0.0));
    }
    let origin = times[0];
    if n == 1 {
        return Ok((origin, 0.0));
    }

    let increment = (times[n - 1] - origin) / (n - 1) as f64;
    let span = origin.abs().max(times[n - 1].abs());
    let tolerance = 1.0e-6 * increment.abs() + 1.0e-12 * span;

    for i in 1..n {
        let step = times[i] - times[i - 1];
        if (step - increment).abs() > tolerance {
            return Err(FormatError::NonUniformSampling {
                channel: channel_index,
                row: i + 2,
                expected: increment,
                found: step,
            });
        }
    }
    Ok((origin, snap_increment(times, increment, tolerance)))
}

/// Span averaging can land a few ulps away from the increment that generated
/// the column, so `origin + i * increment` would regenerate time text that
/// differs from the input in the last digit. Search the tolerance bracket for
/// an increment that reproduces every parsed time bit-exactly and prefer it;
/// if none exists the column did not come from a uniform generator and the
/// estimate is kept.
fn snap_increment(times: &[f64], estimate: f64, tolerance: f64) -> f64 {
    if compare_column(times, estimate) == Ordering::Equal {
        return estimate;
    }
    // The set of increments reproducing the column is a contiguous interval
    // and origin + i * inc is monotone in inc, so a bit-level binary search
    // over the bracket finds a member if one exists.
    let mut lo = monotone_bits(estimate - tolerance);
    let mut hi = monotone_bits(estimate + tolerance);
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let candidate = from_monotone_bits(mid);
        match compare_column(times, candidate) {
            Ordering::Equal => return candidate,
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid - 1,
        }
    }
    estimate
}

/// Whether `times[0] + i * increment` regenerates the column exactly; on the
/// first mismatch, which side the regenerated value falls on.
fn compare_column(times: &[f64], increment: f64) -> Ordering {
    let origin = times[0];
    for (i, &t) in times.iter().enumerate().skip(1) {
        let regenerated = origin + i as f64 * increment;
        match regenerated.partial_cmp(&t) {
            Some(Ordering::Equal) | None => {}
            Some(order) => return order,
        }
    }
    Ordering::Equal
}

// Maps f64 bit patterns to integers ordered like the values themselves,
// so adjacent integers are adjacent representable floats across signs.
fn monotone_bits(x: f64) -> i64 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN - bits
    } else {
        bits
    }
}

fn from_monotone_bits(key: i64) -> f64 {
    let bits = if key < 0 { i64::MIN - key } else { key };
    f64::from_bits(bits as u64)
}
