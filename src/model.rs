// In-memory waveform model shared by both codecs.

use crate::error::{FormatError, Result};
use crate::format::{
    BufferType, SampleEncoding, Units, WaveformType, DATE_LEN, DEFAULT_FILE_VERSION, FRAME_LEN,
    LABEL_LEN, TIME_LEN,
};
use crate::scaling;

/// Raw sample storage. The variant fixes the byte width, so the encoding can
/// never disagree with the data it describes.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl Samples {
    pub fn encoding(&self) -> SampleEncoding {
        match self {
            Samples::Int8(_) => SampleEncoding::Int8,
            Samples::Int16(_) => SampleEncoding::Int16,
            Samples::Int32(_) => SampleEncoding::Int32,
            Samples::Float32(_) => SampleEncoding::Float32,
            Samples::Float64(_) => SampleEncoding::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Samples::Int8(v) => v.len(),
            Samples::Int16(v) => v.len(),
            Samples::Int32(v) => v.len(),
            Samples::Float32(v) => v.len(),
            Samples::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw numeric value of one sample, widened to f64.
    pub fn raw(&self, index: usize) -> Option<f64> {
        match self {
            Samples::Int8(v) => v.get(index).map(|&s| s as f64),
            Samples::Int16(v) => v.get(index).map(|&s| s as f64),
            Samples::Int32(v) => v.get(index).map(|&s| s as f64),
            Samples::Float32(v) => v.get(index).map(|&s| s as f64),
            Samples::Float64(v) => v.get(index).copied(),
        }
    }
}

/// One raw sample array belonging to a waveform.
///
/// The Y-scaling coefficients only matter for integer encodings; float
/// buffers already hold physical values.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBuffer {
    pub buffer_type: BufferType,
    pub y_increment: f64,
    pub y_origin: f64,
    pub y_resolution: f64,
    pub samples: Samples,
}

impl DataBuffer {
    /// Buffer holding physical values directly, with identity scaling.
    pub fn from_values(buffer_type: BufferType, values: Vec<f64>) -> Self {
        DataBuffer {
            buffer_type,
            y_increment: 1.0,
            y_origin: 0.0,
            y_resolution: 0.0,
            samples: Samples::Float64(values),
        }
    }

    /// Encode a slice of physical values into the target encoding, applying
    /// the inverse scale. Fails with `OutOfRange` if a value does not fit the
    /// encoding after scaling.
    pub fn from_physical(
        buffer_type: BufferType,
        encoding: SampleEncoding,
        y_increment: f64,
        y_origin: f64,
        values: &[f64],
    ) -> Result<Self> {
        let samples = match encoding {
            SampleEncoding::Int8 => {
                let mut raws = Vec::with_capacity(values.len());
                for (i, &v) in values.iter().enumerate() {
                    raws.push(scaling::invert(encoding, y_increment, y_origin, i, v)? as i8);
                }
                Samples::Int8(raws)
            }
            SampleEncoding::Int16 => {
                let mut raws = Vec::with_capacity(values.len());
                for (i, &v) in values.iter().enumerate() {
                    raws.push(scaling::invert(encoding, y_increment, y_origin, i, v)? as i16);
                }
                Samples::Int16(raws)
            }
            SampleEncoding::Int32 => {
                let mut raws = Vec::with_capacity(values.len());
                for (i, &v) in values.iter().enumerate() {
                    raws.push(scaling::invert(encoding, y_increment, y_origin, i, v)? as i32);
                }
                Samples::Int32(raws)
            }
            SampleEncoding::Float32 => {
                Samples::Float32(values.iter().map(|&v| v as f32).collect())
            }
            SampleEncoding::Float64 => Samples::Float64(values.to_vec()),
        };
        Ok(DataBuffer {
            buffer_type,
            y_increment,
            y_origin,
            y_resolution: 0.0,
            samples,
        })
    }
}

/// One logical channel/trace with its time axis and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub waveform_type: WaveformType,
    pub points: u32,
    pub count: u32,
    pub x_display_range: f32,
    pub x_display_origin: f64,
    pub x_increment: f64,
    pub x_origin: f64,
    pub x_units: Units,
    pub y_units: Units,
    pub date: String,
    pub time: String,
    pub frame: String,
    pub label: String,
    pub time_tag: f64,
    pub segment_index: u32,
    pub buffers: Vec<DataBuffer>,
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform {
            waveform_type: WaveformType::Unknown,
            points: 0,
            count: 0,
            x_display_range: 0.0,
            x_display_origin: 0.0,
            x_increment: 0.0,
            x_origin: 0.0,
            x_units: Units::Seconds,
            y_units: Units::Volts,
            date: String::new(),
            time: String::new(),
            frame: String::new(),
            label: String::new(),
            time_tag: 0.0,
            segment_index: 0,
            buffers: Vec::new(),
        }
    }
}

/// Ordered set of waveforms parsed from, or destined for, one file.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformCollection {
    pub version: u8,
    pub waveforms: Vec<Waveform>,
}

impl Default for WaveformCollection {
    fn default() -> Self {
        WaveformCollection {
            version: DEFAULT_FILE_VERSION,
            waveforms: Vec::new(),
        }
    }
}

impl WaveformCollection {
    pub fn new(waveforms: Vec<Waveform>) -> Self {
        WaveformCollection {
            version: DEFAULT_FILE_VERSION,
            waveforms,
        }
    }

    /// Check the structural invariants every writer relies on: each waveform
    /// owns at least one buffer, every buffer holds exactly `points` samples,
    /// and every metadata string fits its fixed-width header field.
    pub fn validate(&self) -> Result<()> {
        for (wx, wf) in self.waveforms.iter().enumerate() {
            if wf.buffers.is_empty() {
                return Err(FormatError::InvalidModel(format!(
                    "waveform {} has no data buffers",
                    wx
                )));
            }
            let fields: [(&str, &str, usize); 4] = [
                ("date", &wf.date, DATE_LEN),
                ("time", &wf.time, TIME_LEN),
                ("frame", &wf.frame, FRAME_LEN),
                ("label", &wf.label, LABEL_LEN),
            ];
            for (name, value, width) in fields {
                if value.len() > width {
                    return Err(FormatError::InvalidModel(format!(
                        "waveform {} {} is {} bytes, field width is {}",
                        wx,
                        name,
                        value.len(),
                        width
                    )));
                }
            }
            for (bx, buf) in wf.buffers.iter().enumerate() {
                if buf.samples.len() != wf.points as usize {
                    return Err(FormatError::InvalidModel(format!(
                        "waveform {} buffer {} holds {} samples, header says {}",
                        wx,
                        bx,
                        buf.samples.len(),
                        wf.points
                    )));
                }
            }
        }
        Ok(())
    }
}
