// Infiniium BIN layout constants and wire enumerations.
//
// All multi-byte fields in the format are little-endian. Waveform and buffer
// headers carry their own size as the first field, so readers must advance by
// the declared size rather than a fixed constant.

use std::fmt;

/// Two ASCII characters identifying the Agilent binary data format.
pub const COOKIE: [u8; 2] = *b"AG";

/// File header: cookie + version + file size + waveform count.
pub const FILE_HEADER_SIZE: usize = 12;

/// Waveform header size as emitted by this crate. Files may declare a larger
/// size; the trailing bytes are skipped.
pub const WAVEFORM_HEADER_SIZE: usize = 140;

/// Buffer header without the trailing Y-scaling fields, as written by
/// InfiniiVision scopes.
pub const BUFFER_HEADER_BASE_SIZE: usize = 12;

/// Buffer header as emitted by this crate: the vendor layout plus
/// y_increment/y_origin/y_resolution appended as trailing fields.
pub const BUFFER_HEADER_SIZE: usize = 36;

pub const DATE_LEN: usize = 16;
pub const TIME_LEN: usize = 16;
pub const FRAME_LEN: usize = 24;
pub const LABEL_LEN: usize = 16;

/// File versions are two ASCII digits; every release so far is "10" or later.
pub const MIN_FILE_VERSION: u8 = 10;
pub const MAX_FILE_VERSION: u8 = 99;
pub const DEFAULT_FILE_VERSION: u8 = 10;

/// Acquisition mode of a waveform record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveformType {
    #[default]
    Unknown,
    Normal,
    PeakDetect,
    Average,
    HighResolution,
    Rolling,
}

impl WaveformType {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => WaveformType::Normal,
            2 => WaveformType::PeakDetect,
            3 => WaveformType::Average,
            4 => WaveformType::HighResolution,
            5 => WaveformType::Rolling,
            _ => WaveformType::Unknown,
        }
    }

    pub fn as_raw(self) -> u32 {
        match self {
            WaveformType::Unknown => 0,
            WaveformType::Normal => 1,
            WaveformType::PeakDetect => 2,
            WaveformType::Average => 3,
            WaveformType::HighResolution => 4,
            WaveformType::Rolling => 5,
        }
    }
}

impl fmt::Display for WaveformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WaveformType::Unknown => "Unknown",
            WaveformType::Normal => "Normal",
            WaveformType::PeakDetect => "Peak Detect",
            WaveformType::Average => "Average",
            WaveformType::HighResolution => "High Resolution",
            WaveformType::Rolling => "Rolling",
        };
        f.write_str(name)
    }
}

/// Role of one sample buffer inside a waveform record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferType {
    #[default]
    Unknown,
    Normal,
    PeakDetectMax,
    PeakDetectMin,
    AverageValue,
    AverageCount,
    Digital,
}

impl BufferType {
    pub fn from_raw(raw: i16) -> Self {
        match raw {
            1 => BufferType::Normal,
            2 => BufferType::PeakDetectMax,
            3 => BufferType::PeakDetectMin,
            4 => BufferType::AverageValue,
            5 => BufferType::AverageCount,
            6 => BufferType::Digital,
            _ => BufferType::Unknown,
        }
    }

    pub fn as_raw(self) -> i16 {
        match self {
            BufferType::Unknown => 0,
            BufferType::Normal => 1,
            BufferType::PeakDetectMax => 2,
            BufferType::PeakDetectMin => 3,
            BufferType::AverageValue => 4,
            BufferType::AverageCount => 5,
            BufferType::Digital => 6,
        }
    }

    /// Whether 4-byte samples in a buffer of this type hold floats.
    /// Only the acquisition buffers (types 1-3) carry floats; average,
    /// count and digital buffers carry integers.
    pub fn holds_floats(self) -> bool {
        matches!(
            self,
            BufferType::Normal | BufferType::PeakDetectMax | BufferType::PeakDetectMin
        )
    }
}

/// Unit of measure for an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Unknown,
    Volts,
    Seconds,
    Constant,
    Amps,
    Decibels,
    Hertz,
}

impl Units {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Units::Volts,
            2 => Units::Seconds,
            3 => Units::Constant,
            4 => Units::Amps,
            5 => Units::Decibels,
            6 => Units::Hertz,
            _ => Units::Unknown,
        }
    }

    pub fn as_raw(self) -> u32 {
        match self {
            Units::Unknown => 0,
            Units::Volts => 1,
            Units::Seconds => 2,
            Units::Constant => 3,
            Units::Amps => 4,
            Units::Decibels => 5,
            Units::Hertz => 6,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Units::Unknown => "Unknown",
            Units::Volts => "Volts",
            Units::Seconds => "Seconds",
            Units::Constant => "Constant",
            Units::Amps => "Amps",
            Units::Decibels => "dB",
            Units::Hertz => "Hz",
        };
        f.write_str(name)
    }
}

/// Storage format of one raw sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    Int8,
    Int16,
    Int32,
    Float32,
    Float64,
}

impl SampleEncoding {
    pub fn byte_width(self) -> usize {
        match self {
            SampleEncoding::Int8 => 1,
            SampleEncoding::Int16 => 2,
            SampleEncoding::Int32 | SampleEncoding::Float32 => 4,
            SampleEncoding::Float64 => 8,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            SampleEncoding::Int8 | SampleEncoding::Int16 | SampleEncoding::Int32
        )
    }

    /// Derive the encoding from a buffer header. The format does not store an
    /// explicit encoding tag; 4-byte samples are disambiguated by the buffer
    /// type.
    pub fn from_layout(bytes_per_point: u16, hint: BufferType) -> Option<Self> {
        match bytes_per_point {
            1 => Some(SampleEncoding::Int8),
            2 => Some(SampleEncoding::Int16),
            4 if hint.holds_floats() => Some(SampleEncoding::Float32),
            4 => Some(SampleEncoding::Int32),
            8 => Some(SampleEncoding::Float64),
            _ => None,
        }
    }

    /// Smallest raw value representable by an integer encoding.
    pub fn min_raw(self) -> f64 {
        match self {
            SampleEncoding::Int8 => i8::MIN as f64,
            SampleEncoding::Int16 => i16::MIN as f64,
            SampleEncoding::Int32 => i32::MIN as f64,
            SampleEncoding::Float32 => f32::MIN as f64,
            SampleEncoding::Float64 => f64::MIN,
        }
    }

    /// Largest raw value representable by an integer encoding.
    pub fn max_raw(self) -> f64 {
        match self {
            SampleEncoding::Int8 => i8::MAX as f64,
            SampleEncoding::Int16 => i16::MAX as f64,
            SampleEncoding::Int32 => i32::MAX as f64,
            SampleEncoding::Float32 => f32::MAX as f64,
            SampleEncoding::Float64 => f64::MAX,
        }
    }
}
