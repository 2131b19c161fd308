// src/lib.rs
// Agilent BIN Converter Library - Public API

//! # agbin
//!
//! A Rust library for converting Keysight/Agilent Infiniium BIN waveform
//! files to CSV and back.
//!
//! ## Features
//!
//! - Parse BIN files ("AG" cookie) into an in-memory waveform collection
//! - Voltage scaling and time-axis reconstruction
//! - Render collections as CSV and parse CSV back into collections
//! - Serialize collections into scope-compatible BIN images
//! - Proper error handling
//!
//! ## Example
//!
//! ```no_run
//! use agbin::{binary, csv};
//!
//! let bytes = std::fs::read("capture.bin").expect("Failed to read file");
//! let waveforms = binary::parse(&bytes).expect("Failed to parse BIN data");
//!
//! println!("Number of waveforms: {}", waveforms.waveforms.len());
//!
//! // Export to CSV
//! std::fs::write("capture.csv", csv::render(&waveforms)).expect("Failed to write CSV");
//!
//! // ...and reconstruct a BIN image from CSV text
//! let text = std::fs::read_to_string("capture.csv").expect("Failed to read CSV");
//! let reloaded = csv::parse(&text).expect("Failed to parse CSV");
//! let image = binary::serialize(&reloaded).expect("Failed to serialize");
//! std::fs::write("rebuilt.bin", image).expect("Failed to write file");
//! ```

pub mod binary;
pub mod csv;
pub mod error;
pub mod format;
pub mod model;
pub mod scaling;

pub use error::{FormatError, Result};
pub use format::{BufferType, SampleEncoding, Units, WaveformType};
pub use model::{DataBuffer, Samples, Waveform, WaveformCollection};
