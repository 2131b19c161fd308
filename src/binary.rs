// Reader and writer for the Infiniium BIN container.
//
// The reader walks a cursor over the whole input slice and always advances
// past headers by their declared size, so files written by newer firmware
// with extra trailing header fields still parse. The writer recomputes every
// size field from the model at emit time.

use crate::error::{FormatError, Result};
use crate::format::{
    BufferType, SampleEncoding, Units, WaveformType, BUFFER_HEADER_BASE_SIZE, BUFFER_HEADER_SIZE,
    COOKIE, DATE_LEN, FILE_HEADER_SIZE, FRAME_LEN, LABEL_LEN, MAX_FILE_VERSION, MIN_FILE_VERSION,
    TIME_LEN, WAVEFORM_HEADER_SIZE,
};
use crate::model::{DataBuffer, Samples, Waveform, WaveformCollection};

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0, base: 0 }
    }

    fn at_offset(buf: &'a [u8], base: usize) -> Self {
        Cursor { buf, pos: 0, base }
    }

    /// Absolute byte offset in the original input.
    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.buf.len() - self.pos;
        if n > remaining {
            return Err(FormatError::Truncated {
                offset: self.offset(),
                needed: n,
                available: remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.take(N)?);
        Ok(bytes)
    }

    fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Fixed-width character field, NUL padding stripped.
    fn read_fixed_str(&mut self, n: usize) -> Result<String> {
        let bytes = self.take(n)?;
        Ok(String::from_utf8_lossy(bytes)
            .trim_end_matches('\0')
            .to_string())
    }
}

/// Parse a complete BIN file image into a waveform collection.
pub fn parse(bytes: &[u8]) -> Result<WaveformCollection> {
    let mut cur = Cursor::new(bytes);

    let cookie: [u8; 2] = cur.read_array()?;
    if cookie != COOKIE {
        return Err(FormatError::BadCookie {
            expected: COOKIE,
            found: cookie,
        });
    }

    let version_bytes: [u8; 2] = cur.read_array()?;
    let version = parse_version(version_bytes)?;

    let file_size = cur.read_u32()? as usize;
    if file_size > bytes.len() {
        return Err(FormatError::Truncated {
            offset: 4,
            needed: file_size,
            available: bytes.len(),
        });
    }

    let num_waveforms = cur.read_u32()?;
    // Counts come from untrusted input; cap the pre-allocation by what the
    // remaining bytes could possibly hold.
    let capacity = (num_waveforms as usize).min(cur.remaining() / WAVEFORM_HEADER_SIZE);
    let mut waveforms = Vec::with_capacity(capacity);
    for _ in 0..num_waveforms {
        waveforms.push(parse_waveform(&mut cur)?);
    }

    let collection = WaveformCollection { version, waveforms };
    collection.validate()?;
    Ok(collection)
}

fn parse_version(bytes: [u8; 2]) -> Result<u8> {
    if !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
        return Err(FormatError::UnsupportedVersion(bytes));
    }
    let version = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    if !(MIN_FILE_VERSION..=MAX_FILE_VERSION).contains(&version) {
        return Err(FormatError::UnsupportedVersion(bytes));
    }
    Ok(version)
}

fn parse_waveform(cur: &mut Cursor<'_>) -> Result<Waveform> {
    let header_start = cur.offset();
    let header_size = cur.read_u32()? as usize;
    if header_size < WAVEFORM_HEADER_SIZE {
        return Err(FormatError::SizeMismatch {
            offset: header_start,
            declared: header_size,
            expected: WAVEFORM_HEADER_SIZE,
        });
    }

    // The declared size includes the size field itself. Unknown trailing
    // fields in the header slice are skipped.
    let header = cur.take(header_size - 4)?;
    let mut h = Cursor::at_offset(header, header_start + 4);

    let waveform_type = WaveformType::from_raw(h.read_u32()?);
    let num_buffers = h.read_u32()?;
    let points = h.read_u32()?;
    let count = h.read_u32()?;
    let x_display_range = h.read_f32()?;
    let x_display_origin = h.read_f64()?;
    let x_increment = h.read_f64()?;
    let x_origin = h.read_f64()?;
    let x_units = Units::from_raw(h.read_u32()?);
    let y_units = Units::from_raw(h.read_u32()?);
    let date = h.read_fixed_str(DATE_LEN)?;
    let time = h.read_fixed_str(TIME_LEN)?;
    let frame = h.read_fixed_str(FRAME_LEN)?;
    let label = h.read_fixed_str(LABEL_LEN)?;
    let time_tag = h.read_f64()?;
    let segment_index = h.read_u32()?;

    let capacity = (num_buffers as usize).min(cur.remaining() / BUFFER_HEADER_BASE_SIZE);
    let mut buffers = Vec::with_capacity(capacity);
    for _ in 0..num_buffers {
        buffers.push(parse_buffer(cur, points)?);
    }

    Ok(Waveform {
        waveform_type,
        points,
        count,
        x_display_range,
        x_display_origin,
        x_increment,
        x_origin,
        x_units,
        y_units,
        date,
        time,
        frame,
        label,
        time_tag,
        segment_index,
        buffers,
    })
}

fn parse_buffer(cur: &mut Cursor<'_>, points: u32) -> Result<DataBuffer> {
    let header_start = cur.offset();
    let header_size = cur.read_u32()? as usize;
    if header_size < BUFFER_HEADER_BASE_SIZE {
        return Err(FormatError::SizeMismatch {
            offset: header_start,
            declared: header_size,
            expected: BUFFER_HEADER_BASE_SIZE,
        });
    }

    let header = cur.take(header_size - 4)?;
    let mut h = Cursor::at_offset(header, header_start + 4);

    let buffer_type = BufferType::from_raw(h.read_i16()?);
    let bytes_per_point = h.read_i16()? as u16;
    let buffer_size = h.read_u32()? as usize;

    // Scaling coefficients ride as trailing header fields; scope-written
    // files stop at the base layout and get identity scaling.
    let (y_increment, y_origin, y_resolution) = if header_size >= BUFFER_HEADER_SIZE {
        (h.read_f64()?, h.read_f64()?, h.read_f64()?)
    } else {
        (1.0, 0.0, 0.0)
    };

    let expected = bytes_per_point as usize * points as usize;
    if buffer_size != expected {
        return Err(FormatError::SizeMismatch {
            offset: header_start,
            declared: buffer_size,
            expected,
        });
    }

    let encoding = SampleEncoding::from_layout(bytes_per_point, buffer_type)
        .ok_or(FormatError::UnsupportedEncoding(bytes_per_point))?;

    let data = cur.take(buffer_size)?;
    Ok(DataBuffer {
        buffer_type,
        y_increment,
        y_origin,
        y_resolution,
        samples: decode_samples(encoding, data),
    })
}

fn decode_samples(encoding: SampleEncoding, data: &[u8]) -> Samples {
    match encoding {
        SampleEncoding::Int8 => Samples::Int8(decode(data, i8::from_le_bytes)),
        SampleEncoding::Int16 => Samples::Int16(decode(data, i16::from_le_bytes)),
        SampleEncoding::Int32 => Samples::Int32(decode(data, i32::from_le_bytes)),
        SampleEncoding::Float32 => Samples::Float32(decode(data, f32::from_le_bytes)),
        SampleEncoding::Float64 => Samples::Float64(decode(data, f64::from_le_bytes)),
    }
}

fn decode<const W: usize, T>(data: &[u8], from_bytes: fn([u8; W]) -> T) -> Vec<T> {
    data.chunks_exact(W)
        .map(|chunk| {
            let mut bytes = [0u8; W];
            bytes.copy_from_slice(chunk);
            from_bytes(bytes)
        })
        .collect()
}

/// Serialize a waveform collection into a complete BIN file image.
///
/// Every size field is recomputed from the model, so edits made after
/// construction are reflected in the output.
pub fn serialize(collection: &WaveformCollection) -> Result<Vec<u8>> {
    collection.validate()?;

    let file_size = FILE_HEADER_SIZE
        + collection
            .waveforms
            .iter()
            .map(waveform_byte_len)
            .sum::<usize>();

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(&COOKIE);
    out.extend_from_slice(&version_bytes(collection.version));
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&(collection.waveforms.len() as u32).to_le_bytes());

    for wf in &collection.waveforms {
        write_waveform(&mut out, wf);
    }

    Ok(out)
}

fn version_bytes(version: u8) -> [u8; 2] {
    [b'0' + version / 10, b'0' + version % 10]
}

fn waveform_byte_len(wf: &Waveform) -> usize {
    WAVEFORM_HEADER_SIZE
        + wf.buffers
            .iter()
            .map(|b| BUFFER_HEADER_SIZE + b.samples.encoding().byte_width() * b.samples.len())
            .sum::<usize>()
}

fn write_waveform(out: &mut Vec<u8>, wf: &Waveform) {
    out.extend_from_slice(&(WAVEFORM_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&wf.waveform_type.as_raw().to_le_bytes());
    out.extend_from_slice(&(wf.buffers.len() as u32).to_le_bytes());
    out.extend_from_slice(&wf.points.to_le_bytes());
    out.extend_from_slice(&wf.count.to_le_bytes());
    out.extend_from_slice(&wf.x_display_range.to_le_bytes());
    out.extend_from_slice(&wf.x_display_origin.to_le_bytes());
    out.extend_from_slice(&wf.x_increment.to_le_bytes());
    out.extend_from_slice(&wf.x_origin.to_le_bytes());
    out.extend_from_slice(&wf.x_units.as_raw().to_le_bytes());
    out.extend_from_slice(&wf.y_units.as_raw().to_le_bytes());
    write_fixed_str(out, &wf.date, DATE_LEN);
    write_fixed_str(out, &wf.time, TIME_LEN);
    write_fixed_str(out, &wf.frame, FRAME_LEN);
    write_fixed_str(out, &wf.label, LABEL_LEN);
    out.extend_from_slice(&wf.time_tag.to_le_bytes());
    out.extend_from_slice(&wf.segment_index.to_le_bytes());

    for buf in &wf.buffers {
        write_buffer(out, buf);
    }
}

fn write_buffer(out: &mut Vec<u8>, buf: &DataBuffer) {
    let width = buf.samples.encoding().byte_width();
    out.extend_from_slice(&(BUFFER_HEADER_SIZE as u32).to_le_bytes());
    out.extend_from_slice(&buf.buffer_type.as_raw().to_le_bytes());
    out.extend_from_slice(&(width as i16).to_le_bytes());
    out.extend_from_slice(&((width * buf.samples.len()) as u32).to_le_bytes());
    out.extend_from_slice(&buf.y_increment.to_le_bytes());
    out.extend_from_slice(&buf.y_origin.to_le_bytes());
    out.extend_from_slice(&buf.y_resolution.to_le_bytes());

    match &buf.samples {
        Samples::Int8(v) => {
            for s in v {
                out.extend_from_slice(&s.to_le_bytes());
            }
        }
        Samples::Int16(v) => {
            for s in v {
                out.extend_from_slice(&s.to_le_bytes());
            }
        }
        Samples::Int32(v) => {
            for s in v {
                out.extend_from_slice(&s.to_le_bytes());
            }
        }
        Samples::Float32(v) => {
            for s in v {
                out.extend_from_slice(&s.to_le_bytes());
            }
        }
        Samples::Float64(v) => {
            for s in v {
                out.extend_from_slice(&s.to_le_bytes());
            }
        }
    }
}

fn write_fixed_str(out: &mut Vec<u8>, s: &str, n: usize) {
    let bytes = s.as_bytes();
    let used = bytes.len().min(n);
    out.extend_from_slice(&bytes[..used]);
    out.resize(out.len() + (n - used), 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_waveform() -> Waveform {
        Waveform {
            waveform_type: WaveformType::Normal,
            points: 4,
            count: 0,
            x_display_range: 4.0e-9,
            x_display_origin: -1.0e-6,
            x_increment: 1.0e-9,
            x_origin: -1.0e-6,
            x_units: Units::Seconds,
            y_units: Units::Volts,
            date: "01 JAN 2024".to_string(),
            time: "12:00:00".to_string(),
            frame: "N8900A:AT79587422".to_string(),
            label: "Channel 1".to_string(),
            time_tag: 0.0,
            segment_index: 0,
            buffers: vec![DataBuffer {
                buffer_type: BufferType::Normal,
                y_increment: 1.0,
                y_origin: 0.0,
                y_resolution: 0.0,
                samples: Samples::Float32(vec![0.0, 0.5, -0.5, 1.0]),
            }],
        }
    }

    /// Vendor-style file image: one waveform, one buffer with the 12-byte
    /// buffer header and no scaling fields.
    fn vendor_file_image(samples: &[f32]) -> Vec<u8> {
        let data_len = samples.len() * 4;
        let file_size = FILE_HEADER_SIZE + WAVEFORM_HEADER_SIZE + BUFFER_HEADER_BASE_SIZE + data_len;

        let mut out = Vec::new();
        out.extend_from_slice(b"AG");
        out.extend_from_slice(b"10");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());

        out.extend_from_slice(&(WAVEFORM_HEADER_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes()); // Normal
        out.extend_from_slice(&1u32.to_le_bytes()); // one buffer
        out.extend_from_slice(&(samples.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // count
        out.extend_from_slice(&1.0e-6f32.to_le_bytes());
        out.extend_from_slice(&(-5.0e-7f64).to_le_bytes());
        out.extend_from_slice(&2.0e-9f64.to_le_bytes());
        out.extend_from_slice(&(-5.0e-7f64).to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes()); // Seconds
        out.extend_from_slice(&1u32.to_le_bytes()); // Volts
        out.extend_from_slice(&[0u8; DATE_LEN]);
        out.extend_from_slice(&[0u8; TIME_LEN]);
        out.extend_from_slice(&[0u8; FRAME_LEN]);
        let mut label = [0u8; LABEL_LEN];
        label[..9].copy_from_slice(b"Channel 1");
        out.extend_from_slice(&label);
        out.extend_from_slice(&0.0f64.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        out.extend_from_slice(&(BUFFER_HEADER_BASE_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&1i16.to_le_bytes()); // Normal float
        out.extend_from_slice(&4i16.to_le_bytes());
        out.extend_from_slice(&(data_len as u32).to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_parse_vendor_image() {
        let image = vendor_file_image(&[0.25, -0.25, 1.5]);
        let col = parse(&image).unwrap();

        assert_eq!(col.version, 10);
        assert_eq!(col.waveforms.len(), 1);

        let wf = &col.waveforms[0];
        assert_eq!(wf.waveform_type, WaveformType::Normal);
        assert_eq!(wf.points, 3);
        assert_eq!(wf.x_increment, 2.0e-9);
        assert_eq!(wf.x_origin, -5.0e-7);
        assert_eq!(wf.label, "Channel 1");
        assert_eq!(wf.x_units, Units::Seconds);
        assert_eq!(wf.y_units, Units::Volts);

        let buf = &wf.buffers[0];
        assert_eq!(buf.buffer_type, BufferType::Normal);
        assert_eq!(buf.y_increment, 1.0); // base header -> identity scaling
        assert_eq!(buf.y_origin, 0.0);
        assert_eq!(buf.samples, Samples::Float32(vec![0.25, -0.25, 1.5]));
    }

    #[test]
    fn test_bad_cookie() {
        let mut image = vendor_file_image(&[0.0]);
        image[0] = b'X';
        let err = parse(&image).unwrap_err();
        assert!(matches!(err, FormatError::BadCookie { found: [b'X', b'G'], .. }));
    }

    #[test]
    fn test_unsupported_version() {
        let mut image = vendor_file_image(&[0.0]);
        image[2] = b'?';
        assert!(matches!(
            parse(&image),
            Err(FormatError::UnsupportedVersion([b'?', b'0']))
        ));

        let mut image = vendor_file_image(&[0.0]);
        image[2..4].copy_from_slice(b"05");
        assert!(matches!(
            parse(&image),
            Err(FormatError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_truncated_sample_data() {
        let image = vendor_file_image(&[0.25, -0.25, 1.5]);
        let err = parse(&image[..image.len() - 6]).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }

    #[test]
    fn test_declared_file_size_beyond_input() {
        let mut image = vendor_file_image(&[0.0]);
        let bogus = (image.len() as u32 + 100).to_le_bytes();
        image[4..8].copy_from_slice(&bogus);
        assert!(matches!(
            parse(&image),
            Err(FormatError::Truncated { offset: 4, .. })
        ));
    }

    #[test]
    fn test_buffer_size_cross_check() {
        let mut image = vendor_file_image(&[0.25, -0.25, 1.5]);
        // buffer_size field sits 8 bytes into the buffer header
        let pos = FILE_HEADER_SIZE + WAVEFORM_HEADER_SIZE + 8;
        image[pos..pos + 4].copy_from_slice(&16u32.to_le_bytes());
        assert!(matches!(
            parse(&image),
            Err(FormatError::SizeMismatch { declared: 16, expected: 12, .. })
        ));
    }

    #[test]
    fn test_unsupported_bytes_per_point() {
        let mut image = vendor_file_image(&[0.25, -0.25, 1.5]);
        let pos = FILE_HEADER_SIZE + WAVEFORM_HEADER_SIZE + 6;
        image[pos..pos + 2].copy_from_slice(&3i16.to_le_bytes());
        // keep the size cross-check consistent: 3 bytes * 3 points
        image[pos + 2..pos + 6].copy_from_slice(&9u32.to_le_bytes());
        assert!(matches!(
            parse(&image),
            Err(FormatError::UnsupportedEncoding(3))
        ));
    }

    #[test]
    fn test_forward_compatible_waveform_header() {
        let mut image = vendor_file_image(&[0.5]);
        // grow the waveform header by 8 unknown trailing bytes
        let pos = FILE_HEADER_SIZE;
        image[pos..pos + 4].copy_from_slice(&((WAVEFORM_HEADER_SIZE + 8) as u32).to_le_bytes());
        image.splice(
            pos + WAVEFORM_HEADER_SIZE..pos + WAVEFORM_HEADER_SIZE,
            [0xEEu8; 8],
        );
        let size = (image.len() as u32).to_le_bytes();
        image[4..8].copy_from_slice(&size);

        let col = parse(&image).unwrap();
        assert_eq!(col.waveforms[0].points, 1);
        assert_eq!(
            col.waveforms[0].buffers[0].samples,
            Samples::Float32(vec![0.5])
        );
    }

    #[test]
    fn test_undersized_waveform_header_rejected() {
        let mut image = vendor_file_image(&[0.5]);
        image[FILE_HEADER_SIZE..FILE_HEADER_SIZE + 4].copy_from_slice(&100u32.to_le_bytes());
        assert!(matches!(
            parse(&image),
            Err(FormatError::SizeMismatch { declared: 100, .. })
        ));
    }

    #[test]
    fn test_round_trip_float32() {
        let col = WaveformCollection::new(vec![sample_waveform()]);
        let bytes = serialize(&col).unwrap();
        assert_eq!(parse(&bytes).unwrap(), col);
    }

    #[test]
    fn test_round_trip_integer_scaling_and_multiple_buffers() {
        let mut wf = sample_waveform();
        wf.waveform_type = WaveformType::PeakDetect;
        wf.points = 3;
        wf.buffers = vec![
            DataBuffer {
                buffer_type: BufferType::PeakDetectMax,
                y_increment: 0.01,
                y_origin: -0.5,
                y_resolution: 0.001,
                samples: Samples::Int16(vec![-100, 0, 100]),
            },
            DataBuffer {
                buffer_type: BufferType::PeakDetectMin,
                y_increment: 0.01,
                y_origin: -0.5,
                y_resolution: 0.001,
                samples: Samples::Int16(vec![-120, -5, 80]),
            },
        ];
        let mut col = WaveformCollection::new(vec![wf, sample_waveform()]);
        col.version = 12;

        let bytes = serialize(&col).unwrap();
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed, col);

        // declared file size matches the actual image
        assert_eq!(
            u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize,
            bytes.len()
        );
    }

    #[test]
    fn test_round_trip_all_encodings() {
        let encodings = vec![
            (BufferType::Digital, Samples::Int8(vec![-1, 0, 1])),
            (BufferType::Normal, Samples::Int16(vec![-2, 0, 2])),
            (BufferType::AverageCount, Samples::Int32(vec![-3, 0, 3])),
            (BufferType::Normal, Samples::Float32(vec![-0.5, 0.0, 0.5])),
            (BufferType::Normal, Samples::Float64(vec![-0.5, 0.0, 0.5])),
        ];
        for (buffer_type, samples) in encodings {
            let mut wf = sample_waveform();
            wf.points = 3;
            wf.buffers = vec![DataBuffer {
                buffer_type,
                y_increment: 0.01,
                y_origin: 0.0,
                y_resolution: 0.0,
                samples,
            }];
            let col = WaveformCollection::new(vec![wf]);
            let bytes = serialize(&col).unwrap();
            assert_eq!(parse(&bytes).unwrap(), col);
        }
    }

    #[test]
    fn test_serialize_recomputes_sizes_after_edit() {
        let col = WaveformCollection::new(vec![sample_waveform()]);
        let before = serialize(&col).unwrap();

        let mut edited = col.clone();
        edited.waveforms[0].points = 2;
        edited.waveforms[0].buffers[0].samples = Samples::Float32(vec![1.0, 2.0]);
        let after = serialize(&edited).unwrap();

        assert_eq!(before.len() - after.len(), 2 * 4);
        assert_eq!(parse(&after).unwrap(), edited);
    }

    #[test]
    fn test_serialize_rejects_inconsistent_model() {
        let mut col = WaveformCollection::new(vec![sample_waveform()]);
        col.waveforms[0].points = 99;
        assert!(matches!(
            serialize(&col),
            Err(FormatError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_over_length_label_rejected() {
        let mut wf = sample_waveform();
        wf.label = "a label far longer than sixteen bytes".to_string();
        let col = WaveformCollection::new(vec![wf]);
        assert!(matches!(serialize(&col), Err(FormatError::InvalidModel(_))));
    }

    #[test]
    fn test_huge_waveform_count_is_truncation_not_allocation() {
        // A 12-byte file whose header claims u32::MAX waveforms must fail on
        // the missing waveform data, not try to reserve memory for the count.
        let mut image = Vec::new();
        image.extend_from_slice(b"AG10");
        image.extend_from_slice(&(FILE_HEADER_SIZE as u32).to_le_bytes());
        image.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(parse(&image), Err(FormatError::Truncated { .. })));
    }

    #[test]
    fn test_huge_buffer_count_is_truncation_not_allocation() {
        let mut image = vendor_file_image(&[0.5]);
        let pos = FILE_HEADER_SIZE + 8; // buffer count field
        image[pos..pos + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(parse(&image), Err(FormatError::Truncated { .. })));
    }
}
