// SPDX-License-Identifier: GPL-3.0-only

//! Streaming waveform file sink
//!
//! Accumulates raw audio sub-frames into a standard RIFF/WAVE file holding
//! uncompressed 32-bit IEEE float PCM. The header is written up front with
//! placeholder length fields and patched when the sink closes, so the file
//! is playable by any standard reader once finalized.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::audio::float_samples;
use crate::config::WaveFormat;
use crate::constants::audio::BYTES_PER_SAMPLE;
use crate::errors::AudioSinkError;

/// Result type alias for sink operations
pub type SinkResult<T> = Result<T, AudioSinkError>;

/// Streaming WAV writer for raw float sub-frames
///
/// One sub-frame arrives every ~16 ms while capture runs; `write` appends
/// its bytes verbatim to the `data` chunk. Pause/resume is a caller-level
/// gate on whether `write` is invoked at all — the sink itself has no
/// paused state.
///
/// The sink can be reopened after `close` for a fresh recording (each open
/// truncates the target file).
pub struct WaveFileSink {
    format: WaveFormat,
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    path: Option<PathBuf>,
    bytes_written: u64,
}

impl WaveFileSink {
    /// Create a closed sink for the given waveform format
    pub fn new(format: WaveFormat) -> Self {
        Self {
            format,
            writer: None,
            path: None,
            bytes_written: 0,
        }
    }

    /// Create a closed sink for the device's native capture format
    pub fn native() -> Self {
        Self::new(WaveFormat::default())
    }

    /// Whether a file is currently open
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Bytes appended to the `data` chunk since the last `open`
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Open (create or truncate) the output file and write the container
    /// header with placeholder length fields
    pub fn open(&mut self, path: impl AsRef<Path>) -> SinkResult<()> {
        if self.writer.is_some() {
            return Err(AudioSinkError::AlreadyOpen);
        }

        let path = path.as_ref();
        let spec = self.format.wav_spec()?;
        let writer = hound::WavWriter::create(path, spec)?;

        info!(
            path = %path.display(),
            sample_rate = self.format.sample_rate,
            channels = self.format.channels,
            "opened waveform file"
        );

        self.writer = Some(writer);
        self.path = Some(path.to_path_buf());
        self.bytes_written = 0;
        Ok(())
    }

    /// Append one sub-frame of raw little-endian float bytes
    ///
    /// The bytes land in the `data` chunk unmodified, in arrival order. The
    /// buffer must hold a whole number of samples; calling while closed is
    /// a programming error.
    pub fn write(&mut self, buffer: &[u8]) -> SinkResult<()> {
        let writer = self.writer.as_mut().ok_or(AudioSinkError::NotOpen)?;

        if buffer.len() % BYTES_PER_SAMPLE != 0 {
            return Err(AudioSinkError::UnalignedBuffer { len: buffer.len() });
        }

        for sample in float_samples(buffer) {
            writer.write_sample(sample)?;
        }
        self.bytes_written += buffer.len() as u64;
        Ok(())
    }

    /// Finalize the container length fields and release the file
    ///
    /// Idempotent: closing an already-closed sink is a no-op.
    pub fn close(&mut self) -> SinkResult<()> {
        match self.writer.take() {
            Some(writer) => {
                writer.finalize()?;
                debug!(
                    path = ?self.path,
                    bytes = self.bytes_written,
                    "finalized waveform file"
                );
                self.path = None;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for WaveFileSink {
    fn drop(&mut self) {
        if self.writer.is_some() {
            if let Err(e) = self.close() {
                warn!(error = %e, "failed to finalize waveform file on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn subframe(values: &[f32]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(values.len() * 4);
        for v in values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    /// Locate the `data` chunk payload within a finalized RIFF file
    fn data_chunk(file: &[u8]) -> &[u8] {
        assert_eq!(&file[0..4], b"RIFF");
        assert_eq!(&file[8..12], b"WAVE");

        let mut offset = 12;
        while offset + 8 <= file.len() {
            let id = &file[offset..offset + 4];
            let len = u32::from_le_bytes([
                file[offset + 4],
                file[offset + 5],
                file[offset + 6],
                file[offset + 7],
            ]) as usize;
            if id == b"data" {
                return &file[offset + 8..offset + 8 + len];
            }
            offset += 8 + len;
        }
        panic!("no data chunk found");
    }

    #[test]
    fn test_roundtrip_preserves_bytes_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.wav");

        let frames = [
            subframe(&[0.0, 0.5, -0.5]),
            subframe(&[1.0, -1.0]),
            subframe(&[0.25; 256]),
        ];
        let expected: Vec<u8> = frames.iter().flatten().copied().collect();

        let mut sink = WaveFileSink::native();
        sink.open(&path).unwrap();
        for frame in &frames {
            sink.write(frame).unwrap();
        }
        assert_eq!(sink.bytes_written(), expected.len() as u64);
        sink.close().unwrap();

        let mut file = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut file).unwrap();
        assert_eq!(data_chunk(&file), expected.as_slice());
    }

    #[test]
    fn test_finalized_file_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.wav");

        let mut sink = WaveFileSink::native();
        sink.open(&path).unwrap();
        sink.write(&subframe(&[0.125, -0.25, 0.75])).unwrap();
        sink.close().unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 32);
        assert_eq!(spec.sample_format, hound::SampleFormat::Float);

        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.125, -0.25, 0.75]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.wav");

        let mut sink = WaveFileSink::native();
        sink.open(&path).unwrap();
        sink.write(&subframe(&[0.5])).unwrap();
        sink.close().unwrap();
        sink.close().unwrap();

        // The finalized file stays intact
        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.samples::<f32>().count(), 1);
    }

    #[test]
    fn test_write_while_closed_is_a_programming_error() {
        let mut sink = WaveFileSink::native();
        let err = sink.write(&subframe(&[0.0])).unwrap_err();
        assert!(matches!(err, AudioSinkError::NotOpen));
    }

    #[test]
    fn test_double_open_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = WaveFileSink::native();
        sink.open(dir.path().join("a.wav")).unwrap();
        let err = sink.open(dir.path().join("b.wav")).unwrap_err();
        assert!(matches!(err, AudioSinkError::AlreadyOpen));
    }

    #[test]
    fn test_unaligned_subframe_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = WaveFileSink::native();
        sink.open(dir.path().join("a.wav")).unwrap();

        let err = sink.write(&[0u8; 7]).unwrap_err();
        assert!(matches!(err, AudioSinkError::UnalignedBuffer { len: 7 }));
        // The aligned part was not partially committed
        assert_eq!(sink.bytes_written(), 0);
    }

    #[test]
    fn test_open_failure_is_typed_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = WaveFileSink::native();
        let err = sink
            .open(dir.path().join("missing").join("capture.wav"))
            .unwrap_err();
        assert!(matches!(err, AudioSinkError::Io(_)));
        assert!(!sink.is_open());
    }

    #[test]
    fn test_reopen_after_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.wav");

        let mut sink = WaveFileSink::native();
        sink.open(&path).unwrap();
        sink.write(&subframe(&[0.1, 0.2])).unwrap();
        sink.close().unwrap();

        // Second recording truncates and starts fresh
        sink.open(&path).unwrap();
        sink.write(&subframe(&[0.9])).unwrap();
        sink.close().unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.9]);
    }

    #[test]
    fn test_drop_finalizes_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.wav");

        {
            let mut sink = WaveFileSink::native();
            sink.open(&path).unwrap();
            sink.write(&subframe(&[0.5, 0.5])).unwrap();
        }

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.samples::<f32>().count(), 2);
    }
}
