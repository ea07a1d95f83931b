// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the sensor stream library

use std::fmt;

/// Result type alias using SensorError
pub type SensorResult<T> = Result<T, SensorError>;

/// Top-level library error type
#[derive(Debug, Clone)]
pub enum SensorError {
    /// Frame conversion errors
    Convert(ConvertError),
    /// Device lifecycle errors
    Device(DeviceError),
    /// Frame reader errors
    Source(SourceError),
    /// Audio sink errors
    Audio(AudioSinkError),
}

/// Frame conversion errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A raw or display buffer does not match the descriptor's expected length.
    /// This is a programming error; the conversion fails without touching
    /// either buffer.
    BufferSize {
        /// Which buffer was mis-sized ("raw", "display", ...)
        buffer: &'static str,
        /// Expected length in elements
        expected: usize,
        /// Actual length in elements
        actual: usize,
    },
}

/// Device lifecycle errors
#[derive(Debug, Clone)]
pub enum DeviceError {
    /// No sensor device is present
    NotAvailable,
    /// Opening the device failed
    OpenFailed(String),
}

/// Frame reader errors
#[derive(Debug, Clone)]
pub enum SourceError {
    /// The device disconnected while the stream was open
    Disconnected,
    /// Backend-specific reader failure
    Backend(String),
}

/// Audio sink errors
#[derive(Debug, Clone)]
pub enum AudioSinkError {
    /// `write` was called while no file is open
    NotOpen,
    /// `open` was called while a file is already open
    AlreadyOpen,
    /// A sub-frame buffer is not a whole number of 4-byte samples
    UnalignedBuffer {
        /// Offending buffer length in bytes
        len: usize,
    },
    /// Filesystem I/O failure
    Io(String),
    /// Container encoding failure
    Encode(String),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Convert(e) => write!(f, "Conversion error: {}", e),
            SensorError::Device(e) => write!(f, "Device error: {}", e),
            SensorError::Source(e) => write!(f, "Frame source error: {}", e),
            SensorError::Audio(e) => write!(f, "Audio sink error: {}", e),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::BufferSize {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{} buffer length {} does not match descriptor (expected {})",
                buffer, actual, expected
            ),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NotAvailable => write!(f, "No sensor device available"),
            DeviceError::OpenFailed(msg) => write!(f, "Failed to open device: {}", msg),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Disconnected => write!(f, "Device disconnected"),
            SourceError::Backend(msg) => write!(f, "Reader failure: {}", msg),
        }
    }
}

impl fmt::Display for AudioSinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioSinkError::NotOpen => write!(f, "Audio sink is not open"),
            AudioSinkError::AlreadyOpen => write!(f, "Audio sink is already open"),
            AudioSinkError::UnalignedBuffer { len } => write!(
                f,
                "Sub-frame length {} is not a whole number of samples",
                len
            ),
            AudioSinkError::Io(msg) => write!(f, "I/O error: {}", msg),
            AudioSinkError::Encode(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for SensorError {}
impl std::error::Error for ConvertError {}
impl std::error::Error for DeviceError {}
impl std::error::Error for SourceError {}
impl std::error::Error for AudioSinkError {}

// Conversions from sub-errors to SensorError
impl From<ConvertError> for SensorError {
    fn from(err: ConvertError) -> Self {
        SensorError::Convert(err)
    }
}

impl From<DeviceError> for SensorError {
    fn from(err: DeviceError) -> Self {
        SensorError::Device(err)
    }
}

impl From<SourceError> for SensorError {
    fn from(err: SourceError) -> Self {
        SensorError::Source(err)
    }
}

impl From<AudioSinkError> for SensorError {
    fn from(err: AudioSinkError) -> Self {
        SensorError::Audio(err)
    }
}

// Errors are kept Clone, so foreign error payloads are flattened to strings
impl From<std::io::Error> for AudioSinkError {
    fn from(err: std::io::Error) -> Self {
        AudioSinkError::Io(err.to_string())
    }
}

impl From<hound::Error> for AudioSinkError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioSinkError::Io(e.to_string()),
            other => AudioSinkError::Encode(other.to_string()),
        }
    }
}
