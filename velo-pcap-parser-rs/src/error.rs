/// Errors raised while decoding a single data packet.
///
/// Every variant is local to one decode call; callers are expected to drop
/// the offending packet and carry on with the next one.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("invalid packet length: expected {expected} bytes, got {actual}")]
    InvalidPacketLength { expected: usize, actual: usize },
    #[error("malformed geometry: block {block} azimuth {azimuth} outside [0, 360)")]
    MalformedGeometry { block: usize, azimuth: f32 },
    #[error("block {block} has no second azimuth, packet was not interpolated")]
    NotInterpolated { block: usize },
    #[error("elevation table needs 16 entries, got {0}")]
    InvalidCalibration(usize),
    #[error("invalid elevation angle: {0}")]
    ParseCalibration(String),
    #[error("elevation angle {degrees} of laser {laser} outside [-90, 90] degrees")]
    ElevationOutOfRange { laser: usize, degrees: f32 },
}

pub type DecodeResult<T> = Result<T, DecodeError>;
