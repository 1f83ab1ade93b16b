//! Byte layout of a VLP-16 data packet and related sensor constants.
//!
//! All offsets are relative to the start of the UDP payload.

/// Number of firing blocks in one data packet.
pub const BLOCKS_PER_PACKET: usize = 12;

/// Size of one firing block in bytes.
pub const BLOCK_SIZE: usize = 100;

/// Offset of the azimuth word inside a block (after the 2-byte flag).
pub const BLOCK_AZIMUTH_OFFSET: usize = 2;

/// Offset of the first channel record inside a block.
pub const BLOCK_CHANNELS_OFFSET: usize = 4;

/// Channel records per block: two firing sequences of 16 lasers.
pub const CHANNELS_PER_BLOCK: usize = 32;

/// Size of one channel record: distance (2 bytes) + reflectivity (1 byte).
pub const CHANNEL_SIZE: usize = 3;

/// Physical lasers fired in one firing sequence.
pub const LASERS_PER_FIRING: usize = 16;

/// Offset of the 4-byte timestamp, right after the blocks.
pub const TIMESTAMP_OFFSET: usize = BLOCKS_PER_PACKET * BLOCK_SIZE;

/// Size of the timestamp field in bytes.
pub const TIMESTAMP_SIZE: usize = 4;

/// Offset of the return mode byte.
pub const RETURN_MODE_OFFSET: usize = TIMESTAMP_OFFSET + TIMESTAMP_SIZE;

/// Offset of the sensor model byte.
pub const SENSOR_MODEL_OFFSET: usize = RETURN_MODE_OFFSET + 1;

/// Total payload size of one data packet (1206 bytes).
pub const PACKET_SIZE: usize = SENSOR_MODEL_OFFSET + 1;

/// Raw azimuth units per degree (0.01 degree resolution).
pub const AZIMUTH_UNITS_PER_DEGREE: f32 = 100.0;

/// Raw distance count to millimetres (2 mm resolution).
pub const DISTANCE_RESOLUTION: f32 = 2.0;

/// Microseconds per second for timestamp conversion.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Maximum points one packet can produce.
pub const POINTS_PER_PACKET: usize = BLOCKS_PER_PACKET * CHANNELS_PER_BLOCK;

/// VLP-16 laser elevation angles in degrees, indexed by laser id.
pub const VLP16_ELEVATION_DEGREES: [f32; LASERS_PER_FIRING] = [
    -15.0, 1.0, -13.0, 3.0, -11.0, 5.0, -9.0, 7.0, -7.0, 9.0, -5.0, 11.0, -3.0, 13.0, -1.0, 15.0,
];

/// Largest magnitude a calibrated elevation angle may have.
pub const MAX_ELEVATION_DEGREES: f32 = 90.0;

/// Default UDP port of the data stream.
pub const DEFAULT_DATA_PORT: u16 = 2368;

/// Ethernet II header length.
pub const ETHER_HEADER_SIZE: usize = 14;

/// UDP header length.
pub const UDP_HEADER_SIZE: usize = 8;
