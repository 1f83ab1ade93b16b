//! Data packet layout and parsing.
//!
//! construction (1206 bytes):
//! - data blocks (1200 bytes = 12 * 100 bytes):
//!   - flag (2 bytes) [0xFFEE, ignored]
//!   - azimuth (2 bytes, little endian) [unit: 0.01 degree]
//!   - channels (96 bytes = 32 * 3 bytes):
//!     - distance (2 bytes, little endian) [unit: 2 mm]
//!     - reflectivity (1 byte)
//! - timestamp (4 bytes, most significant byte first) [unit: us]
//! - factory (2 bytes):
//!   - return mode (1 byte)
//!   - sensor model (1 byte)

use std::fmt;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::trace;

use crate::constants::*;
use crate::error::{DecodeError, DecodeResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnMode {
    Strongest,
    Last,
    Dual,
    Unknown(u8),
}

impl From<u8> for ReturnMode {
    fn from(value: u8) -> Self {
        match value {
            0x37 => ReturnMode::Strongest,
            0x38 => ReturnMode::Last,
            0x39 => ReturnMode::Dual,
            val => ReturnMode::Unknown(val),
        }
    }
}

impl fmt::Display for ReturnMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReturnMode::Strongest => write!(f, "Strongest"),
            ReturnMode::Last => write!(f, "Last"),
            ReturnMode::Dual => write!(f, "Dual"),
            ReturnMode::Unknown(val) => write!(f, "Unknown return mode: {:#04x}", val),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorModel {
    Hdl32e,
    Vlp16,
    PuckHiRes,
    Vlp32c,
    Velarray,
    Vls128,
    Unknown(u8),
}

impl From<u8> for SensorModel {
    fn from(value: u8) -> Self {
        match value {
            0x21 => SensorModel::Hdl32e,
            0x22 => SensorModel::Vlp16,
            0x24 => SensorModel::PuckHiRes,
            0x28 => SensorModel::Vlp32c,
            0x31 => SensorModel::Velarray,
            0xA1 => SensorModel::Vls128,
            val => SensorModel::Unknown(val),
        }
    }
}

impl SensorModel {
    pub fn name(&self) -> &'static str {
        match self {
            SensorModel::Hdl32e => "HDL-32E",
            SensorModel::Vlp16 => "VLP-16",
            SensorModel::PuckHiRes => "Puck Hi-Res",
            SensorModel::Vlp32c => "VLP-32C",
            SensorModel::Velarray => "Velarray",
            SensorModel::Vls128 => "VLS-128",
            SensorModel::Unknown(_) => "unknown",
        }
    }
}

/// One laser measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChannelReading {
    /// Distance in millimetres. Zero means no return.
    pub distance: f32,
    pub reflectivity: u8,
}

impl ChannelReading {
    pub fn is_return(&self) -> bool {
        self.distance != 0.0
    }
}

/// Two firing sequences of 16 lasers sharing one measured azimuth.
#[derive(Clone, Debug, PartialEq)]
pub struct FiringBlock {
    /// Azimuth of the first firing sequence in degrees.
    pub azimuth1: f32,
    /// Azimuth of the second firing sequence, set by [`crate::interpolate`].
    pub azimuth2: Option<f32>,
    /// Channels 0-15 belong to the first sequence, 16-31 to the second.
    pub channels: [ChannelReading; CHANNELS_PER_BLOCK],
}

impl FiringBlock {
    /// Azimuth used for the given channel index, if known.
    pub fn azimuth_for(&self, channel: usize) -> Option<f32> {
        if channel < LASERS_PER_FIRING {
            Some(self.azimuth1)
        } else {
            self.azimuth2
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPacket {
    pub blocks: [FiringBlock; BLOCKS_PER_PACKET],
    /// Microseconds since the top of the hour, as reported by the sensor.
    pub timestamp_us: u32,
    pub return_mode: ReturnMode,
    pub sensor_model: SensorModel,
}

impl DecodedPacket {
    /// Timestamp in seconds.
    pub fn timestamp(&self) -> f64 {
        self.timestamp_us as f64 / MICROS_PER_SECOND
    }

    pub fn is_interpolated(&self) -> bool {
        self.blocks.iter().all(|block| block.azimuth2.is_some())
    }

    pub fn return_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|block| block.channels.iter())
            .filter(|channel| channel.is_return())
            .count()
    }

    /// Checks that every known azimuth lies in [0, 360).
    pub fn check_geometry(&self) -> DecodeResult<()> {
        for (index, block) in self.blocks.iter().enumerate() {
            for azimuth in std::iter::once(block.azimuth1).chain(block.azimuth2) {
                if !(0.0..360.0).contains(&azimuth) {
                    return Err(DecodeError::MalformedGeometry { block: index, azimuth });
                }
            }
        }
        Ok(())
    }
}

/// Read-only view over a buffer that is known to hold one data packet.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DataPacketSlice<'a> {
    slice: &'a [u8],
}

impl<'a> DataPacketSlice<'a> {
    pub fn from_slice(slice: &'a [u8]) -> DecodeResult<DataPacketSlice<'a>> {
        if slice.len() != PACKET_SIZE {
            return Err(DecodeError::InvalidPacketLength {
                expected: PACKET_SIZE,
                actual: slice.len(),
            });
        }
        Ok(DataPacketSlice { slice })
    }

    fn block(&self, index: usize) -> &'a [u8] {
        let start = index * BLOCK_SIZE;
        &self.slice[start..start + BLOCK_SIZE]
    }

    pub fn timestamp_us(&self) -> u32 {
        BigEndian::read_u32(&self.slice[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + TIMESTAMP_SIZE])
    }

    pub fn return_mode(&self) -> ReturnMode {
        ReturnMode::from(self.slice[RETURN_MODE_OFFSET])
    }

    pub fn sensor_model(&self) -> SensorModel {
        SensorModel::from(self.slice[SENSOR_MODEL_OFFSET])
    }

    pub fn to_packet(&self) -> DecodedPacket {
        DecodedPacket {
            blocks: std::array::from_fn(|index| parse_block(self.block(index))),
            timestamp_us: self.timestamp_us(),
            return_mode: self.return_mode(),
            sensor_model: self.sensor_model(),
        }
    }
}

/// Parses one raw packet. Second azimuths are left unset.
pub fn decode(raw: &[u8]) -> DecodeResult<DecodedPacket> {
    let packet = DataPacketSlice::from_slice(raw)?.to_packet();
    trace!(
        "decoded packet: timestamp {}us, {}, {}",
        packet.timestamp_us,
        packet.return_mode,
        packet.sensor_model.name()
    );
    Ok(packet)
}

fn parse_block(block: &[u8]) -> FiringBlock {
    let azimuth_raw =
        LittleEndian::read_u16(&block[BLOCK_AZIMUTH_OFFSET..BLOCK_AZIMUTH_OFFSET + 2]);
    let channels = std::array::from_fn(|channel| {
        let start = BLOCK_CHANNELS_OFFSET + channel * CHANNEL_SIZE;
        parse_channel(&block[start..start + CHANNEL_SIZE])
    });
    FiringBlock {
        azimuth1: azimuth_raw as f32 / AZIMUTH_UNITS_PER_DEGREE,
        azimuth2: None,
        channels,
    }
}

fn parse_channel(channel: &[u8]) -> ChannelReading {
    let distance_raw = LittleEndian::read_u16(&channel[0..2]);
    ChannelReading {
        distance: distance_raw as f32 * DISTANCE_RESOLUTION,
        reflectivity: channel[2],
    }
}
