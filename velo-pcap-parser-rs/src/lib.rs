//! Decoder for Velodyne VLP-16 data packets.
//!
//! One 1206-byte UDP payload goes through three stages:
//!
//! 1. [`packet::decode`] slices the payload into 12 firing blocks, the
//!    timestamp and the factory bytes.
//! 2. [`interpolate::interpolate`] reconstructs the azimuth of each block's
//!    second firing sequence.
//! 3. [`projection::project`] turns every return into a Cartesian point.
//!
//! [`PacketDecoder`] runs all three with a fixed elevation table. The
//! `parseargs` and `run` modules drive it from a pcap capture.

pub mod calibration;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod interpolate;
pub mod packet;
pub mod parseargs;
pub mod projection;
pub mod run;

pub use calibration::ElevationTable;
pub use decoder::PacketDecoder;
pub use error::{DecodeError, DecodeResult};
pub use packet::{decode, ChannelReading, DecodedPacket, FiringBlock, ReturnMode, SensorModel};
pub use parseargs::*;
pub use projection::{project, project_into, CartesianPoint, LaserReturn};
pub use run::*;
