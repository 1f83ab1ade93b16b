use log::debug;

use crate::calibration::ElevationTable;
use crate::error::DecodeResult;
use crate::interpolate::interpolate;
use crate::packet::{decode, DecodedPacket, ReturnMode};
use crate::projection::{project_into, CartesianPoint};

/// Runs the parse, interpolate and project pipeline for single packets.
///
/// The decoder only holds its calibration, so one instance can be shared
/// between threads or cloned per thread.
#[derive(Clone, Debug, Default)]
pub struct PacketDecoder {
    elevation: ElevationTable,
}

impl PacketDecoder {
    pub fn new(elevation: ElevationTable) -> PacketDecoder {
        PacketDecoder { elevation }
    }

    pub fn elevation(&self) -> &ElevationTable {
        &self.elevation
    }

    /// Parses and interpolates one packet and checks its azimuths.
    pub fn decode(&self, raw: &[u8]) -> DecodeResult<DecodedPacket> {
        let mut packet = decode(raw)?;
        interpolate(&mut packet);
        packet.check_geometry()?;
        if let ReturnMode::Unknown(mode) = packet.return_mode {
            debug!("unknown return mode {:#04x}", mode);
        }
        Ok(packet)
    }

    pub fn points(&self, raw: &[u8]) -> DecodeResult<Vec<CartesianPoint>> {
        let mut points = Vec::new();
        self.points_into(raw, &mut points)?;
        Ok(points)
    }

    /// Like [`PacketDecoder::points`] but reuses `out`. On error `out` is left untouched.
    pub fn points_into(&self, raw: &[u8], out: &mut Vec<CartesianPoint>) -> DecodeResult<DecodedPacket> {
        let packet = self.decode(raw)?;
        project_into(&packet, &self.elevation, out)?;
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BLOCK_SIZE, PACKET_SIZE};
    use crate::error::DecodeError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_decoder_is_send_sync() {
        assert_send_sync::<PacketDecoder>();
    }

    #[test]
    fn test_decode_interpolates() {
        let raw = vec![0u8; PACKET_SIZE];
        let packet = PacketDecoder::default().decode(&raw).unwrap();
        assert!(packet.is_interpolated());
    }

    #[test]
    fn test_malformed_azimuth_is_reported() {
        let mut raw = vec![0u8; PACKET_SIZE];
        // 0xFFFF = 655.35 degrees
        raw[BLOCK_SIZE * 11 + 2] = 0xFF;
        raw[BLOCK_SIZE * 11 + 3] = 0xFF;
        let result = PacketDecoder::default().decode(&raw);
        assert!(matches!(result, Err(DecodeError::MalformedGeometry { .. })));
    }

    #[test]
    fn test_points_into_keeps_buffer_on_error() {
        let decoder = PacketDecoder::default();
        let mut points = vec![CartesianPoint::default(); 2];
        let result = decoder.points_into(&[0u8; 10], &mut points);
        assert_eq!(
            result,
            Err(DecodeError::InvalidPacketLength { expected: PACKET_SIZE, actual: 10 })
        );
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_empty_packet_has_no_points() {
        let raw = vec![0u8; PACKET_SIZE];
        let points = PacketDecoder::default().points(&raw).unwrap();
        assert!(points.is_empty());
    }
}
