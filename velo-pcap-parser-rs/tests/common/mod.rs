//! Helpers for building synthetic VLP-16 packets and pcap captures.

#![allow(dead_code)]

use velo_pcap_parser_rs::constants::*;

pub struct PacketBuilder {
    data: Vec<u8>,
}

impl PacketBuilder {
    pub fn new() -> Self {
        let mut data = vec![0u8; PACKET_SIZE];
        for block in 0..BLOCKS_PER_PACKET {
            data[block * BLOCK_SIZE] = 0xFF;
            data[block * BLOCK_SIZE + 1] = 0xEE;
        }
        data[RETURN_MODE_OFFSET] = 0x37;
        data[SENSOR_MODEL_OFFSET] = 0x22;
        PacketBuilder { data }
    }

    /// Sets block azimuths starting at `start` (0.01 degree units), stepping by `step`.
    pub fn azimuths(mut self, start: u16, step: u16) -> Self {
        for block in 0..BLOCKS_PER_PACKET {
            let azimuth = (start as u32 + step as u32 * block as u32) % 36000;
            self = self.azimuth(block, azimuth as u16);
        }
        self
    }

    pub fn azimuth(mut self, block: usize, raw: u16) -> Self {
        let start = block * BLOCK_SIZE + BLOCK_AZIMUTH_OFFSET;
        self.data[start..start + 2].copy_from_slice(&raw.to_le_bytes());
        self
    }

    pub fn channel(mut self, block: usize, channel: usize, distance_raw: u16, reflectivity: u8) -> Self {
        let start = block * BLOCK_SIZE + BLOCK_CHANNELS_OFFSET + channel * CHANNEL_SIZE;
        self.data[start..start + 2].copy_from_slice(&distance_raw.to_le_bytes());
        self.data[start + 2] = reflectivity;
        self
    }

    pub fn timestamp(mut self, micros: u32) -> Self {
        self.data[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + TIMESTAMP_SIZE].copy_from_slice(&micros.to_be_bytes());
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// Wraps a UDP payload into an Ethernet/IPv4/UDP frame.
pub fn udp_frame(destination_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0xFF; 6];
    frame.extend_from_slice(&[0x60, 0x76, 0x88, 0x00, 0x00, 0x00]);
    frame.extend_from_slice(&[0x08, 0x00]);

    let total = (20 + 8 + payload.len()) as u16;
    frame.extend_from_slice(&[0x45, 0x00]);
    frame.extend_from_slice(&total.to_be_bytes());
    frame.extend_from_slice(&[0, 0, 0x40, 0, 64, 17, 0, 0]);
    frame.extend_from_slice(&[192, 168, 1, 201]);
    frame.extend_from_slice(&[255, 255, 255, 255]);

    frame.extend_from_slice(&2368u16.to_be_bytes());
    frame.extend_from_slice(&destination_port.to_be_bytes());
    frame.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(payload);
    frame
}

/// Builds a little-endian legacy pcap file with an Ethernet link type.
pub fn pcap_file(frames: &[Vec<u8>]) -> Vec<u8> {
    let mut file = Vec::new();
    file.extend_from_slice(&0xa1b2c3d4u32.to_le_bytes());
    file.extend_from_slice(&2u16.to_le_bytes());
    file.extend_from_slice(&4u16.to_le_bytes());
    file.extend_from_slice(&0i32.to_le_bytes());
    file.extend_from_slice(&0u32.to_le_bytes());
    file.extend_from_slice(&65535u32.to_le_bytes());
    file.extend_from_slice(&1u32.to_le_bytes());
    for (i, frame) in frames.iter().enumerate() {
        file.extend_from_slice(&1_700_000_000u32.to_le_bytes());
        file.extend_from_slice(&(i as u32 * 1327).to_le_bytes());
        file.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        file.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        file.extend_from_slice(frame);
    }
    file
}
