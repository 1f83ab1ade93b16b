use std::fs::{self, File};
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Context, Error};
use byteorder::{BigEndian, ByteOrder};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::*;
use writer_common::pointwriter::{CsvWriter, PcdWriter, PointWriter, ProgressBarExt};
use writer_common::velopoint::VeloPoint;

use crate::calibration::ElevationTable;
use crate::constants::{
    AZIMUTH_UNITS_PER_DEGREE, ETHER_HEADER_SIZE, PACKET_SIZE, UDP_HEADER_SIZE,
};
use crate::decoder::PacketDecoder;
use crate::packet::DecodedPacket;
use crate::projection::{returns, LaserReturn};
use crate::{Args, OutType};

const IPV4_ETHER_TYPE: [u8; 2] = [0x08, 0x00];
const UDP_PROTOCOL: u8 = 17;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub packets: u64,
    pub decoded: u64,
    pub dropped: u64,
    pub points: u64,
}

pub fn run(args: Args) -> Result<RunSummary, Error> {
    let input_file_path = Path::new(&args.input);
    let stem = input_file_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("invalid input file name: {}", args.input))?;
    let mut file_dir = input_file_path
        .parent()
        .and_then(|dir| dir.to_str())
        .unwrap_or("")
        .to_string();
    if file_dir.is_empty() {
        file_dir = ".".to_string();
    }

    let elevation = load_elevation_table(args.calibration.as_deref())?;
    let decoder = PacketDecoder::new(elevation);

    // the output is only created once the input is known to be a pcap file
    let reader = open_pcap_file(&args.input)?;
    let mut writer: Box<dyn PointWriter> = match args.out_type {
        OutType::Csv => Box::new(CsvWriter::create(&file_dir, stem)?),
        OutType::Pcd => Box::new(PcdWriter::create(&file_dir, stem)?),
    };

    let time_start = Instant::now();
    let summary = read_pcap_file(reader, &args.input, args.port, &decoder, writer.as_mut())?;
    writer.finalize()?;
    let duration = time_start.elapsed();

    info!(
        "{} packets have been processed in {:?} ({} decoded, {} dropped, {} points)",
        summary.packets, duration, summary.decoded, summary.dropped, summary.points
    );
    Ok(summary)
}

pub fn load_elevation_table(path: Option<&str>) -> Result<ElevationTable, Error> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read calibration file {}", path))?;
            let table = text
                .parse::<ElevationTable>()
                .with_context(|| format!("invalid calibration file {}", path))?;
            info!("loaded elevation angles from {}: {:?}", path, table.degrees());
            Ok(table)
        }
        None => Ok(ElevationTable::vlp16()),
    }
}

fn open_pcap_file(path: &str) -> Result<LegacyPcapReader<File>, Error> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
    LegacyPcapReader::new(65536, file)
        .map_err(|e| anyhow!("failed to read pcap header of {}: {:?}", path, e))
}

fn read_pcap_file(
    mut reader: LegacyPcapReader<File>,
    path: &str,
    port: u16,
    decoder: &PacketDecoder,
    writer: &mut dyn PointWriter,
) -> Result<RunSummary, Error> {
    let progress_bar = ProgressBar::new_packet_progress_bar()?;
    let mut summary = RunSummary::default();
    let mut sensor_logged = false;

    loop {
        match reader.next() {
            Ok((offset, block)) => {
                if let PcapBlockOwned::Legacy(packet) = block {
                    if let Some(payload) = udp_payload(packet.data, port) {
                        summary.packets += 1;
                        progress_bar.inc(1);
                        match decoder.decode(payload) {
                            Ok(decoded) => {
                                if !sensor_logged {
                                    sensor_logged = true;
                                    info!(
                                        "sensor {}, return mode {}",
                                        decoded.sensor_model.name(),
                                        decoded.return_mode
                                    );
                                }
                                summary.decoded += 1;
                                summary.points += write_packet(&decoded, decoder, writer)?;
                            }
                            Err(e) => {
                                summary.dropped += 1;
                                if payload.len() == PACKET_SIZE {
                                    warn!("dropping packet {}: {}", summary.packets, e);
                                } else {
                                    debug!("skipping packet {}: {}", summary.packets, e);
                                }
                            }
                        }
                    }
                }
                reader.consume(offset);
            }
            Err(PcapError::Eof) => break,
            Err(PcapError::Incomplete) => {
                reader
                    .refill()
                    .map_err(|e| anyhow!("error while reading {}: {:?}", path, e))?;
            }
            Err(e) => return Err(anyhow!("error while reading {}: {:?}", path, e)),
        }
    }
    progress_bar.finish_with_message(format!("{} points", summary.points));
    Ok(summary)
}

fn write_packet(
    packet: &DecodedPacket,
    decoder: &PacketDecoder,
    writer: &mut dyn PointWriter,
) -> Result<u64, Error> {
    let timestamp_ns = packet.timestamp_us as u64 * 1000;
    let mut points = 0;
    for laser_return in returns(packet, decoder.elevation())? {
        writer.write_row(to_velo_point(&laser_return, timestamp_ns))?;
        points += 1;
    }
    Ok(points)
}

/// Converts a return to the output record, millimetres to metres.
pub fn to_velo_point(laser_return: &LaserReturn, timestamp_ns: u64) -> VeloPoint {
    VeloPoint {
        intensity: laser_return.reflectivity,
        channel: laser_return.laser,
        timestamp: timestamp_ns,
        azimuth: to_centidegrees(laser_return.azimuth),
        altitude: (laser_return.elevation * AZIMUTH_UNITS_PER_DEGREE).round() as i16,
        distance_m: laser_return.distance / 1000.0,
        x: laser_return.point.x / 1000.0,
        y: laser_return.point.y / 1000.0,
        z: laser_return.point.z / 1000.0,
    }
}

/// Rounds to 0.01 degree steps, folding 359.995 and above back to 0.
fn to_centidegrees(azimuth: f32) -> u16 {
    ((azimuth * AZIMUTH_UNITS_PER_DEGREE).round() as u32 % 36000) as u16
}

/// Extracts the UDP payload of an Ethernet/IPv4 frame sent to `port`.
pub fn udp_payload(frame: &[u8], port: u16) -> Option<&[u8]> {
    if frame.len() < ETHER_HEADER_SIZE + 20 || frame[12..14] != IPV4_ETHER_TYPE {
        // not ipv4
        return None;
    }
    let ether_data = &frame[ETHER_HEADER_SIZE..];
    // ipv4 header length is variable (20 bytes without options)
    let ip_header_size = ((ether_data[0] & 15) * 4) as usize;
    let packet_size = BigEndian::read_u16(&ether_data[2..4]) as usize;
    if ether_data[9] != UDP_PROTOCOL
        || packet_size > ether_data.len()
        || packet_size < ip_header_size + UDP_HEADER_SIZE
    {
        return None;
    }
    let ip_data = &ether_data[ip_header_size..packet_size];
    let destination_port = BigEndian::read_u16(&ip_data[2..4]);
    if destination_port != port {
        return None;
    }
    Some(&ip_data[UDP_HEADER_SIZE..])
}
