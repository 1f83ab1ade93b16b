use crate::calibration::ElevationTable;
use crate::constants::{LASERS_PER_FIRING, POINTS_PER_PACKET};
use crate::error::{DecodeError, DecodeResult};
use crate::packet::DecodedPacket;

/// Cartesian coordinates in the distance unit (millimetres).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CartesianPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CartesianPoint {
    /// Azimuth is measured clockwise from the y axis.
    pub fn from_spherical(distance: f32, elevation_deg: f32, azimuth_deg: f32) -> CartesianPoint {
        let omega = (elevation_deg as f64).to_radians();
        let alpha = (azimuth_deg as f64).to_radians();
        let distance = distance as f64;
        CartesianPoint {
            x: (distance * omega.cos() * alpha.sin()) as f32,
            y: (distance * omega.cos() * alpha.cos()) as f32,
            z: (distance * omega.sin()) as f32,
        }
    }
}

/// A projected measurement with the values it was computed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserReturn {
    pub block: usize,
    /// Channel inside the block, 0-31.
    pub channel: usize,
    /// Physical laser id, 0-15.
    pub laser: u8,
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    pub reflectivity: u8,
    pub point: CartesianPoint,
}

/// Iterates over all returns of an interpolated packet, block by block.
pub fn returns<'a>(
    packet: &'a DecodedPacket,
    elevation: &'a ElevationTable,
) -> DecodeResult<impl Iterator<Item = LaserReturn> + 'a> {
    if let Some(block) = packet.blocks.iter().position(|block| block.azimuth2.is_none()) {
        return Err(DecodeError::NotInterpolated { block });
    }

    Ok(packet.blocks.iter().enumerate().flat_map(move |(block_index, block)| {
        block
            .channels
            .iter()
            .enumerate()
            .filter(|(_, reading)| reading.is_return())
            .filter_map(move |(channel, reading)| {
                let azimuth = block.azimuth_for(channel)?;
                let omega = elevation.elevation(channel);
                Some(LaserReturn {
                    block: block_index,
                    channel,
                    laser: (channel % LASERS_PER_FIRING) as u8,
                    azimuth,
                    elevation: omega,
                    distance: reading.distance,
                    reflectivity: reading.reflectivity,
                    point: CartesianPoint::from_spherical(reading.distance, omega, azimuth),
                })
            })
    }))
}

/// Projects every return of the packet into `out`, replacing its contents.
pub fn project_into(
    packet: &DecodedPacket,
    elevation: &ElevationTable,
    out: &mut Vec<CartesianPoint>,
) -> DecodeResult<()> {
    let returns = returns(packet, elevation)?;
    out.clear();
    out.reserve(POINTS_PER_PACKET);
    out.extend(returns.map(|laser_return| laser_return.point));
    Ok(())
}

pub fn project(packet: &DecodedPacket, elevation: &ElevationTable) -> DecodeResult<Vec<CartesianPoint>> {
    let mut points = Vec::with_capacity(POINTS_PER_PACKET);
    project_into(packet, elevation, &mut points)?;
    Ok(points)
}
