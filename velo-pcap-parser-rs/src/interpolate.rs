use crate::constants::BLOCKS_PER_PACKET;
use crate::packet::DecodedPacket;

const FULL_TURN: f32 = 360.0;

/// Fills in the second firing azimuth of every block.
///
/// Only the first firing sequence of a block carries an azimuth. The second
/// one is placed halfway to the next block's azimuth; the last block has no
/// successor and uses the average step of the others.
pub fn interpolate(packet: &mut DecodedPacket) {
    let gaps = BLOCKS_PER_PACKET - 1;
    let mut average_delta = 0.0;
    for i in 0..gaps {
        let start = packet.blocks[i].azimuth1;
        let mut end = packet.blocks[i + 1].azimuth1;
        // rollover from 359.99 to 0
        if end < start {
            end += FULL_TURN;
        }
        let delta = (end - start) / 2.0;
        packet.blocks[i].azimuth2 = Some(wrap(start + delta));
        average_delta += delta;
    }
    average_delta /= gaps as f32;

    let last = &mut packet.blocks[BLOCKS_PER_PACKET - 1];
    last.azimuth2 = Some(wrap(last.azimuth1 + average_delta));
}

fn wrap(azimuth: f32) -> f32 {
    if azimuth >= FULL_TURN {
        azimuth - FULL_TURN
    } else {
        azimuth
    }
}
