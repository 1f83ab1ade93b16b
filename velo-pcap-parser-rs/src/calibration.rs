use std::str::FromStr;

use crate::constants::{LASERS_PER_FIRING, MAX_ELEVATION_DEGREES, VLP16_ELEVATION_DEGREES};
use crate::error::{DecodeError, DecodeResult};

/// Vertical mounting angle of each physical laser, in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationTable {
    degrees: [f32; LASERS_PER_FIRING],
}

impl ElevationTable {
    pub fn vlp16() -> ElevationTable {
        ElevationTable { degrees: VLP16_ELEVATION_DEGREES }
    }

    pub fn from_degrees(degrees: &[f32]) -> DecodeResult<ElevationTable> {
        let degrees: [f32; LASERS_PER_FIRING] = degrees
            .try_into()
            .map_err(|_| DecodeError::InvalidCalibration(degrees.len()))?;
        // NaN fails the range check too
        if let Some((laser, &angle)) = degrees
            .iter()
            .enumerate()
            .find(|(_, angle)| !(-MAX_ELEVATION_DEGREES..=MAX_ELEVATION_DEGREES).contains(*angle))
        {
            return Err(DecodeError::ElevationOutOfRange { laser, degrees: angle });
        }
        Ok(ElevationTable { degrees })
    }

    /// Elevation for a channel of a firing block; channels 16-31 reuse lasers 0-15.
    pub fn elevation(&self, channel: usize) -> f32 {
        self.degrees[channel % LASERS_PER_FIRING]
    }

    pub fn degrees(&self) -> &[f32; LASERS_PER_FIRING] {
        &self.degrees
    }
}

impl Default for ElevationTable {
    fn default() -> Self {
        ElevationTable::vlp16()
    }
}

/// Parses angles separated by commas or whitespace. `#` starts a comment.
impl FromStr for ElevationTable {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees = s
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<f32>()
                    .map_err(|_| DecodeError::ParseCalibration(token.to_string()))
            })
            .collect::<Result<Vec<f32>, DecodeError>>()?;
        ElevationTable::from_degrees(&degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vlp16_table() {
        let table = ElevationTable::default();
        assert_eq!(table.elevation(0), -15.0);
        assert_eq!(table.elevation(15), 15.0);
        assert_eq!(table.elevation(16), -15.0);
        assert_eq!(table.elevation(31), 15.0);
    }

    #[test]
    fn test_from_degrees_length() {
        assert_eq!(
            ElevationTable::from_degrees(&[0.0; 15]),
            Err(DecodeError::InvalidCalibration(15))
        );
        assert!(ElevationTable::from_degrees(&[0.0; 16]).is_ok());
    }

    #[test]
    fn test_parse() {
        let text = "# Puck LITE\n\
                    -15, 1, -13, 3\n\
                    -11 5 -9 7\n\
                    -7,9,-5,11  # upper half\n\
                    -3 13 -1 15\n";
        let table: ElevationTable = text.parse().unwrap();
        assert_eq!(table, ElevationTable::vlp16());
    }

    #[test]
    fn test_rejects_out_of_range_angles() {
        let mut degrees = VLP16_ELEVATION_DEGREES;
        degrees[3] = 90.5;
        assert_eq!(
            ElevationTable::from_degrees(&degrees),
            Err(DecodeError::ElevationOutOfRange { laser: 3, degrees: 90.5 })
        );

        degrees[3] = -90.0;
        assert!(ElevationTable::from_degrees(&degrees).is_ok());

        degrees[3] = f32::INFINITY;
        assert!(ElevationTable::from_degrees(&degrees).is_err());
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        let nan = "NaN 1 -13 3 -11 5 -9 7 -7 9 -5 11 -3 13 -1 15".parse::<ElevationTable>();
        assert!(matches!(nan, Err(DecodeError::ElevationOutOfRange { laser: 0, .. })));

        let inf = "-15 1 -13 3 -11 5 -9 7 -7 9 -5 11 -3 13 -1 inf".parse::<ElevationTable>();
        assert!(matches!(inf, Err(DecodeError::ElevationOutOfRange { laser: 15, .. })));
    }

    #[test]
    fn test_parse_invalid_angle() {
        let result = "1 2 x".parse::<ElevationTable>();
        assert_eq!(result, Err(DecodeError::ParseCalibration("x".to_string())));
    }
}
