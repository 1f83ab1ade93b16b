#[derive(Clone, PartialEq, Debug)]
pub struct VeloPoint {
    pub intensity: u8,   // calibrated reflectivity. values: 0-255
    pub channel: u8,     // a.k.a. laser id
    pub timestamp: u64,  // packet time. units: nanoseconds
    pub azimuth: u16,    // horizontal angle. units: 0.01 degrees
    pub altitude: i16,   // vertical angle. units: 0.01 degrees
    pub distance_m: f32, // distance. units: meters
    pub x: f32,          // cartesian coordinates (right-handed coordinate system)
    pub y: f32,          // units: meters
    pub z: f32,          //
}

impl VeloPoint {
    pub fn get_csv_header() -> String {
        "intensity,channel,timestamp,azimuth,altitude,distance_m,x,y,z".to_string()
    }

    pub fn to_csv_string(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            self.intensity,
            self.channel,
            self.timestamp,
            self.azimuth,
            self.altitude,
            self.distance_m,
            self.x,
            self.y,
            self.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row_matches_header() {
        let point = VeloPoint {
            intensity: 128,
            channel: 3,
            timestamp: 1_000_000_000,
            azimuth: 10000,
            altitude: -1500,
            distance_m: 10.0,
            x: 1.5,
            y: -2.25,
            z: 0.0,
        };
        let header_fields = VeloPoint::get_csv_header().split(',').count();
        let row = point.to_csv_string();
        assert_eq!(row.split(',').count(), header_fields);
        assert_eq!(row, "128,3,1000000000,10000,-1500,10,1.5,-2.25,0");
    }
}
