use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use pcd_rs::{DynRecord, DynWriter, Field, Schema, ValueKind, WriterInit};

use crate::{pointwriter::PointWriter, velopoint::VeloPoint};

/// Writes a single ASCII PCD file on finalize.
///
/// The PCD header carries the point count, so rows are spooled to an
/// anonymous temporary file until the total is known.
pub struct PcdWriter {
    path: PathBuf,
    spool: BufWriter<File>,
    count: u64,
}

impl PcdWriter {
    pub fn create(base_dir: &str, file_prefix: &str) -> Result<PcdWriter, Error> {
        let spool = tempfile::tempfile().context("failed to create pcd spool file")?;
        Ok(PcdWriter {
            path: Path::new(base_dir).join(format!("{}.pcd", file_prefix)),
            spool: BufWriter::with_capacity(262144, spool),
            count: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_to_file(&mut self) -> Result<(), Error> {
        self.spool.flush()?;
        let file = self.spool.get_mut();
        file.seek(SeekFrom::Start(0))?;
        let mut reader = BufReader::with_capacity(262144, &*file);

        let schema = vec![
            ("x", ValueKind::F32, 1),
            ("y", ValueKind::F32, 1),
            ("z", ValueKind::F32, 1),
            ("intensity", ValueKind::U8, 1),
            ("channel", ValueKind::U8, 1),
            ("azimuth", ValueKind::U16, 1),
            ("altitude", ValueKind::I16, 1),
            ("distance_m", ValueKind::F32, 1),
            ("timestamp", ValueKind::F64, 1),
        ];
        let mut writer: DynWriter<_> = WriterInit {
            width: self.count,
            height: 1,
            viewpoint: Default::default(),
            data_kind: pcd_rs::DataKind::Ascii,
            schema: Some(Schema::from_iter(schema)),
        }
        .create(&self.path)
        .with_context(|| format!("failed to create {}", self.path.display()))?;
        for _ in 0..self.count {
            let row = read_spooled(&mut reader)?;
            writer.push(&to_record(&row))?;
        }
        writer.finish()?;
        Ok(())
    }
}

impl PointWriter for PcdWriter {
    fn write_row(&mut self, row: VeloPoint) -> Result<(), Error> {
        let spool = &mut self.spool;
        spool.write_f32::<LittleEndian>(row.x)?;
        spool.write_f32::<LittleEndian>(row.y)?;
        spool.write_f32::<LittleEndian>(row.z)?;
        spool.write_u8(row.intensity)?;
        spool.write_u8(row.channel)?;
        spool.write_u16::<LittleEndian>(row.azimuth)?;
        spool.write_i16::<LittleEndian>(row.altitude)?;
        spool.write_f32::<LittleEndian>(row.distance_m)?;
        spool.write_u64::<LittleEndian>(row.timestamp)?;
        self.count += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), Error> {
        self.write_to_file()?;
        let file = self.spool.get_mut();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        self.count = 0;
        Ok(())
    }
}

fn read_spooled<R: ReadBytesExt>(reader: &mut R) -> Result<VeloPoint, Error> {
    let x = reader.read_f32::<LittleEndian>()?;
    let y = reader.read_f32::<LittleEndian>()?;
    let z = reader.read_f32::<LittleEndian>()?;
    let intensity = reader.read_u8()?;
    let channel = reader.read_u8()?;
    let azimuth = reader.read_u16::<LittleEndian>()?;
    let altitude = reader.read_i16::<LittleEndian>()?;
    let distance_m = reader.read_f32::<LittleEndian>()?;
    let timestamp = reader.read_u64::<LittleEndian>()?;
    Ok(VeloPoint { intensity, channel, timestamp, azimuth, altitude, distance_m, x, y, z })
}

fn to_record(row: &VeloPoint) -> DynRecord {
    DynRecord(vec![
        Field::F32(vec![row.x]),
        Field::F32(vec![row.y]),
        Field::F32(vec![row.z]),
        Field::U8(vec![row.intensity]),
        Field::U8(vec![row.channel]),
        Field::U16(vec![row.azimuth]),
        Field::I16(vec![row.altitude]),
        Field::F32(vec![row.distance_m]),
        Field::F64(vec![row.timestamp as f64]),
    ])
}
