use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};

use crate::{pointwriter::PointWriter, velopoint::VeloPoint};

pub struct CsvWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CsvWriter {
    pub fn create(base_dir: &str, file_prefix: &str) -> Result<CsvWriter, Error> {
        let path = Path::new(base_dir).join(format!("{}.csv", file_prefix));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::with_capacity(262144, file);
        writeln!(writer, "{}", VeloPoint::get_csv_header())?;
        Ok(CsvWriter { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PointWriter for CsvWriter {
    fn write_row(&mut self, row: VeloPoint) -> Result<(), Error> {
        writeln!(self.writer, "{}", row.to_csv_string())?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}
