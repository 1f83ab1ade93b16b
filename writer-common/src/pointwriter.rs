use anyhow::Error;

use crate::velopoint::VeloPoint;

mod csvwriter;
mod pcdwriter;
mod progressbarext;

pub use csvwriter::*;
pub use pcdwriter::*;
pub use progressbarext::ProgressBarExt;

pub trait PointWriter {
    fn write_row(&mut self, row: VeloPoint) -> Result<(), Error>;
    fn finalize(&mut self) -> Result<(), Error>;
}
