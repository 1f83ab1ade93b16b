use anyhow::Error;
use indicatif::{ProgressBar, ProgressStyle};

pub trait ProgressBarExt {
    fn new_packet_progress_bar() -> Result<ProgressBar, Error>;
}

impl ProgressBarExt for ProgressBar {
    fn new_packet_progress_bar() -> Result<ProgressBar, Error> {
        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.cyan} {pos:>9} packets {msg}")?,
        );
        Ok(progress_bar)
    }
}
