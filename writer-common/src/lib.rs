pub mod pointwriter;
pub mod velopoint;
