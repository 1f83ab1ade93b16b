use std::process::exit;

use getopts::Options;

use crate::constants::DEFAULT_DATA_PORT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutType {
    Csv,
    Pcd,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub input: String,
    pub out_type: OutType,
    /// File with 16 elevation angles; the VLP-16 table is used when absent.
    pub calibration: Option<String>,
    pub port: u16,
}

pub fn parse_args(command_prefix: &str, args: &[String]) -> Args {
    let opts = options();
    match try_parse_args(&opts, args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help(opts, command_prefix);
            exit(0);
        }
        Err(message) => {
            eprintln!("{}", message);
            print_help(opts, command_prefix);
            exit(1);
        }
    }
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("o", "output", "output type", "csv|pcd");
    opts.optopt("c", "calibration", "elevation angle file (16 values in degrees)", "FILE");
    opts.optopt("p", "port", "udp data port", "PORT");
    opts.optflag("h", "help", "print this help menu");
    opts
}

/// Returns `Ok(None)` when only the help text should be shown.
fn try_parse_args(opts: &Options, args: &[String]) -> Result<Option<Args>, String> {
    let matches = opts.parse(args).map_err(|e| e.to_string())?;
    if matches.opt_present("h") || matches.free.is_empty() {
        return Ok(None);
    }
    let input = matches.free[0].clone();
    let out_type = match matches.opt_str("o").as_deref() {
        None | Some("csv") => OutType::Csv,
        Some("pcd") => OutType::Pcd,
        Some(other) => return Err(format!("unknown output type: {}", other)),
    };
    let port = match matches.opt_str("p") {
        Some(port) => port.parse().map_err(|_| format!("invalid port: {}", port))?,
        None => DEFAULT_DATA_PORT,
    };
    let calibration = matches.opt_str("c");
    Ok(Some(Args { input, out_type, calibration, port }))
}

fn print_help(opts: Options, command_prefix: &str) {
    print!("{}", opts.usage(format!("Usage: {} [options] <input>", command_prefix).as_str()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>, String> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        try_parse_args(&options(), &args)
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["capture.pcap"]).unwrap().unwrap();
        assert_eq!(args.input, "capture.pcap");
        assert_eq!(args.out_type, OutType::Csv);
        assert_eq!(args.calibration, None);
        assert_eq!(args.port, 2368);
    }

    #[test]
    fn test_all_options() {
        let args = parse(&["-o", "pcd", "-c", "lasers.txt", "-p", "2369", "capture.pcap"])
            .unwrap()
            .unwrap();
        assert_eq!(args.out_type, OutType::Pcd);
        assert_eq!(args.calibration.as_deref(), Some("lasers.txt"));
        assert_eq!(args.port, 2369);
    }

    #[test]
    fn test_help_and_missing_input() {
        assert_eq!(parse(&["-h"]), Ok(None));
        assert_eq!(parse(&[]), Ok(None));
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse(&["-o", "hdf", "capture.pcap"]).is_err());
        assert!(parse(&["-p", "70000", "capture.pcap"]).is_err());
        assert!(parse(&["--unknown", "capture.pcap"]).is_err());
    }
}
