use velo_pcap_parser_rs::{parse_args, run};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args("velo-pcap-parser-rs", &args[1..]);
    let summary = run(args)?;
    println!(
        "{} packets have been processed ({} points, {} dropped)",
        summary.packets, summary.points, summary.dropped
    );
    Ok(())
}
