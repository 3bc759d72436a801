//! chiton — print the lowest total risk through a cave map.

use std::io::Write;

use chiton_lib::{Args, load, solve};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let grid = load(&args.input)?;
    for solution in solve(&grid, &args.config())? {
        println!("{solution}");
    }
    Ok(())
}
