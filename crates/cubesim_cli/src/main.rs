//! Command-line interface for simulating NxNxN cubes.

mod cli;
mod settings;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    color_eyre::install()?;
    env_logger::builder().init();

    let args = cli::Args::parse();
    cli::exec(args)
}
