//! Main entry point for the colpatch cli tool

mod cli;
mod patch;
mod util;

use std::io::Write;

use clap::Parser;
use env_logger::{Builder, Env};
use human_panic::setup_panic;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    setup_panic!();

    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let args = Cli::parse();
    patch::handle_patch_command(args)
}
