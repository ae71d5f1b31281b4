mod commands;
mod config;
mod glob;
mod image_io;
mod manifest;
mod options;
mod packing;
mod sprite_name;

use std::process;

use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    env_logger::init();

    let options = Options::from_args();

    match run(options) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    match options.command {
        Subcommand::Pack(pack_options) => commands::pack(pack_options)?,
        Subcommand::PackImages(pack_options) => commands::pack_images(pack_options)?,
    }

    Ok(())
}
