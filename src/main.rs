use std::io;
use std::process::ExitCode;

use anyhow::Result;
use csvsift::{pipeline, Options};

fn main() -> ExitCode {
    env_logger::init();

    let options = Options::from_env();
    log::debug!("options: {options:?}");

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<()> {
    pipeline::run(options, io::stdout().lock())?;
    Ok(())
}
