use imagecheck::{run, Config, Error, Mediawiki};
use std::env::args;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

fn check() -> Result<(), Error> {
    let config = match args().nth(1) {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let mw = Mediawiki::new(config)?;
    let config = mw.config();
    run(&mw, &config.input, &config.output)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    match check() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ Error::MissingInput(_)) => {
            warn!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
