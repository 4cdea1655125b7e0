use std::process::ExitCode;

use log::error;
use visitor_counter_server::{serve, ServeError, ServerOptions};

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let run = || -> Result<(), ServeError> {
        let options = ServerOptions::parse_args(std::env::args().skip(1))?;
        serve(options)
    };
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
