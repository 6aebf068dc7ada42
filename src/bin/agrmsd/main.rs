use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod display;
mod io;
mod run;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.batch.verbose);

    let ctx = display::Context::detect().with_quiet(cli.batch.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match run::run(cli, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| display::LogWriter)
        .with_target(false)
        .without_time()
        .init();
}
