use logo_fetcher::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    logging::init_logging();

    if let Err(err) = Cli::run_from_args() {
        eprintln!("logo-fetcher error: {:#}", err);
        std::process::exit(1);
    }
}
