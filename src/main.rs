use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expenses_home().path();

    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),
        Command::Add(add_args) => commands::add(Config::load(home)?, add_args.clone())?.print(),
        Command::Update(update_args) => {
            commands::update(Config::load(home)?, update_args.clone())?.print()
        }
        Command::Delete(delete_args) => {
            commands::delete(Config::load(home)?, delete_args.clone())?.print()
        }
        Command::List(list_args) => commands::list(Config::load(home)?, list_args.clone())?.print(),
        Command::Summary => commands::summary(Config::load(home)?)?.print(),
        Command::Vendors => commands::vendors(Config::load(home)?)?.print(),
        Command::Clear => commands::clear(Config::load(home)?)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        // RUST_LOG exists; use it.
        Some(_) => EnvFilter::from_default_env(),
        // Otherwise apply the level to this crate only.
        None => EnvFilter::new(format!(
            "{}={level},expense_tracker={level}",
            env!("CARGO_CRATE_NAME")
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
