mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod ledger;
mod limits;
mod logging;
mod models;
mod room;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, ReportCommands};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let account = cli.account.as_deref();
    let result = match cli.command {
        Commands::Init {
            data_dir,
            limits_file,
        } => cli::init::run(data_dir, account, limits_file),
        Commands::Limits => cli::limits::run(),
        Commands::StartYear { year } => cli::start_year::run(account, year),
        Commands::Add {
            amount,
            kind,
            date,
            institution,
        } => cli::transactions::add(account, amount, kind, date.as_deref(), &institution),
        Commands::List => cli::transactions::list(account),
        Commands::Delete { id } => cli::transactions::delete(account, id),
        Commands::Clear { yes } => cli::transactions::clear(account, yes),
        Commands::Import { file } => cli::import::run(account, &file),
        Commands::Report { command } => match command {
            ReportCommands::Summary { year } => cli::report::summary(account, year),
            ReportCommands::Years { year } => cli::report::years(account, year),
        },
        Commands::Status => cli::status::run(account),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
