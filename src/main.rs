use std::path::Path;

use clap::{Arg, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use quarry::extract::{Parser, Rule};
use quarry::problem;
use quarry::rules::{gaussian, molcas};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QUARRY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("quarry")
        .version(VERSION)
        .propagate_version(true)
        .about("Extract structured results from computational chemistry log files.")
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("molcas")
                .about("Extract RASSCF, MC-PDFT and RASSI results from an OpenMolcas log")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The log file containing the data to extract."),
                ),
        )
        .subcommand(
            Command::new("gaussian")
                .about("Extract dipole and TD-DFT excited state results from a Gaussian log")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The log file containing the data to extract."),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("molcas", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .expect("filename is a required argument");

            let root = molcas::log::log_rule(vec![
                Box::new(molcas::rasscf::RasscfModule::new()),
                Box::new(molcas::mcpdft::McpdftModule::new()),
                Box::new(molcas::rassi::RassiModule::new()),
                Box::new(molcas::general::MolProps::new()),
            ]);
            run(Path::new(filename), Parser::new(root));
        }
        Some(("gaussian", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .expect("filename is a required argument");

            let root = gaussian::log::log_rule(vec![
                Box::new(gaussian::general::DipoleMoment::new()),
                Box::new(gaussian::tddft::excited_states()),
            ]);
            run(Path::new(filename), Parser::new(root));
        }
        _ => unreachable!("a subcommand is required"),
    }
}

fn run<R: Rule>(filename: &Path, mut parser: Parser<R>) {
    let content = match std::fs::read_to_string(filename) {
        Ok(content) => content,
        Err(error) => {
            debug!(?error);
            eprintln!("{}", problem::concise_loading_error(filename, &error));
            std::process::exit(1);
        }
    };

    match parser.feed(&content) {
        Ok(Some(value)) => {
            let rendered =
                serde_json::to_string_pretty(&value).expect("JSON values always serialize");
            println!("{}", rendered);
        }
        Ok(None) => {
            debug!("no region matched the root rule");
            println!("null");
        }
        Err(error) => {
            eprintln!("{}", problem::concise_extract_error(filename, &error));
            std::process::exit(1);
        }
    }
}
