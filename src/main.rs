use std::io::Write;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::{error, LevelFilter};

use jpegscope::commands::{CommandFactory, JpegscopeCommandFactory};
use jpegscope::utils::logger::Logger;

fn build_cli() -> ClapCommand {
    ClapCommand::new("jpegscope")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Analyze JPEG segment structure and EXIF metadata")
        .arg(
            Arg::new("input")
                .help("Input JPEG file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exif")
                .short('e')
                .long("exif")
                .help("Dump EXIF directories and tags instead of the segment list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .help("Scan files whose SOI/EOI markers are missing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-thumbnail")
                .long("no-thumbnail")
                .help("Do not walk the EXIF thumbnail directory (IFD1)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .help("TOML file with EXIF tag names to use instead of the built-in table")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write log output to this file")
                .value_name("FILE")
                .required(false),
        )
}

fn init_logging(matches: &ArgMatches) {
    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(log_file) = matches.get_one::<String>("log-file") {
        if let Err(e) = Logger::init_global_logger(log_file, level) {
            eprintln!("Error setting up log file {}: {}", log_file, e);
            process::exit(1);
        }
        return;
    }

    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(&matches);

    let factory = JpegscopeCommandFactory::new();

    match factory.create_command(&matches) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
