use std::process;

use log::{error, LevelFilter};

use scanref::commands::{build_cli, CommandFactory, ScanrefCommandFactory};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // RUST_LOG, when set, wins over --verbose
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let factory = ScanrefCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
