use std::process::ExitCode;

use clap::Parser;
use lexigrade_cli::{console, error_value, Cli, Context};
use serde_json::Value;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.quiet {
        console::init();
    }

    match Context::from_cli(&cli).and_then(|context| context.run(&cli.command)) {
        Ok(value) => {
            print_json(&value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_json(&error_value(&err));
            ExitCode::FAILURE
        }
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{value}"),
    }
}
