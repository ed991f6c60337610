// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use jvm_locator::commands::current::CurrentCommand;
use jvm_locator::commands::list::ListCommand;
use jvm_locator::config::new_locator_config;
use jvm_locator::error::{LocatorError, Result, format_error_with_color, get_exit_code};
use jvm_locator::logging;
use std::io::IsTerminal;

#[derive(Parser)]
#[command(name = "jvm-locator")]
#[command(author, version, about = "Discover JVMs installed on this machine", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed JVMs, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the JVM this process would use (JAVA_HOME or java on PATH)
    Current {
        /// Show only the version string
        #[arg(short = 'q', long, conflicts_with = "json")]
        quiet: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    // Load configuration once at startup
    let config = match new_locator_config() {
        Ok(config) => config,
        Err(e) => exit_with_error(&e),
    };

    let result: Result<()> = (|| match cli.command {
        Commands::List { json } => {
            let command = ListCommand::new(&config)?;
            command.execute(json)
        }
        Commands::Current { quiet, json } => {
            let command = CurrentCommand::new()?;
            command.execute(quiet, json)
        }
    })();

    if let Err(e) = result {
        exit_with_error(&e);
    }
}

fn exit_with_error(error: &LocatorError) -> ! {
    eprintln!(
        "{}",
        format_error_with_color(error, std::io::stderr().is_terminal())
    );
    std::process::exit(get_exit_code(error));
}
