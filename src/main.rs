mod cli_utils;

use std::{fmt::Debug, io::Write};

use clap::{Parser, Subcommand};

use optstr::{
    cf_options_from_string, db_options_from_string, mutable_cf_options_from_string, string_to_map,
    table_options_from_string, BlockBasedTableOptions, ColumnFamilyOptions, DbOptions, MutableCfOptions,
};

#[derive(Parser)]
#[clap(name = "", no_binary_name = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split an option string into its key/value pairs
    Tokenize {
        opts: String,
    },
    /// Apply an option string to default engine-wide options
    Db {
        opts: String,
    },
    /// Apply an option string to default column family options
    Cf {
        opts: String,
    },
    /// Apply an option string to default mutable column family options
    Mutable {
        opts: String,
    },
    /// Apply an option string to default block-based table options
    Table {
        opts: String,
    },
    Quit,
}

fn print_outcome<T: Debug>(outcome: optstr::Result<T>) {
    match outcome {
        Ok(options) => println!("{:#?}", options),
        Err(e) => println!("error ({:?}): {}", e.kind(), e.message()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cli_utils::init_logging();
    loop {
        print!("$ ");
        std::io::stdout().flush()?;

        let line = cli_utils::readline()?;
        if line.is_empty() {
            // EOF
            return Ok(());
        }
        let args = shlex::split(&line).unwrap_or_default();
        let command = match Cli::try_parse_from(args) {
            Ok(cli) => cli.command,
            Err(e) => {
                e.print()?;
                continue;
            }
        };
        match command {
            Command::Tokenize { opts } => match string_to_map(&opts) {
                Ok(map) => {
                    let mut pairs: Vec<_> = map.into_iter().collect();
                    pairs.sort();
                    for (key, value) in pairs {
                        println!("{}={}", key, value);
                    }
                }
                Err(e) => println!("error ({:?}): {}", e.kind(), e.message()),
            },
            Command::Db { opts } => print_outcome(db_options_from_string(&DbOptions::default(), &opts)),
            Command::Cf { opts } => {
                print_outcome(cf_options_from_string(&ColumnFamilyOptions::default(), &opts))
            }
            Command::Mutable { opts } => {
                print_outcome(mutable_cf_options_from_string(&MutableCfOptions::default(), &opts))
            }
            Command::Table { opts } => {
                print_outcome(table_options_from_string(&BlockBasedTableOptions::default(), &opts))
            }
            Command::Quit => return Ok(()),
        }
    }
}
