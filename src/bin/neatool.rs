use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use nea_pinyin::csv_io::{self, ColumnSpec};
use nea_pinyin::respell;
use nea_pinyin::settings::{self, settings};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "neatool", about = "Pinyin to New English Approximation respelling")]
struct Cli {
    /// Path to a custom settings TOML (optional)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert Pinyin words, one result per line
    Convert {
        /// Tone-marked Pinyin to convert
        #[arg(required = true)]
        text: Vec<String>,
        /// Output JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the output of every rewrite rule for one input
    Explain {
        /// Tone-marked Pinyin to explain
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a respelling column to a CSV file
    Csv {
        /// Input CSV (defaults to table.default_input)
        input: Option<PathBuf>,
        /// Output CSV (defaults to table.default_output)
        output: Option<PathBuf>,
        /// Column holding the Pinyin (defaults to table.input_column)
        #[arg(long)]
        column: Option<String>,
        /// Column to write (defaults to table.output_column)
        #[arg(long)]
        output_column: Option<String>,
    },
}

#[derive(Serialize)]
struct ConvertLine<'a> {
    input: &'a str,
    output: String,
}

fn main() {
    nea_pinyin::init_tracing();
    let cli = Cli::parse();

    if let Some(path) = &cli.settings {
        let content = die!(
            fs::read_to_string(path),
            "Failed to read settings {}: {}",
            path.display()
        );
        die!(settings::init_custom(content), "Invalid settings: {}");
    }

    match cli.command {
        Command::Convert { text, json } => {
            for input in &text {
                let output = respell::convert(input);
                if json {
                    let line = ConvertLine { input, output };
                    println!(
                        "{}",
                        serde_json::to_string(&line).expect("JSON serialization failed")
                    );
                } else {
                    println!("{output}");
                }
            }
        }

        Command::Explain { text, json } => {
            let result = respell::explain(&text);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).expect("JSON serialization failed")
                );
            } else {
                print!("{}", respell::format_text(&result));
            }
        }

        Command::Csv {
            input,
            output,
            column,
            output_column,
        } => {
            let table = &settings().table;
            let input = input.unwrap_or_else(|| PathBuf::from(&table.default_input));
            let output = output.unwrap_or_else(|| PathBuf::from(&table.default_output));
            let defaults = ColumnSpec::from_settings();
            let columns = ColumnSpec::new(
                column.unwrap_or(defaults.input),
                output_column.unwrap_or(defaults.output),
            );

            let summary = die!(
                csv_io::convert_csv(&input, &output, &columns),
                "Failed to convert {}: {}",
                input.display()
            );
            eprintln!(
                "{} rows ({} converted, {} missing)",
                summary.rows, summary.converted, summary.missing
            );
            println!("File saved to {}", output.display());
        }
    }
}
