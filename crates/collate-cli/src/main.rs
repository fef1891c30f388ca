mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "collate",
    version,
    about = "Compare two PDF documents page by page and table by table"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two documents and render a comparison report
    Compare {
        /// Path to the baseline document
        file_a: PathBuf,

        /// Path to the document compared against the baseline
        file_b: PathBuf,

        /// Output format: text (default), json or html
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Write the rendered report to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Expected table name(s), overriding the built-in list
        #[arg(short = 'e', long = "expected-table", value_name = "NAME")]
        expected_tables: Vec<String>,

        /// Also list matching pages and tables, not only differences
        #[arg(long)]
        show_matches: bool,
    },
    /// Show what the engine sees in one document (without comparing)
    Extract {
        /// Path to the document
        input_file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Inspect the expected-table keyword list
    Keywords {
        #[command(subcommand)]
        action: KeywordsAction,
    },
}

#[derive(Subcommand)]
enum KeywordsAction {
    /// List the effective expected-table keywords and where they come from
    List,
    /// Check a single document for the expected tables
    Check {
        /// Path to the document
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            file_a,
            file_b,
            output,
            out,
            expected_tables,
            show_matches,
        } => commands::compare::run(file_a, file_b, &output, out, expected_tables, show_matches),
        Commands::Extract { input_file, output } => commands::extract::run(input_file, &output),
        Commands::Keywords { action } => match action {
            KeywordsAction::List => commands::keywords::list(),
            KeywordsAction::Check { file } => commands::keywords::check(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
