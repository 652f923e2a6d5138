use clap::{CommandFactory, Parser, Subcommand};
use git_review::{DiffInput, FileStatus, ReviewError};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "git-review", version)]
#[command(about = "Line-numbered unified diff viewer for code review")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one file's diff and print its line-numbered hunks
    Hunks {
        /// Diff file to read (stdin when omitted or "-")
        file: Option<PathBuf>,
        /// File status: added, modified or deleted (or A, M, D)
        #[arg(long, default_value = "modified")]
        status: FileStatus,
        /// File path to report (defaults to the path in the diff header)
        #[arg(long)]
        path: Option<String>,
        /// Print the file change as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse complete `git diff` output and print every changed file
    Review {
        /// Diff file to read (stdin when omitted or "-")
        file: Option<PathBuf>,
        /// Print the changeset as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Man,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("git-review: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ReviewError> {
    match cli.command {
        Commands::Hunks {
            file,
            status,
            path,
            json,
        } => {
            let change = DiffInput::new(file.as_deref()).file_change(path, status)?;
            log::info!("{}: {} hunk(s)", change.path, change.hunks.len());
            if json {
                print_json(&change)?;
            } else {
                print!("{}", change);
            }
        }
        Commands::Review { file, json } => {
            let changes = DiffInput::new(file.as_deref()).changeset()?;
            log::info!("{} changed file(s)", changes.files.len());
            if json {
                print_json(&changes)?;
            } else {
                print!("{}", changes);
            }
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "git-review", &mut io::stdout());
        }
        Commands::Man => {
            clap_mangen::Man::new(Cli::command())
                .render(&mut io::stdout())
                .map_err(|e| ReviewError::OutputFailed {
                    message: e.to_string(),
                })?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ReviewError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| ReviewError::OutputFailed {
        message: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}
