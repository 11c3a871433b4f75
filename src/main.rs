//! vibexpr - render typed SQL expression trees for a dialect

use anyhow::Result;
use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;
use vibexpr::cli;

/// vibexpr - render serialized SQL expression trees for a dialect profile
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dialect profile (JSON); defaults to the built-in ANSI profile
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an expression tree as SQL
    Render {
        /// Expression tree (JSON)
        expression: PathBuf,

        /// Fail instead of rendering operators the dialect cannot express
        #[arg(short, long)]
        check: bool,
    },

    /// Show the derived metadata of an expression tree
    Inspect {
        /// Expression tree (JSON)
        expression: PathBuf,
    },

    /// List capabilities and whether the dialect supports them natively
    Capabilities,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let profile = cli::load_profile(args.profile.as_deref())?;
    log::debug!("using dialect profile '{}'", profile.name);

    match args.command {
        Command::Render { expression, check } => {
            let expr = cli::load_expression(&expression)?;
            println!("{}", cli::render(&expr, &profile, check)?);
        }
        Command::Inspect { expression } => {
            let expr = cli::load_expression(&expression)?;
            print!("{}", cli::describe_expression(&expr));
        }
        Command::Capabilities => {
            print!("{}", cli::describe_capabilities(&profile));
        }
    }

    Ok(())
}
