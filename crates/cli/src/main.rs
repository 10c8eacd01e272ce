mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use touca_recipe_lib::ConfigurationError;
use touca_recipe_lib::options::parse_assignment;

use crate::cmd::{CreateArgs, cmd_create, cmd_info, cmd_inspect, load_recipe};
use crate::output::print_error;

/// touca-recipe - package descriptor for the Touca C++ SDK
#[derive(Parser)]
#[command(name = "touca-recipe")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Override a recipe option, e.g. `-o with_cli=True` (repeatable)
  #[arg(short = 'o', long = "option", value_name = "NAME=VALUE", global = true, value_parser = parse_option)]
  options: Vec<(String, String)>,

  /// TOML profile with option and setting overrides
  #[arg(long, global = true)]
  profile: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Print machine-readable JSON
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the resolved options, requirements and build definitions
  Inspect,

  /// Show the component descriptor published to consumers
  Info,

  /// Configure, build, optionally test, and package the SDK
  Create(CreateArgs),
}

fn parse_option(input: &str) -> Result<(String, String), ConfigurationError> {
  parse_assignment(input)
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = run(cli) {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let recipe = load_recipe(&cli.options, cli.profile.as_deref())?;

  match cli.command {
    Commands::Inspect => cmd_inspect(&recipe, cli.json),
    Commands::Info => cmd_info(&recipe, cli.json),
    Commands::Create(args) => cmd_create(&recipe, &args, cli.json),
  }
}
