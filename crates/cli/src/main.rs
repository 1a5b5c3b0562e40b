mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "svx",
    version,
    about = "Preview scoped source interpolation and batch prompt expansion"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print the resolved context and snapshot
    Doctor,

    /// Substitute every reference in a template and print the result
    Interpolate(TemplateInput),

    /// List the references in a template and whether they resolve
    Refs(RefsArgs),

    /// Count the prompts a batch expansion would generate
    Count(CountArgs),

    /// Generate one prompt per combination of the varying sources
    Expand(ExpandArgs),
}

/// Template text, given inline or read from a file.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TemplateInput {
    /// Template text
    #[arg(long)]
    pub text: Option<String>,

    /// Path to a file holding the template
    #[arg(long)]
    pub template: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RefsArgs {
    #[command(flatten)]
    pub input: TemplateInput,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct CountArgs {
    #[command(flatten)]
    pub input: TemplateInput,

    /// JSON/YAML list of `{name, value}` sources to vary
    #[arg(long)]
    pub vars: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub input: TemplateInput,

    /// JSON/YAML list of `{name, value}` sources to vary
    #[arg(long)]
    pub vars: Option<PathBuf>,

    /// Override the configured ceiling on generated prompts
    #[arg(long)]
    pub max: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporter: {e}");
    }

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    let result = match cli.command {
        Commands::Doctor => {
            cmd::doctor::run(config, profile);
            Ok(())
        }
        Commands::Interpolate(input) => cmd::interpolate::run(config, profile, &input),
        Commands::Refs(args) => cmd::refs::run(config, profile, &args),
        Commands::Count(args) => cmd::count::run(config, profile, &args),
        Commands::Expand(args) => cmd::expand::run(config, profile, &args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
