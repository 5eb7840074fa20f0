use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use glbulk::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "glbulk")]
#[command(about = "Bulk administration for GitLab groups and projects")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to glbulk.toml, then ~/.config/glbulk/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search groups by name
    FindGroup {
        /// Search term matched against group names
        search: String,
    },

    /// List every project of a group
    ListProjects {
        /// Group id whose projects are listed
        group: String,
    },

    /// Set the default branch on the selected projects
    SetDefaultBranch {
        /// Branch name to make the default
        branch: String,

        #[command(flatten)]
        targets: cli::Targets,
    },

    /// Show the protected-branch settings of the selected projects
    ListProtected {
        #[command(flatten)]
        targets: cli::Targets,
    },

    /// Apply the configured protected-branch policies to the selected projects
    SetProtected {
        #[command(flatten)]
        targets: cli::Targets,
    },

    /// Create one repository tag per row of a CSV file (pid,path,prefix,branch,message)
    Tag {
        /// CSV file describing the tags to create
        file: PathBuf,

        /// Use the tag prefix verbatim instead of prefix-yymmdd-hash
        #[arg(long)]
        no_suffix: bool,
    },

    /// Create one merge request per row of a CSV file (pid,path,source,target,title)
    #[command(alias = "mr")]
    MergeRequest {
        /// CSV file describing the merge requests to open
        file: PathBuf,
    },

    /// Print the active configuration
    DumpConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for outcome lines
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::FindGroup { search } => cli::group::find_group_command(&config, &search),
        Commands::ListProjects { group } => cli::group::list_projects_command(&config, &group),
        Commands::SetDefaultBranch { branch, targets } => {
            cli::branch::set_default_branch_command(&config, &branch, &targets)
        }
        Commands::ListProtected { targets } => {
            cli::branch::list_protected_command(&config, &targets)
        }
        Commands::SetProtected { targets } => {
            cli::branch::set_protected_command(&config, &targets)
        }
        Commands::Tag { file, no_suffix } => cli::tag::tag_command(&config, &file, no_suffix),
        Commands::MergeRequest { file } => {
            cli::merge_request::merge_request_command(&config, &file)
        }
        Commands::DumpConfig => {
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
