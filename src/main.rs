use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use ghpub::commands::validators;
use ghpub::{PublishError, commands::*, constants};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghpub")]
#[command(about = "Publish notes to GitHub repositories through the contents API")]
#[command(version)]
struct Cli {
    /// Settings file holding repository configurations
    #[arg(short, long, global = true, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// Print each publish stage as it happens
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a document to the repository named in its frontmatter
    Publish {
        /// Document to publish
        file: String,

        /// Vault directory the document path is relative to
        #[arg(long)]
        vault: Option<String>,
    },

    /// Manage repository configurations
    Repo {
        #[command(subcommand)]
        command: RepoCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum RepoCommands {
    /// Add a repository configuration
    Add {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        repo_name: String,

        /// Personal access token with contents write access
        #[arg(long)]
        token: String,

        /// Identifier documents use in their `repo` key (generated if omitted)
        #[arg(long)]
        id: Option<String>,

        /// Branch to publish to (default: main)
        #[arg(short, long)]
        branch: Option<String>,

        /// Make this the default repository
        #[arg(long)]
        default: bool,
    },

    /// Edit a repository configuration
    Edit {
        /// Id of the configuration to edit
        id: String,

        /// Rename the configuration
        #[arg(long)]
        new_id: Option<String>,

        /// Replace the access token
        #[arg(long)]
        token: Option<String>,

        /// Repository owner
        #[arg(long)]
        owner: Option<String>,

        /// Repository name
        #[arg(long)]
        repo_name: Option<String>,

        /// Branch to publish to
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Remove a repository configuration
    Rm {
        /// Id of the configuration to remove
        id: String,
    },

    /// Set the default repository
    Default {
        /// Id of the configuration to make default
        id: String,
    },

    /// List repository configurations
    Ls {
        /// Output in JSON format for machine consumption
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut context = CommandContext::new(PathBuf::from(&cli.config));
    context.verbose = cli.verbose;

    match execute_command(cli.command, &context).await {
        // The failure notice has already been shown
        Err(e) if e.downcast_ref::<PublishError>().is_some() => std::process::exit(1),
        result => result,
    }
}

async fn execute_command(command: Commands, context: &CommandContext) -> Result<()> {
    match command {
        Commands::Publish { file, vault } => {
            validators::validate_required("file", &file)?;
            validators::validate_not_blank("vault", &vault)?;

            PublishCommand { file, vault }.execute(context).await?;
        }
        Commands::Repo { command } => execute_repo_command(command, context).await?,
        Commands::Completions { shell } => {
            let mut cli = Cli::command();
            clap_complete::generate(shell, &mut cli, "ghpub", &mut std::io::stdout());
        }
    }

    Ok(())
}

async fn execute_repo_command(command: RepoCommands, context: &CommandContext) -> Result<()> {
    match command {
        RepoCommands::Add {
            owner,
            repo_name,
            token,
            id,
            branch,
            default,
        } => {
            validators::validate_required("owner", &owner)?;
            validators::validate_required("repo name", &repo_name)?;
            validators::validate_required("token", &token)?;
            validators::validate_repo_id(&id)?;
            validators::validate_branch_name(&branch)?;

            AddRepoCommand {
                id,
                token,
                owner,
                repo_name,
                branch,
                make_default: default,
            }
            .execute(context)
            .await?;
        }
        RepoCommands::Edit {
            id,
            new_id,
            token,
            owner,
            repo_name,
            branch,
        } => {
            validators::validate_repo_id(&new_id)?;
            validators::validate_not_blank("token", &token)?;
            validators::validate_not_blank("owner", &owner)?;
            validators::validate_not_blank("repo name", &repo_name)?;
            validators::validate_branch_name(&branch)?;

            EditRepoCommand {
                id,
                new_id,
                token,
                owner,
                repo_name,
                branch,
            }
            .execute(context)
            .await?;
        }
        RepoCommands::Rm { id } => RemoveRepoCommand { id }.execute(context).await?,
        RepoCommands::Default { id } => DefaultRepoCommand { id }.execute(context).await?,
        RepoCommands::Ls { json } => ListCommand { json }.execute(context).await?,
    }

    Ok(())
}
