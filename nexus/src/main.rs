use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod context;
mod format;
mod logging;

/// Nexus - image management for Nexus docker repositories
///
/// Lists, inspects and prunes container images stored in a Sonatype Nexus
/// docker repository.
#[derive(Parser, Debug)]
#[command(name = "nexus")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose diagnostics on stderr (repeat for more: --verbose --verbose)
    #[arg(long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    color: String,

    /// Path to the credentials file
    #[arg(long, global = true, env = "NEXUS_CREDENTIALS")]
    credentials: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display version information
    Version,
    /// Write the credentials file
    Configure {
        /// Nexus base URL (prompted if omitted)
        #[arg(long)]
        host: Option<String>,
        /// Docker repository name (prompted if omitted)
        #[arg(long)]
        repository: Option<String>,
        /// Username (prompted if omitted)
        #[arg(long)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Manage images
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// List images in the repository
    Ls {
        /// Filter expression (regex, prefix with ! to negate); repeatable
        #[arg(short, long = "expression")]
        expression: Vec<String>,
        /// Invert the filter expressions
        #[arg(short = 'v', long)]
        invert: bool,
        /// Print image names only
        #[arg(short, long)]
        images_only: bool,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// List the tags of an image
    Tags {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Filter expression (regex, prefix with ! to negate); repeatable
        #[arg(short, long = "expression")]
        expression: Vec<String>,
        /// Invert the filter expressions
        #[arg(short = 'v', long)]
        invert: bool,
        /// Tag ordering: default or semver
        #[arg(short, long, default_value = "default")]
        sort: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Show config and layer sizes of an image
    Info {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Tag to inspect; every filtered tag when omitted
        #[arg(short, long)]
        tag: Option<String>,
        /// Filter expression (regex, prefix with ! to negate); repeatable
        #[arg(short, long = "expression")]
        expression: Vec<String>,
        /// Invert the filter expressions
        #[arg(short = 'v', long)]
        invert: bool,
        /// Print sizes with units
        #[arg(long)]
        humanize: bool,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Delete tags of an image
    Delete {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Delete exactly this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Number of newest tags to keep
        #[arg(short, long)]
        keep: Option<usize>,
        /// Filter expression (regex, prefix with ! to negate); repeatable
        #[arg(short, long = "expression")]
        expression: Vec<String>,
        /// Invert the filter expressions
        #[arg(short = 'v', long)]
        invert: bool,
        /// Tag ordering: default or semver
        #[arg(short, long, default_value = "default")]
        sort: String,
        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the storage used by every tag of an image
    Size {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Print the size with units
        #[arg(long)]
        humanize: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let ctx = context::AppContext::build(
        format::ColorChoice::from(cli.color.as_str()),
        cli.credentials,
    );

    match cli.command {
        Commands::Version => {
            commands::version::print_version();
        }
        Commands::Configure {
            host,
            repository,
            username,
            password,
        } => {
            commands::configure::handle_configure(
                &ctx,
                commands::configure::ConfigureArgs {
                    host,
                    repository,
                    username,
                    password,
                },
            );
        }
        Commands::Image { command } => match command {
            ImageCommands::Ls {
                expression,
                invert,
                images_only,
                format,
            } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::image::handlers::handle_image_list(
                    &ctx,
                    &expression,
                    invert,
                    images_only,
                    fmt,
                )
                .await;
            }
            ImageCommands::Tags {
                name,
                expression,
                invert,
                sort,
                format,
            } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::image::handlers::handle_image_tags(
                    &ctx,
                    &name,
                    &expression,
                    invert,
                    &sort,
                    fmt,
                )
                .await;
            }
            ImageCommands::Info {
                name,
                tag,
                expression,
                invert,
                humanize,
                format,
            } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::image::handlers::handle_image_info(
                    &ctx,
                    &name,
                    tag.as_deref(),
                    &expression,
                    invert,
                    humanize,
                    fmt,
                )
                .await;
            }
            ImageCommands::Delete {
                name,
                tag,
                keep,
                expression,
                invert,
                sort,
                dry_run,
            } => {
                let request = libnexus::DeleteRequest {
                    tag,
                    keep,
                    expressions: expression,
                };
                commands::image::handlers::handle_image_delete(
                    &ctx, &name, request, invert, &sort, dry_run,
                )
                .await;
            }
            ImageCommands::Size { name, humanize } => {
                commands::image::handlers::handle_image_size(&ctx, &name, humanize).await;
            }
        },
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
