//! appdesc CLI tool.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::LoadOptions;

#[derive(Parser)]
#[command(name = "appdesc")]
#[command(about = "Android module build descriptor loader", long_about = None)]
struct Cli {
    /// Properties file to resolve ${...} references against
    /// (defaults to a local.properties next to the descriptor)
    #[arg(long, global = true, env = "APPDESC_PROPERTIES")]
    properties: Option<String>,

    /// Extra property as key=value (repeatable)
    #[arg(short = 'P', long = "property", global = true)]
    property: Vec<String>,

    /// Extra signing configuration known to the signing subsystem (repeatable)
    #[arg(long, global = true, env = "APPDESC_SIGNING", value_delimiter = ',')]
    signing: Vec<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a build descriptor
    Validate {
        /// Path to the descriptor
        #[arg(default_value = "app.kdl")]
        path: String,
    },
    /// Print the normalized build configuration
    Show {
        /// Path to the descriptor
        #[arg(default_value = "app.kdl")]
        path: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the build tool invocation and plugin order
    Plan {
        /// Path to the descriptor
        #[arg(default_value = "app.kdl")]
        path: String,
        /// Build tool task
        #[arg(long, default_value = appdesc_executor::DEFAULT_TASK)]
        task: String,
    },
    /// Hand the configuration to the Gradle wrapper
    Build {
        /// Path to the descriptor
        #[arg(default_value = "app.kdl")]
        path: String,
        /// Build tool task
        #[arg(long, default_value = appdesc_executor::DEFAULT_TASK)]
        task: String,
        /// Directory holding the Gradle wrapper
        #[arg(long, env = "APPDESC_PROJECT_DIR")]
        project_dir: Option<String>,
        /// Only print what would run
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let options = LoadOptions {
        properties: cli.properties,
        property: cli.property,
        signing: cli.signing,
    };

    match cli.command {
        Commands::Validate { path } => {
            commands::validate(&path, &options)?;
        }
        Commands::Show { path, json } => {
            commands::show(&path, &options, json)?;
        }
        Commands::Plan { path, task } => {
            commands::plan(&path, &options, &task)?;
        }
        Commands::Build {
            path,
            task,
            project_dir,
            dry_run,
        } => {
            commands::build::run(&path, &options, &task, project_dir, dry_run).await?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
