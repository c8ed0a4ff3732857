use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{cmd_artifacts, cmd_channels, cmd_generate, cmd_module_maps};

#[derive(Parser)]
#[command(
    name = "nativebin",
    version,
    about = "Resolution channels and Swift module maps for native binaries"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show each binary's compile, link and runtime channels
    Channels {
        /// Project directory containing native.toml (defaults to current directory)
        input: Option<PathBuf>,
    },
    /// Resolve one channel of a binary and list its files
    Artifacts {
        /// Project directory containing native.toml (defaults to current directory)
        input: Option<PathBuf>,
        /// Binary variant name
        #[arg(long, default_value = "debug")]
        binary: String,
        /// Channel purpose: compile, link or runtime
        #[arg(long, default_value = "compile")]
        purpose: String,
    },
    /// Compute the module maps of one or all binaries
    ModuleMaps {
        /// Project directory containing native.toml (defaults to current directory)
        input: Option<PathBuf>,
        /// Only this binary variant (default: all)
        #[arg(long)]
        binary: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write module.modulemap files for a binary
    Generate {
        /// Project directory containing native.toml (defaults to current directory)
        input: Option<PathBuf>,
        /// Binary variant name
        #[arg(long, default_value = "debug")]
        binary: String,
        /// Output directory (default: <build_dir>/module-maps/<binary>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("NATIVEBIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Channels { input } => cmd_channels(input),
        Command::Artifacts {
            input,
            binary,
            purpose,
        } => cmd_artifacts(input, &binary, &purpose),
        Command::ModuleMaps {
            input,
            binary,
            json,
        } => cmd_module_maps(input, binary.as_deref(), json),
        Command::Generate {
            input,
            binary,
            output,
        } => cmd_generate(input, &binary, output),
    }
}
