use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vidmeta_av::ProbeBackend;

#[derive(Parser)]
#[command(name = "vidmeta")]
#[command(author, version, about = "Inspect video files and summarize their technical metadata")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a file and print its normalized metadata
    Inspect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Probing backend (overrides the config file)
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,
    },

    /// Dump the raw tracks reported by the probing engine as JSON
    Tracks {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Probing backend (overrides the config file)
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,
    },

    /// Check that external probing tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BackendArg {
    Auto,
    Mediainfo,
    Native,
}

impl From<BackendArg> for ProbeBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => ProbeBackend::Auto,
            BackendArg::Mediainfo => ProbeBackend::MediaInfo,
            BackendArg::Native => ProbeBackend::Native,
        }
    }
}
