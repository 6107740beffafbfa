mod cli;

use vidmeta::{config, render, Analyzer, DisplayState, InspectorState};

use anyhow::Result;
use clap::Parser;
use cli::{BackendArg, Cli, Commands};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "vidmeta=trace,vidmeta_av=debug".to_string()
        } else {
            "vidmeta=info,vidmeta_av=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inspect {
            file,
            json,
            backend,
        } => inspect_file(&file, cli.config.as_deref(), backend, json),
        Commands::Tracks { file, backend } => dump_tracks(&file, cli.config.as_deref(), backend),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("vidmeta {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_analyzer(config_path: Option<&Path>, backend: Option<BackendArg>) -> Result<Analyzer> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(backend) = backend {
        config.probe.backend = backend.into();
    }
    tracing::debug!("Probe backend: {}", config.probe.backend);
    Ok(Analyzer::from_config(&config))
}

fn inspect_file(
    file: &Path,
    config_path: Option<&Path>,
    backend: Option<BackendArg>,
    json: bool,
) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let analyzer = load_analyzer(config_path, backend)?;
    let state = InspectorState::new();

    let ticket = state.begin();
    state.complete(ticket, analyzer.analyze_path(file));

    match state.current() {
        DisplayState::Ready { metadata } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                print!("{}", render::render_text(&metadata));
            }
            Ok(())
        }
        DisplayState::Failed { error } => anyhow::bail!("Analysis failed: {}", error),
        DisplayState::Idle => anyhow::bail!("Analysis produced no result"),
    }
}

fn dump_tracks(file: &Path, config_path: Option<&Path>, backend: Option<BackendArg>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let analyzer = load_analyzer(config_path, backend)?;
    let probe = analyzer.probe_path(file)?;
    println!("{}", serde_json::to_string_pretty(&probe)?);
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Checking external tools...\n");

    let tools = vidmeta_av::check_tools(config.probe.mediainfo_path.as_deref());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All probing tools are available!");
    } else {
        println!("Some tools are missing. The native engine will be used for MKV and MP4 files.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Backend: {}", config.probe.backend);
    match config.probe.mediainfo_path {
        Some(ref p) => println!("  MediaInfo: {}", p.display()),
        None => println!("  MediaInfo: (PATH)"),
    }
    println!("  Chunk size: {} bytes", config.probe.chunk_size);
    println!("  Timestamp format: {}", config.display.timestamp_format);

    Ok(())
}
