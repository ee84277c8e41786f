use clap::{Parser, Subcommand};
use std::path::PathBuf;

use velum_cli::EffectArgs;
use velum_core::config::{
    load_pipeline_config, log_config_usage, pipeline_config_handle, set_verbose,
};

mod commands;

use commands::{
    cmd_apply, cmd_batch, cmd_init, cmd_preset_create, cmd_preset_list, cmd_preset_show,
};

#[derive(Parser)]
#[command(name = "velum")]
#[command(version, about = "Fabric transmission effect for images", long_about = None)]
struct Cli {
    /// Pipeline config file (overrides the default search)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print pipeline diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the fabric effect to a PNG image
    Apply {
        /// Input PNG file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file or directory
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        #[command(flatten)]
        effect: EffectArgs,
    },

    /// Batch process multiple files with shared settings
    Batch {
        /// Input files or directories
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Scan directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        /// Only print output paths
        #[arg(short, long)]
        silent: bool,

        #[command(flatten)]
        effect: EffectArgs,
    },

    /// Inspect fabric presets and create looks
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Write a default velum.yml
    Init {
        /// Destination file (default: ./velum.yml)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List available fabrics
    List,

    /// Show the constants of a fabric
    Show {
        /// Fabric key
        fabric: String,
    },

    /// Create a new look template
    Create {
        /// Output file path
        output: PathBuf,

        /// Look name
        #[arg(short, long)]
        name: String,

        /// Fabric the look targets
        #[arg(short, long, value_name = "KEY")]
        fabric: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    let custom_handle;
    let handle = match &cli.config {
        Some(path) => {
            custom_handle = load_pipeline_config(Some(path));
            &custom_handle
        }
        None => pipeline_config_handle(),
    };
    log_config_usage(handle);
    let defaults = &handle.config.defaults;

    let result = match cli.command {
        Commands::Apply { input, out, effect } => cmd_apply(input, out, effect, defaults),

        Commands::Batch {
            inputs,
            recursive,
            out,
            threads,
            silent,
            effect,
        } => cmd_batch(inputs, recursive, out, threads, silent, effect, defaults),

        Commands::Preset { action } => match action {
            PresetAction::List => cmd_preset_list(),
            PresetAction::Show { fabric } => cmd_preset_show(fabric),
            PresetAction::Create {
                output,
                name,
                fabric,
            } => cmd_preset_create(output, name, fabric),
        },

        Commands::Init { path, force } => cmd_init(path, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
