use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palette_engine::{Color, PaletteGroup};
use palettemap::codec;
use palettemap::models::{AppConfig, CONFIG_ENV};
use palettemap::services::{ArtifactPipeline, Artifacts};
use palettemap::store::ArtifactStore;

#[derive(Parser)]
#[command(name = "palettemap")]
#[command(about = "Extract palettes from pixel art and write palette-swappable index maps")]
struct Cli {
    /// Configuration file (defaults to $PALETTEMAP_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a palette group and key grid from an image
    Extract {
        /// Source PNG image
        image: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write the palette map of an image
    Map {
        /// Source PNG image
        image: PathBuf,

        /// Existing palette group to sync against the image
        #[arg(short, long)]
        group: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show colors an image gained or lost relative to a palette group
    Diff {
        /// Source PNG image
        image: PathBuf,

        /// Palette group asset
        #[arg(short, long)]
        group: PathBuf,
    },
    /// Inspect or edit a palette group asset
    Group {
        /// Palette group asset
        asset: PathBuf,

        #[command(subcommand)]
        action: GroupAction,
    },
    /// Rebuild a palette group from a key grid image
    Import {
        /// Key grid PNG (one palette per row, base palette at the bottom)
        grid: PathBuf,

        /// Name of the new group
        #[arg(short, long)]
        name: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Sort a newly extracted palette by luminance
    #[arg(long)]
    sort: bool,

    /// Overwrite existing files
    #[arg(long, short)]
    force: bool,

    /// Output directory (defaults to the source image's directory)
    #[arg(long, short)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum GroupAction {
    /// Print the group's palettes
    Show,
    /// Append a copy of the base palette
    AddVariant {
        /// Name of the new palette
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a palette
    RemoveVariant { index: usize },
    /// Append a color slot to every palette
    AddSlot {
        /// Base palette color as hex (#RGB, #RRGGBB or #RRGGBBAA)
        color: String,
    },
    /// Remove a color slot from every palette
    RemoveSlot { index: usize },
    /// Paint one slot of one palette
    SetColor {
        palette: usize,
        slot: usize,
        /// Color as hex (#RGB, #RRGGBB or #RRGGBBAA)
        color: String,
    },
    /// Lock the group, or one palette with --palette
    Lock {
        #[arg(long)]
        palette: Option<usize>,
    },
    /// Unlock the group, or one palette with --palette
    Unlock {
        #[arg(long)]
        palette: Option<usize>,
    },
    /// Write the key grid to a PNG file
    Export {
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = AppConfig::resolve_path(cli.config);

    let Some(command) = cli.command else {
        run_status_command(config_path.as_deref());
        return Ok(());
    };

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palettemap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(config_path.as_deref());
    let mut rng = rand::thread_rng();

    match command {
        Commands::Extract { image, output } => {
            let pipeline = ArtifactPipeline::new(apply_output_args(config, &output));
            let result = pipeline
                .extract(&image, &mut rng)
                .with_context(|| format!("Failed to extract palette from {}", image.display()))?;
            println!(
                "Extracted {} colors from {}",
                result.group.colors_per_palette(),
                image.display()
            );
            print_artifacts(&result.artifacts);
        }
        Commands::Map {
            image,
            group,
            output,
        } => {
            let pipeline = ArtifactPipeline::new(apply_output_args(config, &output));
            let result = pipeline
                .map(&image, group.as_deref(), &mut rng)
                .with_context(|| format!("Failed to map {}", image.display()))?;
            if let Some(report) = &result.sync {
                for color in &report.added {
                    println!("  + {}", color.to_hex());
                }
                for color in &report.removed {
                    println!("  - {}", color.to_hex());
                }
                if report.is_empty() {
                    println!("Palette group already up to date");
                }
            }
            print_artifacts(&result.artifacts);
        }
        Commands::Diff { image, group } => {
            let pipeline = ArtifactPipeline::new(config);
            let diff = pipeline
                .diff(&image, &group)
                .with_context(|| format!("Failed to diff {}", image.display()))?;
            if diff.is_empty() {
                println!("No changes");
            }
            for color in &diff.insertions {
                println!("  + {}", color.to_hex());
            }
            for color in &diff.deletions {
                println!("  - {}", color.to_hex());
            }
        }
        Commands::Group { asset, action } => run_group_command(config, &asset, action)?,
        Commands::Import { grid, name, output } => {
            let pipeline = ArtifactPipeline::new(apply_output_args(config, &output));
            let result = pipeline
                .import(&grid, &name, &mut rng)
                .with_context(|| format!("Failed to import {}", grid.display()))?;
            println!(
                "Imported {} palettes of {} colors",
                result.group.len(),
                result.group.colors_per_palette()
            );
            print_artifacts(&result.artifacts);
        }
    }

    Ok(())
}

/// Command-line flags take precedence over the config file
fn apply_output_args(mut config: AppConfig, args: &OutputArgs) -> AppConfig {
    config.overwrite |= args.force;
    config.sort_palette |= args.sort;
    if let Some(out) = &args.out {
        config.output_dir = Some(out.clone());
    }
    config
}

fn run_group_command(config: AppConfig, asset: &Path, action: GroupAction) -> anyhow::Result<()> {
    let pipeline = ArtifactPipeline::new(config);
    let context = || format!("Failed to update {}", asset.display());

    match action {
        GroupAction::Show => {
            let group = pipeline
                .load_group(asset)
                .with_context(|| format!("Failed to load {}", asset.display()))?;
            print_group(&group);
        }
        GroupAction::AddVariant { name } => {
            let (_, index) = pipeline
                .edit_group(asset, |group| {
                    let index = group.add_variant();
                    if let Some(name) = name {
                        group.rename_palette(index, name)?;
                    }
                    Ok(index)
                })
                .with_context(context)?;
            println!("Added palette {index}");
        }
        GroupAction::RemoveVariant { index } => {
            let (_, removed) = pipeline
                .edit_group(asset, |group| Ok(group.remove_variant(index)?))
                .with_context(context)?;
            println!("Removed palette {index} ({})", removed.name());
        }
        GroupAction::AddSlot { color } => {
            let color = parse_color(&color)?;
            pipeline
                .edit_group(asset, |group| Ok(group.add_color_slot(color)?))
                .with_context(context)?;
            println!("Added slot {}", color.to_hex());
        }
        GroupAction::RemoveSlot { index } => {
            pipeline
                .edit_group(asset, |group| Ok(group.remove_color_slot(index)?))
                .with_context(context)?;
            println!("Removed slot {index}");
        }
        GroupAction::SetColor {
            palette,
            slot,
            color,
        } => {
            let color = parse_color(&color)?;
            pipeline
                .edit_group(asset, |group| Ok(group.set_color(palette, slot, color)?))
                .with_context(context)?;
            println!("Palette {palette} slot {slot} = {}", color.to_hex());
        }
        GroupAction::Lock { palette } => {
            set_locked(&pipeline, asset, palette, true).with_context(context)?;
        }
        GroupAction::Unlock { palette } => {
            set_locked(&pipeline, asset, palette, false).with_context(context)?;
        }
        GroupAction::Export { output, force } => {
            let group = pipeline
                .load_group(asset)
                .with_context(|| format!("Failed to load {}", asset.display()))?;
            let png = codec::encode_grid_png(&group.to_grid())?;
            let dir = output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = output
                .file_name()
                .and_then(|n| n.to_str())
                .context("Output path has no file name")?;
            let path = ArtifactStore::new(dir)
                .write(name, &png, force || pipeline.config().overwrite)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Exported {}", path.display());
        }
    }

    Ok(())
}

fn set_locked(
    pipeline: &ArtifactPipeline,
    asset: &Path,
    palette: Option<usize>,
    locked: bool,
) -> anyhow::Result<()> {
    let verb = if locked { "Locked" } else { "Unlocked" };
    match palette {
        Some(index) => {
            pipeline.edit_group(asset, |group| Ok(group.set_palette_locked(index, locked)?))?;
            println!("{verb} palette {index}");
        }
        None => {
            pipeline.edit_group(asset, |group| {
                group.set_locked(locked);
                Ok(())
            })?;
            println!("{verb} group");
        }
    }
    Ok(())
}

fn parse_color(hex: &str) -> anyhow::Result<Color> {
    hex.parse::<Color>()
        .with_context(|| format!("Invalid color '{hex}'"))
}

fn print_group(group: &PaletteGroup) {
    let lock = |locked: bool| if locked { " (locked)" } else { "" };
    println!("{}{}", group.name(), lock(group.is_locked()));
    println!(
        "{} palettes, {} colors each\n",
        group.len(),
        group.colors_per_palette()
    );
    for (index, palette) in group.palettes().iter().enumerate() {
        println!("[{index}] {}{}", palette.name(), lock(palette.is_locked()));
        let colors: Vec<String> = palette.iter().map(|c| c.to_hex()).collect();
        println!("    {}", colors.join(" "));
    }
}

fn print_artifacts(artifacts: &Artifacts) {
    for path in [&artifacts.group, &artifacts.key, &artifacts.map]
        .into_iter()
        .flatten()
    {
        println!("  + {}", path.display());
    }
}

/// Display status and configuration information
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Palettemap v{VERSION}");
    println!("Palette extraction and index maps for palette-swapped pixel art\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        std::env::var(CONFIG_ENV).as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (file not found, using defaults)", path.display()),
        None => "defaults".to_string(),
    };
    println!("\nConfiguration: {config_source}");

    let config = match config_path {
        Some(path) => std::fs::read_to_string(path)
            .ok()
            .and_then(|content| AppConfig::from_yaml(&content).ok())
            .unwrap_or_default(),
        None => AppConfig::default(),
    };
    println!(
        "  output_dir   = {}",
        config
            .output_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(next to source image)".to_string())
    );
    println!("  overwrite    = {}", config.overwrite);
    println!("  sort_palette = {}", config.sort_palette);
    println!(
        "  naming       = <name>{}.asset, <name>{}.png, <name>{}.png",
        config.naming.group_suffix, config.naming.key_suffix, config.naming.map_suffix
    );

    println!("\nRun 'palettemap --help' for commands.");
}
