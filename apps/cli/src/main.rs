//! Command-line front end: lists drill patterns and renders them to PNG.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use rinkboard_core::{Drill, DrillLibrary};
use rinkboard_renderer::{DiagramRenderer, PixmapSurface, RinkConfig, SurfaceRegistry};

#[derive(Parser)]
#[command(name = "rinkboard", version, about = "Hockey-rink drill diagram renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available drill patterns.
    List {
        /// Extra drill file (JSON) to merge over the built-ins.
        #[arg(long, value_name = "FILE")]
        drills: Option<PathBuf>,
    },
    /// Render a drill pattern to a PNG image.
    Render {
        /// Name of the drill, e.g. `warm_up`.
        drill: String,

        /// Output PNG path.
        #[arg(long, default_value = "drill.png", value_name = "FILE")]
        out: PathBuf,

        /// Rink width in logical units.
        #[arg(long, default_value_t = 400.0)]
        width: f64,

        /// Rink height in logical units.
        #[arg(long, default_value_t = 200.0)]
        height: f64,

        /// Extra drill file (JSON) to merge over the built-ins.
        #[arg(long, value_name = "FILE")]
        drills: Option<PathBuf>,
    },
}

fn load_library(extra: Option<&Path>) -> Result<DrillLibrary> {
    let mut library = DrillLibrary::builtin();
    if let Some(path) = extra {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading drill file {}", path.display()))?;
        let count = library
            .merge_json(&json)
            .with_context(|| format!("parsing drill file {}", path.display()))?;
        log::info!("merged {} drills from {}", count, path.display());
    }
    Ok(library)
}

fn cmd_list(extra: Option<&Path>) -> Result<()> {
    let library = load_library(extra)?;
    let mut drills: Vec<&Drill> = library.all_drills().collect();
    drills.sort_by(|a, b| a.name.cmp(&b.name));
    for drill in drills {
        if drill.description.is_empty() {
            println!("{:<16} {}", drill.name, drill.title);
        } else {
            println!("{:<16} {:<16} {}", drill.name, drill.title, drill.description);
        }
    }
    Ok(())
}

fn cmd_render(
    name: &str,
    out: &Path,
    width: f64,
    height: f64,
    extra: Option<&Path>,
) -> Result<()> {
    let library = load_library(extra)?;
    let drill = library.resolve(name)?;

    let surface = PixmapSurface::new(width.round() as u32, height.round() as u32)
        .ok_or_else(|| anyhow!("cannot allocate a {}x{} pixel surface", width, height))?;
    let mut registry = SurfaceRegistry::new();
    registry.register("board", surface);

    let mut renderer = DiagramRenderer::bind(&mut registry, "board", RinkConfig::new(width, height))?;
    renderer.run_drill(drill);
    renderer
        .into_surface()
        .save_png(out)
        .with_context(|| format!("writing {}", out.display()))?;
    println!("rendered '{}' to {}", name, out.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::List { drills } => cmd_list(drills.as_deref()),
        Command::Render {
            drill,
            out,
            width,
            height,
            drills,
        } => cmd_render(&drill, &out, width, height, drills.as_deref()),
    }
}
