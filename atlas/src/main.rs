use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use layout_core::{
    Dataset, DisplayMode, LayoutConfig, SceneLayout, build_plan_svg, build_scene, render_png,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atlas", version, about = "Lay out consumption atlas scenes and export plan blueprints")]
struct Cli {
    /// Log layout decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the scene layout as JSON
    Layout {
        #[command(flatten)]
        scene: SceneArgs,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Write a plan-view blueprint; the output extension picks SVG or PNG
    Plan {
        #[command(flatten)]
        scene: SceneArgs,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = 40.0)]
        px_per_unit: f64,
    },
    /// List countries with consumption data, sorted by name
    Countries { dataset: PathBuf },
}

#[derive(Args)]
struct SceneArgs {
    /// Dataset JSON ({"data": [...]})
    dataset: PathBuf,
    /// Show one country
    #[arg(long, conflicts_with = "compare", required_unless_present = "compare")]
    country: Option<String>,
    /// Compare countries front to back, e.g. USA,CHN,IND
    #[arg(long, value_delimiter = ',')]
    compare: Vec<String>,
    /// Layout overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SceneArgs {
    fn mode(&self) -> DisplayMode {
        match &self.country {
            Some(code) => DisplayMode::single(code),
            None => DisplayMode::comparison(self.compare.as_slice()),
        }
    }

    fn build(&self) -> Result<SceneLayout, Box<dyn std::error::Error>> {
        let dataset = Dataset::load(&self.dataset)?;
        let config = match &self.config {
            Some(path) => LayoutConfig::load(path)?,
            None => LayoutConfig::default(),
        };
        let mode = self.mode();
        let scene = build_scene(&dataset, &mode, &config);
        if scene.is_empty() {
            return Err(format!("no data for {mode:?} in {}", self.dataset.display()).into());
        }
        tracing::info!(countries = scene.len(), mode = ?scene.mode, "scene ready");
        Ok(scene)
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Layout {
            scene,
            output,
            pretty,
        } => {
            let scene = scene.build()?;
            let json = if pretty {
                serde_json::to_string_pretty(&scene)?
            } else {
                serde_json::to_string(&scene)?
            };
            match output {
                Some(path) => fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        Command::Plan {
            scene,
            output,
            px_per_unit,
        } => {
            if !(px_per_unit.is_finite() && px_per_unit > 0.0) {
                return Err(format!("px-per-unit must be positive, got {px_per_unit}").into());
            }
            let scene = scene.build()?;
            let (svg, w_px, h_px) = build_plan_svg(&scene, px_per_unit);
            if is_png(&output) {
                fs::write(&output, render_png(&svg, w_px, h_px)?)?;
            } else {
                fs::write(&output, svg)?;
            }
            tracing::info!(path = %output.display(), w_px, h_px, "blueprint written");
        }
        Command::Countries { dataset } => {
            let dataset = Dataset::load(&dataset)?;
            for c in dataset.selectable() {
                let total = c.volumes.total.map(atlas_core::format_volume).unwrap_or_default();
                match c.population {
                    Some(p) => println!("{}\t{}\t{}\tpopulation {:.0}", c.code, c.name, total, p),
                    None => println!("{}\t{}\t{}", c.code, c.name, total),
                }
            }
        }
    }
    Ok(())
}
