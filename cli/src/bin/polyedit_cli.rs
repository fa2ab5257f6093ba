use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use cli::EditorScript;
use color_eyre::eyre::Result;
use image::RgbImage;
use strum::IntoEnumIterator;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

use polyedit::{
    EditorCommand, FrameSource, InputEvent, Key, Runner, Session, Surface,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay scripted editing sessions from a configuration file
    Run {
        /// Path to the JSON or TOML script file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// One-shot pipeline run: detect edges and polygonize a single image
    Extract {
        /// Path to the input image
        #[arg(short, long)]
        image: PathBuf,
        /// Path to save the polygon set as GeoJSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the script file schema and the available editor transitions
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { config } => run_script(config)?,
        Commands::Extract { image, output } => extract(image, output.as_deref())?,
        Commands::Schema => print_schema()?,
    }

    Ok(())
}

/// Frame source backed by the script's image files, in session order.
struct FileFrameSource {
    paths: VecDeque<PathBuf>,
}

impl FrameSource for FileFrameSource {
    fn next_frame(&mut self) -> polyedit::Result<Option<RgbImage>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };
        info!("Capturing frame from {:?}", path);
        Ok(Some(image::open(path)?.to_rgb8()))
    }
}

struct ScriptedSession {
    name: String,
    events: VecDeque<InputEvent>,
}

/// Headless surface replaying scripted events. Each session ends with an
/// implicit Escape once its events run out; the final working image and
/// the polygon set are written to the output directory.
struct ScriptedSurface {
    current: Option<ScriptedSession>,
    pending: VecDeque<ScriptedSession>,
    output_dir: PathBuf,
    last_frame: Option<RgbImage>,
}

impl ScriptedSurface {
    fn new(script: &EditorScript) -> Self {
        let mut pending: VecDeque<ScriptedSession> = script
            .sessions
            .iter()
            .map(|session| ScriptedSession {
                name: session.name.clone(),
                events: session.events.iter().cloned().collect(),
            })
            .collect();

        Self {
            current: pending.pop_front(),
            pending,
            output_dir: PathBuf::from(&script.output_dir),
            last_frame: None,
        }
    }
}

impl Surface for ScriptedSurface {
    fn present(&mut self, frame: &RgbImage) -> polyedit::Result<()> {
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn poll_event(&mut self) -> polyedit::Result<Option<InputEvent>> {
        let escape = InputEvent::Key { key: Key::Escape };
        let Some(active) = self.current.as_mut() else {
            return Ok(Some(escape));
        };
        Ok(Some(active.events.pop_front().unwrap_or(escape)))
    }

    fn session_ended(&mut self, session: &Session) -> polyedit::Result<()> {
        if let Some(active) = self.current.take() {
            if let Some(frame) = &self.last_frame {
                let png_path = self.output_dir.join(format!("{}.png", active.name));
                frame.save(&png_path)?;
                info!("Saved working image to {:?}", png_path);
            }

            let geojson_path = self.output_dir.join(format!("{}.geojson", active.name));
            session.save_geojson(&geojson_path)?;
            info!(
                "Saved {} polygon(s) to {:?}",
                session.polygons().len(),
                geojson_path
            );
        }

        self.current = self.pending.pop_front();
        Ok(())
    }
}

fn run_script(config_path: &Path) -> Result<()> {
    let script = EditorScript::from_file(config_path)?;
    script.validate()?;
    info!(
        "Running {} scripted session(s) from {:?}",
        script.sessions.len(),
        config_path
    );

    // Create output directory if it doesn't exist
    std::fs::create_dir_all(&script.output_dir)?;

    let source = FileFrameSource {
        paths: script
            .sessions
            .iter()
            .map(|session| PathBuf::from(&session.image))
            .collect(),
    };
    let surface = ScriptedSurface::new(&script);

    Runner::new(source, surface).run()?;

    info!("✅ All sessions completed");
    Ok(())
}

fn extract(image_path: &Path, output: Option<&Path>) -> Result<()> {
    let frame = image::open(image_path)?.to_rgb8();
    let mut session = Session::new(frame);

    session.apply(EditorCommand::DetectEdges)?;
    session.apply(EditorCommand::ExtractPolygons)?;

    info!(
        "Extracted {} polygon(s) from {:?}",
        session.polygons().len(),
        image_path
    );
    for (index, polygon) in session.polygons().iter().enumerate() {
        info!(
            "  polygon {}: {} vertices, area {:.1}, perimeter {:.1}",
            index,
            polygon.points.len(),
            polygon.area(),
            polygon.perimeter()
        );
    }

    if let Some(path) = output {
        session.save_geojson(path)?;
        info!("Saved GeoJSON to {:?}", path);
    }

    Ok(())
}

fn print_schema() -> Result<()> {
    let schema = schemars::schema_for!(EditorScript);
    println!("{}", serde_json::to_string_pretty(&schema)?);

    println!("\nEditor transitions:");
    for (index, name) in EditorCommand::command_names().iter().enumerate() {
        println!("   {}. {}", index + 1, name);
    }

    println!("\nTransition details:");
    for command in EditorCommand::iter() {
        println!("   {} - {}", command, command.description());
    }

    println!("\nTransition schema:");
    println!("{}", serde_json::to_string_pretty(&EditorCommand::schema())?);

    Ok(())
}
