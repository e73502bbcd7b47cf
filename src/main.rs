use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use roiselect::annotator::AnnotatorSession;
use roiselect::capture::cache::ImageCache;
use roiselect::config::RoiSelectConfig;
use roiselect::domain::Size;
use roiselect::render::{RenderOptions, render_frame};
use roiselect::session::PointerEvent;

#[derive(Parser)]
#[command(name = "roiselect")]
#[command(version, about = "Annotate image folders with labeled rectangles", long_about = None)]
struct Cli {
    /// Config file (defaults to the user config dir)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Viewport the editor works in
    #[arg(long, value_name = "WxH", default_value = "800x600", value_parser = parse_size, global = true)]
    viewport: Size,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the images of a folder with their rectangle counts
    List {
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,
    },

    /// Write all rectangles of a folder as text
    Export {
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        /// Output text file
        #[arg(value_name = "OUT")]
        out: PathBuf,
    },

    /// Save every rectangle of every image as a PNG crop
    Crops {
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        /// Directory receiving <stem>_ROI_<n>.png files
        #[arg(value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Draw one rectangle by dragging between two viewport points
    Draw {
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        /// Image file name inside the folder
        #[arg(value_name = "FILE")]
        file: String,

        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    },

    /// Render the editor frame for an image to a PNG
    Render {
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        #[arg(value_name = "FILE")]
        file: String,

        #[arg(value_name = "OUT")]
        out: PathBuf,
    },
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {s}"))?;
    let width = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let height = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok(Size::new(width, height))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RoiSelectConfig::load_from(path)?,
        None => RoiSelectConfig::load(),
    };

    match cli.command {
        Commands::List { folder } => {
            let session = AnnotatorSession::open(&folder, config, cli.viewport)?;
            for file in session.files() {
                let count = session.annotations().check_out(file).len();
                println!("{file}\t{count}");
            }
        }
        Commands::Export { folder, out } => {
            let mut session = AnnotatorSession::open(&folder, config, cli.viewport)?;
            session.export(&out)?;
        }
        Commands::Crops { folder, out_dir } => {
            let mut session = AnnotatorSession::open(&folder, config, cli.viewport)?;
            let mut total = 0;
            for index in 0..session.files().len() {
                session.go_to(index)?;
                total += session.save_current_crops(&out_dir)?.len();
            }
            println!("Saved {total} crops to {}", out_dir.display());
        }
        Commands::Draw {
            folder,
            file,
            x0,
            y0,
            x1,
            y1,
        } => {
            let mut session = open_at(&folder, &file, config, cli.viewport)?;
            session.handle_pointer(PointerEvent::press(x0, y0));
            session.handle_pointer(PointerEvent::drag_to(x1, y1));
            let events = session.handle_pointer(PointerEvent::release(x1, y1));
            if events.is_empty() {
                bail!("Rectangle smaller than the minimum size, nothing drawn");
            }
            for event in &events {
                let roi = event.snapshot();
                let r = roi.original_pixels;
                println!(
                    "{} #{} {} {} {} {}",
                    event.kind(),
                    roi.index,
                    r.left,
                    r.top,
                    r.width(),
                    r.height()
                );
            }
            let config = session.close()?;
            if cli.config.is_none() {
                config.save();
            }
        }
        Commands::Render { folder, file, out } => {
            let session = open_at(&folder, &file, config.clone(), cli.viewport)?;
            let options = RenderOptions::from(&config);
            let frame = render_frame(session.editor(), &mut ImageCache::new(), &options);
            frame
                .save(&out)
                .with_context(|| format!("Failed to save frame: {}", out.display()))?;
        }
    }
    Ok(())
}

/// Open `folder` showing `file`
fn open_at(folder: &Path, file: &str, config: RoiSelectConfig, viewport: Size) -> Result<AnnotatorSession> {
    let mut session = AnnotatorSession::open(folder, config, viewport)?;
    let index = session
        .files()
        .iter()
        .position(|f| f == file)
        .with_context(|| format!("{file} is not an image in {}", folder.display()))?;
    session.go_to(index)?;
    Ok(session)
}
