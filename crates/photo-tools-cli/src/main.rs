use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use photo_async_runtime::{
    AppLogger, HistoryStore, NoBackgroundService, PhotoClient, PhotoUpdate, WorkerContext,
    spawn_worker,
};
use photo_layout::{CollageLayoutType, EditorSession, Margins, TwoPhotoStyle};
use photo_render::{BorderStyle, ExportFormat, RenderOptions};
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "phts", about = "Photo sheet and collage tools", version)]
struct Cli {
    /// Directory holding saved history snapshots
    #[arg(long, global = true, default_value = "./.photo-history")]
    history_dir: PathBuf,

    /// Print the log after the command finishes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tile copies of photos onto printable sheets
    Sheet {
        /// Input image(s) - can specify multiple
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output file (.pdf, or .png for one image per sheet)
        #[arg(short, long)]
        output: PathBuf,

        /// Copies of each image
        #[arg(long, default_value = "1")]
        copies: usize,

        /// Photo width in --unit
        #[arg(long, default_value = "3.5")]
        width: f32,

        /// Photo height in --unit
        #[arg(long, default_value = "4.5")]
        height: f32,

        /// Unit for --width and --height
        #[arg(long, default_value = "cm", value_enum)]
        unit: UnitArg,

        /// Output paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Spacing between photos in mm
        #[arg(long, default_value = "2.0")]
        spacing: f32,

        /// Page margin in mm (uniform on all sides)
        #[arg(long, default_value = "5.0")]
        margin: f32,

        /// Border stroke width in preview pixels
        #[arg(long)]
        border: Option<f32>,

        /// Export resolution in DPI (at most 1200)
        #[arg(long, default_value = "300")]
        dpi: f32,

        /// Show statistics only, don't export
        #[arg(long)]
        stats_only: bool,
    },

    /// Arrange photos into a single-page collage
    Collage {
        /// Input image(s), at least two
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output file (.png or .pdf)
        #[arg(short, long)]
        output: PathBuf,

        /// Collage layout
        #[arg(long, default_value = "grid", value_enum)]
        layout: LayoutArg,

        /// Output paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Export resolution in DPI (at most 1200)
        #[arg(long, default_value = "300")]
        dpi: f32,
    },

    /// Inspect saved snapshots
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List snapshots, newest first
    List,
    /// Show one snapshot
    Show { id: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Cm,
    In,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A3,
    #[value(name = "4x6")]
    Photo4x6,
    #[value(name = "5x7")]
    Photo5x7,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Grid,
    Mosaic,
    Freeform,
    Split,
    Stacked,
    Diagonal,
    Hearts,
    Film,
}

impl From<UnitArg> for photo_layout::PhysicalUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Cm => Self::Centimeter,
            UnitArg::In => Self::Inch,
        }
    }
}

impl From<PaperArg> for photo_layout::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A3 => Self::A3,
            PaperArg::Photo4x6 => Self::Photo4x6,
            PaperArg::Photo5x7 => Self::Photo5x7,
        }
    }
}

impl LayoutArg {
    /// Grids are sized to the number of photos
    fn to_layout(self, photo_count: usize) -> CollageLayoutType {
        match self {
            LayoutArg::Grid => CollageLayoutType::grid_for(photo_count),
            LayoutArg::Mosaic => CollageLayoutType::Mosaic,
            LayoutArg::Freeform => CollageLayoutType::Freeform,
            LayoutArg::Split => CollageLayoutType::TwoPhoto(TwoPhotoStyle::Split),
            LayoutArg::Stacked => CollageLayoutType::TwoPhoto(TwoPhotoStyle::Stacked),
            LayoutArg::Diagonal => CollageLayoutType::TwoPhoto(TwoPhotoStyle::Diagonal),
            LayoutArg::Hearts => CollageLayoutType::TwoPhoto(TwoPhotoStyle::Hearts),
            LayoutArg::Film => CollageLayoutType::TwoPhoto(TwoPhotoStyle::Film),
        }
    }
}

/// Wait for the next update that isn't progress, turning worker errors into
/// command errors
async fn next_result(updates: &mut mpsc::UnboundedReceiver<PhotoUpdate>) -> Result<PhotoUpdate> {
    loop {
        match updates.recv().await {
            Some(PhotoUpdate::Progress {
                operation,
                current,
                total,
            }) => println!("  {}: {}/{}", operation, current, total),
            Some(PhotoUpdate::Error { message }) => bail!(message),
            Some(update) => return Ok(update),
            None => bail!("Worker stopped unexpectedly"),
        }
    }
}

/// Load images through the worker and return the names that decoded
async fn load_images(
    client: &PhotoClient,
    updates: &mut mpsc::UnboundedReceiver<PhotoUpdate>,
    input: Vec<PathBuf>,
) -> Result<Vec<String>> {
    client.load_images(input)?;
    match next_result(updates).await? {
        PhotoUpdate::ImagesLoaded {
            names, rejected, ..
        } => {
            for rejection in &rejected {
                eprintln!("Skipped {}: {}", rejection.name, rejection.reason);
            }
            Ok(names)
        }
        other => Err(anyhow!("Unexpected worker update: {:?}", other)),
    }
}

async fn wait_for_export(
    updates: &mut mpsc::UnboundedReceiver<PhotoUpdate>,
) -> Result<Vec<PathBuf>> {
    match next_result(updates).await? {
        PhotoUpdate::ExportComplete { paths } => Ok(paths),
        other => Err(anyhow!("Unexpected worker update: {:?}", other)),
    }
}

async fn save_history(
    client: &PhotoClient,
    updates: &mut mpsc::UnboundedReceiver<PhotoUpdate>,
    label: String,
    session: &EditorSession,
) -> Result<()> {
    client.save_history(label, session.snapshot())?;
    match next_result(updates).await? {
        PhotoUpdate::HistorySaved { id } => {
            println!("Saved history snapshot {}", id);
            Ok(())
        }
        other => Err(anyhow!("Unexpected worker update: {:?}", other)),
    }
}

fn print_summary(session: &EditorSession) -> Result<()> {
    let stats = session.statistics()?;
    println!("Sheet Statistics:");
    println!("  Grid: {} x {}", stats.columns, stats.rows);
    println!("  Slots per sheet: {}", stats.slots_per_sheet);
    println!("  Photos: {}", stats.source_photos);
    println!("  Sheets: {}", stats.sheets);
    println!("  Empty slots: {}", stats.empty_slots);
    if !stats.generatable {
        println!("  The photo size leaves no room on this paper");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logger = AppLogger::with_level(500, level);
    logger.init().context("Failed to install logger")?;

    let (client, mut updates, _worker) = spawn_worker(WorkerContext {
        history: HistoryStore::new(cli.history_dir.clone()),
        background: NoBackgroundService,
    });

    let result = run(cli.command, &client, &mut updates, &cli.history_dir).await;

    if cli.verbose {
        for entry in logger.entries() {
            eprintln!("{}", entry);
        }
    }

    result
}

async fn run(
    command: Commands,
    client: &PhotoClient,
    updates: &mut mpsc::UnboundedReceiver<PhotoUpdate>,
    history_dir: &std::path::Path,
) -> Result<()> {
    match command {
        Commands::Sheet {
            input,
            output,
            copies,
            width,
            height,
            unit,
            paper,
            spacing,
            margin,
            border,
            dpi,
            stats_only,
        } => {
            let names = load_images(client, updates, input).await?;

            let mut session = EditorSession::new();
            session.set_unit(unit.into());
            session.set_photo_size_in_unit(width, height)?;
            session.set_spacing(spacing)?;
            session.set_margins(Margins::uniform(margin))?;
            session.set_paper_size(paper.into())?;
            session.set_copies(copies)?;
            session.add_images(names)?;

            print_summary(&session)?;
            if stats_only {
                return Ok(());
            }
            if session.sheets().is_empty() {
                bail!("Nothing to export");
            }

            let options = RenderOptions {
                paper: paper.into(),
                dpi,
                border: border.map(|display_px| BorderStyle {
                    display_px,
                    ..Default::default()
                }),
                ..Default::default()
            };
            client.export_sheets(
                session.sheets().to_vec(),
                options,
                ExportFormat::from_path(&output),
                output.clone(),
            )?;
            for path in wait_for_export(updates).await? {
                println!("Exported → {}", path.display());
            }

            let label = format!("Sheet: {}", output.display());
            save_history(client, updates, label, &session).await?;
        }

        Commands::Collage {
            input,
            output,
            layout,
            paper,
            dpi,
        } => {
            let names = load_images(client, updates, input).await?;

            let mut session = EditorSession::new();
            session.set_paper_size(paper.into())?;
            let layout = layout.to_layout(names.len());
            session.load_collage(&names, layout)?;
            println!(
                "Collage: {} layout with {} photo(s)",
                layout.name(),
                session.collage_photos().len()
            );

            let options = RenderOptions {
                paper: paper.into(),
                dpi,
                ..Default::default()
            };
            client.export_collage(
                session.collage_photos().to_vec(),
                options,
                ExportFormat::from_path(&output),
                output.clone(),
            )?;
            for path in wait_for_export(updates).await? {
                println!("Exported → {}", path.display());
            }

            let label = format!("Collage: {}", output.display());
            save_history(client, updates, label, &session).await?;
        }

        Commands::History { action } => match action {
            HistoryAction::List => {
                client.list_history()?;
                match next_result(updates).await? {
                    PhotoUpdate::HistoryListed { entries } if entries.is_empty() => {
                        println!("No snapshots in {}", history_dir.display());
                    }
                    PhotoUpdate::HistoryListed { entries } => {
                        for entry in entries {
                            println!(
                                "{}  {}  {} image(s)  {}",
                                entry.id,
                                entry.created_at.format("%Y-%m-%d %H:%M:%S"),
                                entry.image_count,
                                entry.label
                            );
                        }
                    }
                    other => bail!("Unexpected worker update: {:?}", other),
                }
            }
            HistoryAction::Show { id } => {
                client.load_history(id)?;
                match next_result(updates).await? {
                    PhotoUpdate::HistoryLoaded { entry } => {
                        println!("{} ({})", entry.label, entry.id);
                        println!("  Saved: {}", entry.created_at.format("%Y-%m-%d %H:%M:%S"));
                        let session = EditorSession::from_state(entry.state)?;
                        let state = session.state();
                        println!("  Paper: {}", state.paper_size.name());
                        println!(
                            "  Photo size: {:.2} x {:.2} {}",
                            state.display_photo_width(),
                            state.display_photo_height(),
                            state.unit.name()
                        );
                        println!("  Images: {}", state.images.len());
                        print_summary(&session)?;
                        if !state.collage_photos.is_empty() {
                            println!(
                                "  Collage: {} layout, {} photo(s)",
                                state.collage_layout.name(),
                                state.collage_photos.len()
                            );
                        }
                    }
                    other => bail!("Unexpected worker update: {:?}", other),
                }
            }
        },
    }

    Ok(())
}
