//! `timegrid` CLI — check, edit, and rearrange weekly timetables from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # List overlapping classes in an exported timetable (stdin → stdout)
//! cat timetable.json | timegrid conflicts
//!
//! # Same, as JSON
//! timegrid conflicts -i timetable.json --json
//!
//! # Check every entry against the grid invariants
//! timegrid validate -i timetable.json
//!
//! # Add a class to the store (defaults to ./timetable.json or $TIMEGRID_STORE)
//! timegrid add --title Physics --day 2 --start 10:00 --end 11:15
//!
//! # Simulate dragging a block 60px down on a 840px-tall column
//! timegrid drag --id cls_3f9a0c1e --dy 60
//!
//! # Replace the store with an exported file, or export it
//! timegrid import -i backup.json
//! timegrid export -o backup.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::io::{self, Read};
use std::path::PathBuf;
use timegrid::layout::day_name;
use timegrid::store::DEFAULT_FILE_NAME;
use timegrid::{
    ConflictReport, EntryEditor, FileStore, GestureMode, GridMetrics, InteractionEngine, Point,
    ScheduleEntry, Timetable,
};

#[derive(Parser)]
#[command(name = "timegrid", version, about = "Weekly timetable conflict checker and editor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Timetable file used by add, remove, drag, import and export
    #[arg(long, global = true, env = "TIMEGRID_STORE", default_value = DEFAULT_FILE_NAME)]
    store: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Report overlapping entries
    Conflicts {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print the conflict report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that every entry is a valid grid placement
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Write the stored timetable as pretty JSON
    Export {
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Replace the stored timetable with an exported file
    Import {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Add a new entry to the store
    Add {
        #[arg(long)]
        title: String,
        /// Day index, 0 = Monday ... 6 = Sunday
        #[arg(long)]
        day: u8,
        /// Start time, HH:MM
        #[arg(long)]
        start: String,
        /// End time, HH:MM
        #[arg(long)]
        end: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove an entry from the store
    Remove {
        #[arg(long)]
        id: String,
    },
    /// Apply a pointer gesture to a stored entry
    Drag {
        #[arg(long)]
        id: String,
        #[arg(long, value_enum, default_value_t = ModeArg::Move)]
        mode: ModeArg,
        /// Horizontal pointer travel in pixels
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dx: f64,
        /// Vertical pointer travel in pixels
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        dy: f64,
        /// Height of a day column's content area in pixels
        #[arg(long, default_value_t = 840.0)]
        column_height: f64,
        /// Width of the whole grid in pixels
        #[arg(long, default_value_t = 700.0)]
        grid_width: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Move,
    ResizeEnd,
}

impl From<ModeArg> for GestureMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Move => GestureMode::Move,
            ModeArg::ResizeEnd => GestureMode::ResizeEnd,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = FileStore::new(cli.store);

    match cli.command {
        Commands::Conflicts { input, json } => {
            let entries = read_entries(input.as_deref())?;
            let report = ConflictReport::from_entries(&entries);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Validate { input } => {
            let entries = read_entries(input.as_deref())?;
            println!("{} entries OK", entries.len());
        }
        Commands::Export { output } => {
            let table = load_timetable(&store)?;
            let json = timegrid::export_json(table.entries())?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Import { input } => {
            let entries = read_entries(input.as_deref())?;
            store
                .save(&entries)
                .with_context(|| format!("Failed to write store: {}", store.path().display()))?;
            println!("Imported {} entries", entries.len());
        }
        Commands::Add {
            title,
            day,
            start,
            end,
            location,
            color,
        } => {
            let mut table = load_timetable(&store)?;
            let mut editor = EntryEditor::new();
            editor.open(None);
            let draft = editor.draft_mut();
            draft.title = title;
            draft.day = day;
            draft.start = start;
            draft.end = end;
            draft.location = location;
            if let Some(color) = color {
                draft.color = color;
            }
            let entry = editor.submit().context("Invalid entry")?;
            println!("{}", entry.id);
            table.upsert(entry);
            save_and_report(&store, &table)?;
        }
        Commands::Remove { id } => {
            let mut table = load_timetable(&store)?;
            if table.remove(&id).is_none() {
                anyhow::bail!("No entry with id '{}'", id);
            }
            println!("Removed {}", id);
            save_and_report(&store, &table)?;
        }
        Commands::Drag {
            id,
            mode,
            dx,
            dy,
            column_height,
            grid_width,
        } => {
            let mut table = load_timetable(&store)?;
            let entry = table
                .get(&id)
                .cloned()
                .with_context(|| format!("No entry with id '{}'", id))?;

            let metrics = GridMetrics::uniform(column_height, grid_width);
            let mut engine = InteractionEngine::new();
            engine.begin(&entry, mode.into(), Point::default(), &metrics);
            engine.update(Point::new(dx, dy));

            match engine.end() {
                Some(updated) => {
                    println!("Moved {} to {}", updated.id, describe(&updated));
                    table.upsert(updated);
                    save_and_report(&store, &table)?;
                }
                None => println!("No change"),
            }
        }
    }

    Ok(())
}

fn describe(entry: &ScheduleEntry) -> String {
    format!(
        "{} {}-{}",
        day_name(entry.day).unwrap_or("?"),
        entry.start,
        entry.end
    )
}

fn print_report(report: &ConflictReport) {
    if report.is_empty() {
        println!("No conflicts");
        return;
    }
    for c in &report.conflicts {
        println!("{} <-> {} ({} min)", c.id_a, c.id_b, c.overlap_minutes);
    }
    println!("{}", report.announcement());
}

/// A missing store is an empty timetable; a corrupt one is an error so it is
/// never silently overwritten.
fn load_timetable(store: &FileStore) -> Result<Timetable> {
    if !store.path().exists() {
        debug!("store {} not found, starting empty", store.path().display());
        return Ok(Timetable::default());
    }
    let entries = store
        .try_load()
        .with_context(|| format!("Failed to load store: {}", store.path().display()))?;
    Ok(Timetable::new(entries))
}

fn save_and_report(store: &FileStore, table: &Timetable) -> Result<()> {
    store
        .save(table.entries())
        .with_context(|| format!("Failed to write store: {}", store.path().display()))?;
    let report = table.conflicts();
    if !report.is_empty() {
        println!("{}", report.announcement());
    }
    Ok(())
}

fn read_entries(path: Option<&str>) -> Result<Vec<ScheduleEntry>> {
    let json = read_input(path)?;
    timegrid::import_json(&json).context("Failed to read timetable")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
