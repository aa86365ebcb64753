//! Diario CLI
//!
//! Command-line interface for Diario - a shared journal for two.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use diario_core::{Category, CategoryFilter, Config, Journal, Profile, ReactionKind};

mod commands;
mod editor;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "diario")]
#[command(about = "Diario - Mensajes amoriños en cualquier momento del día")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use this config file instead of the default
    #[arg(long = "config", global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter the PIN to open the journal on this device
    Unlock {
        /// PIN (prompted for when omitted)
        pin: Option<String>,
    },
    /// Write, browse and react to notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage the cover photo gallery
    Gallery {
        #[command(subcommand)]
        command: GalleryCommands,
    },
    /// Show note and reaction totals
    Stats,
    /// Export all notes to a JSON file
    Export {
        /// Output file (defaults to amorinhos_diario.json)
        path: Option<PathBuf>,
    },
    /// Replace all notes with a JSON export
    Import {
        /// Exported JSON file
        path: PathBuf,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Post a new note
    #[command(alias = "new")]
    Add {
        /// Message text (opens $EDITOR if neither text nor photo is given)
        text: Option<String>,
        /// Category: carinitos, favores, reminders, recuerdos
        #[arg(short, long, default_value = "carinitos")]
        category: Category,
        /// Who is writing: mj or luis (defaults to default_author)
        #[arg(short, long)]
        author: Option<Profile>,
        /// Image file to attach
        #[arg(short, long)]
        photo: Option<PathBuf>,
    },
    /// List notes, newest first
    #[command(alias = "ls")]
    List {
        /// Only this category (or "all")
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,
        /// Only notes whose text contains this (case-insensitive)
        #[arg(short = 's', long = "search")]
        query: Option<String>,
    },
    /// Show a note
    Show {
        /// Note ID (full UUID or prefix)
        id: String,
    },
    /// React to a note: heart, star, sun, music
    React {
        /// Note ID (full UUID or prefix)
        id: String,
        /// Reaction
        reaction: ReactionKind,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID (full UUID or prefix)
        id: String,
    },
    /// Save a note's photo to a file
    Photo {
        /// Note ID (full UUID or prefix)
        id: String,
        /// Output file (defaults to <id>.<ext>)
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum GalleryCommands {
    /// Add an image as the new cover
    Add {
        /// Image file
        image: PathBuf,
    },
    /// List gallery photos, cover first
    #[command(alias = "ls")]
    List,
    /// Rotate to the next cover
    Next,
    /// Rotate to the previous cover
    Prev,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, default_author, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config_file.as_ref();

    // Config commands work without opening the journal
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config = Config::load_with_cli_override(config_path)?;
    logging::init(&config, cli.verbose);

    let mut journal = Journal::open_with_config(&config);

    if let Commands::Unlock { pin } = cli.command {
        return commands::unlock::unlock(&mut journal, pin, &output);
    }

    commands::unlock::ensure_unlocked(&mut journal, &output)?;

    match cli.command {
        Commands::Unlock { .. } => unreachable!(), // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Note { command } => handle_note_command(command, &mut journal, &config, &output),
        Commands::Gallery { command } => handle_gallery_command(command, &mut journal, &output),
        Commands::Stats => commands::stats::show(&journal, &output),
        Commands::Export { path } => commands::transfer::export(&journal, path, &output),
        Commands::Import { path } => commands::transfer::import(&mut journal, path, &output),
    }
}

fn handle_note_command(
    command: NoteCommands,
    journal: &mut Journal,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        NoteCommands::Add {
            text,
            category,
            author,
            photo,
        } => commands::note::add(journal, config, text, category, author, photo, output),
        NoteCommands::List { category, query } => {
            commands::note::list(journal, category, query, output)
        }
        NoteCommands::Show { id } => commands::note::show(journal, id, output),
        NoteCommands::React { id, reaction } => {
            commands::note::react(journal, id, reaction, output)
        }
        NoteCommands::Delete { id } => commands::note::delete(journal, id, output),
        NoteCommands::Photo { id, out } => commands::note::save_photo(journal, id, out, output),
    }
}

fn handle_gallery_command(
    command: GalleryCommands,
    journal: &mut Journal,
    output: &Output,
) -> Result<()> {
    match command {
        GalleryCommands::Add { image } => commands::gallery::add(journal, image, output),
        GalleryCommands::List => commands::gallery::list(journal, output),
        GalleryCommands::Next => commands::gallery::next(journal, output),
        GalleryCommands::Prev => commands::gallery::prev(journal, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
