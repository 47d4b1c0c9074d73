use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tagnote_core::default_log_level;

#[derive(Parser, Debug)]
#[command(name = "tagnote")]
#[command(about = "Keep tagged notes in a local SQLite file")]
#[command(version)]
pub struct Cli {
    /// Notebook database file (created when missing)
    #[arg(
        long,
        env = "TAGNOTE_DB",
        value_name = "PATH",
        default_value = "tagnote.sqlite3"
    )]
    pub db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "TAGNOTE_LOG_DIR", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "TAGNOTE_LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Remove a deleted tag's id from every note that references it
    #[arg(long)]
    pub detach_deleted_tags: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage tags
    #[command(subcommand)]
    Tag(TagCommand),
    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Create a tag
    Add { label: String },
    /// Change a tag label
    Rename { id: String, label: String },
    /// Delete a tag
    Delete { id: String },
    /// List all tags
    List,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Create a note
    Add(NoteFields),
    /// Replace title, body and tags of a note
    Edit {
        id: String,
        #[command(flatten)]
        fields: NoteFields,
    },
    /// Delete a note
    Delete { id: String },
    /// Show one note with its tags
    Show { id: String },
    /// List notes, optionally filtered
    List {
        /// Case-insensitive title substring
        #[arg(long)]
        title: Option<String>,
        /// Required tag id (repeatable)
        #[arg(long = "tag", value_name = "TAG_ID")]
        tags: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct NoteFields {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub body: String,
    /// Tag id to attach (repeatable)
    #[arg(long = "tag", value_name = "TAG_ID")]
    pub tags: Vec<String>,
}
