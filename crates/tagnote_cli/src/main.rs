//! Command-line front end for the TagNote notebook.
//!
//! # Responsibility
//! - Map subcommands onto `Notebook` operations.
//! - Resolve configuration from flags and environment.
//! - Print results as JSON for scripting.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command, NoteCommand, NoteFields, TagCommand};
use log::info;
use tagnote_core::db::open_db;
use tagnote_core::{
    init_logging, NoteFilter, NoteId, NotePatch, Notebook, NotebookConfig, SqliteSlot, Tag,
    TagDeletePolicy, TagId,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(&cli.log_level, log_dir)?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open notebook at `{}`", cli.db.display()))?;
    let config = NotebookConfig {
        tag_delete_policy: if cli.detach_deleted_tags {
            TagDeletePolicy::DetachFromNotes
        } else {
            TagDeletePolicy::RetainReferences
        },
    };
    let mut notebook = Notebook::open(&conn, config)?;

    match cli.command {
        Command::Tag(command) => run_tag(&mut notebook, command),
        Command::Note(command) => run_note(&mut notebook, command),
    }
}

fn run_tag(notebook: &mut Notebook<SqliteSlot<'_>>, command: TagCommand) -> Result<()> {
    match command {
        TagCommand::Add { label } => {
            let tag = notebook.create_tag(label)?;
            print_json(&tag)
        }
        TagCommand::Rename { id, label } => {
            let id = TagId::from(id);
            if !notebook.rename_tag(&id, label)? {
                bail!("tag not found: {id}");
            }
            print_json(&notebook.tag_repository().get(&id))
        }
        TagCommand::Delete { id } => {
            let id = TagId::from(id);
            let deleted = notebook.delete_tag(&id)?;
            info!("event=cli_tag_delete module=cli status=ok tag_id={id} deleted={deleted}");
            print_json(&serde_json::json!({ "deleted": deleted }))
        }
        TagCommand::List => print_json(&notebook.tags()),
    }
}

fn run_note(notebook: &mut Notebook<SqliteSlot<'_>>, command: NoteCommand) -> Result<()> {
    match command {
        NoteCommand::Add(fields) => {
            let patch = build_patch(notebook, fields)?;
            let note = notebook.create_note(&patch)?;
            print_json(&notebook.get_note(&note.id))
        }
        NoteCommand::Edit { id, fields } => {
            let id = NoteId::from(id);
            let patch = build_patch(notebook, fields)?;
            if !notebook.update_note(&id, &patch)? {
                bail!("note not found: {id}");
            }
            print_json(&notebook.get_note(&id))
        }
        NoteCommand::Delete { id } => {
            let deleted = notebook.delete_note(&NoteId::from(id))?;
            print_json(&serde_json::json!({ "deleted": deleted }))
        }
        NoteCommand::Show { id } => {
            let id = NoteId::from(id);
            match notebook.get_note(&id) {
                Some(note) => print_json(&note),
                None => bail!("note not found: {id}"),
            }
        }
        NoteCommand::List { title, tags } => {
            let filter = NoteFilter {
                title: title.unwrap_or_default(),
                tag_ids: tags.into_iter().map(TagId::from).collect(),
            };
            print_json(&notebook.filter_resolved_notes(&filter))
        }
    }
}

/// Builds a patch, requiring every selected tag id to exist.
fn build_patch(notebook: &Notebook<SqliteSlot<'_>>, fields: NoteFields) -> Result<NotePatch> {
    let tags = fields
        .tags
        .iter()
        .map(|id| {
            notebook
                .tag_repository()
                .get(&TagId::from(id.as_str()))
                .cloned()
                .with_context(|| format!("tag not found: {id}"))
        })
        .collect::<Result<Vec<Tag>>>()?;
    Ok(NotePatch {
        title: fields.title,
        body: fields.body,
        tags,
    })
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
