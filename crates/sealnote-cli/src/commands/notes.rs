//! Note listing and editing commands.

use sealnote_core::Note;

use crate::app::AppContext;
use crate::cli::{AddArgs, EditArgs, ListArgs, RemoveArgs, ShowArgs};
use crate::errors::from_store_error;
use crate::helpers::{confirm, is_interactive, note_index, read_body_field, read_line_field};
use crate::output::{render_note, render_note_list, OutputMode};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let mode = OutputMode::detect(args.json, args.format.as_deref());

    // A store that was never saved has no notes; don't ask for a new password.
    let store = if ctx.store_path()?.exists() {
        Some(ctx.open_store(args.no_input)?)
    } else {
        None
    };
    let notes = store.as_ref().map(|s| s.list()).unwrap_or_default();

    if notes.is_empty() && mode != OutputMode::Json {
        if !ctx.quiet() {
            println!("No notes yet.");
        }
        return Ok(());
    }

    println!("{}", render_note_list(mode, notes));
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let index = note_index(args.number)?;
    ctx.require_existing_store()?;
    let store = ctx.open_store(args.no_input)?;
    let note = store.get(index).map_err(from_store_error)?;
    let mode = OutputMode::detect(args.json, None);

    println!("{}", render_note(mode, args.number, note));
    Ok(())
}

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let interactive = is_interactive(args.no_input);
    let title = read_line_field("Title", args.title.clone(), None, interactive)?;
    let body = read_body_field(args.body.clone(), None, args.no_input)?;
    let note = Note::validated(&title, &body).map_err(from_store_error)?;

    let mut store = ctx.open_store(args.no_input)?;
    let index = store.add(note).map_err(from_store_error)?;

    if !ctx.quiet() {
        println!("Added note {}", index + 1);
    }
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let index = note_index(args.number)?;
    ctx.require_existing_store()?;
    let mut store = ctx.open_store(args.no_input)?;
    let current = store.get(index).map_err(from_store_error)?.clone();

    let interactive = is_interactive(args.no_input);
    let title = read_line_field(
        "Title",
        args.title.clone(),
        Some(&current.title),
        interactive,
    )?;
    let body = read_body_field(args.body.clone(), Some(&current.body), args.no_input)?;
    let note = Note::validated(&title, &body).map_err(from_store_error)?;

    store.update(index, note).map_err(from_store_error)?;

    if !ctx.quiet() {
        println!("Updated note {}", args.number);
    }
    Ok(())
}

pub fn handle_remove(ctx: &AppContext, args: &RemoveArgs) -> anyhow::Result<()> {
    let index = note_index(args.number)?;
    ctx.require_existing_store()?;
    let mut store = ctx.open_store(args.no_input)?;
    let title = store.get(index).map_err(from_store_error)?.title.clone();

    let prompt = format!("Delete note {} \"{}\"?", args.number, title);
    if !confirm(&prompt, args.yes, is_interactive(args.no_input))? {
        if !ctx.quiet() {
            println!("Cancelled");
        }
        return Ok(());
    }

    store.remove(index).map_err(from_store_error)?;

    if !ctx.quiet() {
        println!("Removed note {}", args.number);
    }
    Ok(())
}
