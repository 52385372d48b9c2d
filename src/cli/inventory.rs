//! Template and record inventory commands.

use anyhow::Result;
use clap::Subcommand;

use crate::build::Kind;
use crate::storage::user_store::{FavoriteTarget, UserStore};

use super::{confirm, output, parse_user_date};

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    #[command(about = "List templates of a kind")]
    List {
        #[arg(help = "recipe, meal, diet, workout, cycle or program")]
        kind: String,
    },
    #[command(about = "Show a template as a tree")]
    Show { kind: String, id: String },
    #[command(about = "Delete a template; later IDs shift down to close the gap")]
    Delete {
        kind: String,
        id: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Mark or unmark a template as a favorite")]
    Favorite {
        kind: String,
        id: String,
        #[arg(long)]
        remove: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    #[command(about = "List records of a kind")]
    List {
        #[arg(help = "diet or program")]
        kind: String,
    },
    #[command(about = "Show a record as a tree")]
    Show { kind: String, date: String },
    #[command(about = "Delete a record. Permanent")]
    Delete {
        kind: String,
        date: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Mark or unmark a record as a favorite")]
    Favorite {
        kind: String,
        date: String,
        #[arg(long)]
        remove: bool,
    },
}

pub async fn handle_template(store: &mut UserStore, command: TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::List { kind } => {
            let kind: Kind = kind.parse()?;
            let view = store.ref_view();
            let templates = store.templates(kind)?;
            if templates.is_empty() {
                println!("no {kind} templates");
            }
            for (id, node) in templates {
                println!("{id}  {}", node.label(view));
            }
        }
        TemplateCommand::Show { kind, id } => {
            let kind: Kind = kind.parse()?;
            let node = store.template(kind, &id)?;
            print!("{}", output::render_tree(node, store.ref_view()));
        }
        TemplateCommand::Delete { kind, id, yes } => {
            let kind: Kind = kind.parse()?;
            store.template(kind, &id)?;
            let ask = store.settings().ask_delete;
            if !confirm(&format!("Delete {kind} template {id}?"), ask, yes)? {
                println!("kept {kind} template {id}");
                return Ok(());
            }
            store.remove_template(kind, &id).await?;
            println!("deleted {kind} template {id}");
        }
        TemplateCommand::Favorite { kind, id, remove } => {
            let kind: Kind = kind.parse()?;
            store
                .set_favorite(FavoriteTarget::Template(kind, &id), !remove)
                .await?;
            println!(
                "{} {kind} template {id}",
                if remove { "unmarked" } else { "marked" }
            );
        }
    }
    Ok(())
}

pub async fn handle_record(store: &mut UserStore, command: RecordCommand) -> Result<()> {
    match command {
        RecordCommand::List { kind } => {
            let kind: Kind = kind.parse()?;
            let view = store.ref_view();
            let records = store.records(kind)?;
            if records.is_empty() {
                println!("no {kind} records");
            }
            for (date, node) in records {
                println!("{date}  {}", node.label(view));
            }
        }
        RecordCommand::Show { kind, date } => {
            let kind: Kind = kind.parse()?;
            let date = parse_user_date(&date)?;
            let node = store.record(kind, date)?;
            print!("{}", output::render_tree(node, store.ref_view()));
        }
        RecordCommand::Delete { kind, date, yes } => {
            let kind: Kind = kind.parse()?;
            let date = parse_user_date(&date)?;
            store.record(kind, date)?;
            let ask = store.settings().ask_delete;
            if !confirm(&format!("Delete the {kind} record for {date}?"), ask, yes)? {
                println!("kept the {kind} record for {date}");
                return Ok(());
            }
            store.remove_record(kind, date).await?;
            println!("deleted the {kind} record for {date}");
        }
        RecordCommand::Favorite { kind, date, remove } => {
            let kind: Kind = kind.parse()?;
            let date = parse_user_date(&date)?;
            store
                .set_favorite(FavoriteTarget::Record(kind, date), !remove)
                .await?;
            println!(
                "{} the {kind} record for {date}",
                if remove { "unmarked" } else { "marked" }
            );
        }
    }
    Ok(())
}
