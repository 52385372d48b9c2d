//! Commands that edit the build in progress.
//!
//! The workspace build plays the role of a build editor between
//! invocations: `build new` starts one, the `add`/`set`/`move`/`remove`
//! family reshapes it, and `save-template` / `save-record` file it into the
//! inventories. Elements are addressed by the dotted index paths printed by
//! `build show`.

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;

use crate::build::{format_path, parse_path, BuildNode, Kind, Payload, Period, Portion};
use crate::storage::user_store::UserStore;
use crate::utils::clock::Clock;
use crate::utils::numbers::parse_amount;
use crate::utils::time::{parse_minute, parse_time};

use super::{confirm, output, parse_user_date};

#[derive(Subcommand, Debug)]
pub enum BuildCommand {
    #[command(about = "Start a fresh build, discarding the one in progress")]
    New {
        #[arg(help = "diet, meal, recipe, program, cycle or workout")]
        kind: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Show the build in progress as a tree")]
    Show,
    #[command(about = "Show nutrient or muscle totals for the build")]
    Info {
        #[arg(long, help = "Element path to report on instead of the whole build")]
        at: Option<String>,
    },
    #[command(about = "Add a child element")]
    Add {
        #[arg(help = "meal, recipe, ingredient, cycle, workout or activity")]
        kind: String,
        #[arg(long, default_value = "root", help = "Parent element path")]
        at: String,
        #[arg(long, help = "Reference item ID, required for ingredient and activity")]
        item: Option<String>,
    },
    #[command(about = "Add a portion size to an Ingredient")]
    AddQuantity {
        #[arg(long, help = "Ingredient element path")]
        at: String,
        #[arg(help = "Amount; fractions like 3/4 work")]
        amount: String,
        unit: String,
    },
    #[command(about = "Add a performance measurement to an Activity")]
    AddSession {
        #[arg(long, help = "Activity element path")]
        at: String,
        effort: String,
        intensity: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    #[command(about = "Change an element's data")]
    Set {
        #[arg(long, default_value = "root")]
        at: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Diet date or Program start date")]
        date: Option<String>,
        #[arg(long, help = "Meal time of day, e.g. 18:30")]
        time: Option<String>,
        #[arg(long, help = "Recipe portion as consumed,prepared,unit")]
        portion: Option<String>,
        #[arg(long, help = "Workout begin, e.g. '2017-06-01 18:00'")]
        began: Option<String>,
        #[arg(long, help = "Workout end, e.g. '2017-06-01 19:00'")]
        ended: Option<String>,
        #[arg(long, help = "Quantity amount")]
        amount: Option<String>,
        #[arg(long, help = "Quantity unit")]
        unit: Option<String>,
        #[arg(long, help = "Session effort")]
        effort: Option<String>,
        #[arg(long, help = "Session intensity")]
        intensity: Option<String>,
        #[arg(long, help = "Session note")]
        note: Option<String>,
    },
    #[command(about = "Move an element up or down among its siblings")]
    Move {
        at: String,
        #[arg(value_parser = ["up", "down"])]
        direction: String,
    },
    #[command(about = "Remove an element and everything beneath it")]
    Remove {
        at: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Discard the build in progress")]
    Clear {
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Save the build as a reusable template")]
    SaveTemplate {
        #[arg(long, help = "Overwrite this existing template ID")]
        over: Option<String>,
        #[arg(long)]
        favorite: bool,
    },
    #[command(about = "Save the build as a dated record")]
    SaveRecord {
        #[arg(long)]
        favorite: bool,
        #[arg(long, help = "Previous record date when re-filing under a new date")]
        replaces: Option<String>,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Load a template into the build workspace")]
    LoadTemplate {
        kind: String,
        id: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Load a record into the build workspace for editing")]
    LoadRecord {
        kind: String,
        date: String,
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle(store: &mut UserStore, command: BuildCommand, clock: &dyn Clock) -> Result<()> {
    match command {
        BuildCommand::New { kind, yes } => {
            let kind: Kind = kind.parse()?;
            if !kind.is_top_level() {
                bail!("a build starts with a Diet, Meal, Recipe, Program, Cycle or Workout");
            }
            if !discard_workspace_allowed(store, yes)? {
                return Ok(());
            }
            store
                .set_workspace(Some(BuildNode::fresh(kind, None)?))
                .await?;
            println!("started a new {kind} build");
        }
        BuildCommand::Show => {
            let node = store
                .workspace()
                .ok_or_else(|| anyhow!("no build in progress; start one with `build new`"))?;
            print!("{}", output::render_tree(node, store.ref_view()));
        }
        BuildCommand::Info { at } => {
            let root = store
                .workspace()
                .ok_or_else(|| anyhow!("no build in progress; start one with `build new`"))?;
            let node = match &at {
                Some(path) => {
                    let path = parse_path(path)?;
                    root.node_at(&path)
                        .ok_or_else(|| anyhow!("no element at path {}", format_path(&path)))?
                }
                None => root,
            };
            let view = store.ref_view();
            if node.kind().is_nutrition() {
                let date = root.record_key().unwrap_or_else(|| clock.today());
                let targets = store.targets_for(date).map(|(_, targets)| targets);
                print!(
                    "{}",
                    output::info::nutrition_info(node, view, store.settings(), targets)
                );
            } else {
                print!(
                    "{}",
                    output::info::fitness_info(node, view, store.settings())
                );
            }
        }
        BuildCommand::Add { kind, at, item } => {
            let kind: Kind = kind.parse()?;
            match (kind, &item) {
                (Kind::Ingredient, Some(id)) => {
                    store.food(id)?;
                }
                (Kind::Activity, Some(id)) => {
                    store.exercise(id)?;
                }
                _ => {}
            }
            let child = BuildNode::fresh(kind, item.as_deref())?;
            let path = parse_path(&at)?;
            store
                .edit_workspace(|root| {
                    let parent = root
                        .node_at_mut(&path)
                        .ok_or_else(|| anyhow!("no element at path {}", format_path(&path)))?;
                    parent.attach(child)
                })
                .await?;
            println!("added a {kind}");
        }
        BuildCommand::AddQuantity { at, amount, unit } => {
            let amount = parse_amount(&amount)?;
            let path = parse_path(&at)?;
            store
                .edit_workspace(|root| {
                    let parent = root
                        .node_at_mut(&path)
                        .ok_or_else(|| anyhow!("no element at path {}", format_path(&path)))?;
                    let Payload::Ingredient { food_id } = &parent.payload else {
                        bail!("a Quantity goes under an Ingredient");
                    };
                    let quantity = BuildNode::quantity(food_id.clone(), amount, unit.clone());
                    parent.attach(quantity)
                })
                .await?;
            println!("added a Quantity");
        }
        BuildCommand::AddSession {
            at,
            effort,
            intensity,
            note,
        } => {
            let effort = parse_amount(&effort)?;
            let intensity = parse_amount(&intensity)?;
            let path = parse_path(&at)?;
            store
                .edit_workspace(|root| {
                    let parent = root
                        .node_at_mut(&path)
                        .ok_or_else(|| anyhow!("no element at path {}", format_path(&path)))?;
                    let Payload::Activity { exercise_id } = &parent.payload else {
                        bail!("a Session goes under an Activity");
                    };
                    let session =
                        BuildNode::session(exercise_id.clone(), effort, intensity, note.clone());
                    parent.attach(session)
                })
                .await?;
            println!("added a Session");
        }
        BuildCommand::Set {
            at,
            description,
            date,
            time,
            portion,
            began,
            ended,
            amount,
            unit,
            effort,
            intensity,
            note,
        } => {
            let path = parse_path(&at)?;
            // parse everything up front so a bad flag changes nothing
            let date = date.as_deref().map(parse_user_date).transpose()?;
            let time = time.as_deref().map(parse_time).transpose()?;
            let portion = portion.as_deref().map(parse_portion).transpose()?;
            let began = began.as_deref().map(parse_minute).transpose()?;
            let ended = ended.as_deref().map(parse_minute).transpose()?;
            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let effort = effort.as_deref().map(parse_amount).transpose()?;
            let intensity = intensity.as_deref().map(parse_amount).transpose()?;
            if began.is_some() != ended.is_some() {
                bail!("set a Workout period with both --began and --ended");
            }

            store
                .edit_workspace(|root| {
                    let node = root
                        .node_at_mut(&path)
                        .ok_or_else(|| anyhow!("no element at path {}", format_path(&path)))?;
                    if let Some(description) = &description {
                        node.set_description(description)?;
                    }
                    if let Some(date) = date {
                        node.set_date(date)?;
                    }
                    if let Some(time) = time {
                        node.set_time(time)?;
                    }
                    if let Some(portion) = portion.clone() {
                        node.set_portion(portion)?;
                    }
                    if let (Some(began), Some(ended)) = (began, ended) {
                        node.set_period(Period { began, ended })?;
                    }
                    if amount.is_some() || unit.is_some() {
                        let Payload::Quantity {
                            amount: current_amount,
                            unit: current_unit,
                            ..
                        } = &node.payload
                        else {
                            bail!("--amount and --unit apply to a Quantity");
                        };
                        let new_amount = amount.unwrap_or(*current_amount);
                        let new_unit = unit.clone().unwrap_or_else(|| current_unit.clone());
                        node.set_measure(new_amount, &new_unit)?;
                    }
                    if effort.is_some() || intensity.is_some() || note.is_some() {
                        let Payload::Session {
                            effort: current_effort,
                            intensity: current_intensity,
                            note: current_note,
                            ..
                        } = &node.payload
                        else {
                            bail!("--effort, --intensity and --note apply to a Session");
                        };
                        let new_effort = effort.unwrap_or(*current_effort);
                        let new_intensity = intensity.unwrap_or(*current_intensity);
                        let new_note = note.clone().unwrap_or_else(|| current_note.clone());
                        node.set_performance(new_effort, new_intensity, &new_note)?;
                    }
                    Ok(())
                })
                .await?;
            println!(
                "updated {}",
                if path.is_empty() { "the build" } else { at.as_str() }
            );
        }
        BuildCommand::Move { at, direction } => {
            let path = parse_path(&at)?;
            let offset = if direction == "up" { -1 } else { 1 };
            store
                .edit_workspace(|root| root.move_at(&path, offset))
                .await?;
            println!("moved {at} {direction}");
        }
        BuildCommand::Remove { at, yes } => {
            let path = parse_path(&at)?;
            let ask = store.settings().ask_delete;
            if !confirm(&format!("Remove the element at {at}?"), ask, yes)? {
                println!("kept {at}");
                return Ok(());
            }
            let removed = store
                .edit_workspace(|root| root.remove_at(&path))
                .await?;
            println!("removed {}", removed.label(store.ref_view()));
        }
        BuildCommand::Clear { yes } => {
            if store.workspace().is_none() {
                println!("no build in progress");
                return Ok(());
            }
            if !discard_workspace_allowed(store, yes)? {
                return Ok(());
            }
            store.set_workspace(None).await?;
            println!("discarded the build");
        }
        BuildCommand::SaveTemplate { over, favorite } => {
            let node = store
                .workspace()
                .ok_or_else(|| anyhow!("no build in progress; start one with `build new`"))?
                .clone();
            let kind = node.kind();
            let item_id = store.save_template(node, favorite, over.as_deref()).await?;
            println!("saved {kind} template {item_id}");
        }
        BuildCommand::SaveRecord {
            favorite,
            replaces,
            yes,
        } => {
            let node = store
                .workspace()
                .ok_or_else(|| anyhow!("no build in progress; start one with `build new`"))?
                .clone();
            let kind = node.kind();
            if !kind.is_record() {
                bail!("only Diet and Program builds can be saved as records");
            }
            let date = node
                .record_key()
                .ok_or_else(|| anyhow!("set a date with `build set --date` before recording"))?;
            let replaces = replaces.as_deref().map(parse_user_date).transpose()?;
            if store.record_exists(kind, date) && replaces != Some(date) {
                let prompt = format!("Overwrite the existing {kind} record for {date}?");
                if !confirm(&prompt, true, yes)? {
                    println!("kept the existing record");
                    return Ok(());
                }
            }
            let date = store.save_record(node, favorite, replaces).await?;
            println!("saved {kind} record {date}");
        }
        BuildCommand::LoadTemplate { kind, id, yes } => {
            let kind: Kind = kind.parse()?;
            let template = store.template(kind, &id)?.clone();
            if !discard_workspace_allowed(store, yes)? {
                return Ok(());
            }
            store.set_workspace(Some(template)).await?;
            println!("loaded {kind} template {id}; set fresh dates and times before recording");
        }
        BuildCommand::LoadRecord { kind, date, yes } => {
            let kind: Kind = kind.parse()?;
            let date = parse_user_date(&date)?;
            let record = store.record(kind, date)?.clone();
            if !discard_workspace_allowed(store, yes)? {
                return Ok(());
            }
            store.set_workspace(Some(record)).await?;
            println!("loaded {kind} record {date}; save it again with --replaces {date} if you change the date");
        }
    }
    Ok(())
}

fn discard_workspace_allowed(store: &UserStore, assume_yes: bool) -> Result<bool> {
    if store.workspace().is_none() {
        return Ok(true);
    }
    let ask = store.settings().ask_exit;
    let allowed = confirm("Discard the build in progress?", ask, assume_yes)?;
    if !allowed {
        println!("kept the build in progress");
    }
    Ok(allowed)
}

fn parse_portion(input: &str) -> Result<Portion> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("expected consumed,prepared,unit, got {input:?}");
    }
    Ok(Portion {
        consumed: parse_amount(parts[0])?,
        prepared: parse_amount(parts[1])?,
        unit: parts[2].to_string(),
    })
}
