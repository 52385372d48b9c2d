//! Food and Exercise inventory commands, plus capsule sharing.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;

use crate::refdata;
use crate::reference::{ExerciseDetail, FoodDetail, NutrientContent, UnitSequence};
use crate::storage::user_store::{FavoriteTarget, UserStore};
use crate::utils::numbers::parse_amount;

use super::{confirm, output, split_pair};

#[derive(Subcommand, Debug)]
pub enum FoodCommand {
    #[command(about = "Create a Food item")]
    Add {
        description: String,
        #[arg(long, help = "Food group ID, e.g. 0800 for breakfast cereals")]
        group: String,
        #[arg(
            long = "measure",
            help = "Measure conversion amount,unit,grams (e.g. '1,cup,81'). Repeatable"
        )]
        measures: Vec<String>,
        #[arg(
            long = "nutrient",
            help = "Nutrient content per 100 g as id=value (e.g. '203=13.15'). Repeatable"
        )]
        nutrients: Vec<String>,
        #[arg(long)]
        favorite: bool,
    },
    #[command(about = "Edit a Food item; omitted options keep their value")]
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long = "measure", help = "Replaces all measure conversions when given")]
        measures: Vec<String>,
        #[arg(long = "nutrient", help = "Replaces the nutrient content when given")]
        nutrients: Vec<String>,
    },
    #[command(about = "Delete a Food item, reporting where it is still used")]
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "List Food items")]
    List {
        #[arg(long, help = "Only favorites")]
        favorites: bool,
    },
    #[command(about = "Show a Food item's details and nutrient content")]
    Show { id: String },
    #[command(about = "Mark or unmark a Food item as a favorite")]
    Favorite {
        id: String,
        #[arg(long)]
        remove: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExerciseCommand {
    #[command(about = "Create an Exercise item")]
    Add {
        description: String,
        #[arg(long, help = "Focus muscle, e.g. Quadriceps or NA")]
        muscle: String,
        #[arg(
            long,
            help = "Performance metric units as effort,intensity (e.g. 'rep,lb')"
        )]
        units: String,
        #[arg(long = "tag", help = "Info tag. Repeatable")]
        tags: Vec<String>,
        #[arg(long)]
        favorite: bool,
    },
    #[command(about = "Edit an Exercise item; omitted options keep their value")]
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        muscle: Option<String>,
        #[arg(long)]
        units: Option<String>,
        #[arg(long = "tag", help = "Replaces all tags when given")]
        tags: Vec<String>,
    },
    #[command(about = "Delete an Exercise item, reporting where it is still used")]
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "List Exercise items with their metric units")]
    List {
        #[arg(long, help = "Only favorites")]
        favorites: bool,
    },
    #[command(about = "Show an Exercise item")]
    Show { id: String },
    #[command(about = "Mark or unmark an Exercise item as a favorite")]
    Favorite {
        id: String,
        #[arg(long)]
        remove: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CapsuleCommand {
    #[command(about = "Export one reference item as a shareable capsule file")]
    Export {
        #[arg(help = "food or exercise")]
        kind: String,
        id: String,
        #[arg(long, help = "Output file. Defaults to <Kind>DataCapsule-<description>.json")]
        out: Option<PathBuf>,
    },
    #[command(about = "Create reference items from capsule files, best effort per file")]
    Import { files: Vec<PathBuf> },
}

fn parse_measure(input: &str) -> Result<UnitSequence> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("expected amount,unit,grams, got {input:?}");
    }
    Ok(UnitSequence {
        amount: parse_amount(parts[0])?,
        unit: parts[1].to_string(),
        grams: parse_amount(parts[2])?,
    })
}

fn parse_measures(inputs: &[String]) -> Result<Vec<UnitSequence>> {
    inputs.iter().map(|input| parse_measure(input)).collect()
}

fn parse_nutrients(inputs: &[String]) -> Result<NutrientContent> {
    let mut content = NutrientContent::new();
    for input in inputs {
        let (nutrient_id, value) = split_pair(input)?;
        content.insert(nutrient_id.to_string(), parse_amount(value)?);
    }
    Ok(content)
}

fn parse_units(input: &str) -> Result<[String; 2]> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [effort, intensity] => Ok([effort.to_string(), intensity.to_string()]),
        _ => bail!("expected effort,intensity units, got {input:?}"),
    }
}

pub async fn handle_food(store: &mut UserStore, command: FoodCommand) -> Result<()> {
    match command {
        FoodCommand::Add {
            description,
            group,
            measures,
            nutrients,
            favorite,
        } => {
            let detail = FoodDetail {
                description,
                group_id: group,
                unit_sequences: parse_measures(&measures)?,
            };
            let nutrients = parse_nutrients(&nutrients)?;
            let item_id = store.add_food(detail, nutrients, favorite).await?;
            let (detail, _) = store.food(&item_id)?;
            println!("created Food {item_id}: {}", detail.description);
        }
        FoodCommand::Edit {
            id,
            description,
            group,
            measures,
            nutrients,
        } => {
            let (current, current_nutrients) = store.food(&id)?;
            let mut detail = current.clone();
            let mut content = current_nutrients.clone();
            if let Some(description) = description {
                detail.description = description;
            }
            if let Some(group) = group {
                detail.group_id = group;
            }
            if !measures.is_empty() {
                detail.unit_sequences = parse_measures(&measures)?;
            }
            if !nutrients.is_empty() {
                content = parse_nutrients(&nutrients)?;
            }
            store.update_food(&id, detail, content).await?;
            println!("updated Food {id}");
        }
        FoodCommand::Delete { id, yes } => {
            store.food(&id)?;
            let usage = store.reference_usage(&id, true);
            if usage.is_used() {
                println!("Food {id} is still referenced:");
                print_usage(&usage);
            }
            let ask = store.settings().ask_delete;
            if !confirm(&format!("Delete Food {id}?"), ask, yes)? {
                println!("kept Food {id}");
                return Ok(());
            }
            store.remove_food(&id).await?;
            println!("deleted Food {id}");
        }
        FoodCommand::List { favorites } => {
            let settings = store.settings();
            let rows: Vec<(String, String)> = store
                .foods()
                .iter()
                .filter(|(id, _)| !favorites || settings.favorites.foods.contains(*id))
                .map(|(id, detail)| (id.clone(), detail.description.clone()))
                .collect();
            let rows = output::sort_items(rows, settings.sort_by_id, settings.sort_ascending);
            if rows.is_empty() {
                println!("no Food items");
            }
            for (id, description) in rows {
                println!("{id}  {description}");
            }
        }
        FoodCommand::Show { id } => {
            let (detail, nutrients) = store.food(&id)?;
            println!("{id}: {}", detail.description);
            let group = refdata::food_group_name(&detail.group_id).unwrap_or("unknown group");
            println!("group: {} ({})", group, detail.group_id);
            for sequence in &detail.unit_sequences {
                println!(
                    "measure: {} {} = {} g",
                    sequence.amount, sequence.unit, sequence.grams
                );
            }
            for (nutrient_id, value) in nutrients {
                if let Some(nutrient) = refdata::nutrient(nutrient_id) {
                    println!(
                        "{}: {} {} per 100 g",
                        nutrient.name, value, nutrient.unit
                    );
                }
            }
        }
        FoodCommand::Favorite { id, remove } => {
            store
                .set_favorite(FavoriteTarget::Food(&id), !remove)
                .await?;
            println!("{} Food {id}", if remove { "unmarked" } else { "marked" });
        }
    }
    Ok(())
}

pub async fn handle_exercise(store: &mut UserStore, command: ExerciseCommand) -> Result<()> {
    match command {
        ExerciseCommand::Add {
            description,
            muscle,
            units,
            tags,
            favorite,
        } => {
            let detail = ExerciseDetail {
                description,
                focus_muscle: muscle,
                units: parse_units(&units)?,
                tags,
            };
            let item_id = store.add_exercise(detail, favorite).await?;
            let detail = store.exercise(&item_id)?;
            println!("created Exercise {item_id}: {}", detail.description);
        }
        ExerciseCommand::Edit {
            id,
            description,
            muscle,
            units,
            tags,
        } => {
            let mut detail = store.exercise(&id)?.clone();
            if let Some(description) = description {
                detail.description = description;
            }
            if let Some(muscle) = muscle {
                detail.focus_muscle = muscle;
            }
            if let Some(units) = units {
                detail.units = parse_units(&units)?;
            }
            if !tags.is_empty() {
                detail.tags = tags;
            }
            store.update_exercise(&id, detail).await?;
            println!("updated Exercise {id}");
        }
        ExerciseCommand::Delete { id, yes } => {
            store.exercise(&id)?;
            let usage = store.reference_usage(&id, false);
            if usage.is_used() {
                println!("Exercise {id} is still referenced:");
                print_usage(&usage);
            }
            let ask = store.settings().ask_delete;
            if !confirm(&format!("Delete Exercise {id}?"), ask, yes)? {
                println!("kept Exercise {id}");
                return Ok(());
            }
            store.remove_exercise(&id).await?;
            println!("deleted Exercise {id}");
        }
        ExerciseCommand::List { favorites } => {
            let settings = store.settings();
            let rows: Vec<(String, String)> = store
                .exercises()
                .iter()
                .filter(|(id, _)| !favorites || settings.favorites.exercises.contains(*id))
                .map(|(id, detail)| {
                    (
                        id.clone(),
                        format!(
                            "{}  [{} / {}]",
                            detail.description, detail.units[0], detail.units[1]
                        ),
                    )
                })
                .collect();
            let rows = output::sort_items(rows, settings.sort_by_id, settings.sort_ascending);
            if rows.is_empty() {
                println!("no Exercise items");
            }
            for (id, description) in rows {
                println!("{id}  {description}");
            }
        }
        ExerciseCommand::Show { id } => {
            let detail = store.exercise(&id)?;
            println!("{id}: {}", detail.description);
            println!("focus muscle: {}", detail.focus_muscle);
            println!("units: {} / {}", detail.units[0], detail.units[1]);
            if !detail.tags.is_empty() {
                println!("tags: {}", detail.tags.join(", "));
            }
        }
        ExerciseCommand::Favorite { id, remove } => {
            store
                .set_favorite(FavoriteTarget::Exercise(&id), !remove)
                .await?;
            println!(
                "{} Exercise {id}",
                if remove { "unmarked" } else { "marked" }
            );
        }
    }
    Ok(())
}

pub async fn handle_capsule(store: &mut UserStore, command: CapsuleCommand) -> Result<()> {
    match command {
        CapsuleCommand::Export { kind, id, out } => match kind.to_ascii_lowercase().as_str() {
            "food" => {
                let (detail, _) = store.food(&id)?;
                let path = out.unwrap_or_else(|| {
                    PathBuf::from(format!("FoodDataCapsule-{}.json", detail.description))
                });
                store.export_food_capsule(&id, &path).await?;
                println!("wrote {}", path.display());
            }
            "exercise" => {
                let detail = store.exercise(&id)?;
                let path = out.unwrap_or_else(|| {
                    PathBuf::from(format!("ExerciseDataCapsule-{}.json", detail.description))
                });
                store.export_exercise_capsule(&id, &path).await?;
                println!("wrote {}", path.display());
            }
            other => return Err(anyhow!("expected food or exercise, got {other:?}")),
        },
        CapsuleCommand::Import { files } => {
            if files.is_empty() {
                bail!("give at least one capsule file to import");
            }
            let report = store.import_capsules(&files).await;
            for (path, item_id, description) in &report.created {
                println!("{}: created {item_id} ({description})", path.display());
            }
            for (path, reason) in &report.skipped {
                println!("{}: skipped ({reason})", path.display());
            }
            println!(
                "imported {} of {} capsules",
                report.created.len(),
                files.len()
            );
        }
    }
    Ok(())
}

fn print_usage(usage: &crate::storage::user_store::UsageCounts) {
    if usage.in_workspace {
        println!("  - the build in progress");
    }
    if usage.record_count > 0 {
        println!("  - {} record(s)", usage.record_count);
    }
    for (kind, count) in &usage.template_counts {
        if *count > 0 {
            println!("  - {count} {kind} template(s)");
        }
    }
}
