//! Health Diary, Nutrient Guide and settings commands.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::refdata;
use crate::storage::user_store::UserStore;
use crate::utils::clock::Clock;
use crate::utils::numbers::{fmt_amount, parse_amount, TargetInput};

use super::{confirm, parse_user_date, split_pair};

#[derive(Subcommand, Debug)]
pub enum DiaryCommand {
    #[command(about = "Record health measurements, e.g. `diary add weight=180.5 sleep=7`")]
    Add {
        #[arg(help = "Measurements as metric=value")]
        measurements: Vec<String>,
        #[arg(long, help = "Entry date; defaults to today")]
        date: Option<String>,
    },
    #[command(about = "Show diary entries")]
    Show {
        #[arg(long, help = "First date to show, e.g. '2 weeks ago'")]
        from: Option<String>,
        #[arg(long, help = "Last date to show")]
        to: Option<String>,
        #[arg(long, help = "Only this health metric")]
        metric: Option<String>,
    },
    #[command(about = "Remove a whole diary entry")]
    RemoveEntry {
        date: String,
        #[arg(long)]
        yes: bool,
    },
    #[command(about = "Remove one health metric from every entry")]
    RemoveMetric {
        metric: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum GuideCommand {
    #[command(
        about = "Set the nutrient targets effective from a date, e.g. `guide set 203=120 208=15%`"
    )]
    Set {
        #[arg(help = "Targets as nutrient-id=amount or nutrient-id=percent%")]
        targets: Vec<String>,
        #[arg(long, help = "Effective date; defaults to today")]
        date: Option<String>,
    },
    #[command(about = "Show nutrient targets per effective date")]
    Show,
    #[command(about = "Remove the targets effective from a date")]
    Remove {
        date: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    #[command(about = "Show the acting user's settings")]
    Show,
    #[command(about = "Change a yes/no setting, e.g. `settings set ask-delete false`")]
    Set {
        #[arg(help = "ask-delete, ask-exit, whole-build-info, sort-by-id or sort-ascending")]
        key: String,
        #[arg(help = "true or false")]
        value: String,
    },
    #[command(about = "Set which nutrients build info shows, in order")]
    Nutrients { ids: Vec<String> },
    #[command(about = "Set which focus muscles build info shows, in order")]
    Muscles { names: Vec<String> },
}

pub async fn handle_diary(
    store: &mut UserStore,
    command: DiaryCommand,
    clock: &dyn Clock,
) -> Result<()> {
    match command {
        DiaryCommand::Add { measurements, date } => {
            let date = match date {
                Some(input) => parse_user_date(&input)?,
                None => clock.today(),
            };
            let mut entry = BTreeMap::new();
            for measurement in &measurements {
                let (metric, value) = split_pair(measurement)?;
                entry.insert(metric.to_string(), parse_amount(value)?);
            }
            store.add_diary_entry(date, entry).await?;
            println!("recorded {} measurement(s) for {date}", measurements.len());
        }
        DiaryCommand::Show { from, to, metric } => {
            let from = from.as_deref().map(parse_user_date).transpose()?;
            let to = to.as_deref().map(parse_user_date).transpose()?;
            let mut shown = 0;
            for (date, measurements) in store.diary() {
                if from.is_some_and(|from| *date < from) || to.is_some_and(|to| *date > to) {
                    continue;
                }
                let mut line = String::new();
                for (name, value) in measurements {
                    if metric.as_deref().is_some_and(|wanted| wanted != name) {
                        continue;
                    }
                    if !line.is_empty() {
                        line.push_str(", ");
                    }
                    line.push_str(&format!("{name}={}", fmt_amount(*value)));
                }
                if !line.is_empty() {
                    println!("{date}  {line}");
                    shown += 1;
                }
            }
            if shown == 0 {
                println!("no diary entries to show");
            }
        }
        DiaryCommand::RemoveEntry { date, yes } => {
            let date = parse_user_date(&date)?;
            let ask = store.settings().ask_delete;
            if !confirm(&format!("Remove the diary entry for {date}?"), ask, yes)? {
                println!("kept the entry for {date}");
                return Ok(());
            }
            store.remove_diary_entry(date).await?;
            println!("removed the diary entry for {date}");
        }
        DiaryCommand::RemoveMetric { metric, yes } => {
            let ask = store.settings().ask_delete;
            let prompt = format!("Remove {metric:?} from every diary entry?");
            if !confirm(&prompt, ask, yes)? {
                println!("kept {metric:?}");
                return Ok(());
            }
            let removed = store.remove_health_metric(&metric).await?;
            println!("removed {metric:?} from {removed} entr(y/ies)");
        }
    }
    Ok(())
}

pub async fn handle_guide(
    store: &mut UserStore,
    command: GuideCommand,
    clock: &dyn Clock,
) -> Result<()> {
    match command {
        GuideCommand::Set { targets, date } => {
            let date = match date {
                Some(input) => parse_user_date(&input)?,
                None => clock.today(),
            };
            let mut resolved = BTreeMap::new();
            for target in &targets {
                let (nutrient_id, value) = split_pair(target)?;
                let input: TargetInput = value.parse()?;
                resolved.insert(nutrient_id.to_string(), input.resolve(nutrient_id)?);
            }
            store.set_targets(date, resolved).await?;
            println!("set {} target(s) effective {date}", targets.len());
        }
        GuideCommand::Show => {
            if store.guide().is_empty() {
                println!("no nutrient targets set");
            }
            for (date, targets) in store.guide() {
                println!("effective {date}:");
                for (nutrient_id, value) in targets {
                    let (name, unit) = refdata::nutrient(nutrient_id)
                        .map(|n| (n.name, n.unit))
                        .unwrap_or((nutrient_id.as_str(), ""));
                    println!("  {name}: {} {unit}", fmt_amount(*value));
                }
            }
        }
        GuideCommand::Remove { date, yes } => {
            let date = parse_user_date(&date)?;
            let ask = store.settings().ask_delete;
            let prompt = format!("Remove the targets effective {date}?");
            if !confirm(&prompt, ask, yes)? {
                println!("kept the targets effective {date}");
                return Ok(());
            }
            store.remove_targets(date).await?;
            println!("removed the targets effective {date}");
        }
    }
    Ok(())
}

pub async fn handle_settings(store: &mut UserStore, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = store.settings();
            println!("ask-delete: {}", settings.ask_delete);
            println!("ask-exit: {}", settings.ask_exit);
            println!("whole-build-info: {}", settings.whole_build_info);
            println!("sort-by-id: {}", settings.sort_by_id);
            println!("sort-ascending: {}", settings.sort_ascending);
            println!("nutrients shown: {}", settings.nutrient_order.len());
            println!("muscles shown: {}", settings.muscle_order.len());
        }
        SettingsCommand::Set { key, value } => {
            let value: bool = match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" => true,
                "false" | "no" | "off" => false,
                other => bail!("expected true or false, got {other:?}"),
            };
            let apply: fn(&mut crate::storage::entities::Settings, bool) = match key.as_str() {
                "ask-delete" => |settings, value| settings.ask_delete = value,
                "ask-exit" => |settings, value| settings.ask_exit = value,
                "whole-build-info" => |settings, value| settings.whole_build_info = value,
                "sort-by-id" => |settings, value| settings.sort_by_id = value,
                "sort-ascending" => |settings, value| settings.sort_ascending = value,
                other => bail!("unknown setting {other:?}"),
            };
            store
                .update_settings(|settings| apply(settings, value))
                .await?;
            println!("{key} = {value}");
        }
        SettingsCommand::Nutrients { ids } => {
            for nutrient_id in &ids {
                if !refdata::is_nutrient(nutrient_id) {
                    bail!("unknown nutrient {nutrient_id:?}");
                }
            }
            store
                .update_settings(|settings| settings.nutrient_order = ids.clone())
                .await?;
            println!("build info now shows {} nutrient(s)", ids.len());
        }
        SettingsCommand::Muscles { names } => {
            for name in &names {
                if !refdata::is_muscle(name) {
                    bail!("unknown focus muscle {name:?}");
                }
            }
            store
                .update_settings(|settings| settings.muscle_order = names.clone())
                .await?;
            println!("build info now shows {} muscle(s)", names.len());
        }
    }
    Ok(())
}
