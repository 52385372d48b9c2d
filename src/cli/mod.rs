pub mod builder;
pub mod inventory;
pub mod output;
pub mod profile;
pub mod references;
pub mod users;

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::storage::app_state::AppState;
use crate::storage::user_store::UserStore;
use crate::utils::clock::SystemClock;
use crate::utils::dir::create_application_default_path;
use crate::utils::logging::{enable_logging, CLI_PREFIX};

#[derive(Parser, Debug)]
#[command(name = "OnTrack", version, long_about = None)]
#[command(about = "Personal nutrition and fitness tracker", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into %APPDATA% or $XDG_DATA_HOME"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Act as this user instead of the default user"
    )]
    user: Option<String>,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Manage app users and the default user")]
    User {
        #[command(subcommand)]
        command: users::UserCommand,
    },
    #[command(about = "Show or change the acting user's settings")]
    Settings {
        #[command(subcommand)]
        command: profile::SettingsCommand,
    },
    #[command(about = "Manage the Food reference inventory")]
    Food {
        #[command(subcommand)]
        command: references::FoodCommand,
    },
    #[command(about = "Manage the Exercise reference inventory")]
    Exercise {
        #[command(subcommand)]
        command: references::ExerciseCommand,
    },
    #[command(about = "Share reference items as single-item capsule files")]
    Capsule {
        #[command(subcommand)]
        command: references::CapsuleCommand,
    },
    #[command(about = "Edit the build in progress")]
    Build {
        #[command(subcommand)]
        command: builder::BuildCommand,
    },
    #[command(about = "Manage saved build templates")]
    Template {
        #[command(subcommand)]
        command: inventory::TemplateCommand,
    },
    #[command(about = "Manage dated Diet and Program records")]
    Record {
        #[command(subcommand)]
        command: inventory::RecordCommand,
    },
    #[command(about = "Track health measurements in the Health Diary")]
    Diary {
        #[command(subcommand)]
        command: profile::DiaryCommand,
    },
    #[command(about = "Set daily nutrient targets in the Nutrient Guide")]
    Guide {
        #[command(subcommand)]
        command: profile::GuideCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = match &args.dir {
        Some(dir) => {
            tokio::fs::create_dir_all(dir).await?;
            dir.clone()
        }
        None => create_application_default_path()?,
    };
    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir, logging_level, args.log)?;

    let clock = SystemClock;
    let mut state = AppState::open(app_dir, &clock).await?;

    match args.commands {
        Commands::User { command } => users::handle(&mut state, command).await,
        Commands::Settings { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            profile::handle_settings(&mut store, command).await
        }
        Commands::Food { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            references::handle_food(&mut store, command).await
        }
        Commands::Exercise { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            references::handle_exercise(&mut store, command).await
        }
        Commands::Capsule { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            references::handle_capsule(&mut store, command).await
        }
        Commands::Build { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            builder::handle(&mut store, command, &clock).await
        }
        Commands::Template { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            inventory::handle_template(&mut store, command).await
        }
        Commands::Record { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            inventory::handle_record(&mut store, command).await
        }
        Commands::Diary { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            profile::handle_diary(&mut store, command, &clock).await
        }
        Commands::Guide { command } => {
            let mut store = acting_user(&mut state, &args.user).await?;
            profile::handle_guide(&mut store, command, &clock).await
        }
    }
}

/// Resolves the acting user: `--user` if given, the default user otherwise.
/// A load failure clears the default user so a damaged user folder cannot
/// wedge every start.
async fn acting_user(state: &mut AppState, flag: &Option<String>) -> Result<UserStore> {
    let username = match flag {
        Some(name) => name.clone(),
        None => state
            .default_user()
            .ok_or_else(|| {
                anyhow!(
                    "no user selected; pass --user or set one with `ontrack user default <name>`"
                )
            })?
            .to_string(),
    };
    match UserStore::load(state, &username).await {
        Ok(store) => Ok(store),
        Err(e) => {
            if flag.is_none() {
                state.set_default_user(None).await?;
            }
            Err(e.context(format!("cannot load user {username}")))
        }
    }
}

/// Asks for confirmation on stdin. `assume_yes` (a `--yes` flag) and
/// `ask` = false (a settings toggle) both skip the prompt.
pub fn confirm(prompt: &str, ask: bool, assume_yes: bool) -> Result<bool> {
    if assume_yes || !ask {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Parses a date argument: ISO first, then loose phrasing like "yesterday"
/// or "2 weeks ago".
pub fn parse_user_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = crate::utils::time::parse_date(input) {
        return Ok(date);
    }
    chrono_english::parse_date_string(input, Local::now(), chrono_english::Dialect::Uk)
        .map(|moment| moment.date_naive())
        .map_err(|_| anyhow!("cannot read {input:?} as a date"))
}

/// Splits a `name=value` argument.
pub fn split_pair(input: &str) -> Result<(&str, &str)> {
    input
        .split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .ok_or_else(|| anyhow!("expected name=value, got {input:?}"))
}

#[cfg(test)]
mod tests {
    use super::split_pair;

    #[test]
    fn pairs_split_on_the_first_equals() {
        assert_eq!(split_pair("weight=180").unwrap(), ("weight", "180"));
        assert_eq!(split_pair("a = b=c").unwrap(), ("a", "b=c"));
        assert!(split_pair("no-equals").is_err());
    }
}
