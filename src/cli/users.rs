use anyhow::Result;
use clap::Subcommand;

use crate::storage::app_state::AppState;
use crate::storage::user_store::UserStore;

use super::confirm;

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    #[command(about = "Create a new app user with a fresh copy of the reference data")]
    Create { name: String },
    #[command(about = "Delete a user and all of their data. Permanent")]
    Delete {
        name: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "List active users")]
    List,
    #[command(about = "Set or clear the user that commands act as by default")]
    Default {
        name: Option<String>,
        #[arg(long, conflicts_with = "name", help = "Clear the default user")]
        clear: bool,
    },
}

pub async fn handle(state: &mut AppState, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Create { name } => {
            UserStore::create(state, &name).await?;
            println!("created user {name}");
            if state.default_user().is_none() {
                state.set_default_user(Some(&name)).await?;
                println!("{name} is now the default user");
            }
        }
        UserCommand::Delete { name, yes } => {
            if !state.is_user(&name) {
                anyhow::bail!("{name} is not an active user");
            }
            let prompt = format!("Delete user {name} and all of their data?");
            if !confirm(&prompt, true, yes)? {
                println!("kept user {name}");
                return Ok(());
            }
            UserStore::delete(state, &name).await?;
            println!("deleted user {name}");
        }
        UserCommand::List => {
            if state.users().is_empty() {
                println!("no users yet; create one with `ontrack user create <name>`");
            }
            for name in state.users() {
                if state.default_user() == Some(name.as_str()) {
                    println!("{name} (default)");
                } else {
                    println!("{name}");
                }
            }
        }
        UserCommand::Default { name, clear } => {
            if clear {
                state.set_default_user(None).await?;
                println!("cleared the default user");
            } else if let Some(name) = name {
                state.set_default_user(Some(&name)).await?;
                println!("{name} is now the default user");
            } else {
                match state.default_user() {
                    Some(name) => println!("{name}"),
                    None => println!("no default user"),
                }
            }
        }
    }
    Ok(())
}
