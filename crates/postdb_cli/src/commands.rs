//! Command dispatch onto `Store` operations.

use crate::output;
use crate::{Commands, PostCommand, UserCommand};
use log::info;
use postdb_core::Store;
use std::path::Path;

pub fn run(db: &Path, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(db);

    match command {
        Commands::Init => {
            let created = store.ensure_initialized()?;
            info!("event=cli_init module=cli status=ok created={created}");
            Ok(())
        }
        Commands::User(command) => {
            store.ensure_initialized()?;
            run_user(&store, command)
        }
        Commands::Post(command) => {
            store.ensure_initialized()?;
            run_post(&store, command)
        }
    }
}

fn run_user(store: &Store, command: UserCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        UserCommand::Create {
            email,
            password,
            name,
            age,
        } => output::print_json(&store.create_user(&email, &password, &name, age)?),
        UserCommand::Update {
            email,
            password,
            name,
            age,
        } => output::print_json(&store.update_user(&email, &password, &name, age)?),
        UserCommand::Get { email } => output::print_json(&store.get_user(&email)?),
        UserCommand::Delete { email } => Ok(store.delete_user(&email)?),
    }
}

fn run_post(store: &Store, command: PostCommand) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        PostCommand::Create { user_email, text } => {
            output::print_json(&store.create_post(&user_email, &text)?)
        }
        PostCommand::List { user_email } => output::print_json(&store.get_posts(&user_email)?),
        PostCommand::Delete { id } => Ok(store.delete_post(&id)?),
    }
}
