//! `chathub sessions` and `chathub delete`.

use std::error::Error;
use std::io;
use std::sync::Arc;

use chrono::Local;

use crate::core::app::Services;
use crate::core::config::Config;
use crate::core::controller::SessionDeletion;
use crate::core::notify::ConsoleNotifier;
use crate::ui::transcript::write_sessions;

pub fn list_sessions(config: &Config) -> Result<(), Box<dyn Error>> {
    let services = Services::from_config(config, Arc::new(ConsoleNotifier))?;
    let sessions = services.session_store().list_all();
    write_sessions(&mut io::stdout(), &sessions, None, &Local::now())?;
    Ok(())
}

pub fn delete_session(config: &Config, id: &str) -> Result<(), Box<dyn Error>> {
    let services = Services::from_config(config, Arc::new(ConsoleNotifier))?;
    if services.session_store().get_by_id(id).is_none() {
        return Err(format!("No saved conversation with id {id}").into());
    }

    let mut controller = services.controller(config.controller_settings());
    match controller.delete_session(id) {
        SessionDeletion::Failed => Err("session storage was not updated".into()),
        SessionDeletion::Removed | SessionDeletion::ClosedCurrent => {
            println!("✅ Deleted {id}");
            Ok(())
        }
    }
}
