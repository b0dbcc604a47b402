use std::path::Path;

use clap::Subcommand;
use univreminder_core::{Config, LocalReminderStore};

#[derive(Subcommand)]
pub enum RemindersAction {
    /// List incomplete reminders
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(
    config: &Config,
    data_dir: &Path,
    action: RemindersAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalReminderStore::new(config.reminders_path(data_dir), &config.reminders.list_name);

    match action {
        RemindersAction::List { json } => {
            let reminders = store.list_incomplete()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reminders)?);
                return Ok(());
            }
            if reminders.is_empty() {
                println!("No reminders.");
                return Ok(());
            }
            for r in &reminders {
                let due = r
                    .due
                    .as_ref()
                    .map(|d| d.display_string())
                    .unwrap_or_else(|| "no due date".into());
                println!("[{}] {} ({due})", r.priority.display_string(), r.title);
                if let Some(notes) = r.notes.as_deref().filter(|n| !n.is_empty()) {
                    println!("    {notes}");
                }
            }
        }
    }
    Ok(())
}
