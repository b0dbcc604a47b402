//! The sync run itself: wire the Canvas client, the local reminder store and
//! the known-id file into an engine and drive it once.

use std::path::Path;

use univreminder_core::{
    CanvasClient, Config, KnownIdStore, LocalReminderStore, SyncEngine, SyncError, SyncSettings,
};

pub async fn run(
    config: &Config,
    data_dir: &Path,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.require_token()?;
    let source = CanvasClient::new(&config.canvas.base_url, token);
    let sink = LocalReminderStore::new(config.reminders_path(data_dir), &config.reminders.list_name);
    let known_ids = KnownIdStore::new(config.known_ids_path(data_dir));

    let mut engine = SyncEngine::new(source, sink, known_ids, SyncSettings::from(config));

    if dry_run {
        println!("Dry run: no reminders will be created.");
        let requests = engine.preview().await?;
        if requests.is_empty() {
            println!("Nothing new to sync.");
        }
        for req in &requests {
            let due = req.due_date.as_deref().unwrap_or("no due date");
            println!("  Would create: {} ({due})", req.title);
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(report) => {
            println!("Synced {} new reminder(s)", report.synced);
            Ok(())
        }
        Err(e @ SyncError::Persist { created, .. }) => {
            eprintln!(
                "warning: {created} reminder(s) were created but could not be recorded; \
                 they may be created again on the next run"
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}
