use std::path::Path;

use clap::Subcommand;
use univreminder_core::{Config, KnownIdStore};

#[derive(Subcommand)]
pub enum KnownIdsAction {
    /// Print every known task id, one per line
    List,
    /// Print how many task ids are known
    Count,
}

pub fn run(
    config: &Config,
    data_dir: &Path,
    action: KnownIdsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = KnownIdStore::new(config.known_ids_path(data_dir));
    store.load()?;

    match action {
        KnownIdsAction::List => {
            for id in store.ids() {
                println!("{id}");
            }
        }
        KnownIdsAction::Count => println!("{}", store.len()),
    }
    Ok(())
}
