//! Open a store backed by a JSON file, change it, and reopen it.
//!
//! Run with `RUST_LOG=debug` to watch hydration and the throttled saves.

use std::time::Duration;

use playground_store::state::{Chapter, ExternalLibrary};
use playground_store::{Action, AppStore, StoreConfig, ThrottleConfig};

fn main() -> playground_store::Result<()> {
    env_logger::init();

    let dir = std::env::temp_dir().join("playground-store-demo");
    let config = StoreConfig {
        snapshot_path: dir.join("state.json"),
        throttle: ThrottleConfig::new(Duration::from_millis(200)),
        ..StoreConfig::default()
    };
    println!("Snapshot file: {}", config.snapshot_path.display());

    let app = AppStore::open(&config)?;
    println!("Hydrated from disk: {}", app.was_hydrated());

    let store = app.store();
    println!(
        "Starting at {} with {:?}",
        store.read(|s| s.workspaces.playground.context.chapter),
        store.read(|s| s.workspaces.playground.external_library),
    );

    // The first change is written at once; the rest of the burst is written
    // once more when the throttle window closes
    store.dispatch(Action::ChangeChapter(Chapter::SOURCE_4));
    store.dispatch(Action::SetExternalLibrary(ExternalLibrary::Sounds));
    store.dispatch(Action::SetGitHubAccessToken(Some("demo-token".to_string())));
    std::thread::sleep(Duration::from_millis(400));

    store.dispatch(Action::SetAutorun(true));
    app.shutdown();

    let reopened = AppStore::open(&config)?;
    let state = reopened.store().get();
    println!("\nReopened, hydrated: {}", reopened.was_hydrated());
    println!("Chapter: {}", state.workspaces.playground.context.chapter);
    println!("Autorun: {}", state.workspaces.playground.is_editor_autorun);
    println!(
        "GitHub client: {}",
        state
            .session
            .github_client
            .as_ref()
            .map(|h| h.client().base_url().to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    reopened.shutdown();

    Ok(())
}
