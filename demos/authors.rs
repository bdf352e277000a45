//! Walk through the author lifecycle from the command line.
//!
//! ```text
//! cargo run --example authors -- config.toml
//! ```

use std::sync::Arc;

use author_flux::{telemetry, AppConfig, Author, AuthorApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => {
            let mut config = AppConfig::default();
            config.apply_overrides(|key| std::env::var(key).ok())?;
            config
        }
    };
    telemetry::init(&config.log_filter);

    let app = AuthorApp::new(&config)?;

    let view = Arc::downgrade(app.store());
    app.store().add_change_listener(move || {
        if let Some(store) = view.upgrade() {
            let names: Vec<String> = store
                .get_all_authors()
                .iter()
                .map(Author::full_name)
                .collect();
            println!("authors: {:?}", names);
        }
    });

    let actions = app.actions();
    let jane = actions.save_author(Author::unsaved("Jane", "Doe"))?;
    let sam = actions.save_author(Author::unsaved("Sam", "Lee"))?;
    actions.save_author(Author {
        first_name: "Janet".into(),
        ..jane
    })?;
    actions.delete_author(sam.id)?;

    if let Err(e) = actions.save_author(Author::unsaved("Al", "Li")) {
        println!("rejected: {}", e);
    }

    Ok(())
}
