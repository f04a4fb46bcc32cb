mod app;

use app::FlashdeckApp;
use flashdeck::{Config, DeckStore, database::JsonFileBackend};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let (config, errors) = Config::from_env_lenient();
    for e in errors {
        log::warn!("Using default for config value: {}", e);
    }

    let store = config.open_store().unwrap_or_else(|e| {
        log::error!("Failed to open {:?} storage: {}; using a JSON file", config.storage, e);
        let path = config.data_dir.join("cards.json");
        DeckStore::new(Box::new(JsonFileBackend::new(path)))
    });

    log::info!(
        "Loaded {} cards from {}",
        store.cards().len(),
        config.data_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flashdeck",
        options,
        Box::new(move |_cc| Ok(Box::new(FlashdeckApp::new(store, config.session_seconds)))),
    )
}
