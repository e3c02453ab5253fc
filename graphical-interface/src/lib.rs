use std::{env, path::Path};

use logger::Logger;
use map::ShuttleApp;
use shuttle_feed::FeedConfig;

mod map;
pub mod map_sync;
mod plugins;
pub mod projection;
pub mod state;
pub mod types;
mod widgets;

const APP_NAME: &str = "Mac Shuttle";
const LOG_COMPONENT: &str = "mac-shuttle";
const LOG_DIR_VAR: &str = "SHUTTLE_LOG_DIR";

/// Opens the shuttle map window. The feed endpoint comes from
/// `SHUTTLE_FEED_ADDR`.
pub fn run() -> Result<(), eframe::Error> {
    let logger = app_logger();
    let config = FeedConfig::from_env();

    eframe::run_native(
        APP_NAME,
        Default::default(),
        Box::new(move |cc| {
            Ok(Box::new(ShuttleApp::new(
                cc.egui_ctx.clone(),
                config,
                logger,
            )))
        }),
    )
}

// Logs to `SHUTTLE_LOG_DIR` when it names a directory, otherwise to the console.
fn app_logger() -> Logger {
    let Ok(dir) = env::var(LOG_DIR_VAR) else {
        return Logger::console(LOG_COMPONENT);
    };

    match Logger::new(Path::new(&dir), LOG_COMPONENT) {
        Ok(logger) => logger,
        Err(e) => {
            let logger = Logger::console(LOG_COMPONENT);
            let _ = logger.warn(&format!("{}, logging to console", e), true);
            logger
        }
    }
}
