use log::{error, info};

use saavigen_frontend::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site scripts");
    if let Err(e) = saavigen_frontend::start() {
        error!("Could not attach page behaviour: {}", e);
    }
}
