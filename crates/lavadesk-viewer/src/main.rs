use clap::Parser;
use lavadesk_engine::logging::init_logging;
use lavadesk_engine::window::Runtime;
use lavadesk_viewer::{Cli, ViewerApp, ViewerConfig};

fn main() {
    let config = ViewerConfig::from(Cli::parse());
    init_logging(config.logging());

    log::info!("textures from {}", config.texture_dir.display());

    let result = Runtime::run(config.runtime(), config.gpu_init(), ViewerApp::new(config.clone()));

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
