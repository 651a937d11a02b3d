use vista_engine::logging::{init_logging, LoggingConfig};
use vista_viewer::ViewerConfig;

fn main() {
    init_logging(LoggingConfig::default());

    let config = ViewerConfig::new();
    log::info!("resources: {}", config.resource_dir.display());

    if let Err(err) = vista_viewer::run(config) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
