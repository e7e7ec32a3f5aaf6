use anyhow::Context;
use sketchbox::{logging::init_logging, EditorConfig};

fn main() -> anyhow::Result<()> {
    let config = EditorConfig::from_env();
    init_logging(config.logging.clone());
    log::info!("starting sketchbox {}", env!("CARGO_PKG_VERSION"));

    sketchbox::run(config).context("editor terminated with an error")?;
    Ok(())
}
