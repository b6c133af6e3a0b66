//! Tether Runtime
//!
//! Boots the reference host and runs the demo script against it.
//!
//! Usage: `tether [settings.json]`

mod demo;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use tether_host::{HostSettings, Scene, ScriptHost};
use tether_script::{glue, NativeCalls};
use tracing_subscriber::EnvFilter;

const DEMO_FRAMES: u32 = 10;

fn main() -> Result<()> {
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => HostSettings::load(&path)?,
        None => HostSettings::default(),
    };

    // RUST_LOG wins over the settings file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Tether v{}", tether_core::VERSION);

    glue::register_components()?;

    let host = Rc::new(ScriptHost::new(Scene::new(), settings)?);
    let calls: Rc<dyn NativeCalls> = host.clone();
    let _glue = glue::install(calls);

    let player = demo::build(&host)?;
    demo::run(&host, player, DEMO_FRAMES)?;

    tracing::info!("Runtime shut down cleanly");
    Ok(())
}
