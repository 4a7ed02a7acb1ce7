use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tour_core::{SceneRegistry, TourConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Validate a panorama tour file and summarise its scene graph")]
struct Args {
    /// Tour file to validate
    #[arg(default_value = "assets/tour.json")]
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = args.path;
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut config = TourConfig::from_json(&text)?;

    for fix in config.viewer.sanitize() {
        log::warn!("viewer settings: {}", fix);
    }

    let registry = match SceneRegistry::load(&config) {
        Ok(r) => r,
        Err(e) => {
            for p in e.problems() {
                log::error!("{}", p);
            }
            anyhow::bail!("{}: {}", path.display(), e);
        }
    };

    for scene in registry.scenes() {
        let nav = scene.navigation_targets().count();
        log::info!(
            "{:<12} {:<28} {} hotspot(s), {} exit(s) -> [{}]",
            scene.key,
            scene.panorama,
            scene.hotspots.len(),
            nav,
            scene
                .navigation_targets()
                .map(|(_, t)| t)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    for key in registry.unreachable_from(registry.start_key()) {
        log::warn!("scene {} cannot be reached from {}", key, registry.start_key());
    }
    log::info!(
        "{}: {} scene(s), start at {}",
        path.display(),
        registry.len(),
        registry.start_key()
    );
    Ok(())
}
