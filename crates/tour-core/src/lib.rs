pub mod constants;
pub mod error;
pub mod markers;
pub mod orientation;
pub mod projection;
pub mod registry;
pub mod scene;
pub mod session;
pub mod settings;
pub mod sphere;
pub mod tour;
pub mod viewer;

pub static PANORAMA_WGSL: &str = include_str!("../shaders/panorama.wgsl");

pub use constants::*;
pub use error::TourError;
pub use markers::*;
pub use orientation::*;
pub use projection::*;
pub use registry::SceneRegistry;
pub use scene::*;
pub use session::*;
pub use settings::*;
pub use sphere::*;
pub use tour::*;
pub use viewer::*;
