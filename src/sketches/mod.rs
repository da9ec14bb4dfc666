//! The bundled sketches, each with its default configuration.

pub mod aquarium;
pub mod fibonacci;
pub mod golden_spiral;
pub mod lights;
pub mod lowres_tree;
pub mod principles;

use crate::engine::sketch::Sketch;
use crate::foundation::error::{ReelError, ReelResult};

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 7] = [
    "golden-spiral",
    "golden-spiral-loops",
    "fibonacci",
    "lowres-tree",
    "aquarium",
    "animation-principles",
    "lights-on-off",
];

/// Build a sketch with its default configuration.
pub fn by_name(name: &str) -> ReelResult<Box<dyn Sketch>> {
    let sketch: Box<dyn Sketch> = match name {
        "golden-spiral" => Box::new(golden_spiral::GoldenSpiral::new(
            golden_spiral::SpiralConfig::default(),
        )?),
        "golden-spiral-loops" => Box::new(golden_spiral::GoldenSpiral::new(
            golden_spiral::SpiralConfig::looping(),
        )?),
        "fibonacci" => Box::new(fibonacci::FibonacciSpiral::new(
            fibonacci::FibonacciConfig::default(),
        )?),
        "lowres-tree" => Box::new(lowres_tree::LowresTree::new(
            lowres_tree::TreeConfig::default(),
        )?),
        "aquarium" => Box::new(aquarium::Aquarium::new(aquarium::AquariumConfig::default())?),
        "animation-principles" => Box::new(principles::Principles::new(
            principles::PrinciplesConfig::default(),
        )?),
        "lights-on-off" => Box::new(lights::Lights::new(lights::LightsConfig::default())?),
        other => {
            return Err(ReelError::validation(format!(
                "unknown sketch '{other}' (expected one of: {})",
                NAMES.join(", ")
            )));
        }
    };
    Ok(sketch)
}
