//! Breaks an image into a quadtree of roughly uniform regions and paints
//! it back at any depth, as a still or as an animation of the refinement.

pub mod node;

pub use node::*;
pub use node::codec::{load_source, prepare_source, save_animation, save_image, write_animation};
pub use node::error::{Error, Result};
pub use node::rect::Rect;
pub use node::render::{AnimationOptions, DEFAULT_FRAME_DURATION_MS, DEFAULT_LOOP_COUNT, FINAL_FRAME_REPEATS};
