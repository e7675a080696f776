mod aabb;
mod color;

pub use aabb::AABB;
pub use color::{hex_to_rgb, parse_hex_color, srgb_to_linear, srgb_to_linear_rgb};
