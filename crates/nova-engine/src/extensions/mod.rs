pub mod easing;

pub use easing::{approach, lerp, lerp_vec3, Easing};
