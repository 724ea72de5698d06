//! Hitbox geometry and the axis-separated collision resolver.

pub mod resolver;
pub mod shapes;

pub use resolver::*;
pub use shapes::*;
