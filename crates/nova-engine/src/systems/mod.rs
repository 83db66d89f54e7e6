pub mod flight;
pub mod interact;
pub mod lifecycle;
pub mod orbits;
