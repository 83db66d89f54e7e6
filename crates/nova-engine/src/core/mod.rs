pub mod body;
pub mod clock;
pub mod context;
pub mod registry;
