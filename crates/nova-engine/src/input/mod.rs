pub mod queue;

pub use queue::{keys, InputEvent, InputQueue};
