mod builder;
mod types;

pub use builder::LayoutBuilder;
pub use types::{Item, Layout};
