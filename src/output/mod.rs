mod json;

pub use json::{layout_to_json, write_json};
