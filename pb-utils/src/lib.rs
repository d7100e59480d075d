mod json;
pub use json::*;
pub mod reader;
pub mod sink;
