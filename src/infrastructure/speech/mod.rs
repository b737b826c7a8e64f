//! Speech recognition adapters

mod line;
mod noop;

pub use line::LineRecognizer;
pub use noop::NoOpRecognizer;
