//! Built-in token-stream transformers.

mod meta;
mod notation;

pub use meta::MetaHighlight;
pub use notation::{NotationDiff, NotationFocus, NotationHighlight};
