//! Graph traversal from structural nodes down to their anchored tokens

pub mod offsets;

pub use offsets::{reaches_text, resolve_range, TextRange, DEFAULT_TRAVERSAL};
