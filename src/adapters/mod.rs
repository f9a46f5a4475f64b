// Adapters layer: concrete implementations for external systems (set storage,
// line sources, the pretty-printer process).

pub mod line_source;
pub mod memory_store;
pub mod pretty_printer;
pub mod redis_store;
