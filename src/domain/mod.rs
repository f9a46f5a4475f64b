// Domain layer: value types and the storage port. No I/O lives here.

pub mod model;
pub mod ports;
