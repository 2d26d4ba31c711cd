// Domain layer: core models, store records and ports (interfaces).

pub mod model;
pub mod ports;
pub mod records;
