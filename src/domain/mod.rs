// Domain layer: models and ports. No HTTP client or server types here.

pub mod model;
pub mod ports;
