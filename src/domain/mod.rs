// Domain layer: models and ports (interfaces) shared by the bootstrap steps.

pub mod model;
pub mod ports;
