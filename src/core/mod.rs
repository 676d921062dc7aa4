pub mod bootstrap;
pub mod configurator;
pub mod engine;
pub mod health;
pub mod installer;
pub mod launcher;
pub mod service;

pub use crate::domain::model::{InstallLayout, LaunchSpec, Port, ProcessExit, RunMode};
pub use crate::domain::ports::{Bootstrap, ConfigProvider, ServiceProcess};
pub use crate::utils::error::Result;
