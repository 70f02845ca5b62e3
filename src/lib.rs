pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{storage::LocalStorage, xlsx_store::XlsxBoardStore, ResponseFile};
pub use crate::config::BoardConfig;
pub use crate::core::{engine::BoardEngine, pipeline::BoardPipeline, rebuild::rebuild};
pub use crate::core::triggers::{EditEvent, TriggerDispatcher, TriggerEvent};
pub use crate::utils::error::{BoardError, Result};
