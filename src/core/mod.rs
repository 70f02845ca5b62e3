pub mod board;
pub mod chart;
pub mod columns;
pub mod engine;
pub mod partition;
pub mod pipeline;
pub mod rebuild;
pub mod shuffle;
pub mod triggers;

pub use crate::domain::model::{
    Assignment, Board, BoardGrid, ChartData, ChartPlacement, ChartRow, ChartSide, Group,
    GroupColumn, RenderPlan, Respondent, ResponseTable, RunSummary,
};
pub use crate::domain::ports::{
    BoardStore, ConfigProvider, Pipeline, ResponseLog, ResponseSource, Storage,
};
pub use crate::utils::error::Result;
