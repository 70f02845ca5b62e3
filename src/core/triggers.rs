use crate::config::toml_config::BoardConfig;
use crate::core::engine::BoardEngine;
use crate::core::{ConfigProvider, Pipeline, RunSummary};
use crate::utils::error::Result;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub sheet: String,
    /// 1 起算；0 代表沒有編輯範圍
    pub row: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    Manual,
    FormSubmit,
    Edit(EditEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    NoRange,
    OtherSheet(String),
    HeaderRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    RebuildNow,
    RebuildAfter(Duration),
    Ignore(IgnoreReason),
}

/// 只有回應工作表的資料列編輯才會觸發重建
pub fn decide(event: &TriggerEvent, response_sheet: &str, debounce: Duration) -> TriggerDecision {
    match event {
        TriggerEvent::Manual | TriggerEvent::FormSubmit => TriggerDecision::RebuildNow,
        TriggerEvent::Edit(edit) if edit.row == 0 => TriggerDecision::Ignore(IgnoreReason::NoRange),
        TriggerEvent::Edit(edit) if edit.sheet != response_sheet => {
            TriggerDecision::Ignore(IgnoreReason::OtherSheet(edit.sheet.clone()))
        }
        TriggerEvent::Edit(edit) if edit.row == 1 => TriggerDecision::Ignore(IgnoreReason::HeaderRow),
        TriggerEvent::Edit(_) => TriggerDecision::RebuildAfter(debounce),
    }
}

pub struct TriggerDispatcher<P: Pipeline> {
    engine: BoardEngine<P>,
    response_sheet: String,
    debounce: Duration,
}

impl<P: Pipeline> TriggerDispatcher<P> {
    pub fn new(engine: BoardEngine<P>, config: &BoardConfig) -> Self {
        Self {
            engine,
            response_sheet: config.response_sheet().to_string(),
            debounce: config.edit_debounce(),
        }
    }

    pub fn engine(&self) -> &BoardEngine<P> {
        &self.engine
    }

    pub async fn dispatch(&self, event: TriggerEvent) -> Result<Option<RunSummary>> {
        match decide(&event, &self.response_sheet, self.debounce) {
            TriggerDecision::Ignore(reason) => {
                tracing::debug!("Ignoring {:?}: {:?}", event, reason);
                Ok(None)
            }
            TriggerDecision::RebuildAfter(delay) => {
                tracing::debug!("Edit detected, rebuilding in {:?}", delay);
                tokio::time::sleep(delay).await;
                self.engine.run().await.map(Some)
            }
            TriggerDecision::RebuildNow => {
                tracing::debug!("Rebuild triggered by {:?}", event);
                self.engine.run().await.map(Some)
            }
        }
    }
}
