use crate::config::toml_config::BoardConfig;
use crate::core::rebuild::rebuild;
use crate::core::{BoardStore, Pipeline, RenderPlan, ResponseSource, ResponseTable};
use crate::utils::error::{BoardError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

pub struct BoardPipeline<R: ResponseSource, B: BoardStore> {
    source: R,
    store: B,
    config: BoardConfig,
    rng: Mutex<StdRng>,
}

impl<R: ResponseSource, B: BoardStore> BoardPipeline<R, B> {
    pub fn new(source: R, store: B, config: BoardConfig) -> Self {
        Self::with_rng(source, store, config, StdRng::from_os_rng())
    }

    /// 固定亂數種子，方便重現同一份分組
    pub fn with_seed(source: R, store: B, config: BoardConfig, seed: u64) -> Self {
        Self::with_rng(source, store, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source: R, store: B, config: BoardConfig, rng: StdRng) -> Self {
        Self {
            source,
            store,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn source(&self) -> &R {
        &self.source
    }
}

#[async_trait::async_trait]
impl<R: ResponseSource, B: BoardStore> Pipeline for BoardPipeline<R, B> {
    async fn extract(&self) -> Result<ResponseTable> {
        let table = self.source.read_responses().await?;
        tracing::debug!(
            "Read {} response rows ({} columns) from '{}'",
            table.rows.len(),
            table.header.len(),
            table.sheet
        );
        Ok(table)
    }

    async fn transform(&self, table: ResponseTable) -> Result<RenderPlan> {
        let mut rng = self.rng.lock().map_err(|_| BoardError::ProcessingError {
            message: "random source lock poisoned".to_string(),
        })?;
        rebuild(&table, &self.config, &mut *rng)
    }

    async fn load(&self, plan: RenderPlan) -> Result<String> {
        tracing::debug!(
            "Writing board '{}' with {} groups",
            plan.board_sheet,
            plan.group_count()
        );
        self.store.write_board(&plan).await
    }
}
