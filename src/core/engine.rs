use crate::core::{Board, Pipeline, RunSummary};
use crate::utils::error::Result;

pub struct BoardEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BoardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 讀取回應、重新分組並整個取代看板
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🔄 Rebuilding board...");

        tracing::debug!("Reading responses...");
        let table = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} responses", table.rows.len());

        tracing::debug!("Assigning groups...");
        let plan = self.pipeline.transform(table).await?;
        let summary_groups = plan.group_count();
        let summary_respondents = plan.respondent_count();
        let placeholder = matches!(plan.board, Board::Placeholder { .. });
        if !placeholder {
            tracing::info!(
                "👥 Assigned {} respondents to {} groups",
                summary_respondents,
                summary_groups
            );
        }

        tracing::debug!("Writing board...");
        let output_path = self.pipeline.load(plan).await?;
        tracing::info!("📁 Board saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            respondents: summary_respondents,
            groups: summary_groups,
            placeholder,
        })
    }
}
