//! 從回應資料產生 [`RenderPlan`]，不做任何 I/O。

use crate::config::toml_config::BoardConfig;
use crate::core::board::{placeholder, render_board};
use crate::core::chart::build_chart_data;
use crate::core::columns::ColumnDetector;
use crate::core::partition::partition;
use crate::core::shuffle::{dedupe_and_shuffle, respondents_from};
use crate::core::{Board, ChartData, ConfigProvider, RenderPlan, ResponseTable};
use crate::utils::error::Result;
use rand::Rng;

pub fn rebuild<R: Rng + ?Sized>(
    table: &ResponseTable,
    config: &BoardConfig,
    rng: &mut R,
) -> Result<RenderPlan> {
    // 沒有任何回應時不檢查欄位，直接顯示提示
    if table.is_empty() {
        tracing::info!("📭 No responses in '{}', rendering placeholder", table.sheet);
        let board = placeholder();
        let chart = build_chart_data(&[], &board, config.layout.chart_side_max_columns);
        return Ok(plan(config, board, chart));
    }

    let columns = ColumnDetector::new()?.detect(&table.header)?;
    let respondents = respondents_from(table, columns);
    let shuffled = dedupe_and_shuffle(
        respondents,
        config.teams.dedupe_by_email,
        columns.email.is_some(),
        rng,
    );

    let assignment = partition(shuffled, config.team_mode(), config.teams.team_size);
    let groups = assignment.groups(config.label_prefix());

    tracing::debug!(
        "Partitioned {} respondents into {} groups ({:?})",
        assignment.entries.len(),
        groups.len(),
        config.team_mode()
    );

    let board = render_board(&groups, &config.layout)?;
    let chart = build_chart_data(&groups, &board, config.layout.chart_side_max_columns);

    Ok(plan(config, board, chart))
}

fn plan(config: &BoardConfig, board: Board, chart: ChartData) -> RenderPlan {
    RenderPlan {
        board_sheet: config.board_sheet().to_string(),
        chart_data_sheet: config.chart_data_sheet().to_string(),
        board,
        chart,
    }
}
