use crate::core::board::MAX_COLUMN;
use crate::core::{Board, ChartData, ChartPlacement, ChartRow, ChartSide, Group};

pub const CHART_HEADER: (&str, &str) = ("Group", "# Members");

/// 組別人數彙總表，供圓環圖使用
pub fn build_chart_data(groups: &[Group], board: &Board, side_max_columns: u16) -> ChartData {
    let rows = groups
        .iter()
        .map(|g| ChartRow {
            label: g.label.clone(),
            members: g.len() as u32,
        })
        .collect();

    ChartData {
        header: (CHART_HEADER.0.to_string(), CHART_HEADER.1.to_string()),
        rows,
        placement: place_chart(board, side_max_columns),
    }
}

/// 看板不寬時放右側，否則放在看板下方
pub fn place_chart(board: &Board, side_max_columns: u16) -> Option<ChartPlacement> {
    let grid = board.grid()?;
    let cols_used = grid.last_used_column();

    // 右側沒有剩餘欄位時也改放下方
    let right_of_board = Some(cols_used + 1)
        .filter(|column| *column <= MAX_COLUMN)
        .and_then(|column| u16::try_from(column).ok());

    match right_of_board {
        Some(column) if cols_used <= u32::from(side_max_columns) => Some(ChartPlacement {
            side: ChartSide::Right,
            row: 0,
            column,
        }),
        _ => Some(ChartPlacement {
            side: ChartSide::Below,
            row: grid.largest_group() as u32 + 2,
            column: 0,
        }),
    }
}
