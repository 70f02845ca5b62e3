use crate::config::toml_config::LayoutConfig;
use crate::core::{Board, BoardGrid, Group, GroupColumn};
use crate::utils::error::{BoardError, Result};

/// xlsx 最後一欄（0 起算，即 XFD）
pub const MAX_COLUMN: u32 = 16_383;

pub const PLACEHOLDER_TEXT: &str = "No responses yet.";

/// 各組依序循環使用的底色
pub const PALETTE: [&str; 12] = [
    "#fde2e2", "#e2f0fe", "#e6f4ea", "#fff3cd", "#efe1ff", "#d7f3f7", "#ffdfe5", "#e8eaf6",
    "#f1f8e9", "#fff8e1", "#ede7f6", "#e0f2f1",
];

pub fn placeholder() -> Board {
    Board::Placeholder {
        text: PLACEHOLDER_TEXT.to_string(),
    }
}

fn sheet_column(idx: usize, gap: u16) -> Option<u16> {
    u32::try_from(idx)
        .ok()
        .and_then(|i| i.checked_mul(u32::from(gap)))
        .filter(|column| *column <= MAX_COLUMN)
        .and_then(|column| u16::try_from(column).ok())
}

pub fn render_board(groups: &[Group], layout: &LayoutConfig) -> Result<Board> {
    if groups.is_empty() {
        return Ok(placeholder());
    }

    let largest = groups.iter().map(Group::len).max().unwrap_or(0);

    let mut columns = Vec::with_capacity(groups.len());
    for (idx, group) in groups.iter().enumerate() {
        let column =
            sheet_column(idx, layout.column_gap).ok_or_else(|| BoardError::ProcessingError {
                message: format!(
                    "{} groups with column gap {} do not fit in {} sheet columns",
                    groups.len(),
                    layout.column_gap,
                    MAX_COLUMN + 1
                ),
            })?;

        columns.push(GroupColumn {
            group: group.id,
            label: group.label.clone(),
            column,
            color: PALETTE[idx % PALETTE.len()].to_string(),
            members: group.members.clone(),
        });
    }

    Ok(Board::Grid(BoardGrid {
        columns,
        block_rows: (largest as u32 + 1).max(2),
        column_width_px: u32::from(layout.column_width),
        frozen_rows: 1,
    }))
}
