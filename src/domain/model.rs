use serde::{Deserialize, Serialize};

/// 從回應工作表讀出的原始資料：標題列 + 資料列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTable {
    pub sheet: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResponseTable {
    pub fn new(sheet: impl Into<String>, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            sheet: sheet.into(),
            header,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub name: String,
    pub email: Option<String>,
    /// 工作表上的列號（1 起算，標題列為 1）
    pub source_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u32,
    pub label: String,
    pub members: Vec<String>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// 一次分組的結果：每位填答者恰好對應一個組別
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub team_count: u32,
    pub entries: Vec<(u32, Respondent)>,
}

impl Assignment {
    /// 依組別編號排序，`1..=team_count` 每個編號都會出現（可能為空組）
    pub fn groups(&self, label_prefix: &str) -> Vec<Group> {
        let mut groups: Vec<Group> = (1..=self.team_count)
            .map(|id| Group {
                id,
                label: format!("{}{}", label_prefix, id),
                members: Vec::new(),
            })
            .collect();

        for (group, respondent) in &self.entries {
            if let Some(slot) = groups.get_mut((*group as usize).saturating_sub(1)) {
                slot.members.push(respondent.name.clone());
            }
        }

        groups
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupColumn {
    pub group: u32,
    pub label: String,
    /// 0 起算的工作表欄位
    pub column: u16,
    pub color: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGrid {
    pub columns: Vec<GroupColumn>,
    /// 著色區塊的列數（含標題列）
    pub block_rows: u32,
    pub column_width_px: u32,
    pub frozen_rows: u32,
}

impl BoardGrid {
    pub fn largest_group(&self) -> usize {
        self.columns.iter().map(|c| c.members.len()).max().unwrap_or(0)
    }

    /// 最後使用的欄位（1 起算）
    pub fn last_used_column(&self) -> u32 {
        self.columns
            .last()
            .map(|c| u32::from(c.column) + 1)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Board {
    Placeholder { text: String },
    Grid(BoardGrid),
}

impl Board {
    pub fn grid(&self) -> Option<&BoardGrid> {
        match self {
            Board::Grid(grid) => Some(grid),
            Board::Placeholder { .. } => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Board::Placeholder { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSide {
    Right,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPlacement {
    pub side: ChartSide,
    /// 0 起算
    pub row: u32,
    pub column: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRow {
    pub label: String,
    pub members: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub header: (String, String),
    pub rows: Vec<ChartRow>,
    pub placement: Option<ChartPlacement>,
}

/// 一次重建產生的完整輸出描述，交給 adapter 寫入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub board_sheet: String,
    pub chart_data_sheet: String,
    pub board: Board,
    pub chart: ChartData,
}

impl RenderPlan {
    pub fn group_count(&self) -> usize {
        self.board.grid().map(|g| g.columns.len()).unwrap_or(0)
    }

    pub fn respondent_count(&self) -> usize {
        self.board
            .grid()
            .map(|g| g.columns.iter().map(|c| c.members.len()).sum())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub respondents: usize,
    pub groups: usize,
    pub placeholder: bool,
}
