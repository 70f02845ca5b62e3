use crate::core::{Board, BoardGrid, BoardStore, ChartData, RenderPlan, Storage};
use crate::utils::error::{BoardError, Result};
use chrono::{DateTime, TimeZone};
use rust_xlsxwriter::{Chart, ChartType, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

const BOARD_STEM: &str = "board";
pub const BOARD_WORKBOOK: &str = "board.xlsx";
pub const BOARD_PLAN: &str = "board.json";
pub const SNAPSHOT_DIR: &str = "snapshots";

const SNAPSHOT_TIME_FORMAT: &str = "%Y-%m-%d %H.%M.%S";
const MAX_SHEET_NAME_LEN: usize = 31;

/// 快照工作表名稱：看板名稱 + 時間，超過工作表名稱上限時截短前綴
pub fn snapshot_label<Tz: TimeZone>(board_sheet: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format(SNAPSHOT_TIME_FORMAT).to_string();
    let room = MAX_SHEET_NAME_LEN - stamp.len() - 1;
    let prefix: String = board_sheet.chars().take(room).collect();
    format!("{} {}", prefix.trim_end(), stamp)
}

/// 以 xlsx 活頁簿輸出看板，並保存一份 JSON 供快照使用
pub struct XlsxBoardStore<S: Storage> {
    storage: S,
}

impl<S: Storage> XlsxBoardStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    async fn write_plan(&self, stem: &str, plan: &RenderPlan) -> Result<String> {
        let workbook_path = format!("{}.xlsx", stem);
        let bytes = render_workbook(plan)?;
        self.storage.write_file(&workbook_path, &bytes).await?;

        let json = serde_json::to_vec_pretty(plan)?;
        self.storage.write_file(&format!("{}.json", stem), &json).await?;

        Ok(self.storage.locate(&workbook_path))
    }
}

fn write_grid(sheet: &mut Worksheet, grid: &BoardGrid) -> Result<()> {
    for column in &grid.columns {
        let base = Format::new()
            .set_background_color(column.color.as_str())
            .set_border(FormatBorder::Thin);
        let header = base.clone().set_bold().set_align(FormatAlign::Center);
        let member = base.set_text_wrap();

        sheet.write_string_with_format(0, column.column, column.label.as_str(), &header)?;
        for row in 1..grid.block_rows {
            match column.members.get(row as usize - 1) {
                Some(name) => {
                    sheet.write_string_with_format(row, column.column, name.as_str(), &member)?;
                }
                None => {
                    sheet.write_blank(row, column.column, &member)?;
                }
            }
        }
        sheet.set_column_width_pixels(column.column, grid.column_width_px)?;
    }

    sheet.set_freeze_panes(grid.frozen_rows, 0)?;
    Ok(())
}

fn write_chart_data(sheet: &mut Worksheet, chart: &ChartData) -> Result<()> {
    sheet.write_string(0, 0, chart.header.0.as_str())?;
    sheet.write_string(0, 1, chart.header.1.as_str())?;
    for (i, row) in chart.rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, row.label.as_str())?;
        sheet.write_number(r, 1, row.members)?;
    }
    Ok(())
}

fn members_chart(plan: &RenderPlan) -> Chart {
    let last = plan.chart.rows.len() as u32;
    let data_sheet = plan.chart_data_sheet.as_str();

    let mut chart = Chart::new(ChartType::Doughnut);
    chart.title().set_name("Members per group");
    chart
        .add_series()
        .set_categories((data_sheet, 1, 0, last, 0))
        .set_values((data_sheet, 1, 1, last, 1));
    chart
}

/// 依 RenderPlan 產生完整活頁簿：看板工作表 + 隱藏的圖表資料工作表
pub fn render_workbook(plan: &RenderPlan) -> Result<Vec<u8>> {
    let mut board = Worksheet::new();
    board.set_name(plan.board_sheet.as_str())?;

    let mut data = Worksheet::new();
    data.set_name(plan.chart_data_sheet.as_str())?;
    write_chart_data(&mut data, &plan.chart)?;
    data.set_hidden(true);

    match &plan.board {
        Board::Placeholder { text } => {
            board.write_string(0, 0, text.as_str())?;
        }
        Board::Grid(grid) => write_grid(&mut board, grid)?,
    }

    if let Some(placement) = plan.chart.placement {
        if !plan.chart.rows.is_empty() {
            board.insert_chart(placement.row, placement.column, &members_chart(plan))?;
        }
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(board);
    workbook.push_worksheet(data);
    Ok(workbook.save_to_buffer()?)
}

impl<S: Storage> BoardStore for XlsxBoardStore<S> {
    async fn write_board(&self, plan: &RenderPlan) -> Result<String> {
        self.write_plan(BOARD_STEM, plan).await
    }

    async fn read_board(&self) -> Result<RenderPlan> {
        if !self.storage.exists(BOARD_PLAN).await {
            return Err(BoardError::NoBoard);
        }
        let data = self.storage.read_file(BOARD_PLAN).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn snapshot_board(&self, label: &str) -> Result<String> {
        let mut archived = self.read_board().await?;
        archived.board_sheet = label.to_string();

        let location = self
            .write_plan(&format!("{}/{}", SNAPSHOT_DIR, label), &archived)
            .await?;
        tracing::info!("🧊 Froze board as '{}'", label);
        Ok(location)
    }
}
