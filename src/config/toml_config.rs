use crate::core::ConfigProvider;
use crate::utils::error::{BoardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 支援的回應來源副檔名
pub const SOURCE_EXTENSIONS: [&str; 5] = ["csv", "xlsx", "xlsm", "xls", "ods"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub source: SourceConfig,
    pub sheets: SheetsConfig,
    pub layout: LayoutConfig,
    pub teams: TeamsConfig,
    pub triggers: TriggerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub responses: String,
    pub board: String,
    pub chart_data: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            responses: "Form Responses 1".to_string(),
            board: "Board".to_string(),
            chart_data: "_ChartData".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub label_prefix: String,
    pub chart_side_max_columns: u16,
    pub column_gap: u16,
    /// 像素
    pub column_width: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_prefix: "Group ".to_string(),
            chart_side_max_columns: 16,
            column_gap: 1,
            column_width: 220,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamMode {
    /// 依人數推算組數，輪流分配
    #[default]
    FixedCount,
    /// 每組固定人數
    FixedSize,
}

impl std::str::FromStr for TeamMode {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fixed_count" | "count" => Ok(TeamMode::FixedCount),
            "fixed_size" | "size" => Ok(TeamMode::FixedSize),
            other => Err(BoardError::InvalidConfigValueError {
                field: "teams.mode".to_string(),
                value: other.to_string(),
                reason: "Valid modes: fixed_count, fixed_size".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamsConfig {
    pub mode: TeamMode,
    pub team_size: usize,
    pub dedupe_by_email: bool,
}

impl Default for TeamsConfig {
    fn default() -> Self {
        Self {
            mode: TeamMode::FixedCount,
            team_size: 4,
            dedupe_by_email: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub edit_debounce_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            edit_debounce_ms: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
        }
    }
}

impl BoardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BoardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BoardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RESPONSES_PATH})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let source = validation::validate_required_field("source.path", &self.source.path)?;
        validation::validate_path("source.path", source)?;
        validation::validate_file_extension("source.path", source, &SOURCE_EXTENSIONS)?;

        validation::validate_sheet_name("sheets.responses", &self.sheets.responses)?;
        validation::validate_sheet_name("sheets.board", &self.sheets.board)?;
        validation::validate_sheet_name("sheets.chart_data", &self.sheets.chart_data)?;
        if self.sheets.board == self.sheets.chart_data {
            return Err(BoardError::ConfigValidationError {
                field: "sheets.chart_data".to_string(),
                message: "Chart data sheet must differ from the board sheet".to_string(),
            });
        }

        validation::validate_positive_number("teams.team_size", self.teams.team_size, 1)?;
        validation::validate_range("layout.column_gap", self.layout.column_gap, 1, 64)?;
        validation::validate_range("layout.column_width", self.layout.column_width, 10, 2000)?;
        validation::validate_positive_number(
            "layout.chart_side_max_columns",
            self.layout.chart_side_max_columns as usize,
            1,
        )?;

        validation::validate_path("output.path", &self.output.path)?;

        Ok(())
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source.path.as_deref()
    }

    pub fn team_mode(&self) -> TeamMode {
        self.teams.mode
    }

    pub fn label_prefix(&self) -> &str {
        &self.layout.label_prefix
    }

    pub fn edit_debounce(&self) -> Duration {
        Duration::from_millis(self.triggers.edit_debounce_ms)
    }
}

impl ConfigProvider for BoardConfig {
    fn response_sheet(&self) -> &str {
        &self.sheets.responses
    }

    fn board_sheet(&self) -> &str {
        &self.sheets.board
    }

    fn chart_data_sheet(&self) -> &str {
        &self.sheets.chart_data
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[source]
path = "responses.csv"

[sheets]
board = "Teams"

[teams]
mode = "fixed_size"
team_size = 3

[output]
path = "./test-output"
"#;

        let config = BoardConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source_path(), Some("responses.csv"));
        assert_eq!(config.board_sheet(), "Teams");
        assert_eq!(config.response_sheet(), "Form Responses 1");
        assert_eq!(config.team_mode(), TeamMode::FixedSize);
        assert_eq!(config.teams.team_size, 3);
        assert_eq!(config.layout.column_width, 220);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = BoardConfig::from_toml_str("").unwrap();

        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.team_mode(), TeamMode::FixedCount);
        assert_eq!(config.label_prefix(), "Group ");
        assert_eq!(config.chart_data_sheet(), "_ChartData");
        assert_eq!(config.edit_debounce(), Duration::from_millis(150));
        assert!(!config.teams.dedupe_by_email);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEAM_BOARD_TEST_SOURCE", "from-env.csv");

        let toml_content = r#"
[source]
path = "${TEAM_BOARD_TEST_SOURCE}"
"#;

        let config = BoardConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source_path(), Some("from-env.csv"));

        std::env::remove_var("TEAM_BOARD_TEST_SOURCE");
    }

    #[test]
    fn test_config_validation() {
        let missing_source = BoardConfig::default();
        assert!(matches!(
            missing_source.validate(),
            Err(BoardError::MissingConfigError { .. })
        ));

        let mut bad_size = BoardConfig::default();
        bad_size.source.path = Some("responses.csv".to_string());
        bad_size.teams.team_size = 0;
        assert!(bad_size.validate().is_err());

        let mut same_sheets = BoardConfig::default();
        same_sheets.source.path = Some("responses.xlsx".to_string());
        same_sheets.sheets.chart_data = "Board".to_string();
        assert!(same_sheets.validate().is_err());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let toml_content = r#"
[teams]
mode = "random"
"#;
        assert!(BoardConfig::from_toml_str(toml_content).is_err());
        assert_eq!("size".parse::<TeamMode>().unwrap(), TeamMode::FixedSize);
        assert!("pairs".parse::<TeamMode>().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
path = "responses.xlsx"

[layout]
label_prefix = "Team "
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = BoardConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.label_prefix(), "Team ");
    }
}
