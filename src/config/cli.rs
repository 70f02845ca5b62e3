use crate::config::toml_config::{BoardConfig, TeamMode};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "team-board.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "team-board")]
#[command(about = "Randomly split form respondents into groups and render a team board")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Override the response sheet file (.csv, .xlsx, .xls, .ods)
    #[arg(long)]
    pub input: Option<String>,

    /// Override the output directory
    #[arg(long)]
    pub output: Option<String>,

    /// Override the team mode (fixed_count or fixed_size)
    #[arg(long)]
    pub mode: Option<String>,

    /// Override the fixed team size
    #[arg(long)]
    pub team_size: Option<usize>,

    /// Seed the shuffle for a reproducible board
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Rebuild the board from the current responses
    Rebuild,
    /// Append a form response and rebuild
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        /// Extra answers as HEADER=VALUE
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Notify that a response row was edited
    Edit {
        #[arg(long)]
        sheet: String,
        #[arg(long)]
        row: u32,
    },
    /// Copy the live board into a timestamped snapshot
    Freeze,
    /// Print the effective configuration
    ShowConfig,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected HEADER=VALUE, got '{}'", raw)),
    }
}

impl CliConfig {
    /// 載入設定檔；預設檔案不存在時使用內建預設值
    pub fn load_config(&self) -> Result<BoardConfig> {
        let mut config = if self.config == DEFAULT_CONFIG_FILE && !Path::new(&self.config).exists() {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            BoardConfig::default()
        } else {
            BoardConfig::from_file(&self.config)?
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    /// 應用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut BoardConfig) -> Result<()> {
        if let Some(input) = &self.input {
            config.source.path = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(mode) = &self.mode {
            config.teams.mode = mode.parse::<TeamMode>()?;
            tracing::info!("🔧 Team mode overridden to: {:?}", config.teams.mode);
        }
        if let Some(size) = self.team_size {
            config.teams.team_size = size;
        }
        Ok(())
    }
}

impl Command {
    /// submit 的欄位，鍵為標題或 name/email
    pub fn response_fields(&self) -> Option<HashMap<String, String>> {
        match self {
            Command::Submit {
                name,
                email,
                fields,
            } => {
                let mut map: HashMap<String, String> = fields.iter().cloned().collect();
                map.insert("name".to_string(), name.clone());
                if let Some(email) = email {
                    map.insert("email".to_string(), email.clone());
                }
                Some(map)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let cli = CliConfig::parse_from([
            "team-board",
            "--input",
            "responses.csv",
            "--mode",
            "fixed_size",
            "--team-size",
            "5",
            "--output",
            "out",
            "rebuild",
        ]);

        let mut config = BoardConfig::default();
        cli.apply_overrides(&mut config).unwrap();

        assert_eq!(config.source_path(), Some("responses.csv"));
        assert_eq!(config.team_mode(), TeamMode::FixedSize);
        assert_eq!(config.teams.team_size, 5);
        assert_eq!(config.output.path, "out");
    }

    #[test]
    fn test_bad_mode_override_fails() {
        let cli = CliConfig::parse_from(["team-board", "--mode", "pairs", "rebuild"]);
        assert!(cli.apply_overrides(&mut BoardConfig::default()).is_err());
    }

    #[test]
    fn test_submit_fields() {
        let cli = CliConfig::parse_from([
            "team-board",
            "submit",
            "--name",
            "Ann",
            "--email",
            "ann@x.io",
            "--field",
            "Major=Physics",
        ]);

        let fields = cli.command.response_fields().unwrap();
        assert_eq!(fields["name"], "Ann");
        assert_eq!(fields["email"], "ann@x.io");
        assert_eq!(fields["Major"], "Physics");
        assert!(Command::Freeze.response_fields().is_none());
    }

    #[test]
    fn test_parse_field_requires_key() {
        assert!(parse_field("=x").is_err());
        assert!(parse_field("novalue").is_err());
        assert_eq!(
            parse_field("Team pref=Red=Blue").unwrap(),
            ("Team pref".to_string(), "Red=Blue".to_string())
        );
    }
}
