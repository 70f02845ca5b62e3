use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Sheet \"{sheet}\" not found.")]
    MissingSheet { sheet: String },

    #[error("No \"{column}\" column found.")]
    MissingColumn { column: String },

    #[error("No board yet.")]
    NoBoard,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Workbook read error: {0}")]
    WorkbookReadError(#[from] calamine::Error),

    #[error("Workbook write error: {0}")]
    WorkbookWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BoardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BoardError::MissingSheet { .. }
            | BoardError::MissingColumn { .. }
            | BoardError::ConfigError { .. }
            | BoardError::ConfigValidationError { .. }
            | BoardError::InvalidConfigValueError { .. }
            | BoardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BoardError::CsvError(_) | BoardError::WorkbookReadError(_) | BoardError::NoBoard => {
                ErrorCategory::Input
            }
            BoardError::IoError(_)
            | BoardError::SerializationError(_)
            | BoardError::WorkbookWriteError(_) => ErrorCategory::Output,
            BoardError::PatternError(_) | BoardError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BoardError::NoBoard => ErrorSeverity::Low,
            BoardError::CsvError(_) | BoardError::WorkbookReadError(_) => ErrorSeverity::Medium,
            BoardError::IoError(_) | BoardError::PatternError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 設定類錯誤會中止整次重建
    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BoardError::MissingSheet { sheet } => format!(
                "Check that the response sheet is named \"{}\" or update [sheets].responses",
                sheet
            ),
            BoardError::MissingColumn { .. } => {
                "Add a header containing \"Name\" (or \"이름\") to the response sheet".to_string()
            }
            BoardError::NoBoard => "Run `team-board rebuild` before freezing".to_string(),
            BoardError::CsvError(_) => "Make sure the response file is valid CSV".to_string(),
            BoardError::WorkbookReadError(_) => {
                "Make sure the response workbook is a readable .xlsx/.xls/.ods file".to_string()
            }
            BoardError::WorkbookWriteError(_) | BoardError::IoError(_) => {
                "Check that the output directory is writable".to_string()
            }
            BoardError::InvalidConfigValueError { field, .. }
            | BoardError::ConfigValidationError { field, .. }
            | BoardError::MissingConfigError { field } => {
                format!("Fix the '{}' setting in the configuration file", field)
            }
            BoardError::ConfigError { .. } => "Review the configuration file".to_string(),
            BoardError::SerializationError(_) => {
                "Delete the stale board.json and rebuild".to_string()
            }
            BoardError::PatternError(_) | BoardError::ProcessingError { .. } => {
                "Re-run with --verbose and report the log".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read input: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }

    /// 依嚴重程度對應 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
