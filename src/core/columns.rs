use crate::utils::error::{BoardError, Result};
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedColumns {
    pub name: usize,
    pub email: Option<usize>,
}

/// 在標題列中尋找姓名與 Email 欄位
pub struct ColumnDetector {
    email: Regex,
    name: Regex,
}

impl ColumnDetector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email: RegexBuilder::new("email").case_insensitive(true).build()?,
            name: RegexBuilder::new("(name|이름)").case_insensitive(true).build()?,
        })
    }

    /// 各取第一個符合的標題；找不到姓名欄位視為設定錯誤
    pub fn detect<S: AsRef<str>>(&self, header: &[S]) -> Result<DetectedColumns> {
        let email = header.iter().position(|h| self.email.is_match(h.as_ref()));
        let name = header
            .iter()
            .position(|h| self.name.is_match(h.as_ref()))
            .ok_or_else(|| BoardError::MissingColumn {
                column: "Name".to_string(),
            })?;

        tracing::debug!("Detected name column {} and email column {:?}", name, email);

        Ok(DetectedColumns { name, email })
    }
}
