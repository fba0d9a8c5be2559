//! Failure taxonomy for a single interpretation request.
//!
//! Every stage of the pipeline reports through [`InterpretError`]; nothing is
//! retried and nothing falls back to a default figure.

use crate::config::Locale;
use crate::postprocessing::ValidationError;
use crate::preprocessing::CleanerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("Invalid problem text: {0}")]
    Input(#[from] CleanerError),

    #[error("Network request failed{}: {message}", timeout_suffix(.timeout))]
    Transport { timeout: bool, message: String },

    #[error("Completion API returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Unexpected completion response: {reason}")]
    ResponseShape { reason: String },

    #[error("No JSON object found in the model answer")]
    Extraction,

    #[error("Malformed data in the model answer: {source}")]
    RepairedParse {
        source: serde_json::Error,
        raw: String,
    },

    #[error("Invalid geometry description: {0}")]
    Validation(#[from] ValidationError),
}

fn timeout_suffix(timeout: &bool) -> &'static str {
    if *timeout {
        " (timed out)"
    } else {
        ""
    }
}

pub type InterpretResult<T> = Result<T, InterpretError>;

impl InterpretError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, InterpretError::Transport { timeout: true, .. })
    }

    /// The unrepaired model answer, kept for diagnostics when parsing failed.
    pub fn raw_answer(&self) -> Option<&str> {
        match self {
            InterpretError::RepairedParse { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Message meant for the person who typed the problem.
    pub fn localized_message(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::ZhCn => self.chinese_message(),
        }
    }

    fn chinese_message(&self) -> String {
        match self {
            InterpretError::Input(CleanerError::EmptyInput) => "请输入立体几何题目！".to_string(),
            InterpretError::Input(CleanerError::TooLong(len)) => {
                format!("题目过长：{} 个字符", len)
            }
            InterpretError::Transport { timeout, .. } => {
                let mut msg = "解析题目时出错: 网络请求失败".to_string();
                if *timeout {
                    msg.push_str(" (请求超时)");
                }
                msg
            }
            InterpretError::Remote { message, .. } => format!("解析题目时出错: {}", message),
            InterpretError::ResponseShape { .. } => "API返回数据格式错误".to_string(),
            InterpretError::Extraction => {
                "AI返回的数据格式不正确: 未找到有效的JSON格式数据".to_string()
            }
            InterpretError::RepairedParse { source, .. } => {
                format!("AI返回的数据格式不正确: {}", source)
            }
            InterpretError::Validation(err) => {
                format!("AI返回的数据格式不正确: {}", err.localized_message(Locale::ZhCn))
            }
        }
    }
}
