//! StatusNotifier：单条状态消息，每次生命周期切换时整体覆盖

use std::path::PathBuf;

use crate::vm::bridge::{STATUS_FAILED, STATUS_IN_PROGRESS, STATUS_NO_FILE, STATUS_SUCCESS};

/// 一次提交的生命周期
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    NoFileSelected,
    InProgress,
    Succeeded { saved_to: PathBuf },
    Failed,
}

impl SubmissionStatus {
    /// 用户可见的文本；失败细节只进日志，不上屏
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "",
            SubmissionStatus::NoFileSelected => STATUS_NO_FILE,
            SubmissionStatus::InProgress => STATUS_IN_PROGRESS,
            SubmissionStatus::Succeeded { .. } => STATUS_SUCCESS,
            SubmissionStatus::Failed => STATUS_FAILED,
        }
    }

    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Idle | SubmissionStatus::InProgress)
    }
}

#[derive(Debug, Default, Clone)]
pub struct StatusNotifier {
    message: String,
}

impl StatusNotifier {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn apply(&mut self, status: &SubmissionStatus) {
        self.set(status.message());
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
