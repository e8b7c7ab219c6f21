//! ConverterState：视图私有状态；UI 只接收不可变快照

use crate::model::{
    catalog::{catalog, ConversionType},
    download::DownloadSink,
    drop_zone::{DropZone, SelectedFile},
    status::{StatusNotifier, SubmissionStatus},
    submit::{ConversionBackend, Submitter},
};
use crate::vm::bridge::DESCRIPTION_PREFIX;

#[derive(Debug, Default)]
pub struct ConverterState {
    selected: ConversionType,
    drop_zone: DropZone,
    status: StatusNotifier,
    in_flight: bool,
}

/// 已通过本地校验、等待在后台线程执行的一次提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    file: SelectedFile,
    conversion: ConversionType,
}

impl PendingSubmission {
    /// 执行网络请求与下载（阻塞），返回终态
    pub fn run<B: ConversionBackend, D: DownloadSink>(
        self,
        submitter: &Submitter<B, D>,
    ) -> SubmissionStatus {
        submitter.submit(Some(&self.file), self.conversion, |status| {
            tracing::debug!("提交状态: {:?}", status)
        })
    }
}

/// 推送给 UI 的一帧状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub menu_labels: Vec<String>,
    pub selected_index: usize,
    pub description: String,
    pub drop_label: String,
    pub has_file: bool,
    pub status_message: String,
    pub can_submit: bool,
}

impl ConverterState {
    pub fn new(default_conversion: ConversionType) -> Self {
        Self {
            selected: default_conversion,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> ConversionType {
        self.selected
    }

    /// 切换转换类型；越界索引被忽略
    pub fn select_index(&mut self, index: usize) -> bool {
        match ConversionType::from_index(index) {
            Some(conversion) => {
                self.selected = conversion;
                true
            }
            None => {
                tracing::warn!("忽略越界的转换类型索引: {}", index);
                false
            }
        }
    }

    pub fn drop_zone_mut(&mut self) -> &mut DropZone {
        &mut self.drop_zone
    }

    pub fn apply_status(&mut self, status: &SubmissionStatus) {
        self.status.apply(status);
        if status.is_terminal() {
            self.in_flight = false;
        }
    }

    /// 点击提交：未选文件时同步得到校验状态，不发起网络请求；
    /// 否则标记进行中并返回待执行的提交。已有提交进行中时忽略。
    pub fn start_submission<B: ConversionBackend, D: DownloadSink>(
        &mut self,
        submitter: &Submitter<B, D>,
    ) -> Option<PendingSubmission> {
        if self.in_flight {
            tracing::warn!("已有提交进行中，忽略本次点击");
            return None;
        }

        let conversion = self.selected;
        let Some(file) = self.drop_zone.current_file().cloned() else {
            let status = submitter.submit(None, conversion, |_| {});
            self.apply_status(&status);
            return None;
        };

        self.in_flight = true;
        self.status.apply(&SubmissionStatus::InProgress);
        Some(PendingSubmission { file, conversion })
    }

    /// 后台提交结束，回到UI线程时调用
    pub fn finish_submission(&mut self, status: &SubmissionStatus) {
        self.apply_status(status);
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let has_file = self.drop_zone.current_file().is_some();
        ViewSnapshot {
            menu_labels: catalog()
                .into_iter()
                .map(|entry| entry.conversion.menu_label())
                .collect(),
            selected_index: self.selected.index(),
            description: format!("{}{}", DESCRIPTION_PREFIX, self.selected.description()),
            drop_label: self.drop_zone.label(),
            has_file,
            status_message: self.status.message().to_string(),
            can_submit: has_file && !self.in_flight,
        }
    }
}
