//! 提交：打包 {文件, 转换类型}，调用远端转换服务，成功后落盘下载
//!
//! 校验失败（未选择文件）在本地同步返回，不发起任何网络请求；
//! 其余失败一律归为转换失败，只在日志中保留细节。

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{
    catalog::ConversionType,
    download::{download_file_name, DownloadSink, ExtensionPolicy},
    drop_zone::SelectedFile,
    status::SubmissionStatus,
};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("未选择文件")]
    NoFileSelected,
    #[error("读取文件失败 {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("后端返回 HTTP {status}")]
    Rejected { status: u16 },
    #[error("请求失败: {0}")]
    Transport(String),
    #[error("保存下载失败: {0}")]
    Save(#[source] std::io::Error),
}

impl SubmitError {
    /// 校验错误（本地检查）与转换错误（远端或IO）的区分
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmitError::NoFileSelected)
    }

    pub fn status(&self) -> SubmissionStatus {
        if self.is_validation() {
            SubmissionStatus::NoFileSelected
        } else {
            SubmissionStatus::Failed
        }
    }
}

/// 一次待发送的转换请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub conversion: ConversionType,
}

/// 远端转换服务
pub trait ConversionBackend: Send + Sync {
    /// 发送一次请求（请求体按值移交，不再复制），成功时返回响应体原始字节
    fn convert(&self, request: ConversionRequest) -> Result<Vec<u8>, SubmitError>;
}

pub struct Submitter<B, D> {
    backend: B,
    downloads: D,
    policy: ExtensionPolicy,
}

impl<B: ConversionBackend, D: DownloadSink> Submitter<B, D> {
    pub fn new(backend: B, downloads: D, policy: ExtensionPolicy) -> Self {
        Self {
            backend,
            downloads,
            policy,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn downloads(&self) -> &D {
        &self.downloads
    }

    /// 本地校验并读取文件内容
    pub fn prepare(
        &self,
        file: Option<&SelectedFile>,
        conversion: ConversionType,
    ) -> Result<ConversionRequest, SubmitError> {
        let file = file.ok_or(SubmitError::NoFileSelected)?;
        let bytes = std::fs::read(&file.path).map_err(|source| SubmitError::ReadFile {
            path: file.path.clone(),
            source,
        })?;
        Ok(ConversionRequest {
            file_name: file.name.clone(),
            bytes,
            conversion,
        })
    }

    /// 发起一次远端调用；成功时触发且仅触发一次下载
    fn execute(&self, request: ConversionRequest) -> Result<PathBuf, SubmitError> {
        tracing::info!(
            "提交转换: {} ({} 字节) -> {}",
            request.file_name,
            request.bytes.len(),
            request.conversion
        );
        let file_name = download_file_name(request.conversion, self.policy);
        let payload = self.backend.convert(request)?;
        self.downloads.save(&file_name, &payload)
    }

    /// 完整的一次提交：校验 → 进行中 → 终态。
    /// 每个状态都会回调 `on_status`，返回终态；错误不会越过此边界。
    pub fn submit(
        &self,
        file: Option<&SelectedFile>,
        conversion: ConversionType,
        mut on_status: impl FnMut(&SubmissionStatus),
    ) -> SubmissionStatus {
        let request = match self.prepare(file, conversion) {
            Ok(request) => request,
            Err(e) => return finish(Err(e), &mut on_status),
        };

        on_status(&SubmissionStatus::InProgress);
        finish(self.execute(request), &mut on_status)
    }
}

/// 把一次提交的结果折叠成终态并通知
fn finish(
    result: Result<PathBuf, SubmitError>,
    on_status: &mut impl FnMut(&SubmissionStatus),
) -> SubmissionStatus {
    let status = match result {
        Ok(saved_to) => SubmissionStatus::Succeeded { saved_to },
        Err(e) => {
            if e.is_validation() {
                tracing::warn!("提交被拒绝: {}", e);
            } else {
                tracing::error!("转换失败: {}", e);
            }
            e.status()
        }
    };
    on_status(&status);
    status
}
