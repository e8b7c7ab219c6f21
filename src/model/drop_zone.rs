//! DropZone：单文件模式的拖放/浏览目标

use std::path::PathBuf;

use crate::vm::bridge::{DROP_HINT, DROP_FILE_PREFIX};

/// 用户选中的文件（只保存路径，字节在提交时读取）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self { path, name }
    }
}

/// 最多持有一个文件；新的拖放整体替换旧选择
#[derive(Debug, Default)]
pub struct DropZone {
    current: Option<SelectedFile>,
}

impl DropZone {
    /// 接收一组拖入/选中的文件，只保留第一个，其余静默丢弃。
    /// 空列表不改变当前选择；返回选择是否被替换。
    pub fn on_file_dropped<I, P>(&mut self, files: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut files = files.into_iter();
        let Some(first) = files.next() else {
            return false;
        };

        let discarded = files.count();
        let selected = SelectedFile::new(first);
        if discarded > 0 {
            tracing::debug!("单文件模式，丢弃了 {} 个额外文件", discarded);
        }
        tracing::info!("选中文件: {}", selected.path.display());
        self.current = Some(selected);
        true
    }

    pub fn current_file(&self) -> Option<&SelectedFile> {
        self.current.as_ref()
    }

    /// 拖放区域显示的文本
    pub fn label(&self) -> String {
        match &self.current {
            Some(file) => format!("{}{}", DROP_FILE_PREFIX, file.name),
            None => DROP_HINT.to_string(),
        }
    }
}
