//! 下载：文件名推导与落盘

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::catalog::ConversionType;
use crate::model::submit::SubmitError;
use crate::utils::fs::write_new_file;

const DOWNLOAD_STEM: &str = "converted";

/// 下载文件扩展名的推导方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtensionPolicy {
    /// 取标识符最后一个 `-` 之后的片段（`pdf-to-excel` → `excel`）。
    /// 与既有行为保持一致，多数条目得到的并不是真实扩展名。
    #[default]
    LastSegment,
    /// 按输出格式映射到真实扩展名（`pdf-to-excel` → `xlsx`）
    Corrected,
}

impl ExtensionPolicy {
    pub fn extension(self, conversion: ConversionType) -> &'static str {
        match self {
            ExtensionPolicy::LastSegment => {
                let id = conversion.id();
                id.rsplit('-').next().unwrap_or(id)
            }
            ExtensionPolicy::Corrected => corrected_extension(conversion),
        }
    }
}

fn corrected_extension(conversion: ConversionType) -> &'static str {
    use ConversionType::*;
    match conversion {
        PdfToExcel | CsvToExcel => "xlsx",
        PdfToWord => "docx",
        // 每页一张图 / 拆分为多个文件：后端返回压缩包
        PdfToImage | SplitPdf => "zip",
        PdfToText | ImageToText => "txt",
        MergePdfs | CompressPdf | ImageToPdf | WordToPdf | TextToPdf => "pdf",
        ExcelToCsv | JsonToCsv => "csv",
        Mp3ToWav => "wav",
        VideoToGif => "gif",
    }
}

/// 下载文件名，例如 `converted.excel`
pub fn download_file_name(conversion: ConversionType, policy: ExtensionPolicy) -> String {
    format!("{}.{}", DOWNLOAD_STEM, policy.extension(conversion))
}

/// 接收转换结果的下载目标
pub trait DownloadSink: Send + Sync {
    /// 保存一次完整的下载，返回最终路径
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SubmitError>;
}

/// 写入本地下载目录；重名时像浏览器一样追加 ` (n)`
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SubmitError> {
        let path = write_new_file(&self.dir, file_name, bytes).map_err(SubmitError::Save)?;
        tracing::info!("下载已保存: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment_keeps_legacy_names() {
        let p = ExtensionPolicy::LastSegment;
        assert_eq!(download_file_name(ConversionType::CsvToExcel, p), "converted.excel");
        assert_eq!(download_file_name(ConversionType::PdfToExcel, p), "converted.excel");
        assert_eq!(download_file_name(ConversionType::ImageToText, p), "converted.text");
        assert_eq!(download_file_name(ConversionType::MergePdfs, p), "converted.pdfs");
        assert_eq!(download_file_name(ConversionType::Mp3ToWav, p), "converted.wav");
    }

    #[test]
    fn test_last_segment_matches_identifier_suffix() {
        for conversion in ConversionType::ALL {
            let expected = conversion.id().rsplit('-').next().unwrap();
            assert_eq!(
                download_file_name(conversion, ExtensionPolicy::LastSegment),
                format!("converted.{}", expected)
            );
        }
    }

    #[test]
    fn test_corrected_table() {
        let p = ExtensionPolicy::Corrected;
        assert_eq!(download_file_name(ConversionType::PdfToExcel, p), "converted.xlsx");
        assert_eq!(download_file_name(ConversionType::ImageToText, p), "converted.txt");
        assert_eq!(download_file_name(ConversionType::PdfToWord, p), "converted.docx");
        assert_eq!(download_file_name(ConversionType::SplitPdf, p), "converted.zip");
        assert_eq!(download_file_name(ConversionType::VideoToGif, p), "converted.gif");
    }

    #[test]
    fn test_policy_defaults_to_last_segment() {
        assert_eq!(ExtensionPolicy::default(), ExtensionPolicy::LastSegment);
        let parsed: ExtensionPolicy = serde_json::from_str("\"corrected\"").unwrap();
        assert_eq!(parsed, ExtensionPolicy::Corrected);
    }

    #[test]
    fn test_directory_downloads_creates_missing_dir() {
        let root = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloads::new(root.path().join("nested").join("downloads"));

        let saved = sink.save("converted.csv", b"a,b\n1,2\n").unwrap();
        assert_eq!(saved, sink.dir().join("converted.csv"));
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "a,b\n1,2\n");
    }
}
