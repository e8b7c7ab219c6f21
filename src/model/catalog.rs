//! 转换目录：固定、有序的转换类型表（标识符 / emoji 前缀 / 描述）

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("未知的转换类型: {0}")]
    UnknownConversion(String),
}

/// 支持的转换类型（封闭集合，选择器无法表示目录之外的值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionType {
    #[default]
    PdfToExcel,
    PdfToWord,
    PdfToImage,
    PdfToText,
    MergePdfs,
    SplitPdf,
    CompressPdf,
    ImageToPdf,
    ImageToText,
    CsvToExcel,
    ExcelToCsv,
    WordToPdf,
    TextToPdf,
    JsonToCsv,
    Mp3ToWav,
    VideoToGif,
}

/// 目录中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub conversion: ConversionType,
    pub id: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

impl ConversionType {
    /// 菜单顺序（即插入顺序）
    pub const ALL: [ConversionType; 16] = [
        ConversionType::PdfToExcel,
        ConversionType::PdfToWord,
        ConversionType::PdfToImage,
        ConversionType::PdfToText,
        ConversionType::MergePdfs,
        ConversionType::SplitPdf,
        ConversionType::CompressPdf,
        ConversionType::ImageToPdf,
        ConversionType::ImageToText,
        ConversionType::CsvToExcel,
        ConversionType::ExcelToCsv,
        ConversionType::WordToPdf,
        ConversionType::TextToPdf,
        ConversionType::JsonToCsv,
        ConversionType::Mp3ToWav,
        ConversionType::VideoToGif,
    ];

    /// 发送给后端的 `conversionType` 字段值
    pub fn id(self) -> &'static str {
        match self {
            ConversionType::PdfToExcel => "pdf-to-excel",
            ConversionType::PdfToWord => "pdf-to-word",
            ConversionType::PdfToImage => "pdf-to-image",
            ConversionType::PdfToText => "pdf-to-text",
            ConversionType::MergePdfs => "merge-pdfs",
            ConversionType::SplitPdf => "split-pdf",
            ConversionType::CompressPdf => "compress-pdf",
            ConversionType::ImageToPdf => "image-to-pdf",
            ConversionType::ImageToText => "image-to-text",
            ConversionType::CsvToExcel => "csv-to-excel",
            ConversionType::ExcelToCsv => "excel-to-csv",
            ConversionType::WordToPdf => "word-to-pdf",
            ConversionType::TextToPdf => "text-to-pdf",
            ConversionType::JsonToCsv => "json-to-csv",
            ConversionType::Mp3ToWav => "mp3-to-wav",
            ConversionType::VideoToGif => "video-to-gif",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            ConversionType::PdfToExcel
            | ConversionType::PdfToWord
            | ConversionType::PdfToImage
            | ConversionType::PdfToText => "📄",
            ConversionType::MergePdfs | ConversionType::SplitPdf => "📑",
            ConversionType::CompressPdf => "📉",
            ConversionType::ImageToPdf | ConversionType::ImageToText => "🖼️",
            ConversionType::CsvToExcel | ConversionType::ExcelToCsv => "📊",
            ConversionType::WordToPdf | ConversionType::TextToPdf => "📝",
            ConversionType::JsonToCsv => "💾",
            ConversionType::Mp3ToWav => "🎵",
            ConversionType::VideoToGif => "🎬",
        }
    }

    /// 描述正文（不含 emoji 前缀）
    fn summary(self) -> &'static str {
        match self {
            ConversionType::PdfToExcel => {
                "Converts a PDF file into an Excel spreadsheet, extracting tables and structured data."
            }
            ConversionType::PdfToWord => "Converts a PDF file into an editable Word document.",
            ConversionType::PdfToImage => "Converts each page of a PDF into a separate image.",
            ConversionType::PdfToText => "Extracts plain text from a PDF file.",
            ConversionType::MergePdfs => "Combines multiple PDFs into one single document.",
            ConversionType::SplitPdf => "Splits a PDF into multiple smaller PDF files.",
            ConversionType::CompressPdf => "Reduces the file size of a PDF without losing quality.",
            ConversionType::ImageToPdf => "Converts image files (JPG, PNG) into a PDF document.",
            ConversionType::ImageToText => "Extracts text from an image using OCR technology.",
            ConversionType::CsvToExcel => "Converts a CSV file into an Excel spreadsheet.",
            ConversionType::ExcelToCsv => "Converts an Excel spreadsheet into a CSV file.",
            ConversionType::WordToPdf => "Converts a Word document into a PDF file.",
            ConversionType::TextToPdf => "Converts plain text into a formatted PDF document.",
            ConversionType::JsonToCsv => "Converts JSON data into a structured CSV file.",
            ConversionType::Mp3ToWav => "Converts an MP3 audio file into a WAV format.",
            ConversionType::VideoToGif => "Converts a video clip into an animated GIF file.",
        }
    }

    /// 描述行文本（带 emoji 前缀）
    pub fn description(self) -> String {
        format!("{} {}", self.emoji(), self.summary())
    }

    /// 下拉菜单标签，例如 `📄 PDF TO EXCEL`
    pub fn menu_label(self) -> String {
        format!("{} {}", self.emoji(), self.id().replace('-', " ").to_uppercase())
    }

    /// 在菜单中的位置
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for ConversionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ConversionType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s.trim()).ok_or_else(|| CatalogError::UnknownConversion(s.to_string()))
    }
}

/// 按菜单顺序返回完整目录
pub fn catalog() -> Vec<CatalogEntry> {
    ConversionType::ALL
        .into_iter()
        .map(|conversion| CatalogEntry {
            conversion,
            id: conversion.id(),
            emoji: conversion.emoji(),
            description: conversion.summary(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_stable() {
        let ids: Vec<&str> = catalog().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 16, "目录应包含16项");
        assert_eq!(ids[0], "pdf-to-excel", "第一项应为 pdf-to-excel");
        assert_eq!(ids[4], "merge-pdfs");
        assert_eq!(ids[15], "video-to-gif", "最后一项应为 video-to-gif");
    }

    #[test]
    fn test_index_round_trips_through_menu_position() {
        for (i, conversion) in ConversionType::ALL.into_iter().enumerate() {
            assert_eq!(conversion.index(), i);
            assert_eq!(ConversionType::from_index(i), Some(conversion));
        }
        assert_eq!(ConversionType::from_index(16), None, "越界索引不应映射到任何类型");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = ConversionType::ALL.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ConversionType::ALL.len(), "标识符不应重复");
    }

    #[test]
    fn test_menu_label() {
        assert_eq!(ConversionType::PdfToExcel.menu_label(), "📄 PDF TO EXCEL");
        assert_eq!(ConversionType::Mp3ToWav.menu_label(), "🎵 MP3 TO WAV");
    }

    #[test]
    fn test_description_has_emoji_prefix() {
        assert_eq!(
            ConversionType::ImageToText.description(),
            "🖼️ Extracts text from an image using OCR technology."
        );
        for entry in catalog() {
            assert!(
                entry.conversion.description().starts_with(entry.emoji),
                "描述应以 emoji 开头: {}",
                entry.id
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown_ids() {
        assert_eq!("csv-to-excel".parse::<ConversionType>(), Ok(ConversionType::CsvToExcel));
        assert_eq!(
            "docx-to-epub".parse::<ConversionType>(),
            Err(CatalogError::UnknownConversion("docx-to-epub".into()))
        );
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&ConversionType::SplitPdf).unwrap();
        assert_eq!(json, "\"split-pdf\"");
        let parsed: ConversionType = serde_json::from_str("\"json-to-csv\"").unwrap();
        assert_eq!(parsed, ConversionType::JsonToCsv);
    }
}
