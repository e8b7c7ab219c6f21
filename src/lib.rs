//! 文件转换客户端库
//!
//! 选择转换类型与文件，以 multipart 形式提交到远端转换服务，
//! 并把返回的数据保存为下载文件。遵循MVVM架构模式。

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::catalog::{catalog, CatalogEntry, CatalogError, ConversionType};
pub use model::config::{ConfigError, ConverterConfig};
pub use model::download::{download_file_name, DirectoryDownloads, DownloadSink, ExtensionPolicy};
pub use model::drop_zone::{DropZone, SelectedFile};
pub use model::status::{StatusNotifier, SubmissionStatus};
pub use model::submit::{ConversionBackend, ConversionRequest, SubmitError, Submitter};
pub use utils::http::HttpBackend;
pub use vm::view_state::{ConverterState, PendingSubmission, ViewSnapshot};
