//! VM桥接层：连接Slint UI与转换器状态
//!
//! 注意：回调绑定在main.rs中，因为依赖于Slint生成的类型
//! 这里只提供公共常量

// === 界面文案（消除魔法值） ===
pub const APP_TITLE: &str = "🔄 File Converter 🌍";
pub const APP_SUBTITLE: &str = "🌟 Select a conversion type and upload your file. 🚀";
pub const CONVERT_LABEL: &str = "🔄 Convert";
pub const DROP_HINT: &str = "📥 Drop a file here, or click to select one.";
pub const DROP_FILE_PREFIX: &str = "📎 ";
pub const DESCRIPTION_PREFIX: &str = "ℹ️ ";

// === 状态文案 ===
pub const STATUS_NO_FILE: &str = "⚠️ Please select a file.";
pub const STATUS_IN_PROGRESS: &str = "⏳ Uploading and converting... Please wait.";
pub const STATUS_SUCCESS: &str = "✅ Conversion successful! File downloaded.";
pub const STATUS_FAILED: &str = "❌ Error converting file.";
