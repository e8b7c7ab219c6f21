//! HTTP backend: multipart POST to the remote conversion service

use std::time::Duration;

use reqwest::{
    blocking::{multipart, Client},
    Url,
};

use crate::model::submit::{ConversionBackend, ConversionRequest, SubmitError};

/// 通过 reqwest 阻塞客户端调用远端服务（应在后台线程中使用）
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: Url,
}

impl HttpBackend {
    pub fn new(endpoint: Url) -> Result<Self, SubmitError> {
        // 不设超时、不重试：请求要么完成要么失败
        let client = Client::builder()
            .user_agent(concat!("file-converter/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint })
    }
}

const OCTET_STREAM: &str = "application/octet-stream";

/// 按扩展名推断上传文件的 MIME 类型，未知时退回 `application/octet-stream`
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => return OCTET_STREAM,
    };
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => OCTET_STREAM,
    }
}

impl ConversionBackend for HttpBackend {
    fn convert(&self, request: ConversionRequest) -> Result<Vec<u8>, SubmitError> {
        let mime = content_type_for(&request.file_name);
        let file = multipart::Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(mime)
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", file)
            .text("conversionType", request.conversion.id());

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .map_err(|e| SubmitError::Transport(format!("POST {}: {}", self.endpoint, e)))?;

        let status = response.status();
        tracing::info!("转换服务响应: HTTP {}", status);
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .map_err(|e| SubmitError::Transport(format!("读取响应体失败: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
