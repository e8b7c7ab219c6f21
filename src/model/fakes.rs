//! 测试替身：假后端与记录下载的目标

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use crate::model::{
    download::DownloadSink,
    submit::{ConversionBackend, ConversionRequest, SubmitError},
};

/// 记录调用次数的假后端
pub(crate) struct FakeBackend {
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<ConversionRequest>>,
    reply: Result<Vec<u8>, u16>,
}

impl FakeBackend {
    pub fn ok(payload: &[u8]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Ok(payload.to_vec()),
        }
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Err(status),
        }
    }
}

impl ConversionBackend for FakeBackend {
    fn convert(&self, request: ConversionRequest) -> Result<Vec<u8>, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request);
        match &self.reply {
            Ok(bytes) => Ok(bytes.clone()),
            Err(status) => Err(SubmitError::Rejected { status: *status }),
        }
    }
}

/// 记录下载的假目标
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl DownloadSink for RecordingSink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SubmitError> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
