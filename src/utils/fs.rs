//! IO helper: JSON config reading and collision-free download writes

use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// 从文件读取JSON并反序列化
pub fn read_json_file<T: DeserializeOwned>(p: &Path) -> Result<T, std::io::Error> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 为 `file_name` 在 `dir` 中找一个未占用的路径：
/// `converted.excel` → `converted (1).excel` → `converted (2).excel` ...
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    (1u32..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, n, ext)),
            None => dir.join(format!("{} ({})", stem, n)),
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// 先写入同目录的临时文件，再改名为最终文件名；
/// 任一步失败时临时文件随 drop 删除
pub fn write_new_file(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, std::io::Error> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;

    let target = unique_path(dir, file_name);
    // persist_noclobber：不覆盖并发写入的同名文件
    tmp.persist_noclobber(&target).map_err(|e| e.error)?;
    Ok(target)
}
