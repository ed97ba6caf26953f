//! 本地偏好存储
//!
//! 只保存少量键值（例如显示名），与服务端无关

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// 显示名的键，创建房间时作为房间名发送
pub const DISPLAY_NAME_KEY: &str = "display_name";

/// 键值偏好存储
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// 当前显示名（未设置时为空串）
    fn display_name(&self) -> String {
        self.get(DISPLAY_NAME_KEY).unwrap_or_default()
    }
}

/// 获取偏好文件路径
pub fn preferences_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("无法获取数据目录")?;
    Ok(data_dir.join("chess-client").join("preferences.json"))
}

/// JSON 文件存储，每次写入都落盘
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// 打开默认位置的偏好文件
    pub fn open_default() -> Result<Self> {
        Self::open(preferences_path()?)
    }

    /// 打开偏好文件；文件损坏时从空白开始
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content =
                fs::read_to_string(&path).with_context(|| format!("读取文件失败: {:?}", path))?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Invalid preferences file {:?}: {}", path, e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建存储目录: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(&self.values).context("序列化偏好失败")?;
        fs::write(&self.path, content)
            .with_context(|| format!("写入文件失败: {:?}", self.path))?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()?;
        tracing::debug!("Preference {} saved", key);
        Ok(())
    }
}

/// 内存存储（无法访问磁盘时使用）
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
