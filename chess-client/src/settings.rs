//! 客户端设置模块
//!
//! 提供设置数据结构与 JSON 持久化；读取失败时总是回退到默认设置

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use protocol::{DEFAULT_SERVER_URL, KEEPALIVE_INTERVAL, KEEPALIVE_INTERVAL_SECS};
use serde::{Deserialize, Serialize};

/// 默认日志过滤指令
pub const DEFAULT_LOG_FILTER: &str = "chess_client=info,protocol=info";

/// 客户端设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    // === 网络设置 ===
    /// 服务器地址
    pub server_url: String,
    /// 心跳间隔（秒）
    pub keepalive_secs: u64,

    // === 显示设置 ===
    /// 文本棋盘宽度（字符）
    pub surface_width: usize,
    /// 文本棋盘高度（行）
    pub surface_height: usize,
    /// 显示坐标
    pub show_coordinates: bool,

    // === 高级设置 ===
    /// 日志过滤，未设置时读取 RUST_LOG
    pub log_filter: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            keepalive_secs: KEEPALIVE_INTERVAL_SECS,

            surface_width: 40,
            surface_height: 24,
            show_coordinates: true,

            log_filter: None,
        }
    }
}

impl ClientSettings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("chess-client");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("No config directory, using default settings");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// 从指定文件加载设置
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings: {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Invalid settings file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        std::fs::write(path, content).with_context(|| format!("写入设置文件失败: {:?}", path))?;

        tracing::info!("Settings saved: {:?}", path);
        Ok(())
    }

    /// 命令行第一个参数覆盖服务器地址
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        if let Some(url) = args.into_iter().next() {
            self.server_url = url;
        }
        self
    }

    /// 日志过滤指令
    pub fn log_directive(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// 心跳间隔；配置为 0 时使用协议默认值
    pub fn keepalive_interval(&self) -> Duration {
        match self.keepalive_secs {
            0 => KEEPALIVE_INTERVAL,
            secs => Duration::from_secs(secs),
        }
    }

    /// 首次运行时写出默认设置，方便手工修改
    pub fn save_default_if_missing() -> Result<()> {
        let path = Self::settings_path().context("无法获取配置目录")?;
        if path.exists() {
            return Ok(());
        }
        Self::default().save_to(&path)
    }
}
