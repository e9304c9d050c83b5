//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有"可调策略"集中到 `UploadConfig`，保证运行时行为可观测、可调整、可测试。
//! 校验规则（类型集合、体积上限）、自动压缩策略常量与网络参数都在这里。
//!
//! ## 实现思路
//!
//! - `Default` 提供与服务端缺省一致的配置（16MB 上限、2MB 自动压缩阈值）。
//! - `validate` 在会话创建时做一次范围检查，尽早失败。
//! - `upload_url` / `delete_url` 统一拼接端点，避免各处手写路径。

use super::UploadError;

/// 上传器配置。
///
/// 字段覆盖校验、自动压缩策略与网络传输三个阶段。
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// 服务端基础地址（不带尾部斜杠也可）。
    pub base_url: String,
    /// 允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 超过该大小（MB）时自动启用压缩，严格大于比较。
    pub auto_compress_threshold_mb: f64,
    /// 自动压缩时使用的质量档位。
    pub auto_compress_quality: u8,
    /// 上传请求超时时间（秒）。`None` 表示不设置，沿用传输层自身的缺省
    /// （reqwest 缺省不限时，与浏览器 `fetch` 的等待语义一致）。
    pub request_timeout: Option<u64>,
    /// 建立连接（TCP/TLS）超时时间（秒），`None` 表示不设置。
    pub connect_timeout: Option<u64>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5005".to_string(),
            max_file_size: 16 * 1024 * 1024,
            auto_compress_threshold_mb: 2.0,
            auto_compress_quality: 80,
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

impl UploadConfig {
    /// 校验配置范围，供会话创建时调用。
    pub fn validate(&self) -> Result<(), UploadError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(UploadError::InvalidConfig(
                "base_url 仅支持 HTTP/HTTPS".to_string(),
            ));
        }
        if self.max_file_size == 0 {
            return Err(UploadError::InvalidConfig(
                "max_file_size 不能为 0".to_string(),
            ));
        }
        if self.auto_compress_threshold_mb <= 0.0 {
            return Err(UploadError::InvalidConfig(
                "auto_compress_threshold_mb 必须大于 0".to_string(),
            ));
        }
        if self.auto_compress_quality > 100 {
            return Err(UploadError::InvalidQuality(self.auto_compress_quality));
        }
        if let Some(timeout) = self.request_timeout {
            if !(1..=300).contains(&timeout) {
                return Err(UploadError::InvalidConfig(
                    "request_timeout 必须在 1~300 秒之间".to_string(),
                ));
            }
        }
        if let Some(timeout) = self.connect_timeout {
            if !(1..=120).contains(&timeout) {
                return Err(UploadError::InvalidConfig(
                    "connect_timeout 必须在 1~120 秒之间".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// 上传端点完整地址。
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url.trim_end_matches('/'))
    }

    /// 删除端点完整地址。
    pub fn delete_url(&self) -> String {
        format!("{}/delete", self.base_url.trim_end_matches('/'))
    }
}
