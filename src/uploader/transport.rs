//! # 传输模块
//!
//! ## 设计思路
//!
//! 会话只依赖 `UploadTransport` 抽象，真实实现 `HttpTransport` 负责与
//! 服务端的 multipart 上传与 JSON 响应解析。抽象出来的目的：
//! 1. 状态机行为（单飞行、迟到结果）可以用可控的假传输做测试
//! 2. 网络细节（超时、错误映射）集中在一处
//!
//! ## 实现思路
//!
//! - multipart 字段固定为 `file` / `compress` / `quality`，与服务端约定一致。
//! - 任何非 2xx 状态都按失败处理，即使带了响应体；
//!   失败消息优先取服务端 `error` 字段，否则回退通用文案。
//! - 传输层自身错误统一映射为 `Network`，带上可诊断的细节。
//! - 不重试、不设取消：一次提交要么等到结果要么等到失败。

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

use super::source::UploadReceipt;
use super::{UploadConfig, UploadError};

/// 一次提交的完整载荷：候选文件快照 + 压缩参数。
#[derive(Debug, Clone)]
pub struct SubmissionPayload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
    pub compress: bool,
    pub quality: u8,
}

/// 上传传输抽象。
///
/// 测试中可注入记录调用次数、模拟延迟与失败的假实现。
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// 提交一次上传，返回服务端回执。
    async fn submit(&self, payload: SubmissionPayload) -> Result<UploadReceipt, UploadError>;

    /// 请求删除一个已上传的文件，返回服务端消息。
    async fn delete(&self, storage_path: &str) -> Result<String, UploadError>;
}

/// 服务端失败响应体。
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// 服务端删除成功响应体。
#[derive(Debug, Deserialize)]
struct DeleteBody {
    message: Option<String>,
}

/// 基于 reqwest 的真实传输实现。
pub struct HttpTransport {
    config: UploadConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    /// 构建复用型 HTTP 客户端，减少每次请求的初始化开销。
    ///
    /// 超时未配置时不设置，沿用 reqwest 自身缺省（不限时）：
    /// 一次提交要么等到结果要么等到失败。
    pub fn new(config: UploadConfig) -> Result<Self, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout {
            builder = builder.connect_timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| UploadError::Network(format!("无法创建 HTTP 客户端：{}", e)))?;

        Ok(Self { config, client })
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> UploadError {
        if e.is_timeout() {
            match self.config.request_timeout {
                Some(secs) => UploadError::Network(format!("请求超时（{}秒）", secs)),
                None => UploadError::Network(format!("请求超时：{}", e)),
            }
        } else if e.is_connect() {
            UploadError::Network(format!("无法连接：{}", e))
        } else {
            UploadError::Network(format!("请求失败：{}", e))
        }
    }

    /// 从失败响应体里提取服务端消息，取不到时回退通用文案。
    fn extract_error_message(body: &[u8], fallback: &str) -> String {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn submit(&self, payload: SubmissionPayload) -> Result<UploadReceipt, UploadError> {
        let url = self.config.upload_url();
        log::info!(
            "🌐 开始上传 - 端点: {} 文件: {} 压缩: {} 质量: {}",
            url,
            payload.file_name,
            payload.compress,
            payload.quality
        );

        let part = reqwest::multipart::Part::stream(payload.bytes)
            .file_name(payload.file_name)
            .mime_str(&payload.mime)
            .map_err(|e| UploadError::InvalidConfig(format!("无效的 MIME 类型：{}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("compress", if payload.compress { "true" } else { "false" })
            .text("quality", payload.quality.to_string());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::Network(format!("读取响应失败：{}", e)))?;

        if !status.is_success() {
            let message = Self::extract_error_message(&body, "上传失败");
            log::warn!("❌ 服务端拒绝上传 - HTTP {}: {}", status.as_u16(), message);
            return Err(UploadError::Remote(message));
        }

        let receipt: UploadReceipt = serde_json::from_slice(&body)
            .map_err(|e| UploadError::Remote(format!("解析服务器响应失败：{}", e)))?;

        log::info!(
            "✅ 上传完成 - {:.2} MB → {:.2} MB 路径: {}",
            receipt.original_size_mb,
            receipt.final_size_mb,
            receipt.storage_path
        );

        Ok(receipt)
    }

    async fn delete(&self, storage_path: &str) -> Result<String, UploadError> {
        let url = self.config.delete_url();
        log::info!("🗑️ 请求删除远端文件 - 路径: {}", storage_path);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "storage_path": storage_path }))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::Network(format!("读取响应失败：{}", e)))?;

        if !status.is_success() {
            let message = Self::extract_error_message(&body, "删除文件失败，请稍后重试");
            return Err(UploadError::Remote(message));
        }

        let parsed: DeleteBody = serde_json::from_slice(&body)
            .map_err(|e| UploadError::Remote(format!("解析服务器响应失败：{}", e)))?;

        Ok(parsed.message.unwrap_or_else(|| "文件删除成功".to_string()))
    }
}
