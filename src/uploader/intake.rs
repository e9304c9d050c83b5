//! # 文件接收模块
//!
//! ## 设计思路
//!
//! 统一处理三种来源（拖拽 / 文件选择 / 粘贴）的原始输入，并在"尽可能早"
//! 的阶段执行校验，目标是尽快失败，不让非法文件进入会话状态。
//!
//! ## 实现思路
//!
//! - 拖拽/选择：单文件系统，多文件时静默只取第一个。
//! - 粘贴：扫描剪贴板条目，取第一个 `image/` 前缀的条目；
//!   没有图片条目是独立的用户提示，不是校验拒绝。
//! - 粘贴文件没有名字，用 UTC 时间戳合成一个展示名。
//! - 声明类型缺失时用 `infer` 按魔数嗅探补全。
//! - 校验通过后按体积阈值计算自动压缩策略（严格大于 2MB 才触发）。

use chrono::{SecondsFormat, Utc};

use super::source::{AcquireSource, CandidateFile, ClipboardItem, CompressionPolicy, RawFile};
use super::{validator, UploadConfig, UploadError};

/// 一次成功接收的产物：候选文件 + 可能的自动压缩策略。
#[derive(Debug, Clone)]
pub struct Acquired {
    pub candidate: CandidateFile,
    /// `Some` 表示应覆盖当前策略；`None` 表示保持用户当前选择。
    pub auto_policy: Option<CompressionPolicy>,
}

/// 文件接收控制器。
///
/// 无共享可变状态，所有判定都基于入参与配置，便于单测。
pub struct IntakeController {
    config: UploadConfig,
}

impl IntakeController {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// 接收一个来源的输入，归一化为候选文件并完成校验。
    ///
    /// 校验失败时不产生任何候选文件，调用方状态保持不变。
    pub fn acquire(&self, source: AcquireSource) -> Result<Acquired, UploadError> {
        let hint = source.hint();
        let raw = match source {
            AcquireSource::Drop(files) | AcquireSource::Picker(files) => {
                Self::take_first_file(files)?
            }
            AcquireSource::Paste(items) => Self::take_pasted_image(items)?,
        };

        let mime = Self::resolve_mime(&raw);
        let size = raw.bytes.len() as u64;

        validator::validate(&mime, size, &self.config)?;

        let candidate = CandidateFile {
            name: raw.name,
            mime,
            size,
            bytes: raw.bytes,
        };

        let auto_policy = self.auto_policy_for(&candidate)?;

        log::info!(
            "📥 已接收文件 - 来源: {} 名称: {} 大小: {:.2} MB 类型: {} 自动压缩: {}",
            hint,
            candidate.name,
            candidate.size_mb(),
            candidate.mime,
            auto_policy.is_some()
        );

        Ok(Acquired { candidate, auto_policy })
    }

    /// 拖拽/文件选择：只取第一个文件，其余静默忽略。
    fn take_first_file(files: Vec<RawFile>) -> Result<RawFile, UploadError> {
        if files.len() > 1 {
            log::debug!("📂 收到 {} 个文件，单文件系统只取第一个", files.len());
        }
        files.into_iter().next().ok_or(UploadError::NoFileSelected)
    }

    /// 粘贴：取第一个图片条目并合成展示名。
    fn take_pasted_image(items: Vec<ClipboardItem>) -> Result<RawFile, UploadError> {
        let item = items
            .into_iter()
            .find(|item| item.mime.trim().to_ascii_lowercase().starts_with("image/"))
            .ok_or(UploadError::ClipboardNoImage)?;

        let name = Self::synthesize_paste_name(&item.mime);

        Ok(RawFile {
            name,
            mime: item.mime,
            bytes: item.bytes,
        })
    }

    /// 为粘贴的图片合成展示名：`screenshot-<时间戳>.<扩展名>`。
    ///
    /// 时间戳取 UTC ISO 格式并把 `:`、`.` 替换为 `-`，保证可作为文件名；
    /// 扩展名取 MIME 子类型，缺失时回退 `png`。
    fn synthesize_paste_name(mime: &str) -> String {
        let timestamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");

        let extension = match mime.split('/').nth(1) {
            Some(subtype) if !subtype.is_empty() => subtype,
            _ => "png",
        };

        format!("screenshot-{}.{}", timestamp, extension)
    }

    /// 声明类型缺失或过于泛化时，按字节魔数嗅探补全。
    fn resolve_mime(raw: &RawFile) -> String {
        let declared = raw.mime.trim();
        if !declared.is_empty() && declared != "application/octet-stream" {
            return declared.to_string();
        }

        match infer::get(&raw.bytes) {
            Some(kind) => {
                log::debug!("🔍 声明类型缺失，按魔数识别为 {}", kind.mime_type());
                kind.mime_type().to_string()
            }
            None => declared.to_string(),
        }
    }

    /// 体积超过阈值（严格大于）时返回自动压缩策略，否则不干预用户选择。
    fn auto_policy_for(
        &self,
        candidate: &CandidateFile,
    ) -> Result<Option<CompressionPolicy>, UploadError> {
        if candidate.size_mb() > self.config.auto_compress_threshold_mb {
            let policy = CompressionPolicy::new(true, self.config.auto_compress_quality)?;
            Ok(Some(policy))
        } else {
            Ok(None)
        }
    }
}
