//! # 数据源与会话数据模型
//!
//! ## 设计思路
//!
//! 将"外部输入类型"和"会话内状态"解耦：
//! - `AcquireSource` 表示三种外部来源语义（拖拽 / 文件选择 / 粘贴）
//! - `RawFile` / `ClipboardItem` 表示适配层交来的原始数据
//! - `CandidateFile` 表示归一化后的待上传文件（全局同一时刻至多一个）
//! - `CompressionPolicy` / `UploadOutcome` 表示压缩策略与单次提交的终态结果
//!
//! ## 实现思路
//!
//! 文件内容统一使用 `bytes::Bytes`，克隆为引用计数操作，
//! 提交时对候选文件做快照不会复制整块图片数据。

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::UploadError;

/// 适配层交来的一个原始文件（拖拽或文件选择）。
#[derive(Debug, Clone)]
pub struct RawFile {
    /// 展示名（通常来自文件系统）。
    pub name: String,
    /// 声明的 MIME 类型，可能为空，由接收层负责嗅探补全。
    pub mime: String,
    /// 文件原始字节。
    pub bytes: Bytes,
}

/// 粘贴事件中的一个剪贴板条目。
#[derive(Debug, Clone)]
pub struct ClipboardItem {
    /// 条目 MIME 类型（如 `image/png`、`text/plain`）。
    pub mime: String,
    /// 条目原始字节。
    pub bytes: Bytes,
}

/// 文件获取来源。
///
/// 三种来源最终都归一化为同一个 `CandidateFile`。
#[derive(Debug, Clone)]
pub enum AcquireSource {
    /// 拖拽释放（多文件时只取第一个）。
    Drop(Vec<RawFile>),
    /// 文件选择器（多文件时只取第一个）。
    Picker(Vec<RawFile>),
    /// 粘贴事件携带的剪贴板条目列表。
    Paste(Vec<ClipboardItem>),
}

impl AcquireSource {
    /// 来源提示（用于日志与诊断）。
    pub(crate) fn hint(&self) -> &'static str {
        match self {
            Self::Drop(_) => "drop",
            Self::Picker(_) => "picker",
            Self::Paste(_) => "paste",
        }
    }
}

/// 当前暂存的待上传文件。
///
/// 每次成功获取都会整体替换旧值，重置时被丢弃。
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub mime: String,
    /// 字节大小，与 `bytes.len()` 一致，单独保存便于快速展示。
    pub size: u64,
    pub bytes: Bytes,
}

impl CandidateFile {
    /// 文件大小（MB，未四舍五入）。
    ///
    /// 自动压缩策略的阈值比较必须用未取整的值。
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// 压缩策略：是否启用 + 质量档位。
///
/// 质量恒定落在 0~100 区间内，字段私有以保住该不变量。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionPolicy {
    pub enabled: bool,
    quality: u8,
}

impl CompressionPolicy {
    /// 默认质量档位（与服务端缺省一致）。
    pub const DEFAULT_QUALITY: u8 = 80;

    pub fn new(enabled: bool, quality: u8) -> Result<Self, UploadError> {
        if quality > 100 {
            return Err(UploadError::InvalidQuality(quality));
        }
        Ok(Self { enabled, quality })
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub(crate) fn set_quality(&mut self, quality: u8) -> Result<(), UploadError> {
        if quality > 100 {
            return Err(UploadError::InvalidQuality(quality));
        }
        self.quality = quality;
        Ok(())
    }
}

impl Default for CompressionPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            quality: Self::DEFAULT_QUALITY,
        }
    }
}

/// 服务端上传成功的回执。
///
/// 字段与服务端 JSON 一一对应，未知字段忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub original_size_mb: f64,
    pub final_size_mb: f64,
    pub md5_hash: String,
    pub storage_path: String,
    pub image_url: String,
    /// 服务端是否实际执行了压缩。
    #[serde(default)]
    pub compressed: bool,
    /// 实际使用的压缩质量（未压缩时为空）。
    #[serde(default)]
    pub compression_quality: Option<u8>,
}

/// 单次提交的终态结果。
///
/// 一次提交产生一份，收到后不可变；被下一次提交覆盖或在重置时清空。
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Success(UploadReceipt),
    Failure { message: String },
}
