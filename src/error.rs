//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义对外统一的 `AppError` 枚举，适配层（IPC、事件回调）只需处理
//! 一种错误类型，前端通过 `Serialize` 获得结构化的错误信息。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `UploadError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，满足 IPC 传输要求。

use serde::Serialize;

use crate::uploader::UploadError;

/// 应用级统一错误类型
///
/// 所有对外入口均返回此类型，确保适配层收到一致的错误格式。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 上传链路错误（接收 / 校验 / 提交）
    #[error("{0}")]
    Upload(#[from] UploadError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

/// IPC 要求返回值实现 `Serialize`。
/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
