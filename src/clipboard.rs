//! # 剪贴板捕获模块
//!
//! ## 设计思路
//!
//! 把系统剪贴板的当前内容快照为一组 `ClipboardItem`，供粘贴来源
//! （`AcquireSource::Paste`）消费。图片条目统一编码为 PNG，
//! 文本条目一并带上——"有内容但没有图片"与"完全为空"
//! 在用户提示上是同一种情况，由接收层统一报告。
//!
//! ## 实现思路
//!
//! - `arboard` 返回的是裸 RGBA 像素，先经 `image` 还原缓冲再编码 PNG。
//! - 剪贴板内容不可用（空剪贴板）不是错误，返回空列表。
//! - 剪贴板本身不可访问（平台服务异常）才映射为 `Clipboard` 错误。

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::uploader::{ClipboardItem, UploadError};

/// 读取系统剪贴板，快照为条目列表。
///
/// 没有任何可用内容时返回空列表，由 `acquire(Paste …)` 报告
/// "剪贴板中没有找到图片"。
pub fn capture_clipboard_items() -> Result<Vec<ClipboardItem>, UploadError> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| UploadError::Clipboard(format!("无法访问剪贴板：{}", e)))?;

    let mut items = Vec::new();

    match clipboard.get_image() {
        Ok(image_data) => {
            let bytes = encode_rgba_as_png(
                image_data.width,
                image_data.height,
                image_data.bytes.into_owned(),
            )?;
            log::debug!("📋 剪贴板图片捕获成功 - {} bytes", bytes.len());
            items.push(ClipboardItem {
                mime: "image/png".to_string(),
                bytes,
            });
        }
        Err(arboard::Error::ContentNotAvailable) => {}
        Err(e) => {
            log::warn!("⚠️ 读取剪贴板图片失败：{}", e);
        }
    }

    if let Ok(text) = clipboard.get_text() {
        if !text.is_empty() {
            items.push(ClipboardItem {
                mime: "text/plain".to_string(),
                bytes: Bytes::from(text.into_bytes()),
            });
        }
    }

    Ok(items)
}

/// 将裸 RGBA 像素编码为 PNG 字节。
fn encode_rgba_as_png(width: usize, height: usize, rgba: Vec<u8>) -> Result<Bytes, UploadError> {
    let image = RgbaImage::from_raw(width as u32, height as u32, rgba)
        .ok_or_else(|| UploadError::Clipboard("创建图像缓冲区失败".to_string()))?;

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| UploadError::Clipboard(format!("图片编码失败：{}", e)))?;

    Ok(Bytes::from(cursor.into_inner()))
}
