//! # 结果展示模块
//!
//! ## 设计思路
//!
//! 纯字符串格式化：把一次提交的终态结果渲染为给用户看的文本块，
//! 不包含任何业务判断。图片链接只展示、不写剪贴板，由用户手动复制。

use super::source::{UploadOutcome, UploadReceipt};

/// 渲染一次提交的终态结果。
pub fn render(outcome: &UploadOutcome) -> String {
    match outcome {
        UploadOutcome::Success(receipt) => render_success(receipt),
        UploadOutcome::Failure { message } => render_error(message),
    }
}

/// 渲染成功回执。
///
/// 体积按两位小数展示；哈希、路径与链接原样输出。
pub fn render_success(receipt: &UploadReceipt) -> String {
    let mut block = String::new();
    block.push_str("上传成功！\n");
    block.push_str("文件信息:\n");
    block.push_str(&format!("  原始大小: {:.2} MB\n", receipt.original_size_mb));
    block.push_str(&format!("  最终大小: {:.2} MB\n", receipt.final_size_mb));
    block.push_str(&format!("  MD5哈希: {}\n", receipt.md5_hash));
    block.push_str(&format!("  存储路径: {}\n", receipt.storage_path));
    block.push_str("图片URL:\n");
    block.push_str(&receipt.image_url);
    block.push_str("\n💡 请手动选择并复制上面的链接\n");
    block
}

/// 渲染错误提示。
pub fn render_error(message: &str) -> String {
    format!("错误\n{}\n", message)
}
