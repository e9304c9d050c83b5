//! # 校验模块
//!
//! ## 设计思路
//!
//! 纯决策函数：按声明的 MIME 类型与字节大小做准入判断，无任何副作用。
//! 校验失败只向用户报告，不做自动重试，由用户换一个文件再来。
//!
//! 规则按顺序执行：先类型、后体积，与服务端准入策略保持一致。

use once_cell::sync::Lazy;

use super::{UploadConfig, UploadError};

/// 允许的图片 MIME 类型集合。
///
/// `image/jpg` 并非标准类型，但浏览器与部分工具会声明它，一并接受为 JPEG。
static ALLOWED_MIME_TYPES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "image/jpeg",
        "image/jpg",
        "image/png",
        "image/gif",
        "image/webp",
    ]
});

/// 判断 MIME 类型是否在允许集合内（大小写不敏感）。
pub fn is_allowed_mime(mime: &str) -> bool {
    let normalized = mime.trim().to_ascii_lowercase();
    ALLOWED_MIME_TYPES.contains(&normalized.as_str())
}

/// 校验候选文件的类型与体积。
///
/// 规则按顺序应用：
/// 1. MIME 类型必须是 JPEG / PNG / GIF / WebP 之一
/// 2. 字节大小不得超过 `config.max_file_size`（等于上限时接受）
pub fn validate(mime: &str, size: u64, config: &UploadConfig) -> Result<(), UploadError> {
    if !is_allowed_mime(mime) {
        log::debug!("🚫 校验拒绝 - 不支持的类型: {}", mime);
        return Err(UploadError::UnsupportedType(mime.to_string()));
    }

    if size > config.max_file_size {
        log::debug!(
            "🚫 校验拒绝 - 文件过大: {} bytes（限制: {} bytes）",
            size,
            config.max_file_size
        );
        return Err(UploadError::TooLarge {
            size_mb: size as f64 / (1024.0 * 1024.0),
            limit_mb: config.max_file_size as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAX: u64 = 16 * 1024 * 1024;

    #[test]
    fn accepts_all_allowed_types() {
        let config = UploadConfig::default();
        for mime in ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"] {
            validate(mime, 1024, &config).expect("allowed type should pass");
        }
    }

    #[test]
    fn mime_match_is_case_insensitive() {
        let config = UploadConfig::default();
        validate("IMAGE/PNG", 1024, &config).expect("uppercase mime should pass");
        validate(" image/jpeg ", 1024, &config).expect("padded mime should pass");
    }

    #[test]
    fn rejects_types_outside_allow_set() {
        let config = UploadConfig::default();
        for mime in ["image/svg+xml", "image/bmp", "text/html", "application/pdf", ""] {
            let result = validate(mime, 1024, &config);
            assert!(
                matches!(result, Err(UploadError::UnsupportedType(_))),
                "{mime} should be rejected"
            );
        }
    }

    #[test]
    fn size_boundary_is_inclusive() {
        let config = UploadConfig::default();
        validate("image/png", MAX, &config).expect("exactly 16MB should be accepted");

        let result = validate("image/png", MAX + 1, &config);
        assert!(matches!(result, Err(UploadError::TooLarge { .. })));
    }

    #[test]
    fn type_rule_runs_before_size_rule() {
        let config = UploadConfig::default();
        // 类型和体积同时违规时，先报类型错误
        let result = validate("application/zip", MAX * 2, &config);
        assert!(matches!(result, Err(UploadError::UnsupportedType(_))));
    }

    proptest! {
        #[test]
        fn never_accepts_oversized_files(extra in 1u64..(64 * 1024 * 1024)) {
            let config = UploadConfig::default();
            let result = validate("image/png", MAX + extra, &config);
            let is_too_large = matches!(result, Err(UploadError::TooLarge { .. }));
            prop_assert!(is_too_large);
        }

        #[test]
        fn rejects_arbitrary_non_image_mimes(mime in "[a-z]{3,12}/[a-z0-9.+-]{1,16}") {
            prop_assume!(!is_allowed_mime(&mime));
            let config = UploadConfig::default();
            let result = validate(&mime, 1024, &config);
            prop_assert!(matches!(result, Err(UploadError::UnsupportedType(_))));
        }
    }
}
