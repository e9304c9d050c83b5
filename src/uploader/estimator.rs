//! # 压缩体积预估模块
//!
//! ## 设计思路
//!
//! 上传前给用户一个"压缩后大概多大"的即时反馈。
//! 采用离散的质量→压缩比查表（从高档位向低档位匹配，命中即止），
//! 不做任何真实编码，开销为零。
//!
//! 注意：这只是估算值，不代表服务端实际压缩算法的输出，
//! 真实体积以上传回执中的 `final_size_mb` 为准。

/// 质量阈值 → 压缩比，从高到低首个满足 `quality >= 阈值` 的条目生效。
const RATIO_TABLE: [(u8, f64); 5] = [
    (90, 0.80),
    (80, 0.60),
    (70, 0.40),
    (60, 0.30),
    (50, 0.25),
];

/// 低于所有阈值时的兜底压缩比。
const FLOOR_RATIO: f64 = 0.20;

/// 查表得到指定质量档位的压缩比。
pub fn compression_ratio(quality: u8) -> f64 {
    for (threshold, ratio) in RATIO_TABLE {
        if quality >= threshold {
            return ratio;
        }
    }
    FLOOR_RATIO
}

/// 预估压缩后体积（MB），保留两位小数。
///
/// 仅作展示参考，不是服务端压缩结果的承诺。
pub fn estimate(original_size_mb: f64, quality: u8) -> f64 {
    round_mb(original_size_mb * compression_ratio(quality))
}

/// 按展示惯例将 MB 数值四舍五入到两位小数。
pub(crate) fn round_mb(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
