//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载上传链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 错误文案沿用产品界面用语：校验失败、剪贴板无图片、网络错误等
//! 对用户都是终态提示，不做自动重试。

/// 上传链路统一错误类型。
///
/// 该类型会在对外层被上转为 `AppError`，最终透传给适配层。
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// 文件类型不在允许集合内（校验阶段，提交被中止）。
    #[error("不支持的文件类型：{0}。请选择 JPEG、PNG、GIF 或 WebP 格式的图片。")]
    UnsupportedType(String),

    /// 文件超过体积上限（校验阶段，提交被中止）。
    #[error("文件太大：{size_mb:.2} MB（最大支持 {limit_mb:.0} MB）")]
    TooLarge { size_mb: f64, limit_mb: f64 },

    /// 拖拽/选择来源中没有任何文件。
    #[error("没有选择文件")]
    NoFileSelected,

    /// 粘贴来源中不存在图片条目（与校验拒绝是两种不同的用户提示）。
    #[error("剪贴板中没有找到图片。请复制图片后再试。")]
    ClipboardNoImage,

    /// 压缩质量超出 0~100。
    #[error("无效的压缩质量：{0}（必须在 0~100 之间）")]
    InvalidQuality(u8),

    #[error("配置无效：{0}")]
    InvalidConfig(String),

    /// 会话状态不满足当前操作的前置条件。
    #[error("会话状态错误：{0}")]
    InvalidState(String),

    #[error("剪贴板错误：{0}")]
    Clipboard(String),

    /// 传输层失败（连接、超时等）。
    #[error("网络错误：{0}")]
    Network(String),

    /// 服务端返回的失败消息，原样透出。
    #[error("{0}")]
    Remote(String),
}

impl UploadError {
    /// 稳定错误码，供适配层做分支展示或埋点。
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedType(_) => "E_UNSUPPORTED_TYPE",
            Self::TooLarge { .. } => "E_TOO_LARGE",
            Self::NoFileSelected => "E_NO_FILE",
            Self::ClipboardNoImage => "E_CLIPBOARD_EMPTY",
            Self::InvalidQuality(_) => "E_INVALID_QUALITY",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::InvalidState(_) => "E_INVALID_STATE",
            Self::Clipboard(_) => "E_CLIPBOARD",
            Self::Network(_) => "E_NETWORK",
            Self::Remote(_) => "E_REMOTE",
        }
    }

    /// 错误发生的链路阶段，便于日志定位。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::UnsupportedType(_) | Self::TooLarge { .. } => "validate",
            Self::NoFileSelected | Self::ClipboardNoImage | Self::Clipboard(_) => "acquire",
            Self::InvalidQuality(_) => "policy",
            Self::InvalidConfig(_) => "config",
            Self::InvalidState(_) => "session",
            Self::Network(_) | Self::Remote(_) => "submit",
        }
    }
}

impl From<UploadError> for String {
    /// 兼容部分仍使用字符串错误的调用点。
    fn from(error: UploadError) -> Self {
        error.to_string()
    }
}
