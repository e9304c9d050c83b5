//! # 上传器模块（uploader）
//!
//! ## 设计思路
//!
//! 该模块将"文件接收 → 校验 → 压缩预估 → 提交 → 结果展示"
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `session`：会话状态机与提交编排（对外主入口）
//! - `intake`：三种来源的归一化 + 自动压缩策略
//! - `validator`：类型/体积准入校验
//! - `estimator`：质量→压缩比查表预估
//! - `transport`：multipart 上传与响应解析（可替换抽象）
//! - `presenter`：成功/失败文案渲染
//! - `config/error/source`：配置、错误、数据模型
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 适配层（拖拽 / 文件选择 / 粘贴事件）
//!    ↓
//! session.rs（状态机 + 单飞行提交编排）
//!    ├─ intake.rs（来源归一化 + 自动压缩策略）
//!    │    └─ validator.rs（类型/体积校验）
//!    ├─ estimator.rs（压缩体积预估，仅展示用）
//!    ├─ transport.rs（multipart 上传 + 错误消息提取）
//!    └─ presenter.rs（结果文案渲染）
//! ```
//!
//! ## 分层职责建议
//!
//! - 准入规则变更优先改 `validator.rs` 与 `config.rs`
//! - 预估表调整只改 `estimator.rs`
//! - 状态机行为变更优先改 `session.rs`
//! - 服务端契约变更优先改 `transport.rs` 与 `source.rs` 的回执模型

mod config;
mod error;
pub mod estimator;
mod intake;
pub mod presenter;
mod session;
mod source;
mod transport;
pub mod validator;

pub use config::UploadConfig;
pub use error::UploadError;
pub use intake::{Acquired, IntakeController};
pub use session::{SessionState, UploadSession};
pub use source::{
    AcquireSource, CandidateFile, ClipboardItem, CompressionPolicy, RawFile, UploadOutcome,
    UploadReceipt,
};
pub use transport::{HttpTransport, SubmissionPayload, UploadTransport};
