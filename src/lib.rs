//! # 图片上传器客户端核心 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              适配层（拖拽 / 选择 / 粘贴 / 按钮）           │
//! │      将平台输入事件翻译为会话方法调用（不在本库内）         │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<T, AppError>
//! ┌───────┴──────────────────────────────────────────────────┐
//! │                    本库 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ clipboard ── 系统剪贴板快照（粘贴来源的数据入口）      │
//! │  │                                                       │
//! │  └─ uploader ── 接收·校验·预估·提交·展示                  │
//! │      ├─ session     状态机 + 单飞行提交编排               │
//! │      ├─ intake      来源归一化 + 自动压缩策略             │
//! │      ├─ validator   类型/体积准入校验                    │
//! │      ├─ estimator   压缩体积预估（仅展示）                │
//! │      ├─ transport   multipart 上传 + 响应解析            │
//! │      └─ presenter   结果文案渲染                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，所有对外入口的返回类型 |
//! | [`clipboard`] | 系统剪贴板快照，产出粘贴来源的条目列表 |
//! | [`uploader`] | 文件接收、校验、压缩预估、上传会话与结果展示 |
//!
//! 压缩本身在服务端执行，本库只负责接收、预估与提交。

pub mod clipboard;
pub mod error;
pub mod uploader;
