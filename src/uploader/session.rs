//! # 上传会话模块（状态机编排）
//!
//! ## 设计思路
//!
//! `UploadSession` 持有会话内全部可变状态（候选文件、压缩策略、提交结果），
//! 并实现 `Idle → Ready → Submitting → Completed | Failed` 状态机。
//! 方法全部接收 `&self`，内部用 `Mutex` + `AtomicBool` 保护，
//! 适配层可以把会话放进 `Arc` 在事件回调间共享。
//!
//! ## 实现思路
//!
//! - 提交采用"快照-等待-回写"三段式：加锁做快照并置 Submitting，
//!   释放锁后等待传输层，返回后再加锁回写结果。锁从不跨 `.await` 持有。
//! - 单飞行约束用 `AtomicBool` CAS 实现，重复提交是静默 no-op
//!   （对应界面上"提交按钮置灰"的行为）。
//! - 已知竞态：提交在途时发生新的文件获取，只替换候选文件，
//!   迟到的提交结果返回后仍会回写会话（沿用原始行为，刻意不做请求围栏）。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::intake::IntakeController;
use super::source::{AcquireSource, CandidateFile, CompressionPolicy, UploadOutcome};
use super::transport::{HttpTransport, SubmissionPayload, UploadTransport};
use super::{estimator, UploadConfig, UploadError};

/// 会话状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 无候选文件。
    Idle,
    /// 候选文件已通过校验，可提交。
    Ready,
    /// 提交在途，至多一个。
    Submitting,
    /// 最近一次提交成功。
    Completed,
    /// 最近一次提交失败。
    Failed,
}

/// 锁内的会话状态。
#[derive(Debug)]
struct SessionInner {
    state: SessionState,
    candidate: Option<CandidateFile>,
    policy: CompressionPolicy,
    outcome: Option<UploadOutcome>,
}

impl SessionInner {
    fn new() -> Self {
        Self {
            state: SessionState::Idle,
            candidate: None,
            policy: CompressionPolicy::default(),
            outcome: None,
        }
    }
}

/// 上传会话。
///
/// 每个页面/会话上下文构造一次，不需要全局单例。
pub struct UploadSession<T: UploadTransport = HttpTransport> {
    intake: IntakeController,
    transport: T,
    inner: Mutex<SessionInner>,
    in_flight: AtomicBool,
}

impl UploadSession<HttpTransport> {
    /// 使用默认配置创建会话。
    pub fn new() -> Result<Self, UploadError> {
        Self::with_config(UploadConfig::default())
    }

    /// 使用自定义配置创建会话。
    pub fn with_config(config: UploadConfig) -> Result<Self, UploadError> {
        config.validate()?;
        let transport = HttpTransport::new(config.clone())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: UploadTransport> UploadSession<T> {
    /// 使用自定义传输创建会话，主要用于测试注入。
    pub fn with_transport(config: UploadConfig, transport: T) -> Self {
        Self {
            intake: IntakeController::new(config),
            transport,
            inner: Mutex::new(SessionInner::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, UploadError> {
        self.inner
            .lock()
            .map_err(|_| UploadError::InvalidState("会话状态锁已中毒".to_string()))
    }

    /// 当前会话状态。
    pub fn state(&self) -> Result<SessionState, UploadError> {
        Ok(self.lock()?.state)
    }

    /// 当前候选文件快照（字节为引用计数克隆）。
    pub fn candidate(&self) -> Result<Option<CandidateFile>, UploadError> {
        Ok(self.lock()?.candidate.clone())
    }

    /// 当前压缩策略。
    pub fn policy(&self) -> Result<CompressionPolicy, UploadError> {
        Ok(self.lock()?.policy)
    }

    /// 最近一次提交的结果。
    pub fn outcome(&self) -> Result<Option<UploadOutcome>, UploadError> {
        Ok(self.lock()?.outcome.clone())
    }

    /// 从某个来源接收新文件。
    ///
    /// 成功时整体替换旧候选文件并清空上一次的提交结果；
    /// 失败时会话状态保持不变，只向调用方返回错误。
    /// 提交在途期间的获取不打断在途提交（见模块文档的已知竞态）。
    pub fn acquire(&self, source: AcquireSource) -> Result<CandidateFile, UploadError> {
        let acquired = self.intake.acquire(source)?;

        let mut inner = self.lock()?;
        inner.candidate = Some(acquired.candidate.clone());
        inner.outcome = None;
        if let Some(policy) = acquired.auto_policy {
            inner.policy = policy;
        }
        if inner.state != SessionState::Submitting {
            inner.state = SessionState::Ready;
        }

        Ok(acquired.candidate)
    }

    /// 设置压缩质量（0~100，越界拒绝而不是钳制）。
    pub fn set_quality(&self, quality: u8) -> Result<(), UploadError> {
        let mut inner = self.lock()?;
        inner.policy.set_quality(quality)
    }

    /// 启用/停用压缩。
    pub fn set_compression_enabled(&self, enabled: bool) -> Result<(), UploadError> {
        let mut inner = self.lock()?;
        inner.policy.enabled = enabled;
        Ok(())
    }

    /// 压缩体积预估（MB，两位小数）。
    ///
    /// 仅在"压缩启用且存在候选文件"时给出；估算值仅供展示。
    pub fn estimate(&self) -> Result<Option<f64>, UploadError> {
        let inner = self.lock()?;
        if !inner.policy.enabled {
            return Ok(None);
        }
        Ok(inner
            .candidate
            .as_ref()
            .map(|candidate| estimator::estimate(candidate.size_mb(), inner.policy.quality())))
    }

    /// 提交当前候选文件。
    ///
    /// - 没有通过校验的候选文件时返回 `InvalidState`。
    /// - 已有提交在途时为静默 no-op，返回 `Ok(None)`。
    /// - 传输/服务端失败不是方法错误：会话进入 Failed 并把
    ///   `UploadOutcome::Failure` 作为结果返回，供展示层渲染。
    pub async fn submit(&self) -> Result<Option<UploadOutcome>, UploadError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("⏳ 已有提交在途，忽略重复提交");
            return Ok(None);
        }

        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(err) => {
                self.in_flight.store(false, Ordering::SeqCst);
                return Err(err);
            }
        };

        let result = self.transport.submit(payload).await;
        let outcome = self.finish_submit(result)?;

        Ok(Some(outcome))
    }

    /// 快照阶段：校验前置条件、构建载荷、置 Submitting。
    fn begin_submit(&self) -> Result<SubmissionPayload, UploadError> {
        let mut inner = self.lock()?;

        let candidate = inner
            .candidate
            .as_ref()
            .ok_or_else(|| UploadError::InvalidState("当前没有可上传的文件".to_string()))?;

        let payload = SubmissionPayload {
            file_name: candidate.name.clone(),
            mime: candidate.mime.clone(),
            bytes: candidate.bytes.clone(),
            compress: inner.policy.enabled,
            quality: inner.policy.quality(),
        };

        inner.state = SessionState::Submitting;
        Ok(payload)
    }

    /// 回写阶段：把传输结果落到会话状态。
    ///
    /// 在途期间候选文件即使已被替换，结果仍然回写（已知竞态，沿用原始行为）。
    fn finish_submit(
        &self,
        result: Result<super::source::UploadReceipt, UploadError>,
    ) -> Result<UploadOutcome, UploadError> {
        let locked = self.lock();
        self.in_flight.store(false, Ordering::SeqCst);
        let mut inner = locked?;

        let outcome = match result {
            Ok(receipt) => {
                inner.state = SessionState::Completed;
                UploadOutcome::Success(receipt)
            }
            Err(err) => {
                log::warn!("❌ 提交失败 - 阶段: {} 错误: {}", err.stage(), err);
                inner.state = SessionState::Failed;
                UploadOutcome::Failure {
                    message: err.to_string(),
                }
            }
        };

        inner.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// 重置会话：清空候选文件、压缩策略与提交结果，回到 Idle。
    ///
    /// 任何状态下都可调用；不取消在途提交（本系统不支持取消），
    /// 迟到的结果返回后仍会按已知竞态回写。
    pub fn reset(&self) -> Result<(), UploadError> {
        let mut inner = self.lock()?;
        inner.candidate = None;
        inner.policy = CompressionPolicy::default();
        inner.outcome = None;
        inner.state = SessionState::Idle;

        log::info!("🔄 会话已重置");
        Ok(())
    }

    /// 请求删除一个已上传的远端文件，返回服务端消息。
    ///
    /// 不影响本地会话状态。
    pub async fn delete_remote(&self, storage_path: &str) -> Result<String, UploadError> {
        self.transport.delete(storage_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploader::source::RawFile;
    use bytes::Bytes;

    fn session() -> UploadSession<HttpTransport> {
        UploadSession::new().expect("session init failed")
    }

    fn png_source(size: usize) -> AcquireSource {
        AcquireSource::Picker(vec![RawFile {
            name: "photo.png".to_string(),
            mime: "image/png".to_string(),
            bytes: Bytes::from(vec![0u8; size]),
        }])
    }

    #[test]
    fn session_starts_idle_with_defaults() {
        let session = session();
        assert_eq!(session.state().expect("state read failed"), SessionState::Idle);
        assert!(session.candidate().expect("candidate read failed").is_none());

        let policy = session.policy().expect("policy read failed");
        assert!(!policy.enabled);
        assert_eq!(policy.quality(), CompressionPolicy::DEFAULT_QUALITY);
    }

    #[test]
    fn acquire_moves_to_ready_and_replaces_candidate() {
        let session = session();

        session.acquire(png_source(1024)).expect("acquire should succeed");
        assert_eq!(session.state().expect("state read failed"), SessionState::Ready);

        // 再次获取整体替换
        let replacement = AcquireSource::Picker(vec![RawFile {
            name: "other.gif".to_string(),
            mime: "image/gif".to_string(),
            bytes: Bytes::from(vec![0u8; 2048]),
        }]);
        session.acquire(replacement).expect("acquire should succeed");

        let candidate = session
            .candidate()
            .expect("candidate read failed")
            .expect("candidate should exist");
        assert_eq!(candidate.name, "other.gif");
        assert_eq!(candidate.size, 2048);
    }

    #[test]
    fn failed_acquire_leaves_prior_state_untouched() {
        let session = session();
        session.acquire(png_source(1024)).expect("acquire should succeed");

        let bad = AcquireSource::Picker(vec![RawFile {
            name: "doc.pdf".to_string(),
            mime: "application/pdf".to_string(),
            bytes: Bytes::from(vec![0u8; 10]),
        }]);
        let result = session.acquire(bad);
        assert!(matches!(result, Err(UploadError::UnsupportedType(_))));

        assert_eq!(session.state().expect("state read failed"), SessionState::Ready);
        let candidate = session
            .candidate()
            .expect("candidate read failed")
            .expect("prior candidate should survive");
        assert_eq!(candidate.name, "photo.png");
    }

    #[test]
    fn auto_policy_applies_for_large_files_only() {
        let session = session();

        session
            .acquire(png_source(3 * 1024 * 1024))
            .expect("acquire should succeed");
        let policy = session.policy().expect("policy read failed");
        assert!(policy.enabled);
        assert_eq!(policy.quality(), 80);

        // 小文件不干预用户当前策略
        session.reset().expect("reset should succeed");
        session
            .set_quality(42)
            .expect("set_quality should succeed");
        session.acquire(png_source(1024)).expect("acquire should succeed");
        let policy = session.policy().expect("policy read failed");
        assert!(!policy.enabled);
        assert_eq!(policy.quality(), 42);
    }

    #[test]
    fn estimate_requires_enabled_policy_and_candidate() {
        let session = session();
        assert_eq!(session.estimate().expect("estimate failed"), None);

        session
            .acquire(png_source(10 * 1024 * 1024))
            .expect("acquire should succeed");
        // 10MB > 2MB，自动压缩已启用，质量 80 → 6.00
        assert_eq!(session.estimate().expect("estimate failed"), Some(6.00));

        session
            .set_compression_enabled(false)
            .expect("toggle should succeed");
        assert_eq!(session.estimate().expect("estimate failed"), None);

        session
            .set_compression_enabled(true)
            .expect("toggle should succeed");
        session.set_quality(90).expect("set_quality should succeed");
        assert_eq!(session.estimate().expect("estimate failed"), Some(8.00));
    }

    #[test]
    fn set_quality_rejects_out_of_range() {
        let session = session();
        let result = session.set_quality(101);
        assert!(matches!(result, Err(UploadError::InvalidQuality(101))));
        assert_eq!(
            session.policy().expect("policy read failed").quality(),
            CompressionPolicy::DEFAULT_QUALITY
        );
    }

    #[tokio::test]
    async fn submit_without_candidate_is_invalid_state() {
        let session = session();
        let result = session.submit().await;
        assert!(matches!(result, Err(UploadError::InvalidState(_))));
        // 前置校验失败不应卡住单飞行标志
        assert_eq!(session.state().expect("state read failed"), SessionState::Idle);
        let result = session.submit().await;
        assert!(matches!(result, Err(UploadError::InvalidState(_))));
    }

    #[test]
    fn reset_clears_everything() {
        let session = session();
        session
            .acquire(png_source(3 * 1024 * 1024))
            .expect("acquire should succeed");
        session.set_quality(55).expect("set_quality should succeed");

        session.reset().expect("reset should succeed");

        assert_eq!(session.state().expect("state read failed"), SessionState::Idle);
        assert!(session.candidate().expect("candidate read failed").is_none());
        assert!(session.outcome().expect("outcome read failed").is_none());
        let policy = session.policy().expect("policy read failed");
        assert!(!policy.enabled);
        assert_eq!(policy.quality(), CompressionPolicy::DEFAULT_QUALITY);
    }
}
