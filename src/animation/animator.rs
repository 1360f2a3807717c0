//! 播放能力抽象
//!
//! 剪辑采样、骨骼混合等由宿主引擎完成，控制器只通过 `Animator` 下发指令。

use super::entry::ClipHandle;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 宿主引擎的播放能力
pub trait Animator: Send + Sync {
    /// 立即播放剪辑，替换当前播放内容
    fn play(&mut self, clip: &ClipHandle);

    /// 在 `duration` 秒内混合到目标剪辑，目标从 `target_offset` 开始采样
    fn crossfade(&mut self, clip: &ClipHandle, duration: f32, start_offset: f32, target_offset: f32);
}

/// 仅输出日志的播放器 (演示和无头运行)
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnimator;

impl Animator for TracingAnimator {
    fn play(&mut self, clip: &ClipHandle) {
        tracing::info!(target: "animator", "play {}", clip);
    }

    fn crossfade(&mut self, clip: &ClipHandle, duration: f32, start_offset: f32, target_offset: f32) {
        tracing::info!(
            target: "animator",
            "crossfade {} over {}s (start {}, target {})",
            clip,
            duration,
            start_offset,
            target_offset
        );
    }
}

/// 记录的播放指令
#[derive(Debug, Clone, PartialEq)]
pub enum AnimatorCall {
    Play(ClipHandle),
    Crossfade {
        clip: ClipHandle,
        duration: f32,
        start_offset: f32,
        target_offset: f32,
    },
}

/// 记录所有指令的播放器
///
/// 克隆共享同一份记录，控制器持有一份、调用方持有另一份用于检查。
#[derive(Debug, Default, Clone)]
pub struct RecordingAnimator {
    calls: Arc<Mutex<Vec<AnimatorCall>>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnimatorCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前记录的快照
    pub fn calls(&self) -> Vec<AnimatorCall> {
        self.lock().clone()
    }

    pub fn last_call(&self) -> Option<AnimatorCall> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// 清空记录
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Animator for RecordingAnimator {
    fn play(&mut self, clip: &ClipHandle) {
        self.lock().push(AnimatorCall::Play(clip.clone()));
    }

    fn crossfade(&mut self, clip: &ClipHandle, duration: f32, start_offset: f32, target_offset: f32) {
        self.lock().push(AnimatorCall::Crossfade {
            clip: clip.clone(),
            duration,
            start_offset,
            target_offset,
        });
    }
}
