//! 动画通知
//!
//! 状态变化时同步、按注册顺序通知监听器，然后投递给通道订阅者。

use super::entry::AnimationName;
use crossbeam_channel::{Receiver, Sender};

/// 控制器发布的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// 当前动画名称发生变化
    AnimationChanged(AnimationName),
    /// `on_snap_animation_end` 被调用 (恢复混合之前)
    SnapEnded,
}

type ChangeListener = Box<dyn Fn(AnimationName) + Send + Sync>;
type SnapEndListener = Box<dyn Fn() + Send + Sync>;

/// 监听器与订阅者列表
#[derive(Default)]
pub struct AnimationEvents {
    /// 动画变化监听器
    change_listeners: Vec<ChangeListener>,
    /// snap 结束监听器
    snap_end_listeners: Vec<SnapEndListener>,
    /// 通道订阅者，断开后自动移除
    subscribers: Vec<Sender<AnimationEvent>>,
}

impl AnimationEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加动画变化监听器 (OnAnimationChange)
    pub fn on_animation_change<F>(&mut self, listener: F)
    where
        F: Fn(AnimationName) + Send + Sync + 'static,
    {
        self.change_listeners.push(Box::new(listener));
    }

    /// 添加 snap 结束监听器 (OnSnapEnd)
    pub fn on_snap_end<F>(&mut self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.snap_end_listeners.push(Box::new(listener));
    }

    /// 订阅事件通道
    pub fn subscribe(&mut self) -> Receiver<AnimationEvent> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.subscribers.push(sender);
        receiver
    }

    pub fn listener_count(&self) -> usize {
        self.change_listeners.len() + self.snap_end_listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub(crate) fn emit(&mut self, event: AnimationEvent) {
        match event {
            AnimationEvent::AnimationChanged(name) => {
                for listener in &self.change_listeners {
                    listener(name);
                }
            }
            AnimationEvent::SnapEnded => {
                for listener in &self.snap_end_listeners {
                    listener();
                }
            }
        }

        self.subscribers.retain(|sender| sender.send(event).is_ok());
    }
}

impl std::fmt::Debug for AnimationEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationEvents")
            .field("change_listeners", &self.change_listeners.len())
            .field("snap_end_listeners", &self.snap_end_listeners.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
