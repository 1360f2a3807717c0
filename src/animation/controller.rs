//! 动画控制器 - 状态机
//!
//! 持有当前/上一个动画状态，执行过渡规则，驱动 `Animator` 并发布变化通知。
//!
//! 过渡规则：
//! - Snap 过渡进入的动画不可被 `change_animation` 打断，直到 `on_snap_animation_end`
//! - Crossfade / Snap 记录上一个动画，供 snap 结束后混合恢复
//! - Special 委托给 `SpecialBehavior`；行为未覆盖动画时回退到默认动画
//! - Cinematic 与未知过渡只记录诊断，不改变状态

use super::animator::Animator;
use super::entry::{AnimationEntry, AnimationName, AnimationType, ClipHandle};
use super::error::{AnimationError, AnimationResult, TransitionWarning};
use super::events::{AnimationEvent, AnimationEvents};
use super::registry::AnimationRegistry;
use super::special::SpecialBehaviors;
use bevy_ecs::prelude::*;

/// 一次过渡请求的结果
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// 已切换到目标动画
    Applied(AnimationName),
    /// 当前 snap 动画不可打断，请求被忽略
    Ignored,
    /// Special 行为未覆盖动画，已回退到默认动画
    FellBack(AnimationName),
    /// 配置问题，状态未改变
    Skipped(TransitionWarning),
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied(_))
    }
}

/// 控制器可变状态
#[derive(Debug)]
struct ControllerState {
    current: AnimationEntry,
    prior: AnimationEntry,
    /// `current.name` 的可观察投影
    current_name: AnimationName,
    /// 当前动画为 Snap 条目且由过渡或覆盖进入 (启动、回退、snap 结束恢复不加锁)
    snap_locked: bool,
}

/// 播放器、状态与通知 (与注册表、行为集合分开借用)
struct Playback {
    animator: Box<dyn Animator>,
    state: ControllerState,
    events: AnimationEvents,
}

fn playable_clip(entry: &AnimationEntry) -> Option<&ClipHandle> {
    match entry.transition {
        AnimationType::Special => None,
        _ => entry.clip.as_ref(),
    }
}

fn not_playable(name: AnimationName) -> TransitionOutcome {
    tracing::warn!(target: "animation", "Animation {} has no playable clip, skipping", name);
    TransitionOutcome::Skipped(TransitionWarning::NotPlayable(name))
}

impl Playback {
    /// 更新名称投影，仅在变化时通知
    fn set_current_name(&mut self, name: AnimationName) -> bool {
        if self.state.current_name == name {
            return false;
        }
        self.state.current_name = name;
        self.events.emit(AnimationEvent::AnimationChanged(name));
        true
    }

    fn snap_to(&mut self, target: &AnimationEntry) -> TransitionOutcome {
        let Some(clip) = playable_clip(target) else {
            return not_playable(target.name);
        };

        self.state.prior = self.state.current.clone();
        self.animator.play(clip);
        self.state.current = target.clone();
        self.state.snap_locked = target.is_snap();
        self.set_current_name(target.name);

        tracing::debug!(target: "animation", "Snapped to {} (prior {})", target.name, self.state.prior.name);
        TransitionOutcome::Applied(target.name)
    }

    fn crossfade_to(&mut self, target: &AnimationEntry) -> TransitionOutcome {
        let Some(clip) = playable_clip(target) else {
            return not_playable(target.name);
        };

        self.state.prior = self.state.current.clone();
        self.animator
            .crossfade(clip, target.cross_fade_time, 0.0, target.cross_fade_offset);
        self.state.current = target.clone();
        self.state.snap_locked = target.is_snap();
        self.set_current_name(target.name);

        tracing::debug!(
            target: "animation",
            "Crossfading to {} over {}s (prior {})",
            target.name,
            target.cross_fade_time,
            self.state.prior.name
        );
        TransitionOutcome::Applied(target.name)
    }

    /// 直接播放默认动画 (启动和 Special 回退)，不加 snap 锁
    fn rest_on(&mut self, entry: &AnimationEntry) {
        if let Some(clip) = playable_clip(entry) {
            self.animator.play(clip);
        }
        self.state.current = entry.clone();
        self.state.snap_locked = false;
        self.set_current_name(entry.name);
    }
}

/// 覆盖句柄
///
/// 只在 `SpecialBehavior::execute_special_behavior` 执行期间存在，
/// 绕过 `change_animation` 的 snap 锁与过渡分派直接切换动画。
pub struct OverrideHandle<'a> {
    registry: &'a AnimationRegistry,
    playback: &'a mut Playback,
    applied: bool,
}

impl<'a> OverrideHandle<'a> {
    fn new(registry: &'a AnimationRegistry, playback: &'a mut Playback) -> Self {
        Self {
            registry,
            playback,
            applied: false,
        }
    }

    /// 立即切换到指定动画
    pub fn override_current_animation_snap(
        &mut self,
        name: AnimationName,
    ) -> AnimationResult<TransitionOutcome> {
        let registry = self.registry;
        let target = registry.lookup(name)?;
        let outcome = self.playback.snap_to(target);
        self.applied |= outcome.is_applied();
        Ok(outcome)
    }

    /// 使用目标条目的混合参数切换到指定动画
    pub fn override_current_animation_crossfade(
        &mut self,
        name: AnimationName,
    ) -> AnimationResult<TransitionOutcome> {
        let registry = self.registry;
        let target = registry.lookup(name)?;
        let outcome = self.playback.crossfade_to(target);
        self.applied |= outcome.is_applied();
        Ok(outcome)
    }

    pub fn current_animation_name(&self) -> AnimationName {
        self.playback.state.current_name
    }

    pub fn prior_animation_name(&self) -> AnimationName {
        self.playback.state.prior.name
    }

    /// 本次执行中是否已有覆盖生效
    pub fn has_overridden(&self) -> bool {
        self.applied
    }
}

/// 动画控制器组件
///
/// 所有入口都是同步调用，由宿主每帧更新或动画事件分派驱动，不会并发执行。
#[derive(Component)]
pub struct AnimationController {
    registry: AnimationRegistry,
    behaviors: SpecialBehaviors,
    default: AnimationEntry,
    playback: Playback,
}

impl AnimationController {
    /// 创建控制器并立即播放默认动画
    ///
    /// `events` 中已注册的监听器会收到默认动画的初始变化通知。
    pub fn new<A>(
        registry: AnimationRegistry,
        behaviors: SpecialBehaviors,
        animator: A,
        events: AnimationEvents,
        default_animation: AnimationName,
    ) -> AnimationResult<Self>
    where
        A: Animator + 'static,
    {
        let default = registry
            .lookup(default_animation)
            .map_err(|_| AnimationError::InvalidDefault {
                name: default_animation,
                reason: "not registered".to_string(),
            })?
            .clone();

        if playable_clip(&default).is_none() {
            return Err(AnimationError::InvalidDefault {
                name: default_animation,
                reason: "has no playable clip".to_string(),
            });
        }

        let mut playback = Playback {
            animator: Box::new(animator),
            state: ControllerState {
                current: default.clone(),
                prior: default.clone(),
                current_name: default.name,
                snap_locked: false,
            },
            events,
        };

        if let Some(clip) = playable_clip(&default) {
            playback.animator.play(clip);
        }
        playback
            .events
            .emit(AnimationEvent::AnimationChanged(default.name));

        tracing::info!(target: "animation", "Animation controller started on {}", default.name);

        Ok(Self {
            registry,
            behaviors,
            default,
            playback,
        })
    }

    /// 请求切换动画
    ///
    /// snap 锁定期间请求被忽略；未知名称返回 `UnknownAnimation` 且不改变状态。
    pub fn change_animation(&mut self, name: AnimationName) -> AnimationResult<TransitionOutcome> {
        if self.playback.state.snap_locked {
            tracing::debug!(
                target: "animation",
                "Ignoring request for {} while {} is snapping",
                name,
                self.playback.state.current.name
            );
            return Ok(TransitionOutcome::Ignored);
        }

        let target = self.registry.lookup(name)?;
        let transition = target.transition;

        match transition {
            AnimationType::Crossfade => Ok(self.playback.crossfade_to(target)),
            AnimationType::Snap => Ok(self.playback.snap_to(target)),
            AnimationType::Cinematic => {
                let warning = TransitionWarning::UnimplementedTransition(name);
                tracing::warn!(target: "animation", "{}", warning);
                Ok(TransitionOutcome::Skipped(warning))
            }
            AnimationType::Special => {
                let key = target.special_behavior.clone();
                let stray_clip = target.clip.is_some();
                self.run_special(name, key.as_deref(), stray_clip)
            }
            AnimationType::Unrecognized => {
                let warning = TransitionWarning::UnrecognizedTransition { name, transition };
                tracing::warn!(target: "animation", "{}", warning);
                Ok(TransitionOutcome::Skipped(warning))
            }
        }
    }

    fn run_special(
        &mut self,
        name: AnimationName,
        key: Option<&str>,
        stray_clip: bool,
    ) -> AnimationResult<TransitionOutcome> {
        let Self {
            registry,
            behaviors,
            default,
            playback,
        } = self;

        let behavior = match key {
            Some(key) => behaviors.get_mut(key),
            None => None,
        };
        let Some(behavior) = behavior else {
            let warning = TransitionWarning::MisconfiguredSpecial(name);
            tracing::warn!(target: "animation", "{}", warning);
            return Ok(TransitionOutcome::Skipped(warning));
        };

        if stray_clip {
            tracing::warn!(target: "animation", "Ignoring clip configured on special animation {}", name);
        }

        tracing::debug!(target: "animation", "Executing special behavior for {}", name);

        let mut handle = OverrideHandle::new(registry, playback);
        behavior.execute_special_behavior(&mut handle)?;

        if handle.has_overridden() {
            return Ok(TransitionOutcome::Applied(playback.state.current_name));
        }

        tracing::debug!(
            target: "animation",
            "Special behavior for {} left animation unchanged, falling back to {}",
            name,
            default.name
        );
        playback.rest_on(default);
        Ok(TransitionOutcome::FellBack(default.name))
    }

    /// snap 动画结束 (由宿主的动画事件触发)
    ///
    /// 先发布 `SnapEnded`，再混合回上一个动画。
    pub fn on_snap_animation_end(&mut self) -> TransitionOutcome {
        let playback = &mut self.playback;
        playback.events.emit(AnimationEvent::SnapEnded);

        let prior = playback.state.prior.clone();
        let Some(clip) = playable_clip(&prior) else {
            return not_playable(prior.name);
        };

        playback
            .animator
            .crossfade(clip, prior.cross_fade_time, 0.0, prior.cross_fade_offset);
        playback.state.snap_locked = false;
        let name = prior.name;
        playback.state.current = prior;
        playback.set_current_name(name);

        tracing::debug!(target: "animation", "Snap finished, restored {}", name);
        TransitionOutcome::Applied(name)
    }

    /// 当前动画名称
    pub fn current_animation_name(&self) -> AnimationName {
        self.playback.state.current_name
    }

    pub fn current_animation(&self) -> &AnimationEntry {
        &self.playback.state.current
    }

    pub fn prior_animation(&self) -> &AnimationEntry {
        &self.playback.state.prior
    }

    pub fn default_animation(&self) -> &AnimationEntry {
        &self.default
    }

    /// 当前 snap 动画是否阻止新的请求
    pub fn is_snap_locked(&self) -> bool {
        self.playback.state.snap_locked
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    /// 启动后追加监听器或订阅者
    pub fn events_mut(&mut self) -> &mut AnimationEvents {
        &mut self.playback.events
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("current", &self.playback.state.current.name)
            .field("prior", &self.playback.state.prior.name)
            .field("snap_locked", &self.playback.state.snap_locked)
            .field("behaviors", &self.behaviors)
            .finish()
    }
}
