//! 特殊行为
//!
//! Special 过渡不直接播放剪辑，而是同步调用挂载的 `SpecialBehavior`。
//! 行为通过传入的 `OverrideHandle` 覆盖当前动画，该句柄只在执行期间有效。

use super::controller::OverrideHandle;
use super::entry::AnimationName;
use super::error::AnimationResult;
use std::collections::HashMap;
use std::fmt;

/// 特殊行为 trait
pub trait SpecialBehavior: Send + Sync {
    /// 执行特殊行为
    ///
    /// 若返回前未调用任何覆盖操作，控制器会回退到默认动画。
    fn execute_special_behavior(&mut self, handle: &mut OverrideHandle<'_>) -> AnimationResult<()>;
}

/// 闭包适配器
pub struct FnBehavior<F> {
    func: F,
}

impl<F> FnBehavior<F>
where
    F: FnMut(&mut OverrideHandle<'_>) -> AnimationResult<()> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> SpecialBehavior for FnBehavior<F>
where
    F: FnMut(&mut OverrideHandle<'_>) -> AnimationResult<()> + Send + Sync,
{
    fn execute_special_behavior(&mut self, handle: &mut OverrideHandle<'_>) -> AnimationResult<()> {
        (self.func)(handle)
    }
}

/// 连招行为 - 每次调用按顺序 snap 到下一个动画
///
/// 例如 AttackOne → AttackTwo → AttackThree → AttackOne ...
#[derive(Debug, Clone)]
pub struct ComboBehavior {
    sequence: Vec<AnimationName>,
    next: usize,
}

impl ComboBehavior {
    pub fn new(sequence: impl Into<Vec<AnimationName>>) -> Self {
        Self {
            sequence: sequence.into(),
            next: 0,
        }
    }

    /// 下一次执行将播放的动画
    pub fn peek(&self) -> Option<AnimationName> {
        self.sequence.get(self.next).copied()
    }

    /// 重置到序列开头
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl SpecialBehavior for ComboBehavior {
    fn execute_special_behavior(&mut self, handle: &mut OverrideHandle<'_>) -> AnimationResult<()> {
        let Some(name) = self.peek() else {
            return Ok(());
        };
        if handle.override_current_animation_snap(name)?.is_applied() {
            self.next = (self.next + 1) % self.sequence.len();
        }
        Ok(())
    }
}

/// 已挂载的特殊行为集合 (键 -> 实现)
#[derive(Default)]
pub struct SpecialBehaviors {
    behaviors: HashMap<String, Box<dyn SpecialBehavior>>,
}

impl SpecialBehaviors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 挂载行为，返回被替换的旧行为
    pub fn insert<B>(&mut self, key: impl Into<String>, behavior: B) -> Option<Box<dyn SpecialBehavior>>
    where
        B: SpecialBehavior + 'static,
    {
        self.behaviors.insert(key.into(), Box::new(behavior))
    }

    /// 链式挂载
    pub fn with<B>(mut self, key: impl Into<String>, behavior: B) -> Self
    where
        B: SpecialBehavior + 'static,
    {
        self.insert(key, behavior);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.behaviors.contains_key(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut (dyn SpecialBehavior + 'static)> {
        self.behaviors.get_mut(key).map(|behavior| behavior.as_mut())
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }
}

impl fmt::Debug for SpecialBehaviors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("SpecialBehaviors").field("keys", &keys).finish()
    }
}
