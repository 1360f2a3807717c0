//! 动画注册表
//!
//! 启动时由有序条目列表构建一次，之后只读。

use super::entry::{AnimationEntry, AnimationName, AnimationType};
use super::error::{AnimationError, AnimationResult};
use super::special::SpecialBehaviors;
use std::collections::HashMap;

/// 动画注册表 - 名称到条目的映射
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry {
    entries: HashMap<AnimationName, AnimationEntry>,
    /// 配置顺序
    order: Vec<AnimationName>,
}

impl AnimationRegistry {
    /// 构建注册表并校验每个条目
    ///
    /// 重复名称直接拒绝；Special 条目必须引用 `behaviors` 中存在的行为。
    pub fn build<I>(entries: I, behaviors: &SpecialBehaviors) -> AnimationResult<Self>
    where
        I: IntoIterator<Item = AnimationEntry>,
    {
        let mut registry = Self::default();

        for entry in entries {
            Self::validate_entry(&entry, behaviors)?;

            if registry.entries.contains_key(&entry.name) {
                return Err(AnimationError::DuplicateAnimation(entry.name));
            }

            if entry.transition == AnimationType::Special && entry.clip.is_some() {
                tracing::warn!(
                    target: "animation",
                    "Special animation {} has a clip configured; it will be ignored",
                    entry.name
                );
            }

            registry.order.push(entry.name);
            registry.entries.insert(entry.name, entry);
        }

        tracing::debug!(target: "animation", "Animation registry built with {} entries", registry.len());
        Ok(registry)
    }

    fn validate_entry(entry: &AnimationEntry, behaviors: &SpecialBehaviors) -> AnimationResult<()> {
        if !entry.cross_fade_time.is_finite() || entry.cross_fade_time < 0.0 {
            return Err(AnimationError::InvalidCrossFadeTime {
                name: entry.name,
                time: entry.cross_fade_time,
            });
        }

        match entry.transition {
            AnimationType::Crossfade | AnimationType::Snap | AnimationType::Cinematic => {
                if entry.clip.is_none() {
                    return Err(AnimationError::MissingClip(entry.name));
                }
            }
            AnimationType::Special => {
                let key = entry
                    .special_behavior
                    .as_deref()
                    .ok_or(AnimationError::MissingSpecialBehavior(entry.name))?;
                if !behaviors.contains(key) {
                    return Err(AnimationError::UnresolvedSpecialBehavior {
                        name: entry.name,
                        behavior: key.to_string(),
                    });
                }
            }
            // 运行时再诊断
            AnimationType::Unrecognized => {}
        }

        Ok(())
    }

    /// 查找动画条目
    pub fn lookup(&self, name: AnimationName) -> AnimationResult<&AnimationEntry> {
        self.entries
            .get(&name)
            .ok_or(AnimationError::UnknownAnimation(name))
    }

    pub fn contains(&self, name: AnimationName) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按配置顺序遍历名称
    pub fn names(&self) -> impl Iterator<Item = AnimationName> + '_ {
        self.order.iter().copied()
    }
}
