//! 动画条目数据模型
//!
//! 描述单个命名动画的静态配置：剪辑引用、过渡策略、混合参数、特殊行为引用。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 动画名称 (封闭枚举，只能通过新增枚举值扩展)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimationName {
    Idle,
    Walk,
    Run,
    AttackOne,
    AttackTwo,
    AttackThree,
    Damage,
    #[serde(rename = "KO")]
    Ko,
    WinPose,
}

impl AnimationName {
    /// 全部动画名称，按声明顺序
    pub const ALL: [AnimationName; 9] = [
        AnimationName::Idle,
        AnimationName::Walk,
        AnimationName::Run,
        AnimationName::AttackOne,
        AnimationName::AttackTwo,
        AnimationName::AttackThree,
        AnimationName::Damage,
        AnimationName::Ko,
        AnimationName::WinPose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationName::Idle => "Idle",
            AnimationName::Walk => "Walk",
            AnimationName::Run => "Run",
            AnimationName::AttackOne => "AttackOne",
            AnimationName::AttackTwo => "AttackTwo",
            AnimationName::AttackThree => "AttackThree",
            AnimationName::Damage => "Damage",
            AnimationName::Ko => "KO",
            AnimationName::WinPose => "WinPose",
        }
    }

    /// 从字符串解析 (用于环境变量覆盖)
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for AnimationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 过渡策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationType {
    /// 时间混合过渡
    Crossfade,
    /// 立即切换，不可被打断
    Snap,
    /// 过场动画 (未实现，仅记录日志)
    Cinematic,
    /// 委托给特殊行为
    Special,
    /// 配置中出现的未知过渡类型
    #[serde(other)]
    Unrecognized,
}

/// 剪辑句柄 (对宿主引擎中可播放剪辑资源的不透明引用)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipHandle(String);

impl ClipHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 动画条目 (加载后不可变)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationEntry {
    /// 动画名称 (注册表键)
    pub name: AnimationName,
    /// 剪辑引用，Special 条目应为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<ClipHandle>,
    /// 过渡策略
    pub transition: AnimationType,
    /// 混合时长 (秒)
    #[serde(default)]
    pub cross_fade_time: f32,
    /// 目标剪辑采样起点
    #[serde(default)]
    pub cross_fade_offset: f32,
    /// 特殊行为键，Special 条目必填
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_behavior: Option<String>,
}

impl AnimationEntry {
    /// 混合过渡条目
    pub fn crossfade(name: AnimationName, clip: impl Into<String>, time: f32, offset: f32) -> Self {
        Self {
            name,
            clip: Some(ClipHandle::new(clip)),
            transition: AnimationType::Crossfade,
            cross_fade_time: time,
            cross_fade_offset: offset,
            special_behavior: None,
        }
    }

    /// 立即切换条目
    pub fn snap(name: AnimationName, clip: impl Into<String>) -> Self {
        Self {
            name,
            clip: Some(ClipHandle::new(clip)),
            transition: AnimationType::Snap,
            cross_fade_time: 0.0,
            cross_fade_offset: 0.0,
            special_behavior: None,
        }
    }

    /// 特殊行为条目
    pub fn special(name: AnimationName, behavior: impl Into<String>) -> Self {
        Self {
            name,
            clip: None,
            transition: AnimationType::Special,
            cross_fade_time: 0.0,
            cross_fade_offset: 0.0,
            special_behavior: Some(behavior.into()),
        }
    }

    /// 过场动画条目
    pub fn cinematic(name: AnimationName, clip: impl Into<String>) -> Self {
        Self {
            name,
            clip: Some(ClipHandle::new(clip)),
            transition: AnimationType::Cinematic,
            cross_fade_time: 0.0,
            cross_fade_offset: 0.0,
            special_behavior: None,
        }
    }

    /// 设置剪辑 (链式)
    pub fn with_clip(mut self, clip: impl Into<String>) -> Self {
        self.clip = Some(ClipHandle::new(clip));
        self
    }

    /// 是否为 Snap 条目
    pub fn is_snap(&self) -> bool {
        self.transition == AnimationType::Snap
    }
}
