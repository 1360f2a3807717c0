//! 动画领域错误类型

use super::entry::{AnimationName, AnimationType};
use thiserror::Error;

/// 动画领域错误
///
/// 除 `UnknownAnimation` 外均为构建期配置错误，初始化时应直接中止。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 注册表中出现重复名称
    #[error("Duplicate animation entry: {0}")]
    DuplicateAnimation(AnimationName),
    /// Crossfade/Snap/Cinematic 条目缺少剪辑
    #[error("Animation {0} has no clip but its transition requires one")]
    MissingClip(AnimationName),
    /// Special 条目未配置特殊行为
    #[error("Special animation {0} has no special behavior configured")]
    MissingSpecialBehavior(AnimationName),
    /// Special 条目引用的特殊行为不存在
    #[error("Special animation {name} references unknown behavior '{behavior}'")]
    UnresolvedSpecialBehavior {
        name: AnimationName,
        behavior: String,
    },
    /// 混合时长非法
    #[error("Animation {name} has invalid cross fade time: {time}")]
    InvalidCrossFadeTime { name: AnimationName, time: f32 },
    /// 默认动画不可用
    #[error("Default animation {name} is unusable: {reason}")]
    InvalidDefault { name: AnimationName, reason: String },
    /// 请求的动画不在注册表中
    #[error("Unknown animation: {0}")]
    UnknownAnimation(AnimationName),
}

impl AnimationError {
    /// 是否为构建期配置错误
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, AnimationError::UnknownAnimation(_))
    }
}

/// 运行时过渡诊断 (非致命，不改变状态)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionWarning {
    /// Cinematic 过渡尚未实现
    #[error("Cinematic transition for {0} is not implemented")]
    UnimplementedTransition(AnimationName),
    /// Special 条目的行为无法解析
    #[error("Special animation {0} has no resolvable behavior")]
    MisconfiguredSpecial(AnimationName),
    /// 目标条目没有可播放的剪辑 (覆盖到 Special 条目)
    #[error("Animation {0} has no playable clip")]
    NotPlayable(AnimationName),
    /// 未知过渡类型
    #[error("Animation {name} has unrecognized transition {transition:?}")]
    UnrecognizedTransition {
        name: AnimationName,
        transition: AnimationType,
    },
}

/// 动画结果类型别名
pub type AnimationResult<T> = Result<T, AnimationError>;
