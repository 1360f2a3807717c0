//! 统一错误处理模块
//!
//! 提供 crate 范围内的顶层错误类型定义
//!
//! ## 错误类型分层
//!
//! - **配置层错误** (`config::ConfigError`): 配置文件读取、解析、验证
//! - **动画层错误** (`animation::AnimationError`): 注册表构建与动画查找
//!
//! `AnimatorError` 可以同时承载以上两类错误，供二进制入口和宿主统一处理。

use crate::animation::AnimationError;
use crate::config::ConfigError;
use thiserror::Error;

/// 动画控制器顶层错误类型
#[derive(Error, Debug)]
pub enum AnimatorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),
}

impl AnimatorError {
    /// 是否属于初始化阶段的致命错误
    pub fn is_fatal(&self) -> bool {
        match self {
            AnimatorError::Config(_) => true,
            AnimatorError::Animation(err) => err.is_configuration_error(),
        }
    }
}

/// 顶层结果类型别名
pub type AnimatorResult<T> = Result<T, AnimatorError>;
