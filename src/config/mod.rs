/// 统一配置系统
///
/// 提供TOML/JSON配置文件、环境变量覆盖，以及从配置构建注册表和控制器
use crate::animation::{
    AnimationController, AnimationEntry, AnimationEvents, AnimationName, AnimationRegistry,
    Animator, SpecialBehaviors,
};
use crate::core::AnimatorResult;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 动画控制器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorConfig {
    /// 默认动画 (启动与 Special 回退)
    pub default_animation: AnimationName,

    /// 动画条目，按配置顺序
    pub animations: Vec<AnimationEntry>,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            default_animation: AnimationName::Idle,
            animations: vec![
                AnimationEntry::crossfade(AnimationName::Idle, "idle", 0.25, 0.0),
                AnimationEntry::crossfade(AnimationName::Walk, "walk", 0.3, 0.0),
                AnimationEntry::crossfade(AnimationName::Run, "run", 0.2, 0.0),
                AnimationEntry::snap(AnimationName::AttackOne, "attack_1"),
                AnimationEntry::snap(AnimationName::AttackTwo, "attack_2"),
                AnimationEntry::snap(AnimationName::AttackThree, "attack_3"),
                AnimationEntry::snap(AnimationName::Damage, "damage"),
                AnimationEntry::crossfade(AnimationName::Ko, "ko", 0.1, 0.0),
                AnimationEntry::crossfade(AnimationName::WinPose, "win_pose", 0.4, 0.0),
            ],
            logging: LoggingConfig::default(),
        }
    }
}

impl AnimatorConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// 按扩展名加载 (`.json` 为JSON，其余按TOML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 从环境变量覆盖配置
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("ANIMATOR_DEFAULT_ANIMATION") {
            match AnimationName::parse(&val) {
                Some(name) => self.default_animation = name,
                None => tracing::warn!(target: "config", "Ignoring unknown default animation '{}'", val),
            }
        }
        if let Ok(val) = env::var("ANIMATOR_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&val) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置
    ///
    /// 条目本身的规则 (重复、缺剪辑、缺行为) 由注册表构建时检查。
    pub fn validate(&self) -> ConfigResult<()> {
        if self.animations.is_empty() {
            return Err(ConfigError::ValidationError(
                "No animations configured".to_string(),
            ));
        }
        if !self
            .animations
            .iter()
            .any(|entry| entry.name == self.default_animation)
        {
            return Err(ConfigError::ValidationError(format!(
                "Default animation {} is not configured",
                self.default_animation
            )));
        }
        Ok(())
    }

    /// 构建注册表
    pub fn build_registry(&self, behaviors: &SpecialBehaviors) -> AnimatorResult<AnimationRegistry> {
        self.validate()?;
        Ok(AnimationRegistry::build(self.animations.iter().cloned(), behaviors)?)
    }

    /// 构建并启动控制器
    pub fn build_controller<A>(
        &self,
        behaviors: SpecialBehaviors,
        animator: A,
        events: AnimationEvents,
    ) -> AnimatorResult<AnimationController>
    where
        A: Animator + 'static,
    {
        let registry = self.build_registry(&behaviors)?;
        Ok(AnimationController::new(
            registry,
            behaviors,
            animator,
            events,
            self.default_animation,
        )?)
    }

    /// 自动查找并加载配置文件
    ///
    /// 按以下顺序查找：
    /// 1. ./animator.toml
    /// 2. ./animator.json
    /// 3. ~/.config/character_animator/animator.toml
    /// 4. 使用默认配置
    pub fn load_or_default() -> Self {
        let mut candidates = vec![PathBuf::from("animator.toml"), PathBuf::from("animator.json")];
        if let Some(home) = env::var_os("HOME") {
            candidates.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("character_animator")
                    .join("animator.toml"),
            );
        }

        for path in candidates {
            if let Ok(config) = Self::from_file(&path) {
                tracing::info!(target: "config", "Loaded config from {:?}", path);
                return config;
            }
        }

        tracing::info!(target: "config", "Using default configuration");
        Self::default()
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别 (`RUST_LOG` 优先)
    pub level: LogLevel,

    /// 是否输出到控制台
    pub log_to_console: bool,
}

use crate::impl_default;

impl_default!(LoggingConfig {
    level: LogLevel::Info,
    log_to_console: true,
});

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    /// 跟踪
    Trace,
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warn,
    /// 错误
    Error,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationType, RecordingAnimator};
    use crate::core::AnimatorError;

    #[test]
    fn test_default_config() {
        let config = AnimatorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.build_registry(&SpecialBehaviors::new()).is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = AnimatorConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AnimatorConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_toml_entries() {
        let config = AnimatorConfig::from_toml_str(
            r#"
default_animation = "Idle"

[[animations]]
name = "Idle"
clip = "idle"
transition = "Crossfade"
cross_fade_time = 0.25

[[animations]]
name = "KO"
clip = "ko"
transition = "Cinematic"

[[animations]]
name = "WinPose"
transition = "Special"
special_behavior = "celebrate"

[logging]
level = "Debug"
log_to_console = false
"#,
        )
        .unwrap();

        assert_eq!(config.animations.len(), 3);
        assert_eq!(config.animations[1].name, AnimationName::Ko);
        assert_eq!(config.animations[2].transition, AnimationType::Special);
        assert_eq!(config.logging.level, LogLevel::Debug);

        // 未挂载 celebrate 行为
        let err = config.build_registry(&SpecialBehaviors::new()).unwrap_err();
        assert!(matches!(err, AnimatorError::Animation(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_json_round_trip() {
        let config = AnimatorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AnimatorConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = AnimatorConfig::default();
        config.default_animation = AnimationName::Ko;
        config.animations.retain(|entry| entry.name != AnimationName::Ko);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        config.animations.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            AnimatorConfig::from_toml_str("default_animation = 3"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_env_override_default_animation() {
        let mut config = AnimatorConfig::default();
        env::set_var("ANIMATOR_DEFAULT_ANIMATION", "walk");
        config.apply_env_overrides();
        env::remove_var("ANIMATOR_DEFAULT_ANIMATION");
        assert_eq!(config.default_animation, AnimationName::Walk);
    }

    #[test]
    fn test_build_controller() {
        let config = AnimatorConfig::default();
        let controller = config
            .build_controller(
                SpecialBehaviors::new(),
                RecordingAnimator::new(),
                AnimationEvents::new(),
            )
            .unwrap();
        assert_eq!(controller.current_animation_name(), AnimationName::Idle);
        assert_eq!(controller.registry().len(), 9);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
