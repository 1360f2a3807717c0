//! 动画状态控制模块
//!
//! 选择角色当前播放的动画剪辑，管理剪辑间的过渡，并在当前动画变化时通知监听器。
//!
//! ## 功能特性
//!
//! - 动画注册表 (名称 -> 条目)
//! - Crossfade / Snap / Special 过渡策略
//! - 特殊行为委托与覆盖句柄
//! - 同步的变化通知 (监听器与通道)
//! - ECS 请求队列驱动
//!
//! ## 使用示例
//!
//! ```rust
//! use character_animator::animation::*;
//!
//! let registry = AnimationRegistry::build(
//!     vec![
//!         AnimationEntry::crossfade(AnimationName::Idle, "idle", 0.2, 0.0),
//!         AnimationEntry::crossfade(AnimationName::Walk, "walk", 0.3, 0.0),
//!         AnimationEntry::snap(AnimationName::AttackOne, "attack_1"),
//!     ],
//!     &SpecialBehaviors::new(),
//! )?;
//!
//! let mut controller = AnimationController::new(
//!     registry,
//!     SpecialBehaviors::new(),
//!     TracingAnimator,
//!     AnimationEvents::new(),
//!     AnimationName::Idle,
//! )?;
//!
//! controller.change_animation(AnimationName::AttackOne)?;
//! // snap 播放期间的请求被忽略
//! assert_eq!(controller.change_animation(AnimationName::Walk)?, TransitionOutcome::Ignored);
//! controller.on_snap_animation_end();
//! assert_eq!(controller.current_animation_name(), AnimationName::Idle);
//! # Ok::<(), AnimationError>(())
//! ```

pub mod animator;
pub mod controller;
pub mod entry;
pub mod error;
pub mod events;
pub mod registry;
pub mod special;
pub mod system;


pub use animator::{Animator, AnimatorCall, RecordingAnimator, TracingAnimator};
pub use controller::{AnimationController, OverrideHandle, TransitionOutcome};
pub use entry::{AnimationEntry, AnimationName, AnimationType, ClipHandle};
pub use error::{AnimationError, AnimationResult, TransitionWarning};
pub use events::{AnimationEvent, AnimationEvents};
pub use registry::AnimationRegistry;
pub use special::{ComboBehavior, FnBehavior, SpecialBehavior, SpecialBehaviors};
pub use system::{animation_request_system, AnimationCommand, AnimationRequests};
