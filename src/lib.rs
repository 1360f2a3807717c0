//! # Character Animator
//!
//! A small animation-state controller for game characters.
//!
//! ## Features
//!
//! - **Transition policies**: Crossfade, Snap, Special (Cinematic is reserved)
//! - **Snap lock**: one-shot animations play to completion before anything else takes over
//! - **Special behaviors**: custom logic that overrides the current animation through a scoped handle
//! - **Notifications**: synchronous listeners and channel subscribers for animation changes
//! - **ECS integration**: controller as a `bevy_ecs` component driven by a request queue
//!
//! ## Architecture Design
//!
//! The controller is a thin orchestration layer over the host engine's playback
//! primitives. Clip sampling and blending happen behind the [`animation::Animator`] trait;
//! animation-event dispatch calls back into
//! [`animation::AnimationController::on_snap_animation_end`].
//!
//! ## Modules
//!
//! - [`core`]: Error types, logging, macros
//! - [`config`]: Configuration loading
//! - [`animation`]: Registry, controller and behaviors

/// Core infrastructure: errors, logging and macros
#[macro_use]
pub mod core;
/// Configuration system
pub mod config;
/// Animation state control
pub mod animation;

pub use crate::core::{init_logging, AnimatorError, AnimatorResult};
pub use animation::{
    AnimationController, AnimationEntry, AnimationError, AnimationName, AnimationRegistry,
    AnimationType, SpecialBehavior, SpecialBehaviors, TransitionOutcome,
};
pub use config::AnimatorConfig;
