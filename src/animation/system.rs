//! 动画请求系统
//!
//! 宿主每帧的驱动：游戏逻辑与动画事件写入请求队列，系统按顺序交给控制器执行

use super::controller::AnimationController;
use super::entry::AnimationName;
use bevy_ecs::prelude::*;

/// 待处理的动画指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCommand {
    /// 请求切换动画
    Change(AnimationName),
    /// 宿主动画事件：snap 剪辑播放到结束帧
    SnapEnded,
}

/// 动画请求队列组件 (纯数据)
///
/// 游戏逻辑和宿主动画事件往这里推指令，`animation_request_system` 每帧按顺序消费。
#[derive(Component, Debug, Default)]
pub struct AnimationRequests {
    pub pending: Vec<AnimationCommand>,
}

impl AnimationRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, name: AnimationName) {
        self.pending.push(AnimationCommand::Change(name));
    }

    pub fn snap_ended(&mut self) {
        self.pending.push(AnimationCommand::SnapEnded);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// 动画请求系统 - 消费每个实体的请求队列
///
/// 未知动画只记录错误，不会中断角色的动画循环。
pub fn animation_request_system(
    mut query: Query<(Entity, &mut AnimationController, &mut AnimationRequests)>,
) {
    for (entity, mut controller, mut requests) in query.iter_mut() {
        if requests.pending.is_empty() {
            continue;
        }

        let commands = std::mem::take(&mut requests.pending);
        for command in commands {
            match command {
                AnimationCommand::Change(name) => {
                    if let Err(e) = controller.change_animation(name) {
                        tracing::error!(target: "animation", "Entity {:?}: {}", entity, e);
                    }
                }
                AnimationCommand::SnapEnded => {
                    controller.on_snap_animation_end();
                }
            }
        }
    }
}
