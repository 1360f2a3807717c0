use character_animator::animation::{
    AnimationEvents, AnimationName, ComboBehavior, FnBehavior, SpecialBehaviors, TracingAnimator,
};
use character_animator::{init_logging, AnimatorConfig, AnimatorResult};

/// 演示脚本：依次请求动画，`None` 代表 snap 剪辑的结束帧事件
const SCRIPT: &[Option<AnimationName>] = &[
    Some(AnimationName::Walk),
    Some(AnimationName::Run),
    Some(AnimationName::AttackOne),
    Some(AnimationName::Walk),
    None,
    Some(AnimationName::AttackThree),
    None,
    Some(AnimationName::Ko),
    Some(AnimationName::WinPose),
    Some(AnimationName::Idle),
];

fn run() -> AnimatorResult<()> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => AnimatorConfig::from_file(path)?,
        None => AnimatorConfig::load_or_default(),
    };
    config.apply_env_overrides();
    init_logging(&config.logging);

    let behaviors = SpecialBehaviors::new()
        .with(
            "combo",
            ComboBehavior::new(vec![AnimationName::AttackOne, AnimationName::AttackTwo]),
        )
        .with(
            "win_pose",
            FnBehavior::new(|handle| {
                tracing::info!(target: "demo", "Celebrating from {}", handle.current_animation_name());
                Ok(())
            }),
        );

    let mut events = AnimationEvents::new();
    events.on_animation_change(|name| tracing::info!(target: "demo", "Animation changed to {}", name));
    events.on_snap_end(|| tracing::info!(target: "demo", "Snap animation ended"));

    let mut controller = config.build_controller(behaviors, TracingAnimator, events)?;

    for step in SCRIPT {
        match step {
            Some(name) => {
                let outcome = controller.change_animation(*name)?;
                tracing::info!(target: "demo", "{} -> {:?}", name, outcome);
            }
            None => {
                controller.on_snap_animation_end();
            }
        }
    }

    tracing::info!(target: "demo", "Final animation: {}", controller.current_animation_name());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Animator failed: {}", e);
        std::process::exit(1);
    }
}
