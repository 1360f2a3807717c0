use character_animator::animation::*;
use character_animator::config::AnimatorConfig;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<AnimationEvent>>>;

fn recording_events() -> (AnimationEvents, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let mut events = AnimationEvents::new();
    let changes = log.clone();
    events.on_animation_change(move |name| {
        changes
            .lock()
            .unwrap()
            .push(AnimationEvent::AnimationChanged(name))
    });
    let snaps = log.clone();
    events.on_snap_end(move || snaps.lock().unwrap().push(AnimationEvent::SnapEnded));
    (events, log)
}

fn drain(log: &Log) -> Vec<AnimationEvent> {
    std::mem::take(&mut *log.lock().unwrap())
}

#[test]
fn test_idle_walk_attack_scenario() -> anyhow::Result<()> {
    // Idle 使用 snap 播放作为启动动画
    let registry = AnimationRegistry::build(
        vec![
            AnimationEntry::snap(AnimationName::Idle, "idle"),
            AnimationEntry::crossfade(AnimationName::Walk, "walk", 0.3, 0.0),
            AnimationEntry::snap(AnimationName::AttackOne, "attack_1"),
        ],
        &SpecialBehaviors::new(),
    )?;
    let recorder = RecordingAnimator::new();
    let (events, log) = recording_events();
    let mut controller = AnimationController::new(
        registry,
        SpecialBehaviors::new(),
        recorder.clone(),
        events,
        AnimationName::Idle,
    )?;

    // 启动
    assert_eq!(controller.current_animation_name(), AnimationName::Idle);
    assert_eq!(drain(&log), vec![AnimationEvent::AnimationChanged(AnimationName::Idle)]);

    // Walk
    assert_eq!(
        controller.change_animation(AnimationName::Walk)?,
        TransitionOutcome::Applied(AnimationName::Walk)
    );
    assert_eq!(
        recorder.last_call(),
        Some(AnimatorCall::Crossfade {
            clip: ClipHandle::new("walk"),
            duration: 0.3,
            start_offset: 0.0,
            target_offset: 0.0,
        })
    );
    assert_eq!(drain(&log), vec![AnimationEvent::AnimationChanged(AnimationName::Walk)]);

    // AttackOne
    controller.change_animation(AnimationName::AttackOne)?;
    assert_eq!(controller.current_animation_name(), AnimationName::AttackOne);
    assert_eq!(
        recorder.last_call(),
        Some(AnimatorCall::Play(ClipHandle::new("attack_1")))
    );
    assert_eq!(
        drain(&log),
        vec![AnimationEvent::AnimationChanged(AnimationName::AttackOne)]
    );

    // snap 期间请求 Walk 被忽略
    let calls = recorder.len();
    assert_eq!(
        controller.change_animation(AnimationName::Walk)?,
        TransitionOutcome::Ignored
    );
    assert_eq!(controller.current_animation_name(), AnimationName::AttackOne);
    assert_eq!(recorder.len(), calls);
    assert!(drain(&log).is_empty());

    // 动画事件触发 snap 结束
    controller.on_snap_animation_end();
    assert_eq!(controller.current_animation_name(), AnimationName::Walk);
    assert_eq!(
        recorder.last_call(),
        Some(AnimatorCall::Crossfade {
            clip: ClipHandle::new("walk"),
            duration: 0.3,
            start_offset: 0.0,
            target_offset: 0.0,
        })
    );
    assert_eq!(
        drain(&log),
        vec![
            AnimationEvent::SnapEnded,
            AnimationEvent::AnimationChanged(AnimationName::Walk)
        ]
    );
    Ok(())
}

#[test]
fn test_config_file_to_running_controller() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("animator.toml");
    std::fs::write(
        &path,
        r#"
default_animation = "Idle"

[[animations]]
name = "Idle"
clip = "idle"
transition = "Crossfade"
cross_fade_time = 0.25

[[animations]]
name = "AttackOne"
clip = "attack_1"
transition = "Snap"

[[animations]]
name = "AttackTwo"
clip = "attack_2"
transition = "Snap"

[[animations]]
name = "AttackThree"
transition = "Special"
special_behavior = "combo"
"#,
    )?;

    let config = AnimatorConfig::from_file(&path)?;
    let behaviors = SpecialBehaviors::new().with(
        "combo",
        ComboBehavior::new(vec![AnimationName::AttackOne, AnimationName::AttackTwo]),
    );
    let mut events = AnimationEvents::new();
    let receiver = events.subscribe();
    let mut controller = config.build_controller(behaviors, RecordingAnimator::new(), events)?;

    assert_eq!(
        controller.change_animation(AnimationName::AttackThree)?,
        TransitionOutcome::Applied(AnimationName::AttackOne)
    );
    controller.on_snap_animation_end();
    assert_eq!(
        controller.change_animation(AnimationName::AttackThree)?,
        TransitionOutcome::Applied(AnimationName::AttackTwo)
    );

    let received: Vec<_> = receiver.try_iter().collect();
    assert_eq!(
        received,
        vec![
            AnimationEvent::AnimationChanged(AnimationName::Idle),
            AnimationEvent::AnimationChanged(AnimationName::AttackOne),
            AnimationEvent::SnapEnded,
            AnimationEvent::AnimationChanged(AnimationName::Idle),
            AnimationEvent::AnimationChanged(AnimationName::AttackTwo),
        ]
    );
    Ok(())
}

#[test]
fn test_saved_config_reloads() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = AnimatorConfig::default();

    let toml_path = dir.path().join("animator.toml");
    config.save_toml(&toml_path)?;
    assert_eq!(AnimatorConfig::from_file(&toml_path)?, config);

    let json_path = dir.path().join("animator.json");
    config.save_json(&json_path)?;
    assert_eq!(AnimatorConfig::from_file(&json_path)?, config);
    Ok(())
}

#[test]
fn test_ecs_driver_integration() {
    use bevy_ecs::prelude::*;

    let mut world = World::new();
    let controller = AnimatorConfig::default()
        .build_controller(
            SpecialBehaviors::new(),
            RecordingAnimator::new(),
            AnimationEvents::new(),
        )
        .unwrap();
    let character = world.spawn((controller, AnimationRequests::new())).id();

    let mut schedule = Schedule::default();
    schedule.add_systems(animation_request_system);

    world
        .get_mut::<AnimationRequests>(character)
        .unwrap()
        .request(AnimationName::Damage);
    schedule.run(&mut world);
    assert!(world
        .get::<AnimationController>(character)
        .unwrap()
        .is_snap_locked());

    {
        let mut requests = world.get_mut::<AnimationRequests>(character).unwrap();
        requests.request(AnimationName::Run);
        requests.snap_ended();
        requests.request(AnimationName::Run);
    }
    schedule.run(&mut world);

    let controller = world.get::<AnimationController>(character).unwrap();
    assert_eq!(controller.current_animation_name(), AnimationName::Run);
    assert_eq!(controller.prior_animation().name, AnimationName::Idle);
}
