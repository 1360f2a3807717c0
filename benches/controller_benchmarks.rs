//! 动画控制器性能基准测试
//!
//! 测试过渡请求、snap 锁忽略路径与 ECS 请求系统的开销

use bevy_ecs::prelude::*;
use character_animator::animation::*;
use character_animator::config::AnimatorConfig;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// 空播放器，排除记录开销
struct NullAnimator;

impl Animator for NullAnimator {
    fn play(&mut self, _clip: &ClipHandle) {}

    fn crossfade(&mut self, _clip: &ClipHandle, _duration: f32, _start: f32, _target: f32) {}
}

fn controller() -> AnimationController {
    AnimatorConfig::default()
        .build_controller(SpecialBehaviors::new(), NullAnimator, AnimationEvents::new())
        .unwrap()
}

fn bench_crossfade_requests(c: &mut Criterion) {
    let mut controller = controller();
    c.bench_function("crossfade_walk_run", |b| {
        b.iter(|| {
            controller
                .change_animation(black_box(AnimationName::Walk))
                .unwrap();
            controller
                .change_animation(black_box(AnimationName::Run))
                .unwrap();
        })
    });
}

fn bench_snap_cycle(c: &mut Criterion) {
    let mut controller = controller();
    c.bench_function("snap_ignore_restore", |b| {
        b.iter(|| {
            controller
                .change_animation(black_box(AnimationName::AttackOne))
                .unwrap();
            controller
                .change_animation(black_box(AnimationName::Walk))
                .unwrap();
            controller.on_snap_animation_end();
        })
    });
}

fn bench_request_system(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation_request_system");

    for count in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let mut world = World::new();
            for _ in 0..count {
                world.spawn((controller(), AnimationRequests::new()));
            }
            let mut schedule = Schedule::default();
            schedule.add_systems(animation_request_system);

            b.iter(|| {
                let mut query = world.query::<&mut AnimationRequests>();
                for mut requests in query.iter_mut(&mut world) {
                    requests.request(AnimationName::Walk);
                    requests.request(AnimationName::Idle);
                }
                schedule.run(&mut world);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_crossfade_requests,
    bench_snap_cycle,
    bench_request_system
);
criterion_main!(benches);
