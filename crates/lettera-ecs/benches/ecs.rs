use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lettera_ecs::{CommandBuffer, Component, Transform, World};
use std::hint::black_box;

pub struct Slot(pub usize);

impl Component for Slot {}

fn criterion_benchmark(c: &mut Criterion) {
    const SIZES: &[usize] = &[256, 1024, 4096, 16384];

    for size in SIZES {
        let size = *size;

        c.bench_function(&format!("spawn-{}", size), |b| {
            b.iter_batched(
                World::new,
                |mut world| {
                    for i in 0..size {
                        world.spawn((Slot(i), Transform::default()));
                    }
                    world
                },
                BatchSize::SmallInput,
            );
        });

        c.bench_function(&format!("deferred-spawn-{}", size), |b| {
            b.iter_batched(
                World::new,
                |mut world| {
                    let mut commands = CommandBuffer::new(&world);
                    for i in 0..size {
                        commands.spawn((Slot(i), Transform::default()));
                    }
                    commands.apply(&mut world);
                    world
                },
                BatchSize::SmallInput,
            );
        });

        let mut world = World::new();
        for i in 0..size {
            world.spawn((Slot(i), Transform::default()));
        }
        c.bench_function(&format!("query2-{}", size), move |b| {
            b.iter(|| {
                for next in world.query::<(Slot, Transform)>() {
                    black_box(next);
                }
            })
        });
    }
}

criterion_group!(ecs, criterion_benchmark);
criterion_main!(ecs);
