use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vizij_entity_core::{
    BillboardGraphics, Cartesian3, ConstantProperty, Entity, EntityCollection, ImageHandle,
    SampledProperty, SimTime,
};
use vizij_visualizer_core::{Billboard, BillboardVisualizer, Scene, SharedHost};

fn populate(entities: &mut EntityCollection, count: usize) {
    entities.suspend_events();
    for i in 0..count {
        let offset = i as f64;
        let path = SampledProperty::new()
            .with_sample(SimTime::ZERO, Cartesian3::new(offset, 0.0, 0.0))
            .with_sample(
                SimTime::ZERO.add_seconds(10.0),
                Cartesian3::new(offset, 10.0, 0.0),
            );
        let entity = Entity::new(format!("e{i}"))
            .with_position(path)
            .with_billboard(
                BillboardGraphics::default()
                    .with_image(ConstantProperty::new(ImageHandle::new("marker.png"))),
            );
        let _ = entities.add(entity);
    }
    let _ = entities.resume_events();
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("billboard_update");
    for &count in &[100usize, 1_000, 10_000] {
        let scene: SharedHost<Billboard> = Scene::new().into_shared();
        let entities = EntityCollection::new().into_shared();
        populate(&mut entities.borrow_mut(), count);
        let mut vis = match BillboardVisualizer::new(scene, entities.clone()) {
            Ok(vis) => vis,
            Err(err) => panic!("visualizer setup failed: {err}"),
        };

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut frame = 0u32;
            b.iter(|| {
                frame = (frame + 1) % 600;
                let time = SimTime::ZERO.add_seconds(f64::from(frame) / 60.0);
                black_box(vis.update(time).ok());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
