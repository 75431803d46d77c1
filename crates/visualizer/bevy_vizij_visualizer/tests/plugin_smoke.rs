use bevy::prelude::*;
use bevy_vizij_visualizer::{
    BillboardSprites, ClockSettings, SimulationClock, VisualizerFrame, VisualizerWorld,
    VizijBillboard, VizijVisualizerPlugin,
};
use vizij_entity_core::{
    BillboardGraphics, Cartesian3, ConstantProperty, Entity as SimEntity, EntityId, ImageHandle,
    SimTime,
};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijVisualizerPlugin::default());
    app
}

fn sprites(app: &mut App) -> Vec<(VizijBillboard, Visibility, Transform)> {
    let mut q = app
        .world_mut()
        .query::<(&VizijBillboard, &Visibility, &Transform)>();
    q.iter(app.world())
        .map(|(b, v, t)| (b.clone(), *v, *t))
        .collect()
}

#[test]
fn plugin_inserts_world_and_clock() {
    let app = app();
    assert!(app.world().get_non_send_resource::<VisualizerWorld>().is_some());
    let clock = app.world().get_resource::<SimulationClock>().unwrap();
    assert_eq!(clock.current, SimTime::ZERO);
    assert_eq!(clock.multiplier, 1.0);
}

#[test]
fn clock_starts_at_configured_time() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(VizijVisualizerPlugin {
            clock: ClockSettings {
                start: SimTime::from_seconds(42.0).unwrap(),
                multiplier: 10.0,
            },
            ..Default::default()
        });
    let clock = app.world().get_resource::<SimulationClock>().unwrap();
    assert_eq!(clock.current.as_seconds(), 42.0);
    assert_eq!(clock.multiplier, 10.0);
}

#[test]
fn billboards_become_sprites_and_hide_with_their_entity() {
    let mut app = app();
    {
        let world = app.world().non_send_resource::<VisualizerWorld>();
        world
            .add_entity(
                SimEntity::new("pin")
                    .with_position(ConstantProperty::new(Cartesian3::new(3.0, 4.0, 0.0)))
                    .with_billboard(
                        BillboardGraphics::default()
                            .with_image(ConstantProperty::new(ImageHandle::new("pin.png"))),
                    ),
            )
            .unwrap();
    }

    app.update();
    let frame = *app.world().resource::<VisualizerFrame>();
    assert_eq!(frame.frames, 1);
    assert!(frame.complete);

    let spawned = sprites(&mut app);
    assert_eq!(spawned.len(), 1);
    let (marker, visibility, transform) = &spawned[0];
    assert_eq!(marker.owner.as_deref(), Some("pin"));
    assert_eq!(*visibility, Visibility::Inherited);
    assert_eq!(transform.translation, Vec3::new(3.0, 4.0, 0.0));

    {
        let world = app.world().non_send_resource::<VisualizerWorld>();
        world
            .entities()
            .borrow_mut()
            .modify(&EntityId::new("pin"), |e| {
                if let Some(bb) = e.billboard.as_mut() {
                    bb.show = Some(Box::new(ConstantProperty::new(false)));
                }
            })
            .unwrap();
    }
    app.update();

    let spawned = sprites(&mut app);
    assert_eq!(spawned.len(), 1, "slots are reused, never respawned");
    assert_eq!(spawned[0].1, Visibility::Hidden);
    assert_eq!(spawned[0].0.owner, None);
}

#[test]
fn destroying_visualizers_despawns_their_sprites() {
    let mut app = app();
    app.world()
        .non_send_resource::<VisualizerWorld>()
        .add_entity(
            SimEntity::new("pin")
                .with_position(ConstantProperty::new(Cartesian3::new(1.0, 2.0, 0.0)))
                .with_billboard(
                    BillboardGraphics::default()
                        .with_image(ConstantProperty::new(ImageHandle::new("pin.png"))),
                ),
        )
        .unwrap();
    app.update();
    assert_eq!(sprites(&mut app).len(), 1);
    assert_eq!(app.world().resource::<BillboardSprites>().map.len(), 1);

    app.world_mut()
        .non_send_resource_mut::<VisualizerWorld>()
        .visualizers_mut()
        .destroy()
        .unwrap();
    app.update();

    let visible = sprites(&mut app)
        .into_iter()
        .filter(|(_, v, _)| *v != Visibility::Hidden)
        .count();
    assert_eq!(visible, 0);
    assert!(sprites(&mut app).is_empty());
    assert!(app.world().resource::<BillboardSprites>().map.is_empty());
}

#[test]
fn fixture_scene_loads_through_the_world() {
    let mut app = app();
    let json = vizij_test_fixtures::scenes::json("satellites").unwrap();
    let added = app
        .world()
        .non_send_resource::<VisualizerWorld>()
        .load_document(&json)
        .unwrap();
    assert_eq!(added.len(), 4);

    // First frame runs at the start time with a zero delta.
    app.update();
    let shown = sprites(&mut app)
        .into_iter()
        .filter(|(_, v, _)| *v != Visibility::Hidden)
        .count();
    assert_eq!(shown, 3);
}
