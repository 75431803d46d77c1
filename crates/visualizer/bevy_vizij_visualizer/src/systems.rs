use bevy::prelude::*;
use bevy::sprite::Anchor;
use hashbrown::HashSet;
use vizij_entity_core::{HorizontalOrigin, VerticalOrigin};
use vizij_visualizer_core::{Billboard, Primitive};

use crate::components::VizijBillboard;
use crate::resources::{BillboardSprites, SimulationClock, VisualizerFrame, VisualizerWorld};

pub fn advance_clock_system(time: Res<Time>, mut clock: ResMut<SimulationClock>) {
    if clock.paused {
        return;
    }
    let step = time.delta_seconds_f64() * clock.multiplier;
    clock.current = clock.current.add_seconds(step);
}

pub fn update_visualizers_system(
    mut world: NonSendMut<VisualizerWorld>,
    clock: Res<SimulationClock>,
    mut frame: ResMut<VisualizerFrame>,
) {
    match world.visualizers_mut().update(clock.current) {
        Ok(complete) => {
            frame.complete = complete;
            frame.frames += 1;
        }
        Err(err) => warn!("visualizer update at {} failed: {err}", clock.current),
    }
}

fn anchor_for(horizontal: HorizontalOrigin, vertical: VerticalOrigin) -> Anchor {
    match (vertical, horizontal) {
        (VerticalOrigin::Center, HorizontalOrigin::Center) => Anchor::Center,
        (VerticalOrigin::Center, HorizontalOrigin::Left) => Anchor::CenterLeft,
        (VerticalOrigin::Center, HorizontalOrigin::Right) => Anchor::CenterRight,
        (VerticalOrigin::Bottom, HorizontalOrigin::Center) => Anchor::BottomCenter,
        (VerticalOrigin::Bottom, HorizontalOrigin::Left) => Anchor::BottomLeft,
        (VerticalOrigin::Bottom, HorizontalOrigin::Right) => Anchor::BottomRight,
        (VerticalOrigin::Top, HorizontalOrigin::Center) => Anchor::TopCenter,
        (VerticalOrigin::Top, HorizontalOrigin::Left) => Anchor::TopLeft,
        (VerticalOrigin::Top, HorizontalOrigin::Right) => Anchor::TopRight,
    }
}

/// Copy billboard state onto sprite components.
pub fn apply_billboard(
    b: &Billboard,
    sprite: &mut Sprite,
    transform: &mut Transform,
    visibility: &mut Visibility,
) {
    *visibility = if b.show() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    let p = b.position();
    let offset = b.pixel_offset();
    // Pixel offsets are screen space with y pointing down.
    transform.translation = Vec3::new(
        (p.x + offset.x) as f32,
        (p.y - offset.y) as f32,
        p.z as f32,
    );
    transform.rotation = Quat::from_rotation_z(b.rotation() as f32);
    transform.scale = Vec3::splat(b.scale() as f32);

    let c = b.color();
    sprite.color = Color::srgba(c.red, c.green, c.blue, c.alpha);
    sprite.anchor = anchor_for(b.horizontal_origin(), b.vertical_origin());
    sprite.custom_size = match (b.width(), b.height()) {
        (Some(w), Some(h)) => Some(Vec2::new(w as f32, h as f32)),
        _ => None,
    };
}

fn texture_for(b: &Billboard, assets: Option<&AssetServer>) -> Handle<Image> {
    match (assets, b.image()) {
        (Some(assets), Some(image)) => assets.load(image.as_str().to_string()),
        _ => Handle::default(),
    }
}

/// Spawn one sprite per billboard slot and refresh sprites whose billboard
/// changed since the last pass. Sprites of collections that left the scene are
/// despawned.
pub fn sync_billboard_sprites_system(
    mut commands: Commands,
    world: NonSend<VisualizerWorld>,
    assets: Option<Res<AssetServer>>,
    mut sprites: ResMut<BillboardSprites>,
    mut query: Query<(
        &mut Sprite,
        &mut Transform,
        &mut Visibility,
        &mut Handle<Image>,
        &mut VizijBillboard,
    )>,
) {
    let scene = world.scene().borrow();
    let mut live = HashSet::with_capacity(scene.billboard_collections().len());
    for collection in scene.billboard_collections() {
        let mut collection = collection.borrow_mut();
        let key = collection.id();
        live.insert(key);
        for slot in 0..collection.len() {
            let Some(billboard) = collection.get_mut(slot) else {
                continue;
            };
            if !billboard.take_dirty() {
                continue;
            }
            let texture = texture_for(billboard, assets.as_deref());
            let owner = billboard.owner().map(|id| id.to_string());

            match sprites.map.get(&(key, slot)) {
                Some(&entity) => {
                    let Ok((mut sprite, mut transform, mut visibility, mut handle, mut marker)) =
                        query.get_mut(entity)
                    else {
                        warn!("sprite for billboard slot {slot} is gone");
                        continue;
                    };
                    apply_billboard(billboard, &mut sprite, &mut transform, &mut visibility);
                    *handle = texture;
                    marker.owner = owner;
                }
                None => {
                    let mut bundle = SpriteBundle {
                        texture,
                        ..default()
                    };
                    apply_billboard(
                        billboard,
                        &mut bundle.sprite,
                        &mut bundle.transform,
                        &mut bundle.visibility,
                    );
                    let entity = commands
                        .spawn((bundle, VizijBillboard { slot, owner }))
                        .id();
                    sprites.map.insert((key, slot), entity);
                    debug!("spawned sprite for billboard slot {slot}");
                }
            }
        }
    }

    sprites.map.retain(|(key, slot), entity| {
        if live.contains(key) {
            return true;
        }
        if let Some(mut sprite) = commands.get_entity(*entity) {
            sprite.despawn();
        }
        debug!("despawned sprite for billboard slot {slot} of a detached collection");
        false
    });
}
