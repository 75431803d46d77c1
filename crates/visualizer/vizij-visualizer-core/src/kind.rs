//! Attribute groups a visualizer can reconcile.
//!
//! A [`GraphicsKind`] binds one attribute group of an entity to one primitive
//! type. The reconciliation engine is generic over it; the billboard group is the
//! only kind shipped here.

use std::fmt;

use vizij_entity_core::{
    value_or_default, value_or_default_into, value_or_undefined, value_or_undefined_into,
    BillboardGraphics, Cartesian2, Cartesian3, Color, Entity, HorizontalOrigin, ImageHandle,
    NearFarScalar, SimTime, VerticalOrigin,
};

use crate::billboard::Billboard;
use crate::primitive::Primitive;

/// Values sampled once per entity per frame before the attribute write.
#[derive(Debug, Clone)]
pub struct FrameSample<R> {
    pub time: SimTime,
    pub position: Cartesian3,
    pub resource: R,
}

pub trait GraphicsKind: 'static {
    /// The entity attribute group driving this kind.
    type Graphics;
    type Primitive: Primitive;
    /// The resource a shown primitive must reference (an image for billboards).
    type Resource;
    /// Reusable per-visualizer buffers for the attribute write.
    type Scratch: Default + fmt::Debug;

    /// Short name used in log lines.
    const NAME: &'static str;

    fn graphics(entity: &Entity) -> Option<&Self::Graphics>;

    /// Effective show flag of the group (default true).
    fn show(graphics: &Self::Graphics, time: SimTime) -> bool;

    /// The required resource at `time`; `None` hides the primitive.
    fn resource(graphics: &Self::Graphics, time: SimTime) -> Option<Self::Resource>;

    /// Write every attribute of a shown primitive, substituting defaults for
    /// attributes that are absent or not applicable.
    fn write(
        primitive: &mut Self::Primitive,
        graphics: &Self::Graphics,
        sample: FrameSample<Self::Resource>,
        scratch: &mut Self::Scratch,
    );
}

pub const DEFAULT_COLOR: Color = Color::WHITE;
pub const DEFAULT_EYE_OFFSET: Cartesian3 = Cartesian3::ZERO;
pub const DEFAULT_PIXEL_OFFSET: Cartesian2 = Cartesian2::ZERO;
pub const DEFAULT_SCALE: f64 = 1.0;
pub const DEFAULT_ROTATION: f64 = 0.0;
pub const DEFAULT_ALIGNED_AXIS: Cartesian3 = Cartesian3::ZERO;
pub const DEFAULT_HORIZONTAL_ORIGIN: HorizontalOrigin = HorizontalOrigin::Center;
pub const DEFAULT_VERTICAL_ORIGIN: VerticalOrigin = VerticalOrigin::Center;

/// Entities' billboard group rendered as [`Billboard`] primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct BillboardKind;

#[derive(Debug, Clone, Default)]
pub struct BillboardScratch {
    color: Color,
    eye_offset: Cartesian3,
    pixel_offset: Cartesian2,
    aligned_axis: Cartesian3,
    scale_by_distance: NearFarScalar,
    translucency_by_distance: NearFarScalar,
    pixel_offset_scale_by_distance: NearFarScalar,
}

impl GraphicsKind for BillboardKind {
    type Graphics = BillboardGraphics;
    type Primitive = Billboard;
    type Resource = ImageHandle;
    type Scratch = BillboardScratch;

    const NAME: &'static str = "billboard";

    fn graphics(entity: &Entity) -> Option<&BillboardGraphics> {
        entity.billboard.as_ref()
    }

    fn show(graphics: &BillboardGraphics, time: SimTime) -> bool {
        value_or_default(graphics.show.as_deref(), time, true)
    }

    fn resource(graphics: &BillboardGraphics, time: SimTime) -> Option<ImageHandle> {
        value_or_undefined(graphics.image.as_deref(), time)
    }

    fn write(
        billboard: &mut Billboard,
        g: &BillboardGraphics,
        sample: FrameSample<ImageHandle>,
        s: &mut BillboardScratch,
    ) {
        let time = sample.time;
        billboard.set_show(true);
        billboard.set_image(Some(sample.resource));
        billboard.set_position(sample.position);
        billboard.set_color(*value_or_default_into(
            g.color.as_deref(),
            time,
            &DEFAULT_COLOR,
            &mut s.color,
        ));
        billboard.set_eye_offset(*value_or_default_into(
            g.eye_offset.as_deref(),
            time,
            &DEFAULT_EYE_OFFSET,
            &mut s.eye_offset,
        ));
        billboard.set_pixel_offset(*value_or_default_into(
            g.pixel_offset.as_deref(),
            time,
            &DEFAULT_PIXEL_OFFSET,
            &mut s.pixel_offset,
        ));
        billboard.set_scale(value_or_default(g.scale.as_deref(), time, DEFAULT_SCALE));
        billboard.set_rotation(value_or_default(
            g.rotation.as_deref(),
            time,
            DEFAULT_ROTATION,
        ));
        billboard.set_aligned_axis(*value_or_default_into(
            g.aligned_axis.as_deref(),
            time,
            &DEFAULT_ALIGNED_AXIS,
            &mut s.aligned_axis,
        ));
        billboard.set_horizontal_origin(value_or_default(
            g.horizontal_origin.as_deref(),
            time,
            DEFAULT_HORIZONTAL_ORIGIN,
        ));
        billboard.set_vertical_origin(value_or_default(
            g.vertical_origin.as_deref(),
            time,
            DEFAULT_VERTICAL_ORIGIN,
        ));
        billboard.set_width(value_or_undefined(g.width.as_deref(), time));
        billboard.set_height(value_or_undefined(g.height.as_deref(), time));
        billboard.set_scale_by_distance(
            value_or_undefined_into(g.scale_by_distance.as_deref(), time, &mut s.scale_by_distance)
                .copied(),
        );
        billboard.set_translucency_by_distance(
            value_or_undefined_into(
                g.translucency_by_distance.as_deref(),
                time,
                &mut s.translucency_by_distance,
            )
            .copied(),
        );
        billboard.set_pixel_offset_scale_by_distance(
            value_or_undefined_into(
                g.pixel_offset_scale_by_distance.as_deref(),
                time,
                &mut s.pixel_offset_scale_by_distance,
            )
            .copied(),
        );
    }
}
