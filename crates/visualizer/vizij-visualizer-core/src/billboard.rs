//! Billboard primitive: a screen-facing image anchored at a 3D position.

use vizij_entity_core::{
    Cartesian2, Cartesian3, Color, EntityId, HorizontalOrigin, ImageHandle, NearFarScalar,
    VerticalOrigin,
};

use crate::primitive::{Primitive, PrimitiveCollection, SharedPrimitives};

pub type BillboardCollection = PrimitiveCollection<Billboard>;
pub type SharedBillboards = SharedPrimitives<Billboard>;

/// Render-side billboard state.
///
/// Setters record a dirty flag only when the stored value actually changes, so a
/// renderer can skip re-uploading primitives that were written with identical values.
#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
    index: usize,
    owner: Option<EntityId>,
    show: bool,
    image: Option<ImageHandle>,
    position: Cartesian3,
    color: Color,
    eye_offset: Cartesian3,
    pixel_offset: Cartesian2,
    scale: f64,
    rotation: f64,
    aligned_axis: Cartesian3,
    horizontal_origin: HorizontalOrigin,
    vertical_origin: VerticalOrigin,
    width: Option<f64>,
    height: Option<f64>,
    scale_by_distance: Option<NearFarScalar>,
    translucency_by_distance: Option<NearFarScalar>,
    pixel_offset_scale_by_distance: Option<NearFarScalar>,
    dirty: bool,
}

impl Default for Billboard {
    fn default() -> Self {
        Self {
            index: 0,
            owner: None,
            show: true,
            image: None,
            position: Cartesian3::ZERO,
            color: Color::WHITE,
            eye_offset: Cartesian3::ZERO,
            pixel_offset: Cartesian2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            aligned_axis: Cartesian3::ZERO,
            horizontal_origin: HorizontalOrigin::Center,
            vertical_origin: VerticalOrigin::Center,
            width: None,
            height: None,
            scale_by_distance: None,
            translucency_by_distance: None,
            pixel_offset_scale_by_distance: None,
            dirty: true,
        }
    }
}

#[inline]
fn assign<T: PartialEq>(slot: &mut T, value: T, dirty: &mut bool) {
    if *slot != value {
        *slot = value;
        *dirty = true;
    }
}

macro_rules! billboard_attr {
    ($($field:ident, $setter:ident: $ty:ty;)*) => {
        impl Billboard {
            $(
                #[inline]
                pub fn $field(&self) -> $ty {
                    self.$field.clone()
                }

                #[inline]
                pub fn $setter(&mut self, value: $ty) {
                    assign(&mut self.$field, value, &mut self.dirty);
                }
            )*
        }
    };
}

billboard_attr! {
    show, set_show: bool;
    position, set_position: Cartesian3;
    color, set_color: Color;
    eye_offset, set_eye_offset: Cartesian3;
    pixel_offset, set_pixel_offset: Cartesian2;
    scale, set_scale: f64;
    rotation, set_rotation: f64;
    aligned_axis, set_aligned_axis: Cartesian3;
    horizontal_origin, set_horizontal_origin: HorizontalOrigin;
    vertical_origin, set_vertical_origin: VerticalOrigin;
    width, set_width: Option<f64>;
    height, set_height: Option<f64>;
    scale_by_distance, set_scale_by_distance: Option<NearFarScalar>;
    translucency_by_distance, set_translucency_by_distance: Option<NearFarScalar>;
    pixel_offset_scale_by_distance, set_pixel_offset_scale_by_distance: Option<NearFarScalar>;
}

impl Billboard {
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Option<ImageHandle>) {
        assign(&mut self.image, image, &mut self.dirty);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Primitive for Billboard {
    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    fn owner(&self) -> Option<&EntityId> {
        self.owner.as_ref()
    }

    fn set_owner(&mut self, owner: Option<EntityId>) {
        self.owner = owner;
    }

    fn is_shown(&self) -> bool {
        self.show
    }

    fn release(&mut self) {
        self.set_show(false);
        self.set_image(None);
        self.owner = None;
    }
}
