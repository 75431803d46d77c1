//! Graphics attribute groups attached to entities.

use crate::property::Property;
use crate::value::{
    Cartesian2, Cartesian3, Color, HorizontalOrigin, ImageHandle, NearFarScalar, VerticalOrigin,
};

pub type BoxedProperty<T> = Box<dyn Property<T>>;

/// Billboard attributes. Every field is optional; visualizers substitute defaults
/// for absent or not-applicable values.
#[derive(Debug, Default)]
pub struct BillboardGraphics {
    pub show: Option<BoxedProperty<bool>>,
    pub image: Option<BoxedProperty<ImageHandle>>,
    pub color: Option<BoxedProperty<Color>>,
    pub eye_offset: Option<BoxedProperty<Cartesian3>>,
    pub pixel_offset: Option<BoxedProperty<Cartesian2>>,
    pub scale: Option<BoxedProperty<f64>>,
    pub rotation: Option<BoxedProperty<f64>>,
    pub aligned_axis: Option<BoxedProperty<Cartesian3>>,
    pub horizontal_origin: Option<BoxedProperty<HorizontalOrigin>>,
    pub vertical_origin: Option<BoxedProperty<VerticalOrigin>>,
    pub width: Option<BoxedProperty<f64>>,
    pub height: Option<BoxedProperty<f64>>,
    pub scale_by_distance: Option<BoxedProperty<NearFarScalar>>,
    pub translucency_by_distance: Option<BoxedProperty<NearFarScalar>>,
    pub pixel_offset_scale_by_distance: Option<BoxedProperty<NearFarScalar>>,
}

impl BillboardGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show(mut self, p: impl Property<bool> + 'static) -> Self {
        self.show = Some(Box::new(p));
        self
    }

    pub fn with_image(mut self, p: impl Property<ImageHandle> + 'static) -> Self {
        self.image = Some(Box::new(p));
        self
    }

    pub fn with_color(mut self, p: impl Property<Color> + 'static) -> Self {
        self.color = Some(Box::new(p));
        self
    }

    pub fn with_eye_offset(mut self, p: impl Property<Cartesian3> + 'static) -> Self {
        self.eye_offset = Some(Box::new(p));
        self
    }

    pub fn with_pixel_offset(mut self, p: impl Property<Cartesian2> + 'static) -> Self {
        self.pixel_offset = Some(Box::new(p));
        self
    }

    pub fn with_scale(mut self, p: impl Property<f64> + 'static) -> Self {
        self.scale = Some(Box::new(p));
        self
    }

    pub fn with_rotation(mut self, p: impl Property<f64> + 'static) -> Self {
        self.rotation = Some(Box::new(p));
        self
    }

    pub fn with_aligned_axis(mut self, p: impl Property<Cartesian3> + 'static) -> Self {
        self.aligned_axis = Some(Box::new(p));
        self
    }

    pub fn with_horizontal_origin(mut self, p: impl Property<HorizontalOrigin> + 'static) -> Self {
        self.horizontal_origin = Some(Box::new(p));
        self
    }

    pub fn with_vertical_origin(mut self, p: impl Property<VerticalOrigin> + 'static) -> Self {
        self.vertical_origin = Some(Box::new(p));
        self
    }

    pub fn with_width(mut self, p: impl Property<f64> + 'static) -> Self {
        self.width = Some(Box::new(p));
        self
    }

    pub fn with_height(mut self, p: impl Property<f64> + 'static) -> Self {
        self.height = Some(Box::new(p));
        self
    }

    pub fn with_scale_by_distance(mut self, p: impl Property<NearFarScalar> + 'static) -> Self {
        self.scale_by_distance = Some(Box::new(p));
        self
    }

    pub fn with_translucency_by_distance(
        mut self,
        p: impl Property<NearFarScalar> + 'static,
    ) -> Self {
        self.translucency_by_distance = Some(Box::new(p));
        self
    }

    pub fn with_pixel_offset_scale_by_distance(
        mut self,
        p: impl Property<NearFarScalar> + 'static,
    ) -> Self {
        self.pixel_offset_scale_by_distance = Some(Box::new(p));
        self
    }
}
