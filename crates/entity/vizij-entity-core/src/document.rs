//! Scene documents: JSON descriptions of entities and their sampled attributes.
//!
//! Every property may be written three ways:
//! - a constant: `"scale": 2.0`
//! - samples: `"position": { "samples": [{ "time": 0, "value": [0, 0, 0] }], "interpolation": "linear" }`
//! - intervals: `"show": { "intervals": [{ "start": 0, "stop": 10, "value": true }] }`
//!
//! Vectors and colours are arrays, origins are lowercase strings, images are strings.

use std::fmt;

use hashbrown::HashSet;
use serde::Deserialize;

use crate::collection::EntityCollection;
use crate::entity::{Entity, EntityId, EntityRef};
use crate::error::EntityError;
use crate::graphics::{BillboardGraphics, BoxedProperty};
use crate::interp::Interpolate;
use crate::property::{ConstantProperty, TimeIntervalCollectionProperty};
use crate::sampled::{ExtrapolationType, InterpolationAlgorithm, SampledProperty};
use crate::time::{SimTime, TimeInterval, TimeIntervalCollection};
use crate::value::{
    Cartesian2, Cartesian3, Color, HorizontalOrigin, ImageHandle, NearFarScalar, VerticalOrigin,
};

/// Parsed scene: entities ready to be added to a collection.
#[derive(Debug)]
pub struct SceneDocument {
    pub name: Option<String>,
    pub entities: Vec<Entity>,
}

impl SceneDocument {
    /// Add every entity to `collection` as a single change batch.
    ///
    /// Fails without touching the collection if any id is already present.
    pub fn load_into(
        self,
        collection: &mut EntityCollection,
    ) -> Result<Vec<EntityRef>, EntityError> {
        if let Some(existing) = self
            .entities
            .iter()
            .find(|e| collection.contains(e.id()))
        {
            return Err(EntityError::DuplicateId(existing.id().clone()));
        }

        collection.suspend_events();
        let mut added = Vec::with_capacity(self.entities.len());
        let mut result = Ok(());
        for entity in self.entities {
            match collection.add(entity) {
                Ok(e) => added.push(e),
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        collection.resume_events()?;
        result.map(|_| added)
    }
}

/// Parse a scene document (see module docs for the format).
pub fn parse_document(json: &str) -> Result<SceneDocument, EntityError> {
    let raw: RawDocument =
        serde_json::from_str(json).map_err(|e| EntityError::Document(format!("parse error: {e}")))?;

    let mut seen: HashSet<EntityId> = HashSet::with_capacity(raw.entities.len());
    let mut entities = Vec::with_capacity(raw.entities.len());
    for re in raw.entities {
        let entity = to_entity(re)?;
        if !seen.insert(entity.id().clone()) {
            return Err(EntityError::Document(format!(
                "duplicate entity id '{}'",
                entity.id()
            )));
        }
        entities.push(entity);
    }

    Ok(SceneDocument {
        name: raw.name,
        entities,
    })
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    entities: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntity {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    availability: Option<Vec<TimeInterval>>,
    #[serde(default)]
    position: Option<RawProperty<Cartesian3>>,
    #[serde(default)]
    billboard: Option<RawBillboard>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
struct RawBillboard {
    show: Option<RawProperty<bool>>,
    image: Option<RawProperty<ImageHandle>>,
    color: Option<RawProperty<Color>>,
    eye_offset: Option<RawProperty<Cartesian3>>,
    pixel_offset: Option<RawProperty<Cartesian2>>,
    scale: Option<RawProperty<f64>>,
    rotation: Option<RawProperty<f64>>,
    aligned_axis: Option<RawProperty<Cartesian3>>,
    horizontal_origin: Option<RawProperty<HorizontalOrigin>>,
    vertical_origin: Option<RawProperty<VerticalOrigin>>,
    width: Option<RawProperty<f64>>,
    height: Option<RawProperty<f64>>,
    scale_by_distance: Option<RawProperty<NearFarScalar>>,
    translucency_by_distance: Option<RawProperty<NearFarScalar>>,
    pixel_offset_scale_by_distance: Option<RawProperty<NearFarScalar>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawProperty<T> {
    Sampled {
        samples: Vec<RawSample<T>>,
        #[serde(default)]
        interpolation: InterpolationAlgorithm,
        #[serde(default)]
        extrapolation: ExtrapolationType,
    },
    Intervals {
        intervals: Vec<RawInterval<T>>,
    },
    Constant(T),
}

#[derive(Debug, Deserialize)]
struct RawSample<T> {
    time: SimTime,
    value: T,
}

#[derive(Debug, Deserialize)]
struct RawInterval<T> {
    start: SimTime,
    stop: SimTime,
    value: T,
}

fn to_entity(re: RawEntity) -> Result<Entity, EntityError> {
    let id = re.id.map(EntityId::new).unwrap_or_else(EntityId::generate);
    let mut entity = Entity::new(id.clone());
    entity.name = re.name;

    if let Some(intervals) = re.availability {
        for interval in &intervals {
            if interval.start > interval.stop {
                return Err(EntityError::Document(format!(
                    "availability interval of '{id}' starts after it stops"
                )));
            }
        }
        entity.availability = Some(TimeIntervalCollection::from(intervals));
    }

    entity.position = convert(re.position, &id, "position")?;
    if let Some(rb) = re.billboard {
        entity.billboard = Some(to_billboard(rb, &id)?);
    }
    Ok(entity)
}

fn to_billboard(rb: RawBillboard, id: &EntityId) -> Result<BillboardGraphics, EntityError> {
    Ok(BillboardGraphics {
        show: convert(rb.show, id, "billboard.show")?,
        image: convert(rb.image, id, "billboard.image")?,
        color: convert(rb.color, id, "billboard.color")?,
        eye_offset: convert(rb.eye_offset, id, "billboard.eyeOffset")?,
        pixel_offset: convert(rb.pixel_offset, id, "billboard.pixelOffset")?,
        scale: convert(rb.scale, id, "billboard.scale")?,
        rotation: convert(rb.rotation, id, "billboard.rotation")?,
        aligned_axis: convert(rb.aligned_axis, id, "billboard.alignedAxis")?,
        horizontal_origin: convert(rb.horizontal_origin, id, "billboard.horizontalOrigin")?,
        vertical_origin: convert(rb.vertical_origin, id, "billboard.verticalOrigin")?,
        width: convert(rb.width, id, "billboard.width")?,
        height: convert(rb.height, id, "billboard.height")?,
        scale_by_distance: convert(rb.scale_by_distance, id, "billboard.scaleByDistance")?,
        translucency_by_distance: convert(
            rb.translucency_by_distance,
            id,
            "billboard.translucencyByDistance",
        )?,
        pixel_offset_scale_by_distance: convert(
            rb.pixel_offset_scale_by_distance,
            id,
            "billboard.pixelOffsetScaleByDistance",
        )?,
    })
}

fn convert<T>(
    raw: Option<RawProperty<T>>,
    id: &EntityId,
    what: &str,
) -> Result<Option<BoxedProperty<T>>, EntityError>
where
    T: Interpolate + fmt::Debug + 'static,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    let property: BoxedProperty<T> = match raw {
        RawProperty::Constant(value) => Box::new(ConstantProperty::new(value)),
        RawProperty::Sampled {
            samples,
            interpolation,
            extrapolation,
        } => {
            if samples.is_empty() {
                return Err(EntityError::Document(format!(
                    "{what} of '{id}' has an empty sample list"
                )));
            }
            let mut sampled = SampledProperty::new()
                .with_interpolation(interpolation)
                .with_extrapolation(extrapolation, extrapolation);
            sampled.add_samples(samples.into_iter().map(|s| (s.time, s.value)));
            Box::new(sampled)
        }
        RawProperty::Intervals { intervals } => {
            let mut property = TimeIntervalCollectionProperty::new();
            for ri in intervals {
                if ri.start > ri.stop {
                    return Err(EntityError::Document(format!(
                        "{what} of '{id}' has an interval that starts after it stops"
                    )));
                }
                property.add_interval(TimeInterval::new(ri.start, ri.stop), ri.value);
            }
            Box::new(property)
        }
    };
    Ok(Some(property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::value_or_undefined;

    fn t(s: f64) -> SimTime {
        SimTime::from_seconds(s).unwrap()
    }

    #[test]
    fn parses_constant_sampled_and_interval_forms() {
        let doc = parse_document(
            r#"{
                "entities": [{
                    "id": "sat",
                    "position": { "samples": [
                        { "time": 0, "value": [0, 0, 0] },
                        { "time": 10, "value": [10, 0, 0] }
                    ] },
                    "billboard": {
                        "image": "sat.png",
                        "scale": 2.0,
                        "show": { "intervals": [{ "start": 0, "stop": 5, "value": true }] }
                    }
                }]
            }"#,
        )
        .unwrap();
        let e = &doc.entities[0];
        assert_eq!(e.id().as_str(), "sat");
        assert_eq!(
            value_or_undefined(e.position.as_deref(), t(5.0)),
            Some(Cartesian3::new(5.0, 0.0, 0.0))
        );
        let bb = e.billboard.as_ref().unwrap();
        assert_eq!(value_or_undefined(bb.scale.as_deref(), t(99.0)), Some(2.0));
        assert_eq!(value_or_undefined(bb.show.as_deref(), t(6.0)), None);
    }

    #[test]
    fn rejects_empty_samples() {
        let err = parse_document(r#"{ "entities": [{ "id": "a", "position": { "samples": [] } }] }"#)
            .unwrap_err();
        assert!(matches!(err, EntityError::Document(msg) if msg.contains("empty sample list")));
    }

    #[test]
    fn rejects_unknown_billboard_fields() {
        let err = parse_document(r#"{ "entities": [{ "id": "a", "billboard": { "imgae": "x" } }] }"#)
            .unwrap_err();
        assert!(matches!(err, EntityError::Document(_)));
    }

    #[test]
    fn rejects_repeated_ids_within_a_document() {
        let err = parse_document(r#"{ "entities": [{ "id": "a" }, { "id": "b" }, { "id": "a" }] }"#)
            .unwrap_err();
        assert!(matches!(err, EntityError::Document(msg) if msg.contains("duplicate entity id 'a'")));
    }

    #[test]
    fn load_into_refuses_existing_ids() {
        let mut c = EntityCollection::new();
        c.add(Entity::new("a")).unwrap();
        let doc = parse_document(r#"{ "entities": [{ "id": "b" }, { "id": "a" }] }"#).unwrap();
        assert_eq!(
            doc.load_into(&mut c).unwrap_err(),
            EntityError::DuplicateId(EntityId::new("a"))
        );
        assert_eq!(c.len(), 1);
    }
}
