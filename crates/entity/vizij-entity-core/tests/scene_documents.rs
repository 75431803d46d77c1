use vizij_entity_core::{
    parse_document, value_or_undefined, Color, EntityCollection, HorizontalOrigin, SimTime,
};

fn t(seconds: f64) -> SimTime {
    SimTime::from_seconds(seconds).unwrap()
}

#[test]
fn every_fixture_scene_parses() {
    for name in vizij_test_fixtures::scenes::keys() {
        let json = vizij_test_fixtures::scenes::json(&name).unwrap();
        let doc = parse_document(&json).unwrap_or_else(|e| panic!("scene {name}: {e}"));
        assert!(!doc.entities.is_empty(), "scene {name} has no entities");
    }
}

#[test]
fn satellites_scene_loads_as_one_batch() {
    let json = vizij_test_fixtures::scenes::json("satellites").unwrap();
    let doc = parse_document(&json).unwrap();
    assert_eq!(doc.name.as_deref(), Some("satellites"));

    let mut collection = EntityCollection::new();
    let batches = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = batches.clone();
    collection.subscribe(move |change| sink.borrow_mut().push(change.added.len()));

    let added = doc.load_into(&mut collection).unwrap();
    assert_eq!(added.len(), 4);
    assert_eq!(*batches.borrow(), vec![4]);

    let sat2 = collection.get_by_id(&"sat-2".into()).unwrap().borrow();
    let bb = sat2.billboard.as_ref().unwrap();
    assert_eq!(
        value_or_undefined(bb.horizontal_origin.as_deref(), t(0.0)),
        Some(HorizontalOrigin::Left)
    );
    assert!(value_or_undefined(bb.image.as_deref(), t(6.0)).is_none());

    let sat1 = collection.get_by_id(&"sat-1".into()).unwrap().borrow();
    let color = value_or_undefined(sat1.billboard.as_ref().unwrap().color.as_deref(), t(0.0));
    assert_eq!(color, Some(Color::new(1.0, 0.5, 0.0, 1.0)));

    let ground = collection.get_by_id(&"ground".into()).unwrap().borrow();
    assert!(ground.is_available(t(3.0)));
    assert!(!ground.is_available(t(5.0)));
}
