//! Unit tests for ta-world.

use ta_core::{EntityId, ModuleId};

use crate::{EntitySpec, World, WorldBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default, PartialEq, Debug)]
struct Fuel(u32);

#[derive(Default, PartialEq, Debug)]
struct Locked(bool);

/// hall ⊃ {lamp, chest ⊃ coin}
fn small_world() -> World {
    WorldBuilder::new(7)
        .register_component::<Fuel>()
        .entity(EntitySpec::new("hall", "room"))
        .entity(
            EntitySpec::new("lamp", "item")
                .at("hall")
                .behavior("game/lamp")
                .behavior("core/light"),
        )
        .entity(EntitySpec::new("chest", "container").at("hall"))
        .entity(EntitySpec::new("coin", "item").at("chest"))
        .build()
        .unwrap()
}

// ── ComponentMap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod component_map {
    use super::*;
    use crate::ComponentMap;

    #[test]
    fn absent_entries_read_as_default() {
        let mut map = ComponentMap::new();
        map.register::<Fuel>();
        let table = map.table::<Fuel>().expect("Fuel should be registered");
        assert_eq!(table.get(EntityId(7)), &Fuel(0));
        assert!(table.is_empty());
    }

    #[test]
    fn first_write_creates_the_entry() {
        let mut map = ComponentMap::new();
        map.register::<Fuel>();
        let table = map.table_mut::<Fuel>().unwrap();
        table.get_mut(EntityId(2)).0 += 4;
        assert!(table.has(EntityId(2)));
        assert!(!table.has(EntityId(1)));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(EntityId(2), &Fuel(4))]);
        assert_eq!(table.remove(EntityId(2)), Some(Fuel(4)));
        assert_eq!(table.get(EntityId(2)), &Fuel(0));
    }

    #[test]
    fn double_register_keeps_entries() {
        let mut map = ComponentMap::new();
        map.register::<Fuel>();
        map.table_mut::<Fuel>().unwrap().insert(EntityId(0), Fuel(5));
        map.register::<Fuel>();
        assert_eq!(map.table::<Fuel>().unwrap().get(EntityId(0)), &Fuel(5));
        assert_eq!(map.type_count(), 1);
    }

    #[test]
    fn two_types_do_not_interfere() {
        let mut map = ComponentMap::new();
        map.register::<Fuel>();
        map.register::<Locked>();
        assert_eq!(map.type_count(), 2);
        map.table_mut::<Locked>().unwrap().insert(EntityId(1), Locked(true));
        assert!(map.table::<Fuel>().unwrap().is_empty());
    }

    #[test]
    fn unregistered_returns_none() {
        let map = ComponentMap::new();
        assert!(map.table::<Fuel>().is_none());
        assert!(!map.contains::<Fuel>());
    }
}

// ── EntityStore / WorldBuilder ────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;
    use crate::WorldError;

    #[test]
    fn ids_follow_insertion_order() {
        let world = small_world();
        assert_eq!(world.entities.len(), 4);
        assert_eq!(world.entities.find("hall"), Some(EntityId(0)));
        assert_eq!(world.entities.find("coin"), Some(EntityId(3)));
        assert_eq!(world.entities.name(EntityId(1)), Some("lamp"));
        assert!(world.entities.is_kind(EntityId(2), "container"));
    }

    #[test]
    fn behaviors_list_keeps_order() {
        let world = small_world();
        let lamp = world.entities.find("lamp").unwrap();
        let list: Vec<&str> =
            world.entities.behaviors(lamp).unwrap().iter().map(ModuleId::as_str).collect();
        assert_eq!(list, vec!["game/lamp", "core/light"]);
        assert_eq!(world.entities.behaviors(EntityId(0)).unwrap(), &[] as &[ModuleId]);
        assert!(world.entities.behaviors(EntityId(99)).is_none());
    }

    #[test]
    fn locations_and_contents() {
        let mut world = small_world();
        let hall = world.entities.find("hall").unwrap();
        let chest = world.entities.find("chest").unwrap();
        let coin = world.entities.find("coin").unwrap();
        assert_eq!(world.entities.location(hall), None);
        assert_eq!(world.entities.location(coin), Some(chest));

        assert!(world.entities.move_to(coin, hall));
        let in_hall: Vec<EntityId> = world.entities.contents(hall).collect();
        assert_eq!(in_hall, vec![EntityId(1), chest, coin]);
        assert!(!world.entities.move_to(coin, EntityId(42)));
    }

    #[test]
    fn components_are_sparse_per_entity() {
        let mut world = small_world();
        let lamp = world.entities.find("lamp").unwrap();
        let coin = world.entities.find("coin").unwrap();
        assert_eq!(world.entities.get::<Fuel>(coin), Some(&Fuel(0)));
        *world.entities.get_mut::<Fuel>(lamp).unwrap() = Fuel(10);
        assert_eq!(world.entities.get::<Fuel>(lamp), Some(&Fuel(10)));
        assert_eq!(world.entities.component::<Fuel>().unwrap().len(), 1);
        assert!(world.entities.get::<Locked>(lamp).is_none());
    }

    #[test]
    fn unknown_entity_has_no_component() {
        let mut world = small_world();
        assert!(world.entities.get::<Fuel>(EntityId(99)).is_none());
        assert!(world.entities.get_mut::<Fuel>(EntityId(99)).is_none());
        assert!(world.entities.component::<Fuel>().unwrap().is_empty());
    }

    #[test]
    fn duplicate_name_rejected() {
        let result = WorldBuilder::new(0)
            .entity(EntitySpec::new("hall", "room"))
            .entity(EntitySpec::new("hall", "room"))
            .build();
        assert!(matches!(result, Err(WorldError::DuplicateEntity(n)) if n == "hall"));
    }

    #[test]
    fn unknown_location_rejected() {
        let result = WorldBuilder::new(0)
            .entity(EntitySpec::new("lamp", "item").at("nowhere"))
            .build();
        assert!(matches!(result, Err(WorldError::UnknownLocation { .. })));
    }

    #[test]
    fn forward_location_reference_allowed() {
        let world = WorldBuilder::new(0)
            .entity(EntitySpec::new("lamp", "item").at("hall"))
            .entity(EntitySpec::new("hall", "room"))
            .build()
            .unwrap();
        assert_eq!(world.entities.location(EntityId(0)), Some(EntityId(1)));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::{WorldError, load_entities_csv, load_entities_reader};

    const CSV: &str = "\
name,kind,location,behaviors
hall,room,,
lamp,item,hall,game/lamp core/light
troll,npc,hall,core/npc
";

    #[test]
    fn parses_rows_in_order() {
        let specs = load_entities_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0], EntitySpec::new("hall", "room"));
        assert_eq!(
            specs[1],
            EntitySpec::new("lamp", "item").at("hall").behavior("game/lamp").behavior("core/light")
        );
        assert_eq!(specs[2].behaviors, vec![ModuleId::from("core/npc")]);
    }

    #[test]
    fn specs_build_into_world() {
        let specs = load_entities_reader(Cursor::new(CSV)).unwrap();
        let world = WorldBuilder::new(1).entities(specs).build().unwrap();
        assert_eq!(world.entities.location(EntityId(2)), Some(EntityId(0)));
    }

    #[test]
    fn missing_kind_is_parse_error() {
        let csv = "name,kind,location,behaviors\nlamp,,,\n";
        assert!(matches!(load_entities_reader(Cursor::new(csv)), Err(WorldError::Parse(_))));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let specs = load_entities_csv(file.path()).unwrap();
        assert_eq!(specs.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_entities_csv(std::path::Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(WorldError::Io(_))));
    }
}
