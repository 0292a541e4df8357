use d2lookup::{
    builtin,
    layer::CompositeType,
    record::{safe_int, ObjectType, FIELD_COUNT},
    table::ObjectLookupTable,
};
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn every_line_is_found_by_its_key() {
    let table = builtin::table();
    let mut seen = HashSet::new();
    let mut lines = 0;

    for line in builtin::OBJECTS_TXT.lines().filter(|l| !l.is_empty()) {
        lines += 1;
        let single = ObjectLookupTable::parse(line).unwrap();
        let expected = &single.records()[0];
        if seen.insert(expected.key()) {
            let (act, typ, id) = expected.key();
            assert_eq!(table.find(act, typ, id), expected, "line {lines}");
        }
    }

    assert_eq!(table.len(), lines);
}

#[test]
fn find_gheed() {
    let gheed = builtin::table().find(1, ObjectType::Character, 0);

    assert!(gheed.description.starts_with("gheed-ACT 1 TABLE"));
    assert_eq!(gheed.base, "/Data/Global/Monsters");
    assert_eq!(gheed.token, "GH");
    assert_eq!(gheed.mode, "NU");
    assert_eq!(gheed.class, "HTH");
    assert_eq!(gheed.object_type(), Some(ObjectType::Character));
    assert_eq!(gheed.color_map(), None);
}

#[test]
fn find_short_placeholder_row() {
    let dummy = builtin::table().find(1, ObjectType::Item, 150);

    assert_eq!(dummy.description, "Dummy-test data SKIPT IT");
    assert_eq!(dummy.base, "/Data/Global/Objects");
    assert_eq!(dummy.token, "");
    assert_eq!(dummy.mode, "");
    assert_eq!(dummy.class, "");
    assert_eq!(dummy.layers().count(), 0);
    assert_eq!(dummy.color_map, "");
    assert_eq!(dummy.index, 0);
}

#[test]
fn duplicate_placeholder_rows_resolve() {
    let table = builtin::table();
    let skip = table.find(2, 1, 4);
    assert_eq!(skip.description, "SKIP IT");
    assert_eq!(table.iter().filter(|r| r.key() == (2, 1, 4)).count(), 2);
}

#[test]
#[should_panic(expected = "Act: 99, Type: 99, ID: 99")]
fn missing_key_is_fatal() {
    builtin::table().find(99, 99, 99);
}

#[test]
fn get_does_not_panic() {
    assert!(builtin::table().get(99, 99, 99).is_none());
    assert!(builtin::table().get(5, ObjectType::Item, 1).is_some());
}

#[test]
fn composite_layer_paths() {
    let rogue = builtin::table().find(1, ObjectType::Character, 4);

    assert_eq!(rogue.layer(CompositeType::RightHand), "LBW");
    assert_eq!(
        rogue.color_map(),
        Some("/Data/Global/Monsters/RG/COF/Palshift.dat")
    );
    assert_eq!(
        rogue.layer_animation_paths(CompositeType::RightHand, "NU", "BOW"),
        Some([
            "/Data/Global/Monsters/RG/RH/RGRHLBWNUBOW.dcc".to_string(),
            "/Data/Global/Monsters/RG/RH/RGRHLBWNUHTH.dcc".to_string(),
            "/Data/Global/Monsters/RG/RH/RGRHLBWNUBOW.dc6".to_string(),
            "/Data/Global/Monsters/RG/RH/RGRHLBWNUHTH.dc6".to_string(),
        ])
    );
    assert_eq!(
        rogue.layer_animation_paths(CompositeType::Shield, "NU", "BOW"),
        None
    );

    let layers: Vec<_> = rogue.layers().map(|(layer, _)| layer).collect();
    assert_eq!(
        layers,
        vec![
            CompositeType::Head,
            CompositeType::Torso,
            CompositeType::Legs,
            CompositeType::RightArm,
            CompositeType::LeftArm,
            CompositeType::RightHand,
        ]
    );
}

#[test]
fn act_blocks_start_with_first_row() {
    let table = builtin::table();
    for act in 1..=5 {
        let first = table
            .in_act_of_type(act, ObjectType::Character)
            .next()
            .unwrap_or_else(|| panic!("act {act} has no characters"));
        assert_eq!(first.id, 0);
        assert!(first.description.contains(&format!("ACT {act} TABLE")));
    }
}

#[test]
fn concurrent_readers_share_one_table() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let table = builtin::table();
                table.find(1, 1, 0) as *const _ as usize
            })
        })
        .collect();

    let addresses: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(addresses.len(), 1);
}

#[test]
fn open_reads_a_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/objects.txt");
    let table = ObjectLookupTable::open(path).unwrap();
    assert_eq!(table.len(), builtin::table().len());
    assert!(ObjectLookupTable::open(concat!(env!("CARGO_MANIFEST_DIR"), "/data/missing.txt")).is_err());
}

proptest! {
    #[test]
    fn safe_int_never_panics(text in ".*") {
        let expected = text.trim().parse::<i32>().unwrap_or(0);
        prop_assert_eq!(safe_int(&text), expected);
    }

    #[test]
    fn integer_columns_degrade_to_zero(act in "[^\t\r\n]*", id in "[^\t\r\n]*") {
        let table = ObjectLookupTable::parse(&format!("{act}\t1\t{id}\tlabel")).unwrap();
        let record = &table.records()[0];
        prop_assert_eq!(record.act, safe_int(&act));
        prop_assert_eq!(record.id, safe_int(&id));
        prop_assert_eq!(record.description.as_str(), "label");
    }

    #[test]
    fn short_rows_pad_to_full_width(count in 1usize..=FIELD_COUNT) {
        let line = vec!["7"; count].join("\t");
        let table = ObjectLookupTable::parse(&line).unwrap();
        let record = &table.records()[0];

        prop_assert_eq!(table.len(), 1);
        prop_assert_eq!(record.act, 7);
        prop_assert_eq!(record.description.as_str(), if count > 3 { "7" } else { "" });
        prop_assert_eq!(record.color_map.as_str(), if count > 27 { "7" } else { "" });
        prop_assert_eq!(record.index, if count > 28 { 7 } else { 0 });
    }

    #[test]
    fn any_line_loads_as_one_record(fields in prop::collection::vec("[^\t\n]*", 1..40)) {
        let line = fields.join("\t");
        prop_assume!(!line.is_empty() && line != "\r");
        let table = ObjectLookupTable::parse(&format!("{line}\n")).unwrap();
        prop_assert_eq!(table.len(), 1);
    }

    #[test]
    fn first_row_wins(first in "[a-z]{1,8}", second in "[a-z]{1,8}") {
        let table = ObjectLookupTable::parse(&format!("1\t2\t3\t{first}\n1\t2\t3\t{second}\n")).unwrap();
        prop_assert_eq!(table.find(1, ObjectType::Item, 3).description.as_str(), first.as_str());
    }
}
