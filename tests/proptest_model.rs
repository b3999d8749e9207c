//! Property-based tests for the KeySwitch wire mapping

use mdex::model::KeySwitch;
use mdex::store::firebase::records_from_collection;
use mdex::store::{KeySwitchService, MemoryKeySwitchService};
use proptest::prelude::*;
use serde_json::{Map, Value};

const WIRE_KEYS: [&str; 5] = [
    "actuationForce",
    "company",
    "switchName",
    "switchTravel",
    "switchType",
];

fn any_switch() -> impl Strategy<Value = KeySwitch> {
    (
        proptest::option::of("-[A-Za-z0-9_]{4,20}"),
        ".{0,30}",
        ".{0,20}",
        ".{0,20}",
        "[0-9]{1,3}(g|cN|ug)",
        "[0-9]\\.[0-9]mm",
    )
        .prop_map(
            |(id, name, switch_type, manufacturer, actuation_force, travel)| KeySwitch {
                id,
                name,
                switch_type,
                manufacturer,
                actuation_force,
                travel,
            },
        )
}

proptest! {
    /// The id never travels in the body, and all five fields always do
    #[test]
    fn serialized_body_has_exactly_wire_keys(ks in any_switch()) {
        let value = serde_json::to_value(&ks).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort();
        prop_assert_eq!(keys, WIRE_KEYS.to_vec());
        prop_assert!(!object.contains_key("id"));
    }

    /// Decoding a body restores every field except the id
    #[test]
    fn body_decodes_to_same_fields(ks in any_switch()) {
        let body = serde_json::to_string(&ks).unwrap();
        let decoded: KeySwitch = serde_json::from_str(&body).unwrap();

        prop_assert!(decoded.id.is_none());
        prop_assert_eq!(decoded, KeySwitch { id: None, ..ks });
    }

    /// One record per map entry, each carrying its key as id
    #[test]
    fn collection_projection_uses_keys_as_ids(
        entries in proptest::collection::btree_map("-[A-Za-z0-9]{6}", any_switch(), 0..12)
    ) {
        let mut map = Map::new();
        for (key, ks) in &entries {
            map.insert(key.clone(), serde_json::to_value(ks).unwrap());
        }
        let body = Value::Object(map).to_string();

        let records = records_from_collection(&body).unwrap();
        prop_assert_eq!(records.len(), entries.len());

        for (record, (key, ks)) in records.iter().zip(entries.iter()) {
            prop_assert_eq!(record.id.as_deref(), Some(key.as_str()));
            prop_assert_eq!(&record.name, &ks.name);
            prop_assert_eq!(&record.travel, &ks.travel);
        }
    }

    /// N sequential creates list N records, each readable by its id
    #[test]
    fn sequential_creates_are_retrievable(
        drafts in proptest::collection::vec(any_switch(), 1..10)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let store = MemoryKeySwitchService::new();

        let created: Vec<KeySwitch> = runtime.block_on(async {
            let mut out = Vec::new();
            for draft in &drafts {
                out.push(store.create(KeySwitch { id: None, ..draft.clone() }).await.unwrap());
            }
            out
        });

        let all = runtime.block_on(store.get_all()).unwrap();
        prop_assert_eq!(all.len(), drafts.len());

        for (ks, draft) in created.iter().zip(drafts.iter()) {
            let found = runtime
                .block_on(store.get_by_id(ks.id.as_deref().unwrap()))
                .unwrap();
            prop_assert_eq!(&found, ks);
            prop_assert_eq!(&found.name, &draft.name);
        }
    }

    /// Filtering never panics and an empty needle matches everything
    #[test]
    fn empty_filter_matches_all(ks in any_switch(), needle in ".{0,10}") {
        let _ = ks.matches(&needle);
        prop_assert!(ks.matches(""));
    }
}

#[test]
fn null_collection_is_empty() {
    assert!(records_from_collection("null").unwrap().is_empty());
}
