//! Property tests for the comparison engine.

mod common;

use common::{layout, vault_layout};
use proptest::prelude::*;
use slguard_core::compare::{compare_layouts, Severity, BASE_DEPTH};
use slguard_core::model::{StorageEntry, StorageLayout};

const TYPE_NAMES: &[&str] = &[
    "t_address",
    "t_bool",
    "t_uint64",
    "t_uint128",
    "t_string_storage",
    "t_array(t_struct(Position)30_storage)dyn_storage",
    "t_mapping(t_address,t_struct(Position)30_storage)",
    "t_struct(Position)30_storage",
    "t_struct(Meta)36_storage",
];

fn arb_entry() -> impl Strategy<Value = (u16, u8, usize)> {
    (0u16..512, 0u8..32, 0..TYPE_NAMES.len())
}

/// Layouts with unique labels over the vault type mapping.
fn arb_layout() -> impl Strategy<Value = StorageLayout> {
    prop::collection::vec(arb_entry(), 0..24).prop_map(|raw| {
        let types = layout(vault_layout()).types;
        let storage = raw
            .into_iter()
            .enumerate()
            .map(|(i, (slot, offset, type_index))| {
                StorageEntry::new(
                    format!("var{}", i),
                    slot.to_string(),
                    u32::from(offset),
                    TYPE_NAMES[type_index],
                )
                .with_ast_id(i as u64 + 1)
            })
            .collect();
        StorageLayout::new(storage, types)
    })
}

proptest! {
    #[test]
    fn prop_layout_compared_with_itself_is_info_only(l in arb_layout()) {
        let comparison = compare_layouts(&l, &l).unwrap();
        prop_assert!(!comparison.failed);
        prop_assert!(!comparison.has_changes());
        prop_assert_eq!(
            comparison.diagnostics.iter().filter(|d| d.depth == BASE_DEPTH).count(),
            l.storage.len()
        );
    }

    #[test]
    fn prop_dropping_one_entry_is_exactly_one_error(l in arb_layout(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!l.storage.is_empty());
        let removed = pick.index(l.storage.len());
        let mut actual = l.clone();
        actual.storage.remove(removed);

        let forward = compare_layouts(&l, &actual).unwrap();
        prop_assert!(forward.failed);
        prop_assert_eq!(forward.count(Severity::Error), 1);
        prop_assert_eq!(forward.count(Severity::Warning), 0);

        let backward = compare_layouts(&actual, &l).unwrap();
        prop_assert!(!backward.failed);
        prop_assert_eq!(backward.count(Severity::Warning), 1);
        prop_assert_eq!(backward.count(Severity::Error), 0);
    }
}
