//! Storage layout comparison engine.
//!
//! [`compare_entries`] and [`compare_types`] are mutually recursive: entries
//! at the same location recurse into their types, struct types recurse into
//! their member entries. Both share one [`LayoutComparator`] per call so that
//! diagnostics come out in depth-first discovery order.

use crate::compare::model::{Comparison, Diagnostic, Severity};
use crate::errors::{LayoutError, Result};
use crate::model::{
    DynamicArrayType, InplaceType, MappingType, StorageEntry, StorageLayout, StorageType, TypeMap,
};

/// Depth of top-level entries when comparing whole layouts.
pub const BASE_DEPTH: usize = 1;

/// Compare the top-level entries of two layouts at [`BASE_DEPTH`].
///
/// # Errors
///
/// - `DanglingTypeRef`: a type reference does not resolve in its own layout
pub fn compare_layouts(expected: &StorageLayout, actual: &StorageLayout) -> Result<Comparison> {
    compare_entries(
        &expected.storage,
        &actual.storage,
        &expected.types,
        &actual.types,
        BASE_DEPTH,
    )
}

/// Compare two lists of storage entries.
///
/// Every expected entry is matched against actual entries by label, with
/// astId as tie-break when the label is duplicated. Actual entries left
/// unmatched are reported as new.
///
/// # Errors
///
/// - `DanglingTypeRef`: a type reference does not resolve in its own layout
pub fn compare_entries<'a>(
    expected: &'a [StorageEntry],
    actual: &'a [StorageEntry],
    expected_types: &'a TypeMap,
    actual_types: &'a TypeMap,
    depth: usize,
) -> Result<Comparison> {
    let mut comparator = LayoutComparator::new(expected_types, actual_types);
    let failed = comparator.entries(expected, actual, depth)?;
    Ok(comparator.finish(failed))
}

/// Compare two types by name, recursing into their structure.
///
/// `name` is the variable the types belong to; it prefixes every message.
///
/// # Errors
///
/// - `DanglingTypeRef`: a type name does not resolve in its own mapping
pub fn compare_types<'a>(
    name: &str,
    expected_type_name: &'a str,
    actual_type_name: &'a str,
    expected_types: &'a TypeMap,
    actual_types: &'a TypeMap,
    depth: usize,
) -> Result<Comparison> {
    let mut comparator = LayoutComparator::new(expected_types, actual_types);
    let failed = comparator.types(name, expected_type_name, actual_type_name, depth)?;
    Ok(comparator.finish(failed))
}

/// Diagnostic sink plus the type pairs under comparison on the current path.
struct LayoutComparator<'a> {
    expected_types: &'a TypeMap,
    actual_types: &'a TypeMap,
    diagnostics: Vec<Diagnostic>,
    active: Vec<(&'a str, &'a str)>,
}

impl<'a> LayoutComparator<'a> {
    fn new(expected_types: &'a TypeMap, actual_types: &'a TypeMap) -> Self {
        Self {
            expected_types,
            actual_types,
            diagnostics: Vec::new(),
            active: Vec::new(),
        }
    }

    fn finish(self, failed: bool) -> Comparison {
        Comparison {
            diagnostics: self.diagnostics,
            failed,
        }
    }

    fn push(&mut self, severity: Severity, message: String, depth: usize) {
        self.diagnostics.push(Diagnostic::new(severity, message, depth));
    }

    /// Returns true if an error was reported at this level or below.
    fn entries(
        &mut self,
        expected: &'a [StorageEntry],
        actual: &'a [StorageEntry],
        depth: usize,
    ) -> Result<bool> {
        tracing::debug!(
            depth,
            expected = expected.len(),
            actual = actual.len(),
            "comparing storage entries"
        );

        let mut failed = false;
        let mut matched = vec![false; actual.len()];

        for exp in expected {
            let candidates: Vec<usize> = actual
                .iter()
                .enumerate()
                .filter(|(_, act)| act.label == exp.label)
                .map(|(index, _)| index)
                .collect();

            match candidates.as_slice() {
                [] => {
                    self.push(
                        Severity::Error,
                        format!(
                            "\"{}\": not found in updated contract. The variable might have been renamed or removed.",
                            exp.label
                        ),
                        depth,
                    );
                    failed = true;
                }
                [index] => {
                    let act = &actual[*index];
                    matched[*index] = true;
                    failed |= self.position(exp, act, depth)?;
                }
                _ => {
                    let by_ast_id: Vec<usize> = candidates
                        .iter()
                        .copied()
                        .filter(|&index| actual[index].ast_id == exp.ast_id)
                        .collect();
                    if let [index] = by_ast_id.as_slice() {
                        matched[*index] = true;
                    } else {
                        self.push(
                            Severity::Error,
                            format!(
                                "\"{}\": multiple labels found in contract. These might be private variables from multiple inherited contracts. Rename them to be unique.",
                                exp.label
                            ),
                            depth,
                        );
                        failed = true;
                    }
                }
            }
        }

        for (act, _) in actual.iter().zip(&matched).filter(|(_, m)| !**m) {
            self.push(
                Severity::Warning,
                format!(
                    "\"{}\": found new storage entry at slot {} offset {}",
                    act.label, act.slot, act.offset
                ),
                depth,
            );
        }

        Ok(failed)
    }

    /// Compare the position of a uniquely matched pair, then its types.
    fn position(
        &mut self,
        exp: &'a StorageEntry,
        act: &'a StorageEntry,
        depth: usize,
    ) -> Result<bool> {
        let message = match (exp.same_slot(act), exp.same_offset(act)) {
            (true, true) => {
                self.push(
                    Severity::Info,
                    format!("\"{}\": at same location", exp.label),
                    depth,
                );
                return self.types(&exp.label, &exp.type_name, &act.type_name, depth + 1);
            }
            (false, false) => format!(
                "\"{}\": changed location from slot {} offset {} to slot {} offset {}",
                exp.label, exp.slot, exp.offset, act.slot, act.offset
            ),
            (true, false) => format!(
                "\"{}\": changed offset from {} to {}",
                exp.label, exp.offset, act.offset
            ),
            (false, true) => format!(
                "\"{}\": changed slot from {} to {}",
                exp.label, exp.slot, act.slot
            ),
        };
        self.push(Severity::Error, message, depth);
        Ok(true)
    }

    /// Returns true if an error was reported at this level or below.
    fn types(
        &mut self,
        name: &str,
        expected_name: &'a str,
        actual_name: &'a str,
        depth: usize,
    ) -> Result<bool> {
        if self.active.contains(&(expected_name, actual_name)) {
            self.push(
                Severity::Info,
                format!(
                    "\"{}\": recursive reference to \"{}\" is already being compared",
                    name, expected_name
                ),
                depth,
            );
            return Ok(false);
        }

        if expected_name != actual_name {
            self.push(
                Severity::Warning,
                format!(
                    "\"{}\": type changed from \"{}\" to \"{}\"",
                    name, expected_name, actual_name
                ),
                depth,
            );
        }

        let expected_type = resolve(self.expected_types, expected_name, name, "expected")?;
        let actual_type = resolve(self.actual_types, actual_name, name, "actual")?;

        if expected_type.label() != actual_type.label() {
            self.push(
                Severity::Warning,
                format!(
                    "\"{}\": label changed from \"{}\" to \"{}\"",
                    name,
                    expected_type.label(),
                    actual_type.label()
                ),
                depth,
            );
        }

        if expected_type.number_of_bytes() != actual_type.number_of_bytes() {
            self.push(
                Severity::Warning,
                format!(
                    "\"{}\": numberOfBytes changed from \"{}\" to \"{}\"",
                    name,
                    expected_type.number_of_bytes(),
                    actual_type.number_of_bytes()
                ),
                depth,
            );
        }

        self.active.push((expected_name, actual_name));
        let failed = match (expected_type, actual_type) {
            (StorageType::Inplace(exp), StorageType::Inplace(act)) => {
                self.inplace(name, exp, act, depth)
            }
            (StorageType::Bytes(_), StorageType::Bytes(_)) => Ok(false),
            (StorageType::DynamicArray(exp), StorageType::DynamicArray(act)) => {
                self.dynamic_array(name, exp, act, depth)
            }
            (StorageType::Mapping(exp), StorageType::Mapping(act)) => {
                self.mapping(name, exp, act, depth)
            }
            _ => {
                self.push(
                    Severity::Error,
                    format!(
                        "\"{}\": encoding changed from \"{}\" to \"{}\"",
                        name,
                        expected_type.encoding(),
                        actual_type.encoding()
                    ),
                    depth,
                );
                Ok(true)
            }
        };
        self.active.pop();
        failed
    }

    fn inplace(
        &mut self,
        name: &str,
        exp: &'a InplaceType,
        act: &'a InplaceType,
        depth: usize,
    ) -> Result<bool> {
        match (&exp.members, &act.members) {
            (None, None) => Ok(false),
            (Some(_), None) => {
                self.push(
                    Severity::Error,
                    format!(
                        "\"{}\": members not present in actual type. Probably, struct type was changed to a non-struct type",
                        name
                    ),
                    depth,
                );
                Ok(true)
            }
            (None, Some(_)) => {
                self.push(
                    Severity::Error,
                    format!(
                        "\"{}\": members not present in expected type. Probably, non-struct type was changed to a struct type",
                        name
                    ),
                    depth,
                );
                Ok(true)
            }
            (Some(exp_members), Some(act_members)) => {
                if exp_members.len() != act_members.len() {
                    self.push(
                        Severity::Warning,
                        format!(
                            "\"{}\": number of struct members changed from {} to {}",
                            name,
                            exp_members.len(),
                            act_members.len()
                        ),
                        depth,
                    );
                }
                self.entries(exp_members, act_members, depth + 1)
            }
        }
    }

    fn dynamic_array(
        &mut self,
        name: &str,
        exp: &'a DynamicArrayType,
        act: &'a DynamicArrayType,
        depth: usize,
    ) -> Result<bool> {
        if exp.base != act.base {
            self.push(
                Severity::Warning,
                format!(
                    "\"{}\": base type changed from {} to {}",
                    name, exp.base, act.base
                ),
                depth,
            );
        }
        self.types(name, &exp.base, &act.base, depth + 1)
    }

    fn mapping(
        &mut self,
        name: &str,
        exp: &'a MappingType,
        act: &'a MappingType,
        depth: usize,
    ) -> Result<bool> {
        if exp.key != act.key {
            self.push(
                Severity::Warning,
                format!(
                    "\"{}\": mapping key type changed from {} to {}",
                    name, exp.key, act.key
                ),
                depth,
            );
        }
        let key_failed = self.types(&format!("{}-key", name), &exp.key, &act.key, depth + 1)?;

        if exp.value != act.value {
            self.push(
                Severity::Warning,
                format!(
                    "\"{}\": mapping value type changed from {} to {}",
                    name, exp.value, act.value
                ),
                depth,
            );
        }
        let value_failed =
            self.types(&format!("{}-value", name), &exp.value, &act.value, depth + 1)?;

        Ok(key_failed || value_failed)
    }
}

fn resolve<'a>(
    types: &'a TypeMap,
    type_name: &str,
    referenced_by: &str,
    side: &str,
) -> Result<&'a StorageType> {
    types
        .get(type_name)
        .ok_or_else(|| LayoutError::DanglingTypeRef {
            type_name: type_name.to_string(),
            referenced_by: referenced_by.to_string(),
            side: side.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BytesType;

    fn uint(bits: u32) -> (String, StorageType) {
        (
            format!("t_uint{}", bits),
            StorageType::Inplace(InplaceType {
                label: format!("uint{}", bits),
                members: None,
                number_of_bytes: (bits / 8).to_string(),
            }),
        )
    }

    fn types(entries: Vec<(String, StorageType)>) -> TypeMap {
        entries.into_iter().collect()
    }

    #[test]
    fn test_resolve_reports_side_and_referrer() {
        let map = TypeMap::new();
        let err = resolve(&map, "t_uint256", "supply", "actual").unwrap_err();
        assert_eq!(
            err.to_string(),
            "type t_uint256 referenced by supply is missing from the actual types"
        );
    }

    #[test]
    fn test_mapping_recurses_into_key_and_value_even_when_key_fails() {
        let mut expected = types(vec![uint(256)]);
        expected.insert(
            "t_bytes".to_string(),
            StorageType::Bytes(BytesType {
                label: "bytes".to_string(),
                number_of_bytes: "32".to_string(),
            }),
        );
        expected.insert(
            "t_mapping".to_string(),
            StorageType::Mapping(MappingType {
                key: "t_uint256".to_string(),
                label: "mapping(uint256 => uint256)".to_string(),
                number_of_bytes: "32".to_string(),
                value: "t_uint256".to_string(),
            }),
        );
        let mut actual = expected.clone();
        // Key becomes bytes: encoding error on the key branch.
        actual.insert(
            "t_mapping".to_string(),
            StorageType::Mapping(MappingType {
                key: "t_bytes".to_string(),
                label: "mapping(uint256 => uint256)".to_string(),
                number_of_bytes: "32".to_string(),
                value: "t_bytes".to_string(),
            }),
        );

        let comparison =
            compare_types("m", "t_mapping", "t_mapping", &expected, &actual, 2).unwrap();
        assert!(comparison.failed);
        let messages: Vec<&str> = comparison
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert!(messages
            .iter()
            .any(|m| m.starts_with("\"m-key\": encoding changed")));
        assert!(messages
            .iter()
            .any(|m| m.starts_with("\"m-value\": encoding changed")));
        assert!(comparison
            .diagnostics
            .iter()
            .filter(|d| d.message.contains("encoding changed"))
            .all(|d| d.depth == 3));
    }

    #[test]
    fn test_self_referencing_struct_terminates() {
        // struct Node { uint256 value; mapping(uint256 => Node) children; }
        let mut map = types(vec![uint(256)]);
        map.insert(
            "t_struct(Node)".to_string(),
            StorageType::Inplace(InplaceType {
                label: "struct Tree.Node".to_string(),
                members: Some(vec![
                    StorageEntry::new("value", "0", 0, "t_uint256"),
                    StorageEntry::new("children", "1", 0, "t_mapping(t_uint256,t_struct(Node))"),
                ]),
                number_of_bytes: "64".to_string(),
            }),
        );
        map.insert(
            "t_mapping(t_uint256,t_struct(Node))".to_string(),
            StorageType::Mapping(MappingType {
                key: "t_uint256".to_string(),
                label: "mapping(uint256 => struct Tree.Node)".to_string(),
                number_of_bytes: "32".to_string(),
                value: "t_struct(Node)".to_string(),
            }),
        );
        let root = vec![StorageEntry::new("root", "0", 0, "t_struct(Node)")];

        let comparison = compare_entries(&root, &root, &map, &map, BASE_DEPTH).unwrap();
        assert!(!comparison.failed);
        assert!(comparison
            .diagnostics
            .iter()
            .all(|d| d.severity == Severity::Info));
        assert!(comparison
            .diagnostics
            .iter()
            .any(|d| d.message.contains("recursive reference")));
    }
}
