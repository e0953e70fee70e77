//! Shared layout fixtures for comparison tests.

use serde_json::{json, Value};
use slguard_core::model::StorageLayout;

/// Build a layout from a JSON value, panicking on invalid fixtures.
#[allow(dead_code)]
pub fn layout(value: Value) -> StorageLayout {
    StorageLayout::from_value(value).expect("fixture layout must be valid")
}

/// Single `uint256 x` at slot 0.
#[allow(dead_code)]
pub fn single_uint_layout() -> Value {
    json!({
        "storage": [
            {"astId": 2, "contract": "contracts/A.sol:A", "label": "x", "offset": 0, "slot": "0", "type": "t_uint256"}
        ],
        "types": {
            "t_uint256": {"encoding": "inplace", "label": "uint256", "numberOfBytes": "32"}
        }
    })
}

/// A vault contract exercising every encoding:
///
/// ```solidity
/// contract Vault {
///     address owner;                               // slot 0
///     uint64 fee; bool paused;                     // slot 0, packed after owner
///     string name;                                 // slot 1
///     Position[] positions;                        // slot 2
///     mapping(address => Position) byOwner;        // slot 3
///     struct Position { uint128 amount; uint64 since; Meta meta; }
///     struct Meta { uint32 tag; bytes note; }
/// }
/// ```
#[allow(dead_code)]
pub fn vault_layout() -> Value {
    json!({
        "storage": [
            {"astId": 10, "contract": "contracts/Vault.sol:Vault", "label": "owner", "offset": 0, "slot": "0", "type": "t_address"},
            {"astId": 12, "contract": "contracts/Vault.sol:Vault", "label": "fee", "offset": 20, "slot": "0", "type": "t_uint64"},
            {"astId": 14, "contract": "contracts/Vault.sol:Vault", "label": "paused", "offset": 28, "slot": "0", "type": "t_bool"},
            {"astId": 16, "contract": "contracts/Vault.sol:Vault", "label": "name", "offset": 0, "slot": "1", "type": "t_string_storage"},
            {"astId": 20, "contract": "contracts/Vault.sol:Vault", "label": "positions", "offset": 0, "slot": "2", "type": "t_array(t_struct(Position)30_storage)dyn_storage"},
            {"astId": 25, "contract": "contracts/Vault.sol:Vault", "label": "byOwner", "offset": 0, "slot": "3", "type": "t_mapping(t_address,t_struct(Position)30_storage)"}
        ],
        "types": {
            "t_address": {"encoding": "inplace", "label": "address", "numberOfBytes": "20"},
            "t_array(t_struct(Position)30_storage)dyn_storage": {
                "base": "t_struct(Position)30_storage",
                "encoding": "dynamic_array",
                "label": "struct Vault.Position[]",
                "numberOfBytes": "32"
            },
            "t_bool": {"encoding": "inplace", "label": "bool", "numberOfBytes": "1"},
            "t_bytes_storage": {"encoding": "bytes", "label": "bytes", "numberOfBytes": "32"},
            "t_mapping(t_address,t_struct(Position)30_storage)": {
                "encoding": "mapping",
                "key": "t_address",
                "label": "mapping(address => struct Vault.Position)",
                "numberOfBytes": "32",
                "value": "t_struct(Position)30_storage"
            },
            "t_string_storage": {"encoding": "bytes", "label": "string", "numberOfBytes": "32"},
            "t_struct(Meta)36_storage": {
                "encoding": "inplace",
                "label": "struct Vault.Meta",
                "members": [
                    {"astId": 32, "contract": "contracts/Vault.sol:Vault", "label": "tag", "offset": 0, "slot": "0", "type": "t_uint32"},
                    {"astId": 34, "contract": "contracts/Vault.sol:Vault", "label": "note", "offset": 0, "slot": "1", "type": "t_bytes_storage"}
                ],
                "numberOfBytes": "64"
            },
            "t_struct(Position)30_storage": {
                "encoding": "inplace",
                "label": "struct Vault.Position",
                "members": [
                    {"astId": 26, "contract": "contracts/Vault.sol:Vault", "label": "amount", "offset": 0, "slot": "0", "type": "t_uint128"},
                    {"astId": 28, "contract": "contracts/Vault.sol:Vault", "label": "since", "offset": 16, "slot": "0", "type": "t_uint64"},
                    {"astId": 29, "contract": "contracts/Vault.sol:Vault", "label": "meta", "offset": 0, "slot": "1", "type": "t_struct(Meta)36_storage"}
                ],
                "numberOfBytes": "96"
            },
            "t_uint128": {"encoding": "inplace", "label": "uint128", "numberOfBytes": "16"},
            "t_uint32": {"encoding": "inplace", "label": "uint32", "numberOfBytes": "4"},
            "t_uint64": {"encoding": "inplace", "label": "uint64", "numberOfBytes": "8"}
        }
    })
}
