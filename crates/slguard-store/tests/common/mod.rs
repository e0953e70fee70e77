//! Fixture project helpers for store tests.

use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Storage layout of `contract Token { address owner; uint256 supply; }`
#[allow(dead_code)]
pub fn token_layout() -> Value {
    json!({
        "storage": [
            {"astId": 3, "contract": "contracts/Token.sol:Token", "label": "owner", "offset": 0, "slot": "0", "type": "t_address"},
            {"astId": 5, "contract": "contracts/Token.sol:Token", "label": "supply", "offset": 0, "slot": "1", "type": "t_uint256"}
        ],
        "types": {
            "t_address": {"encoding": "inplace", "label": "address", "numberOfBytes": "20"},
            "t_uint256": {"encoding": "inplace", "label": "uint256", "numberOfBytes": "32"}
        }
    })
}

/// Wrap `contracts` (source → name → contract output) in a build-info document
#[allow(dead_code)]
pub fn build_info(contracts: Value) -> Value {
    json!({
        "_format": "hh-sol-build-info-1",
        "id": "0b1c",
        "solcVersion": "0.8.24",
        "input": {"language": "Solidity", "sources": {}},
        "output": {"contracts": contracts, "sources": {}}
    })
}

#[allow(dead_code)]
pub fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}
