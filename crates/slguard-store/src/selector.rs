//! Contract selection
//!
//! Resolves the configured allow-list against every compiled contract.
//! A request matches a compiled contract when it equals the fully-qualified
//! name (`source/path.sol:Name`) or the bare contract name after the colon.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{ambiguous_contract, contract_not_found, Result};

/// A compiled contract identified by source path and name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractRef {
    pub source_name: String,
    pub contract_name: String,
    pub fully_qualified_name: String,
}

impl ContractRef {
    pub fn new(source_name: impl Into<String>, contract_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        let contract_name = contract_name.into();
        let fully_qualified_name = format!("{}:{}", source_name, contract_name);
        Self {
            source_name,
            contract_name,
            fully_qualified_name,
        }
    }

    /// Split `source:Name`. Returns `None` when there is no colon.
    pub fn parse(fully_qualified_name: &str) -> Option<Self> {
        let (source_name, contract_name) = fully_qualified_name.rsplit_once(':')?;
        Some(Self::new(source_name, contract_name))
    }

    fn matches(&self, requested: &str) -> bool {
        match ContractRef::parse(requested) {
            Some(wanted) => *self == wanted,
            None => self.contract_name == requested,
        }
    }
}

impl fmt::Display for ContractRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name)
    }
}

/// Pick the contracts to guard.
///
/// With a non-empty `requested` list, every request must resolve to exactly
/// one compiled contract and the result follows request order. With an empty
/// list, every contract whose source path starts with `sources_prefix` is
/// selected in `compiled` order.
///
/// # Errors
///
/// - `AmbiguousContract`: a bare name matches several contracts
/// - `ContractNotFound`: a request matches nothing
pub fn select_contracts(
    requested: &[String],
    compiled: &[ContractRef],
    sources_prefix: &str,
) -> Result<Vec<ContractRef>> {
    if requested.is_empty() {
        let selected: Vec<ContractRef> = compiled
            .iter()
            .filter(|c| c.fully_qualified_name.starts_with(sources_prefix))
            .cloned()
            .collect();
        tracing::debug!(
            prefix = sources_prefix,
            compiled = compiled.len(),
            selected = selected.len(),
            "selected first-party contracts"
        );
        return Ok(selected);
    }

    requested
        .iter()
        .map(|request| {
            let matches: Vec<&ContractRef> = compiled.iter().filter(|c| c.matches(request)).collect();
            match matches.as_slice() {
                [single] => Ok((*single).clone()),
                [] => Err(contract_not_found(request)),
                many => Err(ambiguous_contract(
                    request,
                    many.iter().map(|c| c.fully_qualified_name.clone()).collect(),
                )),
            }
        })
        .collect()
}
