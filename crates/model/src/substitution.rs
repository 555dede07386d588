//! Fixed values assigned to named variables before solving.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uam_core::Quantity;

use crate::path::VarPath;

/// Errors raised while building or merging substitution sets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubstitutionError {
    #[error("`{path}` is substituted twice with different values ({existing} vs {incoming})")]
    Conflict {
        path: VarPath,
        existing: Quantity,
        incoming: Quantity,
    },
    #[error("`{path}` does not belong to sub-model `{model}`")]
    OutsideModel { path: VarPath, model: String },
    #[error("`{path}` does not belong to any sub-model of the problem")]
    UnknownModel { path: VarPath },
}

/// Ordered mapping from variable path to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionSet {
    values: BTreeMap<VarPath, Quantity>,
}

impl SubstitutionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `path`, replacing any previous value.
    pub fn set(&mut self, path: VarPath, value: impl Into<Quantity>) -> Option<Quantity> {
        self.values.insert(path, value.into())
    }

    /// Copy every entry of `other` over this set, replacing existing values.
    pub fn update(&mut self, other: &SubstitutionSet) {
        for (path, value) in &other.values {
            self.values.insert(path.clone(), *value);
        }
    }

    /// Merge `other` into this set. A path present in both is accepted only
    /// when both sides agree on the value.
    pub fn merge(&mut self, other: &SubstitutionSet) -> Result<(), SubstitutionError> {
        for (path, incoming) in &other.values {
            match self.values.get(path) {
                Some(existing) if existing != incoming => {
                    return Err(SubstitutionError::Conflict {
                        path: path.clone(),
                        existing: *existing,
                        incoming: *incoming,
                    });
                }
                Some(_) => {}
                None => {
                    self.values.insert(path.clone(), *incoming);
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, path: &VarPath) -> Option<&Quantity> {
        self.values.get(path)
    }

    pub fn contains(&self, path: &VarPath) -> bool {
        self.values.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, VarPath, Quantity> {
        self.values.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &VarPath> {
        self.values.keys()
    }

    /// Fail unless every path lies beneath `root`.
    pub fn ensure_within(&self, root: &VarPath) -> Result<(), SubstitutionError> {
        match self.values.keys().find(|path| !path.starts_with(root)) {
            Some(path) => Err(SubstitutionError::OutsideModel {
                path: path.clone(),
                model: root.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a SubstitutionSet {
    type Item = (&'a VarPath, &'a Quantity);
    type IntoIter = btree_map::Iter<'a, VarPath, Quantity>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(VarPath, Quantity)> for SubstitutionSet {
    fn from_iter<I: IntoIterator<Item = (VarPath, Quantity)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
