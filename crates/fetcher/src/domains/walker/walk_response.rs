use serde_json::Value;
use thiserror::Error;

use super::ResponseShape;
use crate::{normalize_fragment, AliasTable, NormalizeError, NormalizedFragment};

/// The payload matched none of the known layouts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized response shape, tried: {}", .attempted.join(", "))]
pub struct ShapeError {
    pub attempted: Vec<&'static str>,
}

/// A fragment the normalizer could not read.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFragment {
    /// Position within the located fragment list
    pub index: usize,
    pub key: Option<String>,
    pub reason: NormalizeError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkOutput {
    pub shape: ResponseShape,
    pub fragments: Vec<NormalizedFragment>,
    pub skipped: Vec<SkippedFragment>,
    /// Grouping entries (by position) that held no fragment list
    pub ignored_groups: Vec<usize>,
}

impl WalkOutput {
    pub fn fragments_seen(&self) -> usize {
        self.fragments.len() + self.skipped.len()
    }
}

/// Locate the per-location fragments of a payload and normalize each one.
///
/// A fragment that fails to normalize is recorded in `skipped` and the walk
/// carries on with the rest.
pub fn walk_response(payload: &Value, aliases: &AliasTable) -> Result<WalkOutput, ShapeError> {
    let (shape, located) = ResponseShape::ALL
        .iter()
        .find_map(|shape| shape.locate(payload).map(|found| (*shape, found)))
        .ok_or_else(|| ShapeError {
            attempted: ResponseShape::ALL.iter().map(|s| s.path()).collect(),
        })?;

    let mut fragments = Vec::with_capacity(located.len());
    let mut skipped = vec![];
    for (index, fragment) in located.into_iter().enumerate() {
        match normalize_fragment(fragment, aliases) {
            Ok(normalized) => fragments.push(normalized),
            Err(reason) => skipped.push(SkippedFragment {
                index,
                key: fragment_key(fragment),
                reason,
            }),
        }
    }

    Ok(WalkOutput {
        shape,
        fragments,
        skipped,
        ignored_groups: shape.ignored_groups(payload),
    })
}

fn fragment_key(fragment: &Value) -> Option<String> {
    match fragment {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
