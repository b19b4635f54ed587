//! Shallow merge of YAML config layers.
//!
//! Each layer is a top-level mapping. Layers are folded left to right and a
//! key present in a later layer replaces the earlier value wholesale, nested
//! mappings and sequences included.

use serde_yaml::{Mapping, Value};

/// Overlay `layer` on top of `base`, replacing any keys it defines.
pub fn merge_layer(mut base: Mapping, layer: Mapping) -> Mapping {
    for (key, value) in layer {
        base.insert(key, value);
    }
    base
}

/// Merge layers in order (first is the base, last has highest precedence).
pub fn merge_layers<I>(layers: I) -> Mapping
where
    I: IntoIterator<Item = Mapping>,
{
    layers.into_iter().fold(Mapping::new(), merge_layer)
}

/// Interpret a parsed YAML document as a config layer.
///
/// An empty document contributes nothing. Returns `None` when the document
/// is neither empty nor a mapping.
pub fn as_layer(document: Value) -> Option<Mapping> {
    match document {
        Value::Null => Some(Mapping::new()),
        Value::Mapping(mapping) => Some(mapping),
        _ => None,
    }
}
