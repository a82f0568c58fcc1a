//! Cross-module tests: export round trips and gesture-machine properties

mod round_trip;

use std::borrow::Cow;

use gltf::binary::{Glb, Header};

/// Two nodes that list each other as children
pub(crate) const CYCLIC_NODES_JSON: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [{ "nodes": [0] }],
    "nodes": [{ "name": "a", "children": [1] }, { "name": "b", "children": [0] }]
}"#;

/// Frame a hand-written glTF document as a GLB without a binary chunk
pub(crate) fn glb_from_json(json: &str) -> Vec<u8> {
    Glb {
        header: Header {
            magic: *b"glTF",
            version: 2,
            length: 0,
        },
        json: Cow::Borrowed(json.as_bytes()),
        bin: None,
    }
    .to_vec()
    .unwrap()
}
