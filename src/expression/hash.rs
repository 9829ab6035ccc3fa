//! Wire-facing `hash_type`/`encoding` vocabulary for the `hash` expression
//! tag. Decoding lives here, purely as serde data; the kernels themselves
//! live in [`crate::engine::hash`].

use crate::engine::hash::{HashEncoding, HashType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashTypeWire {
    Sha256,
    Sha512,
    Md5,
    Blake3,
    Wyhash,
    Xxh3,
}

impl From<HashTypeWire> for HashType {
    fn from(wire: HashTypeWire) -> Self {
        match wire {
            HashTypeWire::Sha256 => HashType::Sha256,
            HashTypeWire::Sha512 => HashType::Sha512,
            HashTypeWire::Md5 => HashType::Md5,
            HashTypeWire::Blake3 => HashType::Blake3,
            HashTypeWire::Wyhash => HashType::Wyhash,
            HashTypeWire::Xxh3 => HashType::Xxh3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashEncodingWire {
    Hex,
    Base64,
}

impl From<HashEncodingWire> for HashEncoding {
    fn from(wire: HashEncodingWire) -> Self {
        match wire {
            HashEncodingWire::Hex => HashEncoding::Hex,
            HashEncodingWire::Base64 => HashEncoding::Base64,
        }
    }
}
