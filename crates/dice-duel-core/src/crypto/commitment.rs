//! Keyed commitments for the commit-reveal rounds of a duel.
//!
//! digest = HMAC-SHA256(hex(key), decimal(value))
//!
//! The MAC is keyed with the lowercase hex text of the key, the same text that
//! is shown as `KEY=`, so `printf VALUE | openssl dgst -sha256 -hmac KEY`
//! reproduces the digest.

use super::entropy::Entropy;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Shortest key a commitment may be generated with.
pub const MIN_KEY_LEN: usize = 16;

fn mac_from_bytes(key: &[u8]) -> HmacSha256 {
    // HMAC pads or hashes the key, so every length is accepted.
    HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length")
}

fn keyed_mac(key: &SecretKey, value: u32) -> HmacSha256 {
    let mut mac = mac_from_bytes(key.to_hex().as_bytes());
    mac.update(value.to_string().as_bytes());
    mac
}

/// Secret HMAC key of a single commitment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey(#[serde(with = "hex_bytes")] Vec<u8>);

impl SecretKey {
    /// Draw a fresh key of `len` bytes from the entropy source
    pub fn generate<E: Entropy + ?Sized>(entropy: &mut E, len: usize) -> Result<Self, rand::Error> {
        let mut bytes = vec![0u8; len.max(MIN_KEY_LEN)];
        entropy.fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hex-encoded key
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self(hex::decode(hex_str)?))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes>)", self.0.len())
    }
}

/// HMAC digest published before the counterparty answers
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentDigest(#[serde(with = "hex_array")] [u8; 32]);

impl CommitmentDigest {
    /// Compute the digest binding `value` to `key`
    pub fn compute(key: &SecretKey, value: u32) -> Self {
        Self(keyed_mac(key, value).finalize().into_bytes().into())
    }

    /// Parse a hex-encoded digest
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut arr)?;
        Ok(Self(arr))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check that `key` and `value` reproduce this digest.
    ///
    /// The comparison runs in constant time.
    pub fn verify(&self, key: &SecretKey, value: u32) -> bool {
        keyed_mac(key, value).verify_slice(&self.0).is_ok()
    }
}

impl fmt::Debug for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for CommitmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Audit a disclosed (key, value) pair against a published digest
pub fn verify(digest: &CommitmentDigest, key: &SecretKey, value: u32) -> bool {
    digest.verify(key, value)
}

/// A committed value in `[0, modulus)` together with its key.
///
/// Only the digest is readable while the commitment is pending. The key and
/// value come out through [`SecretCommitment::reveal`], which consumes it.
pub struct SecretCommitment {
    key: SecretKey,
    value: u32,
    modulus: u32,
    digest: CommitmentDigest,
}

impl SecretCommitment {
    /// Draw a key and a uniform value below `modulus` and commit to them.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    pub fn generate<E: Entropy + ?Sized>(
        entropy: &mut E,
        modulus: u32,
        key_len: usize,
    ) -> Result<Self, rand::Error> {
        assert!(modulus > 0, "commitment modulus must be positive");
        let key = SecretKey::generate(entropy, key_len)?;
        let value = entropy.below(modulus)?;
        let digest = CommitmentDigest::compute(&key, value);
        Ok(Self {
            key,
            value,
            modulus,
            digest,
        })
    }

    pub fn digest(&self) -> CommitmentDigest {
        self.digest
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Disclose the key and value
    pub fn reveal(self) -> RevealedSecret {
        RevealedSecret {
            key: self.key,
            value: self.value,
        }
    }
}

impl fmt::Debug for SecretCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCommitment")
            .field("modulus", &self.modulus)
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Key and value of a resolved commitment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedSecret {
    pub key: SecretKey,
    pub value: u32,
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex::decode(&hex_str).map_err(serde::de::Error::custom)
    }
}

mod hex_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom("expected 32 bytes"));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(arr)
    }
}
