//! On-disk container format for a note store.
//!
//! All integers are big-endian.
//!
//! ```text
//! offset  size  field
//! 0       4     magic b"SNTE"
//! 4       1     format version
//! 5       1     kdf algorithm id (1 = Argon2id v0x13)
//! 6       4     kdf memory cost, KiB
//! 10      4     kdf iterations
//! 14      4     kdf parallelism
//! 18      1     salt length N (16..=64)
//! 19      N     salt
//! 19+N    24    nonce
//! 43+N    ..    ciphertext || 16-byte tag
//! ```
//!
//! Bytes `[0, 19+N)` are the associated data of the AEAD, so swapping cost
//! parameters or salts between files is detected at decrypt time.
//!
//! The plaintext is a JSON array. Version 2 stores `{"title","body"}` objects;
//! version 1 stored bare strings and is migrated on read.

use zeroize::Zeroizing;

use crate::crypto::{self, derive_key, DerivedKey, KdfAlgorithm, KdfParams, Nonce, Salt};
use crate::crypto::{NONCE_LENGTH, TAG_LENGTH};
use crate::error::{Result, SealNoteError};
use crate::store::types::{Note, NoteCollection};

/// File magic identifying a SealNote store.
pub const MAGIC: [u8; 4] = *b"SNTE";

/// Version written by this build.
pub const FORMAT_VERSION: u8 = 2;

/// Version whose notes were single untitled strings.
pub const LEGACY_FORMAT_VERSION: u8 = 1;

const VERSION_OFFSET: usize = MAGIC.len();
/// magic + version + algorithm + three u32 costs + salt length
const FIXED_HEADER_LENGTH: usize = MAGIC.len() + 1 + 1 + 4 * 3 + 1;

/// Salt and cost parameters that, with a password, determine the store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub salt: Salt,
    pub params: KdfParams,
}

impl KeyMaterial {
    /// Fresh random salt with the given cost parameters.
    pub fn generate(params: KdfParams) -> Self {
        Self {
            salt: Salt::generate(),
            params,
        }
    }

    /// Derive the store key for `password`.
    pub fn derive(&self, password: &[u8]) -> Result<DerivedKey> {
        derive_key(password, &self.salt, &self.params)
    }
}

/// Parsed, unauthenticated store header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHeader {
    pub version: u8,
    pub key_material: KeyMaterial,
}

impl StoreHeader {
    /// Serialized header bytes; these are also the AEAD associated data.
    fn to_bytes(&self) -> Vec<u8> {
        let salt = self.key_material.salt.as_bytes();
        let params = &self.key_material.params;
        let mut out = Vec::with_capacity(FIXED_HEADER_LENGTH + salt.len());
        out.extend_from_slice(&MAGIC);
        out.push(self.version);
        out.push(params.algorithm.id());
        out.extend_from_slice(&params.memory_kib.to_be_bytes());
        out.extend_from_slice(&params.iterations.to_be_bytes());
        out.extend_from_slice(&params.parallelism.to_be_bytes());
        // Salt::from_bytes caps the length at MAX_SALT_LENGTH, which fits a u8.
        out.push(salt.len() as u8);
        out.extend_from_slice(salt);
        out
    }
}

/// Result of a successful decode, with what is needed to keep saving.
#[derive(Debug)]
pub struct Unsealed {
    pub notes: NoteCollection,
    pub header: StoreHeader,
    pub key: DerivedKey,
}

impl Unsealed {
    /// True when the file was written in an older format and should be rewritten.
    pub fn needs_migration(&self) -> bool {
        self.header.version != FORMAT_VERSION
    }
}

/// Encrypt `collection` into a complete store file in the current format.
///
/// A fresh nonce is drawn on every call.
pub fn encode(
    collection: &NoteCollection,
    key_material: &KeyMaterial,
    key: &DerivedKey,
) -> Result<Vec<u8>> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(collection)
            .map_err(|e| SealNoteError::MalformedRecord(format!("Serialize failed: {}", e)))?,
    );
    seal_payload(FORMAT_VERSION, key_material, key, &plaintext)
}

/// Decrypt a store file into its note collection.
pub fn decode(bytes: &[u8], password: &[u8]) -> Result<NoteCollection> {
    unseal(bytes, password).map(|unsealed| unsealed.notes)
}

/// Decrypt a store file, also returning its header and derived key.
pub fn unseal(bytes: &[u8], password: &[u8]) -> Result<Unsealed> {
    let (header, header_len) = parse_header(bytes)?;

    let rest = &bytes[header_len..];
    if rest.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(SealNoteError::WrongPasswordOrCorrupt);
    }
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LENGTH);
    let mut nonce = [0u8; NONCE_LENGTH];
    nonce.copy_from_slice(nonce_bytes);

    let key = header.key_material.derive(password)?;
    let plaintext = crypto::open(
        &key,
        &Nonce::from_bytes(nonce),
        &bytes[..header_len],
        ciphertext,
    )?;

    let notes = parse_notes(header.version, &plaintext)?;
    tracing::debug!(
        version = header.version,
        notes = notes.len(),
        "decoded store"
    );

    Ok(Unsealed { notes, header, key })
}

/// Read the header of a store file without a password.
///
/// Nothing returned here is authenticated until the file is decrypted.
pub fn read_header(bytes: &[u8]) -> Result<StoreHeader> {
    parse_header(bytes).map(|(header, _)| header)
}

fn seal_payload(
    version: u8,
    key_material: &KeyMaterial,
    key: &DerivedKey,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let header = StoreHeader {
        version,
        key_material: key_material.clone(),
    };
    let aad = header.to_bytes();
    let nonce = Nonce::generate();
    let ciphertext = crypto::seal(key, &nonce, &aad, plaintext)?;

    let mut out = Vec::with_capacity(aad.len() + NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&aad);
    out.extend_from_slice(nonce.as_bytes());
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn parse_header(bytes: &[u8]) -> Result<(StoreHeader, usize)> {
    if bytes.len() <= VERSION_OFFSET || bytes[..MAGIC.len()] != MAGIC {
        return Err(SealNoteError::WrongPasswordOrCorrupt);
    }

    let version = bytes[VERSION_OFFSET];
    if version != FORMAT_VERSION && version != LEGACY_FORMAT_VERSION {
        return Err(SealNoteError::UnsupportedVersion(version));
    }

    if bytes.len() < FIXED_HEADER_LENGTH {
        return Err(SealNoteError::WrongPasswordOrCorrupt);
    }

    let algorithm =
        KdfAlgorithm::from_id(bytes[5]).ok_or(SealNoteError::WrongPasswordOrCorrupt)?;
    let params = KdfParams {
        algorithm,
        memory_kib: read_u32(bytes, 6),
        iterations: read_u32(bytes, 10),
        parallelism: read_u32(bytes, 14),
    };
    params
        .validate()
        .map_err(|_| SealNoteError::WrongPasswordOrCorrupt)?;

    let salt_len = bytes[FIXED_HEADER_LENGTH - 1] as usize;
    let header_len = FIXED_HEADER_LENGTH + salt_len;
    let salt_bytes = bytes
        .get(FIXED_HEADER_LENGTH..header_len)
        .ok_or(SealNoteError::WrongPasswordOrCorrupt)?;
    let salt = Salt::from_bytes(salt_bytes).map_err(|_| SealNoteError::WrongPasswordOrCorrupt)?;

    Ok((
        StoreHeader {
            version,
            key_material: KeyMaterial { salt, params },
        },
        header_len,
    ))
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_be_bytes(buf)
}

fn parse_notes(version: u8, plaintext: &[u8]) -> Result<NoteCollection> {
    match version {
        FORMAT_VERSION => serde_json::from_slice::<NoteCollection>(plaintext)
            .map_err(|e| SealNoteError::MalformedRecord(e.to_string())),
        LEGACY_FORMAT_VERSION => {
            let texts: Vec<String> = serde_json::from_slice(plaintext)
                .map_err(|e| SealNoteError::MalformedRecord(e.to_string()))?;
            Ok(texts.into_iter().map(Note::from_legacy).collect())
        }
        other => Err(SealNoteError::UnsupportedVersion(other)),
    }
}

/// Encode bare-string notes in the legacy version 1 layout.
#[cfg(test)]
pub(crate) fn encode_legacy(
    texts: &[&str],
    key_material: &KeyMaterial,
    key: &DerivedKey,
) -> Result<Vec<u8>> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(texts).map_err(|e| SealNoteError::MalformedRecord(e.to_string()))?,
    );
    seal_payload(LEGACY_FORMAT_VERSION, key_material, key, &plaintext)
}

/// Seal arbitrary plaintext under the current version.
#[cfg(test)]
pub(crate) fn encode_raw(
    plaintext: &[u8],
    key_material: &KeyMaterial,
    key: &DerivedKey,
) -> Result<Vec<u8>> {
    seal_payload(FORMAT_VERSION, key_material, key, plaintext)
}
