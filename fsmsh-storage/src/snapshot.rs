//! Binary snapshot persistence.
//!
//! A snapshot file is a single record with the following layout:
//!
//! ```text
//! +----------+----------+----------+----------+----------+----------+
//! | magic    | version  | flags    | reserved | length   | crc32c   |
//! | 4 bytes  | 1 byte   | 1 byte   | 2 bytes  | 4 bytes  | 4 bytes  |
//! +----------+----------+----------+----------+----------+----------+
//! | payload (length bytes, JSON-encoded AutomatonSnapshot)          |
//! +-----------------------------------------------------------------+
//! ```
//!
//! The payload lists the five model collections explicitly (ordered states,
//! symbols, initial state, final states, transition triples), so the format
//! is stable across releases and inspectable with standard tools.

use crate::error::StorageError;
use bytes::{Buf, BufMut, BytesMut};
use fsmsh_core::{Automaton, AutomatonSnapshot};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Magic bytes for snapshot files: "FSMS".
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"FSMS";

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Snapshot header size in bytes.
pub const SNAPSHOT_HEADER_SIZE: usize = 16;

/// Maximum payload size (16 MiB).
pub const MAX_SNAPSHOT_SIZE: usize = 16 * 1024 * 1024;

/// Serializes the full model to `path`. Fails cleanly on write errors; a
/// partially written file is never reported as success.
pub fn save_snapshot(automaton: &Automaton, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    let buf = encode_snapshot(&automaton.to_snapshot())?;

    let mut file = File::create(path)?;
    file.write_all(&buf)?;
    file.sync_all()?;

    tracing::info!("wrote snapshot to {} ({} bytes)", path.display(), buf.len());
    Ok(())
}

/// Deserializes a snapshot file into a fresh automaton. The caller swaps the
/// returned model in wholesale; on any error the current model is untouched.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Automaton, StorageError> {
    let path = path.as_ref();
    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;

    let snapshot = decode_snapshot(&data)?;
    tracing::info!("loaded snapshot from {}", path.display());
    Ok(Automaton::from_snapshot(snapshot))
}

/// Encodes a snapshot into its on-disk record.
pub fn encode_snapshot(snapshot: &AutomatonSnapshot) -> Result<BytesMut, StorageError> {
    let payload = serde_json::to_vec(snapshot)?;
    if payload.len() > MAX_SNAPSHOT_SIZE {
        return Err(StorageError::TooLarge {
            size: payload.len(),
            max: MAX_SNAPSHOT_SIZE,
        });
    }

    let mut buf = BytesMut::with_capacity(SNAPSHOT_HEADER_SIZE + payload.len());
    buf.put_slice(&SNAPSHOT_MAGIC);
    buf.put_u8(SNAPSHOT_VERSION);
    buf.put_u8(0); // flags
    buf.put_u16(0); // reserved
    buf.put_u32(payload.len() as u32);
    buf.put_u32(crc32c::crc32c(&payload));
    buf.put_slice(&payload);
    Ok(buf)
}

/// Decodes an on-disk record, validating magic, version, length, and crc.
pub fn decode_snapshot(data: &[u8]) -> Result<AutomatonSnapshot, StorageError> {
    if data.len() < SNAPSHOT_HEADER_SIZE {
        return Err(StorageError::InvalidHeader(format!(
            "file too short: {} bytes",
            data.len()
        )));
    }

    let mut header = &data[..SNAPSHOT_HEADER_SIZE];
    let mut magic = [0u8; 4];
    header.copy_to_slice(&mut magic);
    if magic != SNAPSHOT_MAGIC {
        return Err(StorageError::InvalidHeader(format!(
            "invalid magic: {:?}",
            magic
        )));
    }

    let version = header.get_u8();
    if version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion(version));
    }

    let _flags = header.get_u8();
    let _reserved = header.get_u16();
    let payload_len = header.get_u32() as usize;
    let crc_expected = header.get_u32();

    if payload_len > MAX_SNAPSHOT_SIZE {
        return Err(StorageError::TooLarge {
            size: payload_len,
            max: MAX_SNAPSHOT_SIZE,
        });
    }
    if data.len() - SNAPSHOT_HEADER_SIZE != payload_len {
        return Err(StorageError::InvalidHeader(format!(
            "payload length mismatch: header says {}, file has {}",
            payload_len,
            data.len() - SNAPSHOT_HEADER_SIZE
        )));
    }

    let payload = &data[SNAPSHOT_HEADER_SIZE..];
    let crc_actual = crc32c::crc32c(payload);
    if crc_actual != crc_expected {
        return Err(StorageError::Corruption {
            expected: crc_expected,
            actual: crc_actual,
        });
    }

    Ok(serde_json::from_slice(payload)?)
}

/// Returns true if `path` names a binary snapshot by extension
/// (`.bin` or `.fsm`, case-insensitive).
pub fn is_snapshot_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("bin") || e.eq_ignore_ascii_case("fsm"))
        .unwrap_or(false)
}

/// Validates a snapshot target filename: a plain name of alphanumerics,
/// dots, underscores, and hyphens, ending in `.fsm` or `.bin`.
pub fn is_valid_snapshot_name(name: &str) -> bool {
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return false;
    }
    // All ASCII from here on, so byte indexing is safe.
    let Some(stem_len) = name.len().checked_sub(4) else {
        return false;
    };
    if stem_len == 0 {
        return false;
    }
    let suffix = &name[stem_len..];
    suffix.eq_ignore_ascii_case(".fsm") || suffix.eq_ignore_ascii_case(".bin")
}
