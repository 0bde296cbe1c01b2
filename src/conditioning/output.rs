//! Terminal conditioning of the corrected-bit buffer.

use crate::extraction::Bits;
use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Supported 256-bit digest functions for whitening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 - widely deployed, conservative default.
    #[default]
    Sha256,
    /// BLAKE3 - fast, secure alternative.
    Blake3,
}

/// Which terminal artifact a batch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Whiten the corrected buffer into a fixed-size hex digest.
    #[default]
    Digest,
    /// Export the corrected buffer untouched, for external test suites.
    Raw,
}

/// The terminal artifact of a completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// 64 lowercase hex characters of a 256-bit digest.
    Digest {
        /// The rendered digest.
        hex: String,
        /// The function that produced it.
        algorithm: HashAlgorithm,
    },
    /// The corrected bits as an ASCII '0'/'1' string, no hashing applied.
    Bitstream {
        /// The exported bit sequence.
        bits: String,
    },
}

impl Artifact {
    /// One-line human-readable description of the artifact.
    pub fn summary(&self) -> String {
        match self {
            Artifact::Digest { hex, algorithm } => {
                format!("{:?} digest, {} bits (hex)", algorithm, hex.len() * 4)
            }
            Artifact::Bitstream { bits } => format!("raw bitstream, {} bits", bits.len()),
        }
    }
}

/// Whitens a corrected-bit buffer into 64 lowercase hex characters.
///
/// The buffer is packed most-significant-bit first (final partial byte
/// zero-padded on its low-order end) and the packed bytes are hashed.
/// The result is a pure function of the buffer content: identical bits
/// always yield an identical digest, regardless of how many samples
/// contributed.
pub fn whiten(bits: &Bits, algorithm: HashAlgorithm) -> String {
    let packed = bits.pack_bytes();
    let digest: [u8; 32] = match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(&packed);
            hasher.finalize().into()
        }
        HashAlgorithm::Blake3 => {
            let mut hasher = Blake3Hasher::new();
            hasher.update(&packed);
            *hasher.finalize().as_bytes()
        }
    };

    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Produces the terminal artifact for a completed batch.
///
/// Consumes the buffer: ownership transfers here when the batch
/// completes and the buffer is never reused for a later batch.
pub fn finalize(bits: Bits, mode: OutputMode, algorithm: HashAlgorithm) -> Artifact {
    match mode {
        OutputMode::Digest => Artifact::Digest {
            hex: whiten(&bits, algorithm),
            algorithm,
        },
        OutputMode::Raw => Artifact::Bitstream {
            bits: bits.to_bitstring(),
        },
    }
}
