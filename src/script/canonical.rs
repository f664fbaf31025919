//! Canonical serialization and fingerprinting of compiler inputs.
//!
//! Object keys are emitted in sorted order at every depth; arrays keep their
//! order. The digest is SHA-256 when the `secure-hash` feature is on, otherwise
//! two FNV-1a lanes with different offsets.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::model::{CompilerInput, MoviolaRequest};
use super::settings::RevealSettings;

/// Digest used for input fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// 64 hex chars. Falls back to [`HashAlgorithm::Fnv1aDual`] without `secure-hash`.
    Sha256,
    /// 32 hex chars, non-cryptographic.
    Fnv1aDual,
}

impl HashAlgorithm {
    /// Best algorithm compiled into this build.
    pub fn preferred() -> Self {
        if cfg!(feature = "secure-hash") {
            HashAlgorithm::Sha256
        } else {
            HashAlgorithm::Fnv1aDual
        }
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        Self::preferred()
    }
}

/// Serializes a JSON value with keys sorted at every depth and no whitespace.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            out.push_str(&value.to_string());
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys = map.keys().collect::<Vec<_>>();
            keys.sort();
            out.push('{');
            for (i, k) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(k.clone()).to_string());
                out.push(':');
                write_canonical(&map[k], out);
            }
            out.push('}');
        }
    }
}

/// Hex digest of `bytes`.
pub fn digest(bytes: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Sha256 => sha256_hex(bytes),
        HashAlgorithm::Fnv1aDual => fnv1a_dual_hex(bytes),
    }
}

/// Hex digest of a value's canonical form.
pub fn hash_value(value: &Value, algorithm: HashAlgorithm) -> String {
    digest(canonical_json(value).as_bytes(), algorithm)
}

/// Content fingerprint of an input. `traceId` and `createdAt` identify the
/// request, not its content, and are left out.
pub fn hash_input(input: &CompilerInput) -> String {
    hash_input_with(input, HashAlgorithm::preferred())
}

/// [`hash_input`] with an explicit digest algorithm.
pub fn hash_input_with(input: &CompilerInput, algorithm: HashAlgorithm) -> String {
    hash_value(&content_snapshot(input), algorithm)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentSnapshot<'a> {
    analysis_context: &'a str,
    narrative_text: &'a str,
    cultural_elements: &'a [String],
    compiled_visual_prompt: &'a str,
    reveal_settings: &'a RevealSettings,
    moviola: &'a MoviolaRequest,
}

fn content_snapshot(input: &CompilerInput) -> Value {
    let snapshot = ContentSnapshot {
        analysis_context: &input.analysis_context,
        narrative_text: &input.narrative_text,
        cultural_elements: &input.cultural_elements,
        compiled_visual_prompt: &input.compiled_visual_prompt,
        reveal_settings: &input.reveal_settings,
        moviola: &input.moviola,
    };
    // Only strings, finite-or-null numbers and enums reach the serializer.
    serde_json::to_value(snapshot).unwrap_or_else(|e| {
        debug!(error = %e, "snapshot serialization failed, hashing debug form");
        Value::String(format!("{:?}", input))
    })
}

#[cfg(feature = "secure-hash")]
fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(bytes))
}

#[cfg(not(feature = "secure-hash"))]
fn sha256_hex(bytes: &[u8]) -> String {
    debug!("sha2 not compiled in, using FNV-1a fallback digest");
    fnv1a_dual_hex(bytes)
}

fn fnv1a_dual_hex(bytes: &[u8]) -> String {
    let mut a = Fnv1a64::new(0xcbf29ce484222325);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);
    a.write_bytes(bytes);
    b.write_bytes(bytes);
    let mut raw = [0u8; 16];
    raw[..8].copy_from_slice(&a.finish().to_be_bytes());
    raw[8..].copy_from_slice(&b.finish().to_be_bytes());
    hex::encode(raw)
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_input() -> CompilerInput {
        CompilerInput::new("trace-1", 1_700_000_000_000)
            .with_analysis_context("Mercado de Chilpancingo al amanecer")
            .with_narrative("El mercado despierta con el olor a café.")
            .with_cultural_element("rebozo")
            .with_moviola(MoviolaRequest::new("Veo", 9.0))
    }

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let value = json!({ "b": 1, "a": { "z": [3, 1, 2], "y": "x" } });
        assert_eq!(canonical_json(&value), r#"{"a":{"y":"x","z":[3,1,2]},"b":1}"#);
    }

    #[test]
    fn test_canonical_json_escapes_strings() {
        let value = json!({ "k\"ey": "line\nbreak" });
        assert_eq!(canonical_json(&value), r#"{"k\"ey":"line\nbreak"}"#);
    }

    #[test]
    fn test_hash_stable_under_key_reordering() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": {"p": true, "q": [1, 2]}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": {"q": [1, 2], "p": true}, "x": 1}"#).unwrap();
        for alg in [HashAlgorithm::Sha256, HashAlgorithm::Fnv1aDual] {
            assert_eq!(hash_value(&a, alg), hash_value(&b, alg));
        }
    }

    #[test]
    fn test_array_order_is_significant() {
        let a = json!({ "items": ["a", "b"] });
        let b = json!({ "items": ["b", "a"] });
        assert_ne!(
            hash_value(&a, HashAlgorithm::Fnv1aDual),
            hash_value(&b, HashAlgorithm::Fnv1aDual)
        );
    }

    #[test]
    fn test_input_hash_from_reordered_json() {
        let first = CompilerInput::from_json(
            r#"{"traceId":"t","createdAt":1,"narrativeText":"Hola","analysisContext":"Plaza",
                "revealSettings":{"aspectRatio":"16:9","fidelity":"LOCK_B","lens":"35mm",
                "lighting":"natural","filmStyle":"raw","referenceWeight":50},
                "moviola":{"engine":"Veo","durationSec":8,"intent":"x"}}"#,
        )
        .unwrap();
        let second = CompilerInput::from_json(
            r#"{"moviola":{"intent":"x","durationSec":8,"engine":"Veo"},
                "revealSettings":{"referenceWeight":50,"filmStyle":"raw","lighting":"natural",
                "lens":"35mm","fidelity":"LOCK_B","aspectRatio":"16:9"},
                "analysisContext":"Plaza","narrativeText":"Hola","createdAt":1,"traceId":"t"}"#,
        )
        .unwrap();
        assert_eq!(hash_input(&first), hash_input(&second));
    }

    #[test]
    fn test_hash_sensitivity() {
        let base = sample_input();
        let base_hash = hash_input(&base);

        let narrative = sample_input().with_narrative("El mercado despierta con el olor a cafe.");
        assert_ne!(hash_input(&narrative), base_hash);

        let context = sample_input().with_analysis_context("Mercado de Chilpancingo al anochecer");
        assert_ne!(hash_input(&context), base_hash);

        let settings = sample_input()
            .with_reveal_settings(RevealSettings::new().with_reference_weight(51.0));
        assert_ne!(hash_input(&settings), base_hash);
    }

    #[test]
    fn test_hash_ignores_request_identity() {
        let mut other = sample_input();
        other.trace_id = "trace-2".to_string();
        other.created_at += 5_000;
        assert_eq!(hash_input(&other), hash_input(&sample_input()));
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(digest(b"moviola", HashAlgorithm::Fnv1aDual).len(), 32);
        let preferred = digest(b"moviola", HashAlgorithm::preferred());
        if cfg!(feature = "secure-hash") {
            assert_eq!(preferred.len(), 64);
        } else {
            assert_eq!(preferred.len(), 32);
        }
        assert!(preferred.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[cfg(feature = "secure-hash")]
    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            digest(b"abc", HashAlgorithm::Sha256),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fnv_lanes_differ() {
        let hex = digest(b"", HashAlgorithm::Fnv1aDual);
        assert_eq!(&hex[..16], "cbf29ce484222325");
        assert_eq!(&hex[16..], "9ae16a3b2f90404f");
    }
}
