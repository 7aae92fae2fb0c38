use kplog_core_types::Sensitive;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const FULL_MASK: &str = "********";
const MASK_CHAR: char = '*';
const PARTIAL_REVEAL: usize = 4;

/// Redaction kinds understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskingType {
    /// Replace the whole value with a fixed mask
    Full,
    /// Reveal only the last four characters
    Partial,
    /// Keep the first character of the local part and the domain
    Email,
    /// Replace with the hex SHA-256 of the salted value
    Hash,
}

impl MaskingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaskingType::Full => "full",
            MaskingType::Partial => "partial",
            MaskingType::Email => "email",
            MaskingType::Hash => "hash",
        }
    }
}

impl std::str::FromStr for MaskingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(MaskingType::Full),
            "partial" => Ok(MaskingType::Partial),
            "email" => Ok(MaskingType::Email),
            "hash" => Ok(MaskingType::Hash),
            other => Err(format!("unknown masking type: {}", other)),
        }
    }
}

impl std::fmt::Display for MaskingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Masking collaborator injected into every session
pub trait MaskingService: Send + Sync {
    fn mask(&self, value: &str, masking_type: MaskingType) -> String;
}

/// Default masking implementation
///
/// Holds only the hash salt, which never changes after construction, so
/// results are stable for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct MaskingEngine {
    salt: Sensitive<String>,
}

impl MaskingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_salt(salt: Sensitive<String>) -> Self {
        Self { salt }
    }
}

impl MaskingService for MaskingEngine {
    fn mask(&self, value: &str, masking_type: MaskingType) -> String {
        match masking_type {
            MaskingType::Hash => hash_hex(self.salt.expose(), value),
            other => mask(value, other),
        }
    }
}

/// Mask a value without a salt
///
/// # Example
///
/// ```
/// use kplog_core::masking::{mask, MaskingType};
///
/// assert_eq!(mask("4111111111111111", MaskingType::Partial), "************1111");
/// assert_eq!(mask("john@example.com", MaskingType::Email), "j***@example.com");
/// ```
pub fn mask(value: &str, masking_type: MaskingType) -> String {
    match masking_type {
        MaskingType::Full => FULL_MASK.to_string(),
        MaskingType::Partial => mask_partial(value),
        MaskingType::Email => mask_email(value),
        MaskingType::Hash => hash_hex("", value),
    }
}

fn mask_partial(value: &str) -> String {
    let len = value.chars().count();
    if len <= PARTIAL_REVEAL {
        return stars(len);
    }
    let revealed: String = value.chars().skip(len - PARTIAL_REVEAL).collect();
    format!("{}{}", stars(len - PARTIAL_REVEAL), revealed)
}

fn mask_email(value: &str) -> String {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return mask_partial(value);
    };
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return mask_partial(value);
    };
    format!("{}{}@{}", first, stars(chars.count()), domain)
}

fn stars(n: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(n).collect()
}

fn hash_hex(salt: &str, value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}
