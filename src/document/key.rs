//! Block keys

use std::fmt;

/// Stable identifier for a block that survives edits and persistence
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockKey(pub String);

impl BlockKey {
    /// Key derived from a generator counter, in base36
    pub fn from_counter(mut n: u64) -> Self {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut buf = Vec::new();
        loop {
            buf.push(DIGITS[(n % 36) as usize]);
            n /= 36;
            if n == 0 {
                break;
            }
        }
        buf.reverse();
        Self(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for BlockKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counter() {
        assert_eq!(BlockKey::from_counter(0).as_str(), "0");
        assert_eq!(BlockKey::from_counter(35).as_str(), "z");
        assert_eq!(BlockKey::from_counter(36).as_str(), "10");
    }
}
