//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Natural key of a stored record, rendered as a string for backends
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    fn as_str(&self) -> &str;
}

/// A record that can be persisted under a unique natural key
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct PairKey(String);

    impl StorageKey for PairKey {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Rate {
        pair: PairKey,
        value: f64,
    }

    impl StorageEntity for Rate {
        type Key = PairKey;

        fn key(&self) -> &Self::Key {
            &self.pair
        }
    }

    #[test]
    fn test_entity_exposes_natural_key() {
        let rate = Rate {
            pair: PairKey("EUR-IDR".to_string()),
            value: 19255.0,
        };
        assert_eq!(rate.key().as_str(), "EUR-IDR");
        assert_eq!(rate.value, 19255.0);
    }
}
