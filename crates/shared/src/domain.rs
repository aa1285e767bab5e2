use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! key_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

key_newtype!(StoryId);

/// Relative weighting the backend applies when blending vector similarity with
/// BM25 lexical scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchWeights {
    pub vector: f64,
    pub bm25: f64,
}

impl SearchWeights {
    pub const DEFAULT_VECTOR: f64 = 0.7;
    pub const DEFAULT_BM25: f64 = 0.3;
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            vector: Self::DEFAULT_VECTOR,
            bm25: Self::DEFAULT_BM25,
        }
    }
}
