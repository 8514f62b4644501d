//! Options passed explicitly into every parse call.

use serde::{Deserialize, Serialize};

use crate::scene::MaterialEquality;

/// Parser configuration.
///
/// There is no global state: block tracing and the deduplication policy are
/// chosen per call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Fields compared when deduplicating materials
    pub equality: MaterialEquality,

    /// Log every block the parser enters at `info` level instead of `trace`
    pub trace_blocks: bool,
}

impl ParseOptions {
    pub fn with_equality(mut self, equality: MaterialEquality) -> Self {
        self.equality = equality;
        self
    }

    pub fn with_trace_blocks(mut self, trace_blocks: bool) -> Self {
        self.trace_blocks = trace_blocks;
        self
    }

    /// Level used for block tracing.
    pub(crate) fn trace_level(&self) -> log::Level {
        if self.trace_blocks {
            log::Level::Info
        } else {
            log::Level::Trace
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.equality, MaterialEquality::Legacy);
        assert!(!options.trace_blocks);
        assert_eq!(options.trace_level(), log::Level::Trace);
    }

    #[test]
    fn test_builders() {
        let options = ParseOptions::default()
            .with_equality(MaterialEquality::IncludeSpecular)
            .with_trace_blocks(true);

        assert_eq!(options.equality, MaterialEquality::IncludeSpecular);
        assert_eq!(options.trace_level(), log::Level::Info);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ParseOptions = serde_json::from_str(r#"{ "equality": "include_specular" }"#).unwrap();
        assert_eq!(options.equality, MaterialEquality::IncludeSpecular);
        assert!(!options.trace_blocks);
    }
}
