//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::features::{Dialect, FeatureSet};

pub const DEFAULT_MAX_DEPTH: u32 = 512;

/// Options for one parse call. Loaded from JSON with camelCase keys; every
/// key is optional.
///
/// ```json
/// { "dialect": "es2020", "enable": ["class-fields"], "module": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    pub dialect: Dialect,
    /// Feature keys added on top of the dialect.
    pub enable: Vec<String>,
    /// Feature keys removed from the dialect.
    pub disable: Vec<String>,
    /// Parse with the module goal: strict from the start, top-level `await`.
    pub module: bool,
    /// Start in strict mode without a directive.
    pub strict: bool,
    pub max_depth: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            enable: Vec::new(),
            disable: Vec::new(),
            module: false,
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_module(mut self, module: bool) -> Self {
        self.module = module;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether parsing starts in strict mode.
    pub fn starts_strict(&self) -> bool {
        self.strict || self.module
    }

    /// The dialect's features with `enable` added and `disable` removed.
    pub fn feature_set(&self) -> FeatureSet {
        let mut features = self.dialect.features();
        for key in &self.enable {
            features.enable(key);
        }
        for key in &self.disable {
            features.disable(key);
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::feature;

    #[test]
    fn defaults() {
        let options = ParserOptions::default();
        assert_eq!(options.dialect, Dialect::TypeScript);
        assert_eq!(options.max_depth, 512);
        assert!(!options.starts_strict());
    }

    #[test]
    fn loads_camel_case_json() {
        let options = ParserOptions::from_json(
            r#"{ "dialect": "es2015", "enable": ["exponentiation"], "disable": ["classes"], "maxDepth": 64, "module": true }"#,
        )
        .unwrap();
        assert_eq!(options.dialect, Dialect::Es2015);
        assert_eq!(options.max_depth, 64);
        assert!(options.starts_strict());

        let features = options.feature_set();
        assert!(features.supports(feature::EXPONENTIATION));
        assert!(!features.supports(feature::CLASSES));
        assert!(features.supports(feature::LET_CONST));
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(ParserOptions::from_json("{}").unwrap(), ParserOptions::default());
        assert!(ParserOptions::from_json(r#"{ "dialect": "es3" }"#).is_err());
    }
}
