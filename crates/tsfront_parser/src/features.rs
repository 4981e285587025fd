//! Language feature gates.
//!
//! Constructs that some dialects lack are checked against a [`FeatureSet`]
//! keyed by the stable strings in [`feature`]. A [`Dialect`] supplies a
//! ready-made set that callers can extend or trim.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Stable feature keys.
pub mod feature {
    pub const LET_CONST: &str = "let-const";
    pub const ARROW_FUNCTIONS: &str = "arrow-functions";
    pub const CLASSES: &str = "classes";
    pub const GENERATORS: &str = "generators";
    pub const ASYNC_AWAIT: &str = "async-await";
    pub const DESTRUCTURING: &str = "destructuring";
    pub const SPREAD: &str = "spread";
    pub const REST_PARAMETERS: &str = "rest-parameters";
    pub const DEFAULT_PARAMETERS: &str = "default-parameters";
    pub const TEMPLATE_LITERALS: &str = "template-literals";
    pub const FOR_OF: &str = "for-of";
    pub const MODULES: &str = "modules";
    pub const BINARY_OCTAL_LITERALS: &str = "binary-octal-literals";
    pub const EXPONENTIATION: &str = "exponentiation";
    pub const OPTIONAL_CHAINING: &str = "optional-chaining";
    pub const NULLISH_COALESCING: &str = "nullish-coalescing";
    pub const BIGINT: &str = "bigint";
    pub const NUMERIC_SEPARATORS: &str = "numeric-separators";
    pub const LOGICAL_ASSIGNMENT: &str = "logical-assignment";
    pub const CLASS_FIELDS: &str = "class-fields";
    pub const PRIVATE_NAMES: &str = "private-names";
    pub const TYPESCRIPT: &str = "typescript";

    /// Every key, in dialect order.
    pub const ALL: &[&str] = &[
        LET_CONST,
        ARROW_FUNCTIONS,
        CLASSES,
        GENERATORS,
        DESTRUCTURING,
        SPREAD,
        REST_PARAMETERS,
        DEFAULT_PARAMETERS,
        TEMPLATE_LITERALS,
        FOR_OF,
        MODULES,
        BINARY_OCTAL_LITERALS,
        EXPONENTIATION,
        ASYNC_AWAIT,
        OPTIONAL_CHAINING,
        NULLISH_COALESCING,
        BIGINT,
        NUMERIC_SEPARATORS,
        LOGICAL_ASSIGNMENT,
        CLASS_FIELDS,
        PRIVATE_NAMES,
        TYPESCRIPT,
    ];
}

const ES2015: &[&str] = &[
    feature::LET_CONST,
    feature::ARROW_FUNCTIONS,
    feature::CLASSES,
    feature::GENERATORS,
    feature::DESTRUCTURING,
    feature::SPREAD,
    feature::REST_PARAMETERS,
    feature::DEFAULT_PARAMETERS,
    feature::TEMPLATE_LITERALS,
    feature::FOR_OF,
    feature::MODULES,
    feature::BINARY_OCTAL_LITERALS,
];
const ES2016: &[&str] = &[feature::EXPONENTIATION];
const ES2017: &[&str] = &[feature::ASYNC_AWAIT];
const ES2020: &[&str] = &[feature::OPTIONAL_CHAINING, feature::NULLISH_COALESCING, feature::BIGINT];
const ES2022: &[&str] = &[
    feature::NUMERIC_SEPARATORS,
    feature::LOGICAL_ASSIGNMENT,
    feature::CLASS_FIELDS,
    feature::PRIVATE_NAMES,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2020,
    Es2022,
    EsNext,
    #[default]
    TypeScript,
}

impl Dialect {
    /// The editions whose features this dialect includes, oldest first.
    fn editions(self) -> &'static [&'static [&'static str]] {
        match self {
            Dialect::Es5 => &[],
            Dialect::Es2015 => &[ES2015],
            Dialect::Es2016 => &[ES2015, ES2016],
            Dialect::Es2017 => &[ES2015, ES2016, ES2017],
            Dialect::Es2020 => &[ES2015, ES2016, ES2017, ES2020],
            Dialect::Es2022 | Dialect::EsNext | Dialect::TypeScript => &[ES2015, ES2016, ES2017, ES2020, ES2022],
        }
    }

    pub fn features(self) -> FeatureSet {
        let mut set = FeatureSet::empty();
        for key in self.editions().iter().flat_map(|edition| edition.iter()) {
            set.enable(key);
        }
        if self == Dialect::TypeScript {
            set.enable(feature::TYPESCRIPT);
        }
        set
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureSet {
    keys: FxHashSet<String>,
}

impl FeatureSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn enable(&mut self, key: &str) -> &mut Self {
        self.keys.insert(key.to_string());
        self
    }

    pub fn disable(&mut self, key: &str) -> &mut Self {
        self.keys.remove(key);
        self
    }

    #[inline]
    pub fn supports(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether `key` is one of the keys the parser consults.
    pub fn is_known(key: &str) -> bool {
        feature::ALL.contains(&key)
    }
}

impl From<Dialect> for FeatureSet {
    fn from(dialect: Dialect) -> Self {
        dialect.features()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn es5_supports_nothing_gated() {
        let es5 = Dialect::Es5.features();
        assert!(es5.is_empty());
        assert!(feature::ALL.iter().all(|key| !es5.supports(key)));
    }

    #[test]
    fn dialects_are_cumulative() {
        let es2016 = Dialect::Es2016.features();
        assert!(es2016.supports(feature::CLASSES));
        assert!(es2016.supports(feature::EXPONENTIATION));
        assert!(!es2016.supports(feature::ASYNC_AWAIT));

        let es2020 = Dialect::Es2020.features();
        assert!(es2020.supports(feature::OPTIONAL_CHAINING));
        assert!(!es2020.supports(feature::CLASS_FIELDS));
    }

    #[test]
    fn typescript_is_esnext_plus_types() {
        let ts = Dialect::TypeScript.features();
        let next = Dialect::EsNext.features();
        assert_eq!(ts.len(), next.len() + 1);
        assert!(ts.supports(feature::TYPESCRIPT));
        assert!(!next.supports(feature::TYPESCRIPT));
        assert_eq!(ts.len(), feature::ALL.len());
    }

    #[test]
    fn enable_and_disable() {
        let mut set = FeatureSet::from(Dialect::Es5);
        set.enable(feature::LET_CONST).enable(feature::ARROW_FUNCTIONS);
        set.disable(feature::ARROW_FUNCTIONS);
        assert!(set.supports(feature::LET_CONST));
        assert!(!set.supports(feature::ARROW_FUNCTIONS));
        assert!(FeatureSet::is_known("for-of"));
        assert!(!FeatureSet::is_known("decorators"));
    }

    #[test]
    fn dialect_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Dialect::Es2015).unwrap(), "\"es2015\"");
        let parsed: Dialect = serde_json::from_str("\"esnext\"").unwrap();
        assert_eq!(parsed, Dialect::EsNext);
        assert_eq!(Dialect::default(), Dialect::TypeScript);
    }
}
