//! The static rule registry: every lint rule's stable name, category,
//! default severity, and fix kind, plus [`RuleSet`], a dense bitset over
//! the whole catalog used wherever configuration needs to select a subset
//! of rules cheaply.

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString};

use zlint_diagnostics::{FixApplicability, FixKind, Severity};

/// Coarse grouping shown in docs and used to bulk-enable/disable rules
/// (e.g. a future `"correctness"` config shorthand).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Correctness,
    Style,
    Internal,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Correctness => "correctness",
            Category::Style => "style",
            Category::Internal => "internal",
        }
    }
}

/// Every rule this linter implements. The catalog is closed and small
/// enough to enumerate by hand rather than generate from a registry file,
/// matching the scale zlint operates at (a dozen rules, not ruff's several
/// hundred).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Rule {
    HomelessTry,
    UnsafeUndefined,
    NoReturnTry,
    UnusedDecls,
    UnusedFunctionParam,
    UnusedImport,
    ShadowedParam,
    EmptyFile,
    FieldDefaultUndefined,
    UselessComptime,
    RedundantComptimeBlock,
    InvalidConfig,
}

/// Per-rule metadata: everything the dispatcher and config resolver need
/// without running the rule itself.
#[derive(Debug, Clone, Copy)]
pub struct RuleMeta {
    pub rule: Rule,
    pub name: &'static str,
    pub category: Category,
    pub default_severity: Severity,
    pub fix_kind: FixKind,
}

macro_rules! rule_meta {
    ($rule:expr, $name:expr, $category:expr, $severity:expr, $fix:expr) => {
        RuleMeta {
            rule: $rule,
            name: $name,
            category: $category,
            default_severity: $severity,
            fix_kind: $fix,
        }
    };
}

const METADATA: &[RuleMeta] = &[
    rule_meta!(
        Rule::HomelessTry,
        "homeless-try",
        Category::Correctness,
        Severity::Error,
        FixKind::NONE
    ),
    rule_meta!(
        Rule::UnsafeUndefined,
        "unsafe-undefined",
        Category::Correctness,
        Severity::Warning,
        FixKind::NONE
    ),
    rule_meta!(
        Rule::NoReturnTry,
        "no-return-try",
        Category::Style,
        Severity::Warning,
        FixKind::NONE
    ),
    rule_meta!(
        Rule::UnusedDecls,
        "unused-decls",
        Category::Correctness,
        Severity::Warning,
        FixKind {
            applicability: FixApplicability::Suggestion,
            dangerous: false,
        }
    ),
    rule_meta!(
        Rule::UnusedFunctionParam,
        "unused-function-param",
        Category::Style,
        Severity::Warning,
        FixKind::NONE
    ),
    rule_meta!(
        Rule::UnusedImport,
        "unused-import",
        Category::Correctness,
        Severity::Warning,
        FixKind::fix()
    ),
    rule_meta!(
        Rule::ShadowedParam,
        "shadowed-param",
        Category::Correctness,
        Severity::Warning,
        FixKind::NONE
    ),
    rule_meta!(
        Rule::EmptyFile,
        "empty-file",
        Category::Style,
        Severity::Notice,
        FixKind::NONE
    ),
    rule_meta!(
        Rule::FieldDefaultUndefined,
        "field-default-undefined",
        Category::Style,
        Severity::Warning,
        FixKind::NONE
    ),
    rule_meta!(
        Rule::UselessComptime,
        "useless-comptime",
        Category::Style,
        Severity::Warning,
        FixKind::suggestion()
    ),
    rule_meta!(
        Rule::RedundantComptimeBlock,
        "redundant-comptime-block",
        Category::Style,
        Severity::Notice,
        FixKind::fix()
    ),
    rule_meta!(
        Rule::InvalidConfig,
        "invalid-config",
        Category::Internal,
        Severity::Error,
        FixKind::NONE
    ),
];

impl Rule {
    /// The catalog in declaration order. Declaration order is the order
    /// `RuleDispatcher` runs rules in by default.
    pub fn all() -> impl Iterator<Item = Rule> {
        Rule::iter()
    }

    pub fn meta(self) -> &'static RuleMeta {
        METADATA
            .iter()
            .find(|m| m.rule == self)
            .expect("every Rule variant has a METADATA entry")
    }

    pub fn name(self) -> &'static str {
        self.meta().name
    }

    pub fn category(self) -> Category {
        self.meta().category
    }

    pub fn default_severity(self) -> Severity {
        self.meta().default_severity
    }

    pub fn fix_kind(self) -> FixKind {
        self.meta().fix_kind
    }

    /// Looks a rule up by its kebab-case config/CLI name.
    pub fn from_name(name: &str) -> Option<Rule> {
        METADATA.iter().find(|m| m.name == name).map(|m| m.rule)
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// A dense bitset over the rule catalog: which rules are enabled for a
/// given run. Twelve rules comfortably fit in a `u16`, so unlike the
/// teacher's arbitrary-width `RuleSet` (built for several hundred codes),
/// this one is a plain copyable bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleSet(u16);

impl RuleSet {
    pub const EMPTY: RuleSet = RuleSet(0);

    pub fn all() -> RuleSet {
        let mut set = RuleSet::EMPTY;
        for rule in Rule::all() {
            set.insert(rule);
        }
        set
    }

    pub fn insert(&mut self, rule: Rule) {
        self.0 |= rule.bit();
    }

    pub fn remove(&mut self, rule: Rule) {
        self.0 &= !rule.bit();
    }

    pub fn contains(self, rule: Rule) -> bool {
        self.0 & rule.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Rule> {
        Rule::all().filter(move |&r| self.contains(r))
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        let mut set = RuleSet::EMPTY;
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_has_metadata() {
        for rule in Rule::all() {
            let meta = rule.meta();
            assert_eq!(meta.rule, rule);
        }
    }

    #[test]
    fn from_name_round_trips_kebab_case() {
        assert_eq!(Rule::from_name("homeless-try"), Some(Rule::HomelessTry));
        assert_eq!(Rule::from_name("unused-function-param"), Some(Rule::UnusedFunctionParam));
        assert_eq!(Rule::from_name("nonexistent-rule"), None);
    }

    #[test]
    fn rule_set_tracks_membership() {
        let mut set = RuleSet::EMPTY;
        assert!(!set.contains(Rule::HomelessTry));
        set.insert(Rule::HomelessTry);
        assert!(set.contains(Rule::HomelessTry));
        set.remove(Rule::HomelessTry);
        assert!(!set.contains(Rule::HomelessTry));
    }

    #[test]
    fn all_returns_every_rule() {
        let set = RuleSet::all();
        assert_eq!(set.iter().count(), Rule::all().count());
    }

    #[test]
    fn literal_catalog_scenarios_have_expected_defaults() {
        assert_eq!(Rule::HomelessTry.default_severity(), Severity::Error);
        assert_eq!(Rule::UnsafeUndefined.default_severity(), Severity::Warning);
        assert_eq!(Rule::NoReturnTry.default_severity(), Severity::Warning);
        assert_eq!(Rule::UnusedDecls.default_severity(), Severity::Warning);
    }
}
