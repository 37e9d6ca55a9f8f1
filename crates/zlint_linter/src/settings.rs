//! Resolved per-run configuration: which severity each rule runs at, its
//! options payload, and the ignore-pattern list. The JSON shape this
//! deserializes from is owned here; *finding* `zlint.json` by walking parent
//! directories is the `zlint` binary crate's job (it needs `std::fs`, which
//! a library crate otherwise has no reason to touch directly here).

use rustc_hash::FxHashMap;
use serde::Deserialize;

use zlint_codes::Rule;
use zlint_diagnostics::Severity;

/// A single entry under `"rules"` in `zlint.json`: either a bare severity
/// string, or a `[severity, options]` tuple.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Severity(String),
    WithOptions(String, serde_json::Value),
}

impl RuleSetting {
    fn severity_str(&self) -> &str {
        match self {
            RuleSetting::Severity(s) | RuleSetting::WithOptions(s, _) => s,
        }
    }

    fn options(&self) -> Option<serde_json::Value> {
        match self {
            RuleSetting::Severity(_) => None,
            RuleSetting::WithOptions(_, options) => Some(options.clone()),
        }
    }
}

/// The raw shape of `zlint.json`, deserialized as-is before being resolved
/// into a [`LinterSettings`] (which also needs to validate rule names,
/// something `serde` alone can't do without losing the unknown key).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfig {
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub rules: FxHashMap<String, RuleSetting>,
}

/// An unknown key found under `"rules"` while resolving a [`RawConfig`].
/// The bin crate turns each of these into an `invalid-config` diagnostic.
#[derive(Debug, Clone)]
pub struct UnknownRule {
    pub name: String,
}

/// Fully resolved settings for one run: a severity (and optional options
/// payload) for every rule in the catalog, plus glob ignore patterns.
#[derive(Debug, Clone)]
pub struct LinterSettings {
    severities: FxHashMap<Rule, Severity>,
    options: FxHashMap<Rule, serde_json::Value>,
    pub ignore: Vec<String>,
}

impl Default for LinterSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LinterSettings {
    /// Every rule at its documented default severity, no ignore patterns —
    /// the settings used when no `zlint.json` is found.
    pub fn new() -> Self {
        Self {
            severities: FxHashMap::default(),
            options: FxHashMap::default(),
            ignore: Vec::new(),
        }
    }

    /// Enables exactly one rule at its default severity and turns every
    /// other rule off. Used by rule-level unit tests, the way the teacher's
    /// `LinterSettings::for_rule` isolates a single check.
    pub fn for_rule(rule: Rule) -> Self {
        let mut settings = Self::new();
        for r in Rule::all() {
            settings.severities.insert(r, Severity::Off);
        }
        settings.severities.insert(rule, rule.default_severity());
        settings
    }

    /// Enables exactly the given rules at their default severity and turns
    /// every other rule off. Like [`LinterSettings::for_rule`] but for
    /// integration tests that need more than one rule active at once (e.g.
    /// to exercise directive suppression against one rule while another
    /// still fires).
    pub fn for_rules(rules: &[Rule]) -> Self {
        let mut settings = Self::new();
        for r in Rule::all() {
            settings.severities.insert(r, Severity::Off);
        }
        for &r in rules {
            settings.severities.insert(r, r.default_severity());
        }
        settings
    }

    pub fn severity_of(&self, rule: Rule) -> Severity {
        self.severities.get(&rule).copied().unwrap_or_else(|| rule.default_severity())
    }

    pub fn options_of(&self, rule: Rule) -> Option<&serde_json::Value> {
        self.options.get(&rule)
    }

    pub fn set_severity(&mut self, rule: Rule, severity: Severity) {
        self.severities.insert(rule, severity);
    }

    /// Resolves a parsed `zlint.json` into settings, returning every
    /// unrecognized rule name alongside so the caller can report
    /// `invalid-config` diagnostics without losing track of which JSON key
    /// was the problem.
    pub fn from_raw(raw: RawConfig) -> (Self, Vec<UnknownRule>) {
        let mut settings = Self::new();
        let mut unknown = Vec::new();
        for (name, setting) in raw.rules {
            match Rule::from_name(&name) {
                Some(rule) => {
                    if let Ok(severity) = setting.severity_str().parse::<Severity>() {
                        settings.set_severity(rule, severity);
                    }
                    if let Some(options) = setting.options() {
                        settings.options.insert(rule, options);
                    }
                }
                None => unknown.push(UnknownRule { name }),
            }
        }
        settings.ignore = raw.ignore;
        (settings, unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_use_each_rules_default_severity() {
        let settings = LinterSettings::new();
        assert_eq!(settings.severity_of(Rule::HomelessTry), Severity::Error);
        assert_eq!(settings.severity_of(Rule::EmptyFile), Severity::Notice);
    }

    #[test]
    fn for_rule_isolates_a_single_rule() {
        let settings = LinterSettings::for_rule(Rule::UnsafeUndefined);
        assert_eq!(settings.severity_of(Rule::UnsafeUndefined), Severity::Warning);
        assert_eq!(settings.severity_of(Rule::HomelessTry), Severity::Off);
    }

    #[test]
    fn unknown_rule_names_are_reported_not_silently_dropped() {
        let raw: RawConfig = serde_json::from_str(r#"{"rules": {"not-a-real-rule": "error"}}"#).unwrap();
        let (_, unknown) = LinterSettings::from_raw(raw);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].name, "not-a-real-rule");
    }

    #[test]
    fn rule_value_may_carry_options() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"rules": {"empty-file": ["error", {"foo": 1}]}}"#).unwrap();
        let (settings, unknown) = LinterSettings::from_raw(raw);
        assert!(unknown.is_empty());
        assert_eq!(settings.severity_of(Rule::EmptyFile), Severity::Error);
        assert!(settings.options_of(Rule::EmptyFile).is_some());
    }

    #[test]
    fn off_and_allow_are_synonyms() {
        let raw: RawConfig = serde_json::from_str(r#"{"rules": {"homeless-try": "allow"}}"#).unwrap();
        let (settings, _) = LinterSettings::from_raw(raw);
        assert_eq!(settings.severity_of(Rule::HomelessTry), Severity::Off);
    }
}
