//! Ordered decision tables for composite diagnostic rules.
//!
//! A [`RuleTable`] holds an ordered list of rules, each a predicate over a
//! typed input and the outcome it produces. Rules are evaluated top to
//! bottom; the first whose predicate holds decides the outcome. When none
//! holds the table's terminal default applies, so evaluation always yields
//! a value.

/// Metadata about a composite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMetadata {
    /// Unique rule identifier within its table.
    pub id: &'static str,
    /// Human-readable description of the condition.
    pub description: &'static str,
}

/// A single (predicate, outcome) row.
#[derive(Debug, Clone)]
pub struct Rule<I, O> {
    metadata: RuleMetadata,
    predicate: fn(&I) -> bool,
    outcome: O,
}

impl<I, O> Rule<I, O> {
    /// Create a new rule.
    pub fn new(
        id: &'static str,
        description: &'static str,
        predicate: fn(&I) -> bool,
        outcome: O,
    ) -> Self {
        Self {
            metadata: RuleMetadata { id, description },
            predicate,
            outcome,
        }
    }

    /// Get the rule metadata.
    pub fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    /// Check whether this rule applies to `input`.
    pub fn matches(&self, input: &I) -> bool {
        (self.predicate)(input)
    }
}

/// Result of evaluating a table: the deciding rule, if any, and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome<'a, O> {
    /// Identifier of the matching rule; `None` when the default applied.
    pub rule_id: Option<&'static str>,
    pub outcome: &'a O,
}

impl<O> RuleOutcome<'_, O> {
    pub fn is_default(&self) -> bool {
        self.rule_id.is_none()
    }
}

/// Ordered rule list with a mandatory terminal default.
#[derive(Debug, Clone)]
pub struct RuleTable<I, O> {
    name: &'static str,
    rules: Vec<Rule<I, O>>,
    default: O,
}

impl<I, O> RuleTable<I, O> {
    /// Create an empty table that always yields `default`.
    pub fn new(name: &'static str, default: O) -> Self {
        Self {
            name,
            rules: Vec::new(),
            default,
        }
    }

    /// Append a rule (builder style).
    pub fn rule(
        mut self,
        id: &'static str,
        description: &'static str,
        predicate: fn(&I) -> bool,
        outcome: O,
    ) -> Self {
        self.rules.push(Rule::new(id, description, predicate, outcome));
        self
    }

    /// Get the table name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the terminal default outcome.
    pub fn default_outcome(&self) -> &O {
        &self.default
    }

    /// Evaluate the rules in order against `input`.
    pub fn evaluate(&self, input: &I) -> RuleOutcome<'_, O> {
        match self.rules.iter().find(|rule| rule.matches(input)) {
            Some(rule) => RuleOutcome {
                rule_id: Some(rule.metadata.id),
                outcome: &rule.outcome,
            },
            None => RuleOutcome {
                rule_id: None,
                outcome: &self.default,
            },
        }
    }

    /// Get all rule metadata, in evaluation order.
    pub fn rule_metadata(&self) -> Vec<&RuleMetadata> {
        self.rules.iter().map(Rule::metadata).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_table() -> RuleTable<i32, &'static str> {
        RuleTable::<i32, &str>::new("sign", "zero")
            .rule("neg", "value below zero", |v| *v < 0, "negative")
            .rule("pos", "value above zero", |v| *v > 0, "positive")
            .rule("big", "never reached for positives", |v| *v > 100, "big")
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = sign_table();
        let outcome = table.evaluate(&500);
        assert_eq!(outcome.rule_id, Some("pos"));
        assert_eq!(*outcome.outcome, "positive");
    }

    #[test]
    fn default_applies_when_nothing_matches() {
        let table = sign_table();
        let outcome = table.evaluate(&0);
        assert!(outcome.is_default());
        assert_eq!(*outcome.outcome, "zero");
    }

    #[test]
    fn metadata_keeps_order() {
        let ids: Vec<_> = sign_table().rule_metadata().iter().map(|m| m.id).collect();
        assert_eq!(ids, ["neg", "pos", "big"]);
    }
}
