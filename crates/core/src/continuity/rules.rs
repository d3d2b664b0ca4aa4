//! The fixed, ordered rule set applied to every snapshot.

use std::collections::HashMap;

use serde::Serialize;

use super::{
    identity_drift, style_drift, wardrobe, ConflictFinding, ContinuitySnapshot, FindingKey,
};

/// One detection rule. Every rule reads the same snapshot and returns zero or
/// more findings; rules are independent of each other and of their order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuityRule {
    StyleDrift,
    IdentityDrift,
    WardrobeConsistency,
}

impl ContinuityRule {
    /// The rule set, in the order findings are reported.
    pub const ALL: [ContinuityRule; 3] = [
        ContinuityRule::StyleDrift,
        ContinuityRule::IdentityDrift,
        ContinuityRule::WardrobeConsistency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::StyleDrift => "style_drift",
            Self::IdentityDrift => "identity_drift",
            Self::WardrobeConsistency => "wardrobe_consistency",
        }
    }

    /// Run this rule over `snapshot`.
    pub fn detect(&self, snapshot: &ContinuitySnapshot) -> Vec<ConflictFinding> {
        match self {
            Self::StyleDrift => style_drift::detect(&snapshot.shots, snapshot.current_style_version),
            Self::IdentityDrift => identity_drift::detect(&snapshot.shots, &snapshot.dirty_tokens),
            Self::WardrobeConsistency => wardrobe::detect(&snapshot.wardrobe),
        }
    }
}

/// Output of one full rule-set evaluation.
#[derive(Debug, Clone, Default)]
pub struct RuleSetReport {
    /// Finding count per rule, in [`ContinuityRule::ALL`] order.
    pub counts: Vec<(ContinuityRule, usize)>,
    /// Findings to record, grouped by rule in [`ContinuityRule::ALL`] order.
    pub findings: Vec<ConflictFinding>,
    /// Findings dropped because a resolved conflict already covers them.
    pub suppressed: usize,
}

/// Apply every rule in [`ContinuityRule::ALL`] to `snapshot`.
///
/// Each key in `snapshot.resolved` drops at most one matching finding, so a
/// pass never re-raises a conflict that was signed off while identical
/// findings beyond the resolved count are still reported. `counts` reflects
/// raw rule output before that filter.
pub fn evaluate(snapshot: &ContinuitySnapshot) -> RuleSetReport {
    let mut resolved: HashMap<&FindingKey, usize> = HashMap::new();
    for key in &snapshot.resolved {
        *resolved.entry(key).or_default() += 1;
    }

    let mut report = RuleSetReport::default();
    for rule in ContinuityRule::ALL {
        let findings = rule.detect(snapshot);
        report.counts.push((rule, findings.len()));
        for finding in findings {
            match resolved.get_mut(&finding.key()) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    report.suppressed += 1;
                }
                _ => report.findings.push(finding),
            }
        }
    }
    report
}
