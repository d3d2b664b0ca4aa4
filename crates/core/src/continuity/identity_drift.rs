//! Shots whose prompts reference an identity token that has since changed.

use std::collections::HashMap;

use super::{ConflictFinding, ConflictType, DirtyToken, Severity, ShotView};
use crate::references::extract_references;

/// Flag every reference to a dirty token in every shot prompt.
///
/// Each textual occurrence is reported, so a prompt naming the same dirty
/// token twice yields two findings.
pub fn detect(shots: &[ShotView], dirty_tokens: &[DirtyToken]) -> Vec<ConflictFinding> {
    if dirty_tokens.is_empty() {
        return Vec::new();
    }

    let by_code: HashMap<&str, &DirtyToken> = dirty_tokens
        .iter()
        .map(|t| (t.reference_code.as_str(), t))
        .collect();

    let mut findings = Vec::new();
    for shot in shots {
        let Some(prompt) = shot.prompt.as_deref() else {
            continue;
        };

        for code in extract_references(prompt) {
            if let Some(token) = by_code.get(code) {
                findings.push(ConflictFinding {
                    scene_number: shot.scene_number,
                    shot_id: Some(shot.id),
                    conflict_type: ConflictType::CharacterDrift,
                    severity: Severity::Error,
                    description: format!(
                        "{} ({}) changed after this shot was generated",
                        token.display_name, token.asset_type
                    ),
                });
            }
        }
    }
    findings
}
