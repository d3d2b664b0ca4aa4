//! Shots generated against a style contract older than the current one.

use super::{ConflictFinding, ConflictType, Severity, ShotView};

/// Flag every shot whose recorded contract version differs from `current_version`.
///
/// A film without a contract cannot drift, and shots with no recorded
/// version predate versioning and are not comparable.
pub fn detect(shots: &[ShotView], current_version: Option<i32>) -> Vec<ConflictFinding> {
    let Some(current) = current_version else {
        return Vec::new();
    };

    shots
        .iter()
        .filter_map(|shot| {
            let recorded = shot.style_contract_version?;
            (recorded != current).then(|| ConflictFinding {
                scene_number: shot.scene_number,
                shot_id: Some(shot.id),
                conflict_type: ConflictType::StyleDrift,
                severity: Severity::Warning,
                description: format!(
                    "Shot was generated against style contract v{recorded} \
                     but the current contract is v{current}"
                ),
            })
        })
        .collect()
}
