//! Continuity-conflict detection: finding types, the detection snapshot,
//! scope validation, and the rule set.
//!
//! The rules only read a [`ContinuitySnapshot`]; loading it and persisting
//! the resulting [`ConflictFinding`]s belong to the `db` crate.

pub mod identity_drift;
pub mod rules;
pub mod scope;
pub mod style_drift;
pub mod wardrobe;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub use rules::{evaluate, ContinuityRule, RuleSetReport};
pub use scope::DetectionScope;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Summary returned when the scope contains no shots and no rule ran.
pub const NO_SHOTS_SUMMARY: &str = "No shots to analyze";

/// Summary returned when the rules ran and found nothing.
pub const NO_CONFLICTS_SUMMARY: &str = "No continuity conflicts detected";

// ---------------------------------------------------------------------------
// ConflictType
// ---------------------------------------------------------------------------

/// The kind of continuity inconsistency a conflict describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Shot rendered against an older style contract than the current one.
    StyleDrift,
    /// Shot references an identity token whose definition has since changed.
    CharacterDrift,
    /// A character wears more than one distinct item within one scene.
    WardrobeMismatch,
}

/// All valid conflict type strings.
const VALID_CONFLICT_TYPES: &[&str] = &["style_drift", "character_drift", "wardrobe_mismatch"];

impl ConflictType {
    /// Every conflict type, in rule order.
    pub const ALL: [ConflictType; 3] = [
        ConflictType::StyleDrift,
        ConflictType::CharacterDrift,
        ConflictType::WardrobeMismatch,
    ];

    /// Return the conflict type as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StyleDrift => "style_drift",
            Self::CharacterDrift => "character_drift",
            Self::WardrobeMismatch => "wardrobe_mismatch",
        }
    }

    /// Parse a conflict type from its database representation.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "style_drift" => Ok(Self::StyleDrift),
            "character_drift" => Ok(Self::CharacterDrift),
            "wardrobe_mismatch" => Ok(Self::WardrobeMismatch),
            _ => Err(CoreError::Validation(format!(
                "Invalid conflict type '{s}'. Must be one of: {}",
                VALID_CONFLICT_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How urgently a conflict needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// One inconsistency produced by a rule, before it is persisted.
///
/// The film is implied by the [`DetectionScope`] of the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictFinding {
    pub scene_number: i32,
    /// `None` for scene-scoped findings (wardrobe).
    pub shot_id: Option<DbId>,
    pub conflict_type: ConflictType,
    pub severity: Severity,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Identity of a finding across passes.
///
/// A new finding with the same key as a resolved conflict is the same
/// inconsistency someone already signed off on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FindingKey {
    pub scene_number: i32,
    pub shot_id: Option<DbId>,
    pub conflict_type: ConflictType,
    pub description: String,
}

impl ConflictFinding {
    pub fn key(&self) -> FindingKey {
        FindingKey {
            scene_number: self.scene_number,
            shot_id: self.shot_id,
            conflict_type: self.conflict_type,
            description: self.description.clone(),
        }
    }
}

/// The fields of a shot the rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotView {
    pub id: DbId,
    pub scene_number: i32,
    pub prompt: Option<String>,
    /// `None` means the shot predates style versioning.
    pub style_contract_version: Option<i32>,
}

/// An identity token whose canonical definition changed after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyToken {
    pub reference_code: String,
    pub display_name: String,
    pub asset_type: String,
}

/// One (scene, character, item) wardrobe record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardrobeEntry {
    pub scene_number: i32,
    pub character_name: String,
    pub clothing_item: String,
}

/// Everything one detection pass reads, captured at a single point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuitySnapshot {
    /// Ordered by scene number, then creation order.
    pub shots: Vec<ShotView>,
    /// Highest style contract version for the film, if any contract exists.
    pub current_style_version: Option<i32>,
    pub dirty_tokens: Vec<DirtyToken>,
    pub wardrobe: Vec<WardrobeEntry>,
    /// Keys of conflicts in scope already marked resolved.
    pub resolved: Vec<FindingKey>,
}

impl ContinuitySnapshot {
    /// A pass over a scope with no shots short-circuits before any rule runs.
    pub fn has_shots(&self) -> bool {
        !self.shots.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Build the one-line summary for a completed pass.
///
/// Zero findings yields [`NO_CONFLICTS_SUMMARY`]; otherwise the total with a
/// per-type breakdown in rule order, omitting types with no findings.
pub fn summarize(findings: &[ConflictFinding]) -> String {
    if findings.is_empty() {
        return NO_CONFLICTS_SUMMARY.to_string();
    }

    let breakdown: Vec<String> = ConflictType::ALL
        .iter()
        .filter_map(|ty| {
            let count = findings.iter().filter(|f| f.conflict_type == *ty).count();
            (count > 0).then(|| format!("{count} {}", ty.as_str()))
        })
        .collect();

    let noun = if findings.len() == 1 {
        "conflict"
    } else {
        "conflicts"
    };

    format!(
        "Found {} continuity {noun} ({})",
        findings.len(),
        breakdown.join(", ")
    )
}
