//! Characters wearing more than one distinct item within a scene.

use std::collections::HashMap;

use super::{ConflictFinding, ConflictType, Severity, WardrobeEntry};

/// Items recorded for one (scene, character) pair, in discovery order.
struct WardrobeGroup<'a> {
    scene_number: i32,
    character_name: &'a str,
    items: Vec<&'a str>,
}

/// Group entries by (scene, character) and flag groups with more than one
/// distinct item.
///
/// Repeating the same item is not an inconsistency. Findings are ordered by
/// each group's first appearance in `entries`.
pub fn detect(entries: &[WardrobeEntry]) -> Vec<ConflictFinding> {
    let mut groups: Vec<WardrobeGroup<'_>> = Vec::new();
    let mut index: HashMap<(i32, &str), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.scene_number, entry.character_name.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(WardrobeGroup {
                scene_number: entry.scene_number,
                character_name: &entry.character_name,
                items: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        if !group.items.contains(&entry.clothing_item.as_str()) {
            group.items.push(&entry.clothing_item);
        }
    }

    groups
        .into_iter()
        .filter(|g| g.items.len() > 1)
        .map(|g| ConflictFinding {
            scene_number: g.scene_number,
            shot_id: None,
            conflict_type: ConflictType::WardrobeMismatch,
            severity: Severity::Warning,
            description: format!(
                "{} has {} different clothing items in scene {}: {}",
                g.character_name,
                g.items.len(),
                g.scene_number,
                g.items.join(", ")
            ),
        })
        .collect()
}
