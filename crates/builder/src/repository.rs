//! Pure element-collection operations behind the element-mutating
//! commands, factored out of the store so they are testable without the
//! command plumbing.
//!
//! Every operation takes the collection by value and returns the new
//! collection; an operation that rejects its input (duplicate id, unknown
//! id, index out of range) warns and returns the input unchanged. Elements
//! other than the target are moved, never rebuilt.

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::types::{ElementDetail, UniversalElement};

/// A partial element mutation. `title`/`description`/`detail` replace when
/// present; `config` keys are merged one level deep, so updating
/// `config.delay.value` does not erase sibling keys of `config.delay`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub config: Option<Value>,
    pub detail: Option<ElementDetail>,
}

/// Appends an element, assigning it the next position. Rejects an element
/// whose id is already present.
pub fn add(mut elements: Vec<UniversalElement>, mut element: UniversalElement) -> Vec<UniversalElement> {
    if elements.iter().any(|e| e.id == element.id) {
        warn!(element_id = %element.id, "Rejected add: duplicate element id");
        return elements;
    }
    element.position = elements.len() as u32;
    elements.push(element);
    elements
}

/// Applies a partial update to the element with the given id.
pub fn update(
    mut elements: Vec<UniversalElement>,
    id: Uuid,
    update: &ElementUpdate,
) -> Vec<UniversalElement> {
    let Some(element) = elements.iter_mut().find(|e| e.id == id) else {
        warn!(element_id = %id, "Rejected update: unknown element id");
        return elements;
    };
    if let Some(title) = &update.title {
        element.title = title.clone();
    }
    if let Some(description) = &update.description {
        element.description = description.clone();
    }
    if let Some(config) = &update.config {
        merge_config(&mut element.config, config);
    }
    if let Some(detail) = &update.detail {
        element.detail = detail.clone();
    }
    elements
}

/// Removes the element with the given id and renumbers positions. Unknown
/// ids leave the collection unchanged.
pub fn remove(mut elements: Vec<UniversalElement>, id: Uuid) -> Vec<UniversalElement> {
    let before = elements.len();
    elements.retain(|e| e.id != id);
    if elements.len() == before {
        warn!(element_id = %id, "Rejected remove: unknown element id");
        return elements;
    }
    renumber(&mut elements);
    elements
}

/// Moves one element within the non-trigger sub-sequence. Triggers are
/// pinned at the head and excluded: `old_index`/`new_index` address the
/// non-trigger partition, and the two partitions are re-concatenated
/// around the move.
pub fn reorder_non_triggers(
    elements: Vec<UniversalElement>,
    old_index: usize,
    new_index: usize,
) -> Vec<UniversalElement> {
    let (triggers, mut movable): (Vec<_>, Vec<_>) =
        elements.into_iter().partition(|e| e.is_trigger());

    if old_index >= movable.len() || new_index >= movable.len() {
        warn!(old_index, new_index, len = movable.len(), "Rejected reorder: index out of range");
        let mut elements: Vec<_> = triggers.into_iter().chain(movable).collect();
        renumber(&mut elements);
        return elements;
    }

    let moved = movable.remove(old_index);
    movable.insert(new_index, moved);

    let mut elements: Vec<_> = triggers.into_iter().chain(movable).collect();
    renumber(&mut elements);
    elements
}

/// Clones the element with the given id under a fresh id and a derived
/// title, appending the copy at the end of the collection.
pub fn duplicate(mut elements: Vec<UniversalElement>, id: Uuid) -> Vec<UniversalElement> {
    let Some(source) = elements.iter().find(|e| e.id == id) else {
        warn!(element_id = %id, "Rejected duplicate: unknown element id");
        return elements;
    };
    let mut copy = source.clone();
    copy.id = Uuid::new_v4();
    copy.title = format!("{} (Copy)", source.title);
    copy.position = elements.len() as u32;
    elements.push(copy);
    elements
}

/// Merges `updates` into `config` one level deep: a key whose old and new
/// values are both objects has its sub-keys merged; anything else is
/// replaced.
pub fn merge_config(config: &mut Value, updates: &Value) {
    let Some(updates) = updates.as_object() else {
        *config = updates.clone();
        return;
    };
    let Value::Object(target) = config else {
        *config = Value::Object(updates.clone());
        return;
    };
    for (key, new_value) in updates {
        match (target.get_mut(key), new_value.as_object()) {
            (Some(Value::Object(existing)), Some(nested)) => {
                for (k, v) in nested {
                    existing.insert(k.clone(), v.clone());
                }
            }
            _ => {
                target.insert(key.clone(), new_value.clone());
            }
        }
    }
}

fn renumber(elements: &mut [UniversalElement]) {
    for (index, element) in elements.iter_mut().enumerate() {
        element.position = index as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkflowDetail;
    use serde_json::json;

    fn element(element_type: &str, title: &str) -> UniversalElement {
        UniversalElement::new(
            element_type,
            title,
            json!({}),
            ElementDetail::Workflow(WorkflowDetail::default()),
        )
    }

    fn workflow_elements() -> Vec<UniversalElement> {
        let mut elements = Vec::new();
        elements = add(elements, element("trigger", "When form submitted"));
        elements = add(elements, element("send_email", "Welcome email"));
        elements = add(elements, element("delay", "Wait 2 days"));
        elements = add(elements, element("send_email", "Follow-up email"));
        elements
    }

    #[test]
    fn test_add_assigns_contiguous_positions() {
        let elements = workflow_elements();
        for (i, e) in elements.iter().enumerate() {
            assert_eq!(e.position as usize, i);
        }
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let elements = workflow_elements();
        let mut dup = element("delay", "Another delay");
        dup.id = elements[0].id;
        let after = add(elements.clone(), dup);
        assert_eq!(after, elements);
    }

    #[test]
    fn test_update_merges_config_one_level_deep() {
        let mut e = element("delay", "Wait");
        e.config = json!({"delay": {"value": 2, "unit": "days"}, "note": "x"});
        let id = e.id;
        let elements = vec![e];

        let patch = ElementUpdate {
            config: Some(json!({"delay": {"value": 5}})),
            ..Default::default()
        };
        let elements = update(elements, id, &patch);

        let config = &elements[0].config;
        assert_eq!(config["delay"]["value"], json!(5));
        assert_eq!(config["delay"]["unit"], json!("days"));
        assert_eq!(config["note"], json!("x"));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let elements = workflow_elements();
        let patch = ElementUpdate {
            title: Some("renamed".to_string()),
            ..Default::default()
        };
        let after = update(elements.clone(), Uuid::new_v4(), &patch);
        assert_eq!(after, elements);
    }

    #[test]
    fn test_update_touches_only_target() {
        let elements = workflow_elements();
        let target = elements[1].id;
        let others: Vec<_> = elements
            .iter()
            .filter(|e| e.id != target)
            .cloned()
            .collect();

        let patch = ElementUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let after = update(elements, target, &patch);

        assert_eq!(after.iter().find(|e| e.id == target).unwrap().title, "Renamed");
        for other in others {
            assert_eq!(*after.iter().find(|e| e.id == other.id).unwrap(), other);
        }
    }

    #[test]
    fn test_remove_renumbers() {
        let elements = workflow_elements();
        let removed = elements[1].id;
        let after = remove(elements, removed);
        assert_eq!(after.len(), 3);
        for (i, e) in after.iter().enumerate() {
            assert_eq!(e.position as usize, i);
            assert_ne!(e.id, removed);
        }
    }

    #[test]
    fn test_reorder_keeps_triggers_pinned() {
        let elements = workflow_elements();
        let trigger_id = elements[0].id;

        // Move the last non-trigger to the front of the movable partition.
        let after = reorder_non_triggers(elements, 2, 0);

        assert!(after[0].is_trigger());
        assert_eq!(after[0].id, trigger_id);
        assert_eq!(after[1].title, "Follow-up email");
        for (i, e) in after.iter().enumerate() {
            assert_eq!(e.position as usize, i);
        }
    }

    #[test]
    fn test_reorder_round_trip_is_identity() {
        let elements = workflow_elements();
        let round_tripped =
            reorder_non_triggers(reorder_non_triggers(elements.clone(), 0, 2), 2, 0);
        assert_eq!(round_tripped, elements);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let elements = workflow_elements();
        let after = reorder_non_triggers(elements.clone(), 0, 99);
        assert_eq!(after, elements);
    }

    #[test]
    fn test_duplicate_semantics() {
        let elements = workflow_elements();
        let source = elements[1].clone();
        let after = duplicate(elements, source.id);

        assert_eq!(after.len(), 5);
        let copy = after.last().unwrap();
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.title, "Welcome email (Copy)");
        assert_eq!(copy.description, source.description);
        assert_eq!(copy.config, source.config);
        assert_eq!(copy.detail, source.detail);
        assert_eq!(copy.position as usize, after.len() - 1);
    }
}
