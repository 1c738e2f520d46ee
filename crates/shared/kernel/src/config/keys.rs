//! Reconciles keys that reach the merged tree in two spellings.

use config::{Map, Value, ValueKind};
use convert_case::{Case, Casing};

/// Folds a camelCase key into its snake_case twin when both are present.
///
/// `FORGE__*` overrides always arrive snake_case, so a camelCase file and an
/// override for the same field end up side by side. The snake_case entry wins
/// and nested tables are merged key by key. Keys without a twin are left as they
/// are, so user-chosen names (profile sets) keep their spelling.
pub(crate) fn unify_key_spelling(table: &mut Map<String, Value>) {
    let twins: Vec<(String, String)> = table
        .keys()
        .filter_map(|key| {
            let snake = key.to_case(Case::Snake);
            (snake != *key && table.contains_key(&snake)).then(|| (key.clone(), snake))
        })
        .collect();

    for (camel, snake) in twins {
        if let (Some(base), Some(overlay)) = (table.remove(&camel), table.remove(&snake)) {
            table.insert(snake, merge(base, overlay));
        }
    }

    for value in table.values_mut() {
        if let ValueKind::Table(inner) = &mut value.kind {
            unify_key_spelling(inner);
        }
    }
}

fn merge(base: Value, overlay: Value) -> Value {
    match (base.kind, overlay.kind) {
        (ValueKind::Table(mut base), ValueKind::Table(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::new(None, ValueKind::Table(base))
        },
        (_, kind) => Value::new(None, kind),
    }
}
