//! Keeping the user's picks alive across fetches.
//!
//! Every fetch re-keys ingredient ids, so selections are matched through an
//! [`IdentityKey`] instead. The default key is the lower-cased name, which
//! means two different ingredients with the same display name count as one
//! selection. Pass a stronger key where that matters.

use std::collections::HashSet;

use crate::model::Ingredient;

/// Derives the identity used to match ingredients across fetches
pub type IdentityKey = fn(&Ingredient) -> String;

/// Case-insensitive name
pub fn name_key(ingredient: &Ingredient) -> String {
    ingredient.name.to_lowercase()
}

/// Merge a fresh result set with the current selection.
///
/// Incoming items matching a selected key are marked selected; selected items
/// missing from `results` are appended so they stay visible.
pub fn reconcile_selection(
    mut results: Vec<Ingredient>,
    selected: &[Ingredient],
    key: IdentityKey,
) -> Vec<Ingredient> {
    let selected_keys: HashSet<String> = selected.iter().map(key).collect();
    let mut incoming_keys = HashSet::with_capacity(results.len());

    for ingredient in results.iter_mut() {
        let k = key(ingredient);
        if selected_keys.contains(&k) {
            ingredient.selected = true;
        }
        incoming_keys.insert(k);
    }

    let mut carried = HashSet::new();
    for previous in selected {
        let k = key(previous);
        if !incoming_keys.contains(&k) && carried.insert(k) {
            let mut kept = previous.clone();
            kept.selected = true;
            results.push(kept);
        }
    }

    results
}

/// Selected items of `list`, one per key, first occurrence wins.
pub fn selected_set(list: &[Ingredient], key: IdentityKey) -> Vec<Ingredient> {
    let mut seen = HashSet::new();
    list.iter()
        .filter(|i| i.selected)
        .filter(|i| seen.insert(key(*i)))
        .cloned()
        .collect()
}

/// Flip `selected` on the ingredient with `id` and give every item sharing
/// its key the same flag; returns the new value.
pub fn toggle(list: &mut [Ingredient], id: &str, key: IdentityKey) -> Option<bool> {
    let target = list.iter().find(|i| i.id == id)?;
    let wanted = key(target);
    let selected = !target.selected;

    for ingredient in list.iter_mut() {
        if key(ingredient) == wanted {
            ingredient.selected = selected;
        }
    }
    Some(selected)
}
