//! Boards and programmers: identified entities owning a preference map.

use hwtarget_prefs::KeyPathMap;
use serde::Serialize;

/// One buildable hardware variant of a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    id: String,
    preferences: KeyPathMap,
}

impl Board {
    pub fn new(id: impl Into<String>, preferences: KeyPathMap) -> Self {
        Self {
            id: id.into(),
            preferences,
        }
    }

    /// Board ID, the first-level key in `boards.txt`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Everything declared under `<id>.` with the ID stripped.
    pub fn preferences(&self) -> &KeyPathMap {
        &self.preferences
    }

    /// Human-readable name (the `name` key), if declared.
    pub fn name(&self) -> Option<&str> {
        self.preferences.get("name")
    }

    /// Whether the board offers options for custom menu `menu_id`.
    pub fn has_menu(&self, menu_id: &str) -> bool {
        self.preferences.sub_tree("menu").has_group(menu_id)
            || self.preferences.contains_key(&format!("menu.{menu_id}"))
    }

    /// Options of custom menu `menu_id` as `(option_id, label)` pairs.
    ///
    /// Read from `menu.<menu_id>.<option_id>=label`.
    pub fn menu_options(&self, menu_id: &str) -> Vec<(String, String)> {
        self.preferences
            .sub_tree("menu")
            .sub_tree(menu_id)
            .top_level_map()
            .iter()
            .map(|(option, label)| (option.to_string(), label.to_string()))
            .collect()
    }

    /// Preferences contributed by selecting `option_id` in menu `menu_id`.
    pub fn menu_option_preferences(&self, menu_id: &str, option_id: &str) -> KeyPathMap {
        self.preferences
            .sub_tree("menu")
            .sub_tree(menu_id)
            .sub_tree(option_id)
    }
}

/// An external device or tool definition used to flash a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Programmer {
    id: String,
    preferences: KeyPathMap,
}

impl Programmer {
    pub fn new(id: impl Into<String>, preferences: KeyPathMap) -> Self {
        Self {
            id: id.into(),
            preferences,
        }
    }

    /// Programmer ID, the first-level key in `programmers.txt`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn preferences(&self) -> &KeyPathMap {
        &self.preferences
    }

    /// Human-readable name (the `name` key), if declared.
    pub fn name(&self) -> Option<&str> {
        self.preferences.get("name")
    }
}
