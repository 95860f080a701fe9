use std::collections::{HashMap, HashSet};
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed equipment slot categories, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCategory {
    Primary,
    Secondary,
    Melee,
    Armor,
    Bag,
    Wallet,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 6] = [
        EquipmentCategory::Primary,
        EquipmentCategory::Secondary,
        EquipmentCategory::Melee,
        EquipmentCategory::Armor,
        EquipmentCategory::Bag,
        EquipmentCategory::Wallet,
    ];

    /// Wire name used in bridge payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentCategory::Primary => "primary",
            EquipmentCategory::Secondary => "secondary",
            EquipmentCategory::Melee => "melee",
            EquipmentCategory::Armor => "armor",
            EquipmentCategory::Bag => "bag",
            EquipmentCategory::Wallet => "wallet",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("equipment category `{0}` is configured more than once")]
    DuplicateCategory(EquipmentCategory),
    #[error("equipment category `{0}` is missing from the configuration")]
    MissingCategory(EquipmentCategory),
}

/// Display and matching rules for one equipment category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDef {
    pub category: EquipmentCategory,
    pub label: String,
    /// Hex color, e.g. `#dc2626`.
    pub color: String,
    #[serde(default)]
    pub key_bind: Option<String>,
    /// Substring tokens; an item name containing any of them fits the category.
    pub tokens: Vec<String>,
}

impl CategoryDef {
    pub fn accepts(&self, item_name: &str) -> bool {
        self.tokens.iter().any(|t| item_name.contains(t.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EquipmentRulesDef {
    categories: Vec<CategoryDef>,
    equipment_items: Vec<String>,
}

/// Equipability classifier and category configuration.
#[derive(Resource, Debug, Clone)]
pub struct EquipmentRegistry {
    categories: Vec<CategoryDef>,
    by_category: HashMap<EquipmentCategory, usize>,
    equipment_items: HashSet<String>,
}

impl EquipmentRegistry {
    /// Load the rules shipped with the crate.
    pub fn load() -> Self {
        let ron_str = include_str!("../../assets/equipment.ron");
        Self::from_ron(ron_str).expect("Failed to parse equipment.ron")
    }

    pub fn from_ron(ron_str: &str) -> Result<Self, RulesError> {
        let def: EquipmentRulesDef = ron::from_str(ron_str)?;

        let mut by_category = HashMap::new();
        for (i, c) in def.categories.iter().enumerate() {
            if by_category.insert(c.category, i).is_some() {
                return Err(RulesError::DuplicateCategory(c.category));
            }
        }
        if let Some(missing) = EquipmentCategory::ALL
            .into_iter()
            .find(|c| !by_category.contains_key(c))
        {
            return Err(RulesError::MissingCategory(missing));
        }

        Ok(Self {
            categories: def.categories,
            by_category,
            equipment_items: def.equipment_items.into_iter().collect(),
        })
    }

    /// Categories in configured display order.
    pub fn categories(&self) -> &[CategoryDef] {
        &self.categories
    }

    pub fn category(&self, category: EquipmentCategory) -> Option<&CategoryDef> {
        self.by_category.get(&category).map(|&i| &self.categories[i])
    }

    /// Whether the name is one of the known equipment items.
    pub fn is_equipment(&self, item_name: &str) -> bool {
        self.equipment_items.contains(item_name)
    }

    /// Whether an item with this name may occupy the category.
    pub fn can_equip_in(&self, item_name: &str, category: EquipmentCategory) -> bool {
        self.category(category)
            .is_some_and(|def| def.accepts(item_name))
    }

    /// Same as [`Self::can_equip_in`] for a category given by wire name;
    /// unknown names never match.
    pub fn can_equip_in_named(&self, item_name: &str, category: &str) -> bool {
        EquipmentCategory::from_wire(category).is_some_and(|c| self.can_equip_in(item_name, c))
    }
}

impl Default for EquipmentRegistry {
    fn default() -> Self {
        Self::load()
    }
}
