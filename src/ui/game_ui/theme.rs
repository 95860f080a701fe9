use bevy::prelude::*;
use serde::Deserialize;

/// Parsed hex color wrapper for RON deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct HexColor(pub String);

impl From<HexColor> for Color {
    fn from(hex: HexColor) -> Self {
        hex_color(&hex.0)
    }
}

/// Parse `#rrggbb`; malformed input falls back to magenta so it stands out.
pub fn hex_color(hex: &str) -> Color {
    Srgba::hex(hex)
        .map(Color::from)
        .unwrap_or(Color::srgb(1.0, 0.0, 1.0))
}

/// UI color palette.
#[derive(Debug, Clone, Deserialize)]
pub struct UiColors {
    pub bg_dark: HexColor,
    pub bg_medium: HexColor,
    pub border: HexColor,
    pub occupied: HexColor,
    pub drop_valid: HexColor,
    pub text: HexColor,
    pub text_dim: HexColor,
    pub weight_bar: HexColor,
    pub menu_bg: HexColor,
    pub menu_hover: HexColor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentConfig {
    pub slot_size: f32,
    pub gap: f32,
    pub border_width: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PocketsConfig {
    pub columns: usize,
    pub slot_size: f32,
    pub gap: f32,
    pub weight_bar_height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    pub columns: usize,
    pub slot_size: f32,
    pub gap: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryScreenConfig {
    pub padding: f32,
    pub column_gap: f32,
    pub equipment: EquipmentConfig,
    pub pockets: PocketsConfig,
    pub right: GridConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextMenuConfig {
    pub width: f32,
    pub padding: f32,
    pub item_height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TooltipConfig {
    pub padding: f32,
    /// Distance from the cursor.
    pub offset: f32,
}

/// Root UI theme loaded from RON.
#[derive(Debug, Clone, Deserialize, Resource)]
pub struct UiTheme {
    pub font_size: f32,
    pub colors: UiColors,
    pub inventory_screen: InventoryScreenConfig,
    pub context_menu: ContextMenuConfig,
    pub tooltip: TooltipConfig,
}

impl UiTheme {
    pub fn load() -> Self {
        let ron_str = include_str!("../../../assets/ui.ron");
        ron::from_str(ron_str).expect("Failed to parse ui.ron")
    }
}
