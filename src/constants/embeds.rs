use serenity::all::{Colour, CreateEmbed};

// ============================================================================
// Color Palette
// ============================================================================

/// Settings saved - Frost blue
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(96, 165, 250);

/// Bot silenced - Amber
pub const WARNING_COLOR: Colour = Colour::from_rgb(245, 158, 11);

/// Read-only views - Slate
pub const INFO_COLOR: Colour = Colour::from_rgb(100, 116, 139);

/// Bullet point character
pub const BULLET: &str = "•";

// ============================================================================
// Embed Builders
// ============================================================================

pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

pub fn warning_embed() -> CreateEmbed {
    CreateEmbed::new().color(WARNING_COLOR)
}

pub fn info_embed() -> CreateEmbed {
    CreateEmbed::new().color(INFO_COLOR)
}

/// One bulleted line per item
pub fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", BULLET, item))
        .collect::<Vec<_>>()
        .join("\n")
}
