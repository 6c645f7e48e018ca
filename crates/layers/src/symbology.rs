use serde::Serialize;
use targets::display::DisplayCategory;

/// Linear RGBA, one channel per float in `[0, 1]`.
pub type Color = [f32; 4];

pub const fn rgb(hex: u32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

pub const COLLECTED_COLOR: Color = rgb(0x00ff85);
pub const DEFAULT_COLOR: Color = rgb(0xffd166);
pub const DESTROYED_COLOR: Color = rgb(0xff4f4f);
pub const HIDDEN_COLOR: Color = rgb(0x8a8a8a);

/// Badge tier A.
pub const SMALL_BADGE_COLOR: Color = rgb(0xa259ff);
/// Badge tier B.
pub const LARGE_BADGE_COLOR: Color = rgb(0xff4f9a);

/// Members at or below this count get a small badge.
pub const DEFAULT_SMALL_BADGE_MAX: usize = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Small,
    Large,
}

impl BadgeTier {
    pub fn for_count(count: usize, small_max: usize) -> Self {
        if count <= small_max {
            BadgeTier::Small
        } else {
            BadgeTier::Large
        }
    }

    pub fn color(self) -> Color {
        match self {
            BadgeTier::Small => SMALL_BADGE_COLOR,
            BadgeTier::Large => LARGE_BADGE_COLOR,
        }
    }
}

/// Marker tint for a category; halo and fill share it.
pub fn category_color(category: DisplayCategory) -> Color {
    match category {
        DisplayCategory::Collected => COLLECTED_COLOR,
        DisplayCategory::Default => DEFAULT_COLOR,
        DisplayCategory::Destroyed => DESTROYED_COLOR,
        DisplayCategory::Hidden => HIDDEN_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::{BadgeTier, COLLECTED_COLOR, category_color, rgb};
    use targets::display::DisplayCategory;

    #[test]
    fn tier_boundary_is_inclusive() {
        assert_eq!(BadgeTier::for_count(2, 10), BadgeTier::Small);
        assert_eq!(BadgeTier::for_count(10, 10), BadgeTier::Small);
        assert_eq!(BadgeTier::for_count(11, 10), BadgeTier::Large);
        assert_ne!(BadgeTier::Small.color(), BadgeTier::Large.color());
    }

    #[test]
    fn hex_decoding() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(category_color(DisplayCategory::Collected), COLLECTED_COLOR);
    }
}
