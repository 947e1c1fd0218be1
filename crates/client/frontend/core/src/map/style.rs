//! Paint rules for region features.
//!
//! [`region_style`] is the single source of a feature's resting paint. It is
//! called for the first paint, for every restyle, and again on hover exit, so
//! it must stay a pure function of its inputs.

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);
}

/// Which rule decided a feature's paint, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintRole {
    Correct,
    Selected,
    Neutral,
}

impl PaintRole {
    pub const fn of(is_selected: bool, is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else if is_selected {
            Self::Selected
        } else {
            Self::Neutral
        }
    }

    pub const fn fill(self) -> Rgb {
        match self {
            Self::Correct => Rgb(0x22, 0xcc, 0x22),
            Self::Selected => Rgb(0xcc, 0x22, 0x22),
            Self::Neutral => Rgb(0x24, 0x24, 0x24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStyle {
    pub role: PaintRole,
    pub fill: Rgb,
    pub border: Rgb,
    pub weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
}

/// Resting paint of a feature.
///
/// `is_correct` must only be true once the game is over.
pub fn region_style(is_selected: bool, is_correct: bool) -> RegionStyle {
    let role = PaintRole::of(is_selected, is_correct);
    RegionStyle {
        role,
        fill: role.fill(),
        border: Rgb::WHITE,
        weight: 1.0,
        opacity: 1.0,
        fill_opacity: 0.7,
    }
}

/// Temporary override while the pointer is over a feature.
pub fn hover_style(base: RegionStyle) -> RegionStyle {
    RegionStyle {
        weight: 2.0,
        fill_opacity: 0.8,
        ..base
    }
}
