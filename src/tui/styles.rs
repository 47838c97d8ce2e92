//! Console color palette and styles.
//!
//! Green navigation, blue accents and light text on a dark surface.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{DnaStatus, VariantTier};

/// Console theme color palette.
pub struct CareTheme;

impl CareTheme {
    // === Brand ===

    /// Sidebar green
    pub const PRIMARY: Color = Color::Rgb(21, 128, 61); // #15803D

    /// Lighter green for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(74, 222, 128); // #4ADE80

    /// Action blue
    pub const ACCENT: Color = Color::Rgb(37, 99, 235); // #2563EB

    pub const ACCENT_LIGHT: Color = Color::Rgb(96, 165, 250); // #60A5FA

    // === Semantic ===

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24
    pub const DANGER: Color = Color::Rgb(239, 68, 68); // #EF4444
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    // === Surfaces ===

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A
    pub const BG_SURFACE: Color = Color::Rgb(30, 41, 59); // #1E293B

    // === Text ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    pub const BORDER: Color = Color::Rgb(71, 85, 105); // #475569

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Highlighted row or button
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::ACCENT_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Sidebar background and text
    #[must_use]
    pub fn sidebar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::PRIMARY)
    }

    #[must_use]
    pub fn sidebar_selected() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .bg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::ACCENT_LIGHT)
    }

    /// Badge color for a DNA status
    #[must_use]
    pub fn dna_status(status: DnaStatus) -> Style {
        match status {
            DnaStatus::Completed => Self::success(),
            DnaStatus::AwaitingSample => Self::text_muted(),
            DnaStatus::SampleReceived | DnaStatus::SampleExtracted => Self::info(),
            _ => Self::warning(),
        }
    }

    /// Color for a variant tier count
    #[must_use]
    pub fn tier(tier: VariantTier) -> Style {
        match tier {
            VariantTier::Actionable => Self::danger(),
            VariantTier::Significant => Self::warning(),
            VariantTier::Notable => Self::info(),
            VariantTier::Exploratory => Self::text_secondary(),
            VariantTier::Informative => Self::success(),
        }
    }
}
