//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// The color palette for the assistant's TUI: neutral greys with a rose accent.
pub struct Theme;

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(235, 120, 160)
    }

    pub fn accent_secondary() -> Color {
        Color::Rgb(180, 130, 240)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    pub fn warning() -> Color {
        Color::Rgb(230, 180, 80)
    }

    pub fn error() -> Color {
        Color::Rgb(240, 80, 80)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    pub fn selection_bg() -> Color {
        Color::Rgb(50, 36, 48)
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn focused_border() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn selection() -> Style {
        Style::default().bg(Self::selection_bg())
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn price() -> Style {
        Style::default()
            .fg(Self::success())
            .add_modifier(Modifier::BOLD)
    }

    pub fn badge() -> Style {
        Style::default().fg(Self::accent_secondary())
    }

    pub fn user_message() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn assistant_message() -> Style {
        Self::normal()
    }

    pub fn notice() -> Style {
        Style::default()
            .fg(Self::error())
            .add_modifier(Modifier::BOLD)
    }

    pub fn stock(in_stock: bool) -> Style {
        let color = if in_stock {
            Self::success()
        } else {
            Self::error()
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Bar color for a match fraction in [0, 1].
    pub fn score_color(fraction: f64) -> Color {
        if fraction >= 0.8 {
            Self::success()
        } else if fraction >= 0.5 {
            Self::warning()
        } else {
            Self::error()
        }
    }
}
