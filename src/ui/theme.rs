use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub header: Color,
    pub selected_bg: Color,
    pub placeholder: Color,
    pub active_field: Color,
    pub dates: Color,
    pub status_bar: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub command_mode: Color,
    pub error: Color,
    pub success: Color,
}

/// The handful of base colours a theme is built from. Every `Theme` field
/// takes one of these roles.
#[derive(Debug, Clone, Copy)]
struct Palette {
    accent: Color,
    warm: Color,
    highlight: Color,
    text: Color,
    soft: Color,
    good: Color,
    bad: Color,
}

const DEFAULT_PALETTE: Palette = Palette {
    accent: Color::Cyan,
    warm: Color::Yellow,
    highlight: Color::Blue,
    text: Color::White,
    soft: Color::Magenta,
    good: Color::Green,
    bad: Color::Red,
};

const GRUVBOX_PALETTE: Palette = Palette {
    accent: Color::Rgb(250, 189, 47),
    warm: Color::Rgb(254, 128, 25),
    highlight: Color::Rgb(80, 73, 69),
    text: Color::Rgb(235, 219, 178),
    soft: Color::Rgb(211, 134, 155),
    good: Color::Rgb(184, 187, 38),
    bad: Color::Rgb(251, 73, 52),
};

const NORD_PALETTE: Palette = Palette {
    accent: Color::Rgb(136, 192, 208),
    warm: Color::Rgb(235, 203, 139),
    highlight: Color::Rgb(67, 76, 94),
    text: Color::Rgb(229, 233, 240),
    soft: Color::Rgb(180, 142, 173),
    good: Color::Rgb(163, 190, 140),
    bad: Color::Rgb(191, 97, 106),
};

impl Theme {
    fn from_palette(name: &str, palette: Palette) -> Self {
        Self {
            name: name.to_string(),
            title: palette.accent,
            header: palette.warm,
            selected_bg: palette.highlight,
            placeholder: palette.soft,
            active_field: palette.accent,
            dates: palette.good,
            status_bar: palette.text,
            help_title: palette.accent,
            help_section: palette.warm,
            command_mode: palette.text,
            error: palette.bad,
            success: palette.good,
        }
    }

    pub fn default_theme() -> Self {
        Self::from_palette("default", DEFAULT_PALETTE)
    }

    pub fn gruvbox() -> Self {
        Self::from_palette("gruvbox", GRUVBOX_PALETTE)
    }

    pub fn nord() -> Self {
        Self::from_palette("nord", NORD_PALETTE)
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Theme::get_by_name("Nord").name, "nord");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        assert_eq!(Theme::get_by_name("neon"), Theme::default_theme());
    }

    #[test]
    fn editable_rows_stand_apart_from_their_active_field() {
        for name in Theme::available_themes() {
            let theme = Theme::get_by_name(name);
            assert_ne!(theme.placeholder, theme.active_field, "{name}");
            assert_ne!(theme.error, theme.success, "{name}");
        }
    }

    #[test]
    fn every_listed_theme_resolves_to_itself() {
        for name in Theme::available_themes() {
            assert_eq!(Theme::get_by_name(name).name, name);
        }
    }
}
