use crate::config::Config;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub completed: Color,
    pub due_date: Color,
    pub overdue: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub toast_bg: Color,
    pub toast_fg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            completed: Color::DarkGray,
            due_date: Color::Cyan,
            overdue: Color::Red,
            status_bar_bg: Color::Rgb(40, 40, 40),
            status_bar_fg: Color::White,
            toast_bg: Color::Rgb(0, 100, 0),
            toast_fg: Color::White,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            ..Self::default_theme()
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            completed: Color::Gray,
            due_date: Color::Blue,
            overdue: Color::Red,
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
            toast_bg: Color::LightGreen,
            toast_fg: Color::Black,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }
}
