use ratatui::style::Color;

pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
    pub function: Color,
    pub type_name: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    name: "dark",
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    status_bg: Color::Rgb(50, 50, 70),
    function: Color::Rgb(249, 226, 175),  // Yellow for functions
    type_name: Color::Rgb(148, 226, 213), // Cyan/teal for type names
};

pub const LIGHT_THEME: Theme = Theme {
    name: "light",
    bg: Color::Rgb(239, 241, 245),
    fg: Color::Rgb(76, 79, 105),
    primary: Color::Rgb(30, 102, 245),
    secondary: Color::Rgb(254, 100, 11),
    comment: Color::Rgb(140, 143, 161),
    success: Color::Rgb(64, 160, 43),
    error: Color::Rgb(210, 15, 57),
    keyword: Color::Rgb(136, 57, 239),
    string: Color::Rgb(64, 160, 43),
    number: Color::Rgb(254, 100, 11),
    border_focused: Color::Rgb(223, 142, 29),
    border_normal: Color::Rgb(156, 160, 176),
    status_bg: Color::Rgb(220, 224, 232),
    function: Color::Rgb(30, 102, 245),
    type_name: Color::Rgb(23, 146, 153),
};

impl Theme {
    /// Looks a theme up by name (`"dark"` or `"light"`).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(&DEFAULT_THEME),
            "light" => Some(&LIGHT_THEME),
            _ => None,
        }
    }

    /// The other theme, for the toggle key
    pub fn toggled(&self) -> &'static Theme {
        if self.name == LIGHT_THEME.name {
            &DEFAULT_THEME
        } else {
            &LIGHT_THEME
        }
    }
}
