use ratatui::style::{Color, Modifier, Style};

pub(crate) const ACCENT: Color = Color::Rgb(59, 130, 246);
pub(crate) const GREEN: Color = Color::Rgb(16, 185, 129);
pub(crate) const RED: Color = Color::Rgb(239, 68, 68);
pub(crate) const YELLOW: Color = Color::Rgb(245, 158, 11);

/// Screen colors for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Palette {
    pub(crate) background: Color,
    pub(crate) text: Color,
    pub(crate) text_dim: Color,
    pub(crate) card: Color,
    pub(crate) border: Color,
    pub(crate) bar: Color,
}

impl Palette {
    pub(crate) fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                background: Color::Rgb(0x1f, 0x29, 0x37),
                text: Color::Rgb(0xf9, 0xfa, 0xfb),
                text_dim: Color::Rgb(0x9c, 0xa3, 0xaf),
                card: Color::Rgb(0x37, 0x41, 0x51),
                border: Color::Rgb(0x4b, 0x55, 0x63),
                bar: Color::Rgb(0x11, 0x18, 0x27),
            }
        } else {
            Self {
                background: Color::Rgb(0xf3, 0xf4, 0xf6),
                text: Color::Rgb(0x1f, 0x29, 0x37),
                text_dim: Color::Rgb(0x6b, 0x72, 0x80),
                card: Color::Rgb(0xff, 0xff, 0xff),
                border: Color::Rgb(0xe5, 0xe7, 0xeb),
                bar: Color::Rgb(0xd1, 0xd5, 0xdb),
            }
        }
    }

    pub(crate) fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub(crate) fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.card)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selected_style(&self) -> Style {
        Style::default().fg(Color::White).bg(ACCENT)
    }

    pub(crate) fn normal_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub(crate) fn dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub(crate) fn alt_row_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.card)
    }

    pub(crate) fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub(crate) fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_dim)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn command_bar_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.bar)
    }

    pub(crate) fn status_bar_style(&self) -> Style {
        Style::default().fg(self.text_dim).bg(self.card)
    }
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn remaining_style(remaining_is_negative: bool) -> Style {
    Style::default().fg(if remaining_is_negative { RED } else { GREEN })
}

/// Green under 70% of the ceiling, yellow up to 90%, red beyond.
pub(crate) fn usage_color(ratio: f64) -> Color {
    if ratio > 0.9 {
        RED
    } else if ratio > 0.7 {
        YELLOW
    } else {
        GREEN
    }
}

/// Parse a `#rrggbb` or `#rgb` category color.
pub(crate) fn parse_hex(color: &str) -> Option<Color> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string()).map(|v| v * 17));
            Some(Color::Rgb(it.next()??, it.next()??, it.next()??))
        }
        _ => None,
    }
}

pub(crate) fn category_color(color: &str) -> Color {
    parse_hex(color).unwrap_or(ACCENT)
}
