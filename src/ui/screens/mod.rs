pub(crate) mod budget;
pub(crate) mod data;
pub(crate) mod home;
pub(crate) mod settings;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

pub(super) fn titled_block<'a>(title: &str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(Style::default().bg(palette.card))
        .title(Span::styled(format!(" {title} "), palette.title_style()))
}

/// A bordered card with one bold value and an optional dim subtitle.
pub(super) fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: Option<String>,
    palette: &Palette,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), palette.dim_style())),
    ])
    .centered()
    .block(titled_block(title, palette));

    f.render_widget(text, area);
}

pub(super) fn render_empty(
    f: &mut Frame,
    area: Rect,
    title: &str,
    lines: &[&str],
    palette: &Palette,
) {
    let mut text = vec![Line::from("")];
    for line in lines {
        text.push(Line::from(Span::styled(line.to_string(), palette.dim_style())));
        text.push(Line::from(""));
    }
    let msg = Paragraph::new(text)
        .centered()
        .block(titled_block(title, palette));
    f.render_widget(msg, area);
}
