use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::MUTED;
use crate::derive::{LanguageStat, ProjectView};
use crate::icons;

use super::popups::truncate_string;

const BAR_WIDTH: usize = 10;

fn section_title(title: &str) -> Line<'static> {
    Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold())
}

fn muted(text: &str) -> Line<'static> {
    Line::styled(text.to_string(), Style::default().fg(MUTED))
}

/// "█████░░░░░" for a share in percent
pub fn language_bar(percentage: u32) -> String {
    let filled = ((percentage.min(100) as usize * BAR_WIDTH) + 50) / 100;
    format!(
        "{}{}",
        icons::BAR_FILLED.repeat(filled),
        icons::BAR_EMPTY.repeat(BAR_WIDTH - filled)
    )
}

fn language_lines(languages: &[LanguageStat], width: usize) -> Vec<Line<'static>> {
    if languages.is_empty() {
        return vec![muted("No language data")];
    }
    let name_width = width.saturating_sub(BAR_WIDTH + 6).max(4);
    languages
        .iter()
        .map(|lang| {
            Line::from(vec![
                Span::raw(format!(
                    "{:<w$} ",
                    truncate_string(&lang.name, name_width),
                    w = name_width
                )),
                Span::styled(language_bar(lang.percentage), Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {:>3}%", lang.percentage), Style::default().fg(MUTED)),
            ])
        })
        .collect()
}

fn tag_lines(values: &[String]) -> Vec<Line<'static>> {
    if values.is_empty() {
        return vec![muted("Unknown")];
    }
    values
        .iter()
        .map(|v| Line::from(format!("{} {}", icons::BULLET, v)))
        .collect()
}

fn project_lines(view: &ProjectView, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", icons::PACKAGE), Style::default()),
            Span::styled(view.owner.clone(), Style::default().fg(Color::Cyan).bold()),
        ]),
        Line::raw(""),
        section_title("Community"),
        Line::from(vec![
            Span::raw("GitHub "),
            Span::styled(icons::LINK, Style::default().fg(Color::Blue)),
        ]),
    ];
    if !view.website_url.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("Website "),
            Span::styled(icons::LINK, Style::default().fg(Color::Blue)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(section_title("Languages"));
    lines.extend(language_lines(&view.languages, width));

    lines.push(Line::raw(""));
    lines.push(section_title("Ecosystems"));
    lines.extend(tag_lines(&view.ecosystems));

    lines.push(Line::raw(""));
    lines.push(section_title("Categories"));
    lines.extend(tag_lines(&view.categories));

    lines.push(Line::raw(""));
    lines.push(section_title(&format!(
        "Contributors ({})",
        view.contributors_count
    )));
    if view.contributors.is_empty() {
        lines.push(muted("No contributors yet"));
    } else {
        for contributor in &view.contributors {
            lines.push(Line::from(format!("{} {}", icons::BULLET, contributor.name)));
        }
        lines.push(muted(&view.contributor_summary()));
    }

    lines
}

/// Render the project sidebar
pub fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(MUTED));
    let inner = block.inner(area);

    let lines = match &app.view {
        Some(view) => project_lines(view, inner.width as usize),
        None => vec![muted("Loading…")],
    };

    let sidebar = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(sidebar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_bar_scales_to_width() {
        assert_eq!(language_bar(0), "░".repeat(10));
        assert_eq!(language_bar(100), "█".repeat(10));
        assert_eq!(language_bar(44), format!("{}{}", "█".repeat(4), "░".repeat(6)));
        assert_eq!(language_bar(250), "█".repeat(10));
    }
}
