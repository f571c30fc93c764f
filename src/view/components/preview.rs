use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::data::MUTED;
use crate::derive::time_ago;

use super::popups::truncate_string;

/// Render the selected issue with its markdown description
pub fn render_issue_preview(f: &mut Frame, app: &App) {
    let Some(issue) = app.selected_issue() else {
        return;
    };
    let area = f.area();
    f.render_widget(Clear, area);

    let title = format!(" #{} - {} ", issue.number, truncate_string(&issue.title, 60));
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let layout = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(2), // Footer
    ])
    .split(inner_area);

    let footer_line = Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" scroll  "),
        Span::styled("o", Style::default().fg(Color::Yellow)),
        Span::raw(" open  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" back"),
    ]);
    f.render_widget(Paragraph::new(vec![Line::raw(""), footer_line]), layout[1]);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Opened by ", Style::default().fg(MUTED)),
            Span::styled(issue.author_login.clone(), Style::default().fg(Color::Green)),
            Span::styled(
                format!("  updated {}", time_ago(Some(issue.activity_timestamp()))),
                Style::default().fg(MUTED),
            ),
        ]),
        Line::from(
            issue
                .label_names()
                .into_iter()
                .map(|l| Span::styled(format!("[{}] ", l), Style::default().fg(Color::Blue)))
                .collect::<Vec<_>>(),
        ),
        Line::raw(""),
    ];

    match issue.description.as_deref() {
        Some(body) if !body.trim().is_empty() => lines.extend(markdown_to_lines(body)),
        _ => lines.push(Line::styled(
            "No description provided.",
            Style::default().fg(MUTED),
        )),
    }

    let content = Paragraph::new(lines)
        .scroll((app.preview_scroll, 0))
        .wrap(Wrap { trim: false });
    f.render_widget(content, layout[0]);
}

/// Flush pending text into the current line's spans
fn flush_text(text: &mut String, spans: &mut Vec<Span<'static>>, style: Style) {
    if !text.is_empty() {
        spans.push(Span::styled(std::mem::take(text), style));
    }
}

fn flush_line(spans: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

fn heading_color(level: HeadingLevel) -> Color {
    match level {
        HeadingLevel::H1 => Color::Cyan,
        HeadingLevel::H2 => Color::Green,
        HeadingLevel::H3 => Color::Yellow,
        _ => Color::Magenta,
    }
}

/// Convert markdown text to styled lines. Images are shown as their raw markdown.
pub fn markdown_to_lines(markdown: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();

    let mut style = Style::default();
    let mut in_code_block = false;
    let mut image: Option<(String, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    flush_text(&mut text, &mut spans, style);
                    flush_line(&mut spans, &mut lines);
                    if !lines.is_empty() {
                        lines.push(Line::raw(""));
                    }
                    style = Style::default()
                        .fg(heading_color(level))
                        .add_modifier(Modifier::BOLD);
                }
                Tag::Paragraph | Tag::List(_) => {
                    flush_text(&mut text, &mut spans, style);
                    flush_line(&mut spans, &mut lines);
                }
                Tag::CodeBlock(_) => {
                    flush_text(&mut text, &mut spans, style);
                    flush_line(&mut spans, &mut lines);
                    in_code_block = true;
                }
                Tag::Item => {
                    flush_text(&mut text, &mut spans, style);
                    spans.push(Span::styled("• ", Style::default().fg(Color::Yellow)));
                }
                Tag::Strong => {
                    flush_text(&mut text, &mut spans, style);
                    style = style.add_modifier(Modifier::BOLD);
                }
                Tag::Emphasis => {
                    flush_text(&mut text, &mut spans, style);
                    style = style.add_modifier(Modifier::ITALIC);
                }
                Tag::Image { dest_url, .. } => {
                    flush_text(&mut text, &mut spans, style);
                    image = Some((String::new(), dest_url.to_string()));
                }
                _ => {}
            },
            Event::End(tag_end) => match tag_end {
                TagEnd::Heading(_) => {
                    flush_text(&mut text, &mut spans, style);
                    style = Style::default();
                    flush_line(&mut spans, &mut lines);
                    lines.push(Line::raw(""));
                }
                TagEnd::Paragraph => {
                    flush_text(&mut text, &mut spans, style);
                    flush_line(&mut spans, &mut lines);
                    lines.push(Line::raw(""));
                }
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    lines.push(Line::raw(""));
                }
                TagEnd::List(_) | TagEnd::Item => {
                    flush_text(&mut text, &mut spans, style);
                    flush_line(&mut spans, &mut lines);
                }
                TagEnd::Strong => {
                    flush_text(&mut text, &mut spans, style);
                    style = style.remove_modifier(Modifier::BOLD);
                }
                TagEnd::Emphasis => {
                    flush_text(&mut text, &mut spans, style);
                    style = style.remove_modifier(Modifier::ITALIC);
                }
                TagEnd::Image => {
                    if let Some((alt, url)) = image.take() {
                        spans.push(Span::styled(
                            format!("![{}]({})", alt, url),
                            Style::default().fg(MUTED),
                        ));
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if let Some((alt, _)) = image.as_mut() {
                    alt.push_str(&t);
                } else if in_code_block {
                    for line in t.lines() {
                        lines.push(Line::styled(
                            format!("  {}", line),
                            Style::default().fg(Color::Gray),
                        ));
                    }
                } else {
                    text.push_str(&t);
                }
            }
            Event::Code(code) => {
                if image.is_none() {
                    flush_text(&mut text, &mut spans, style);
                    spans.push(Span::styled(
                        format!("`{}`", code),
                        Style::default().fg(Color::Gray),
                    ));
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if image.is_none() {
                    flush_text(&mut text, &mut spans, style);
                    flush_line(&mut spans, &mut lines);
                }
            }
            _ => {}
        }
    }

    flush_text(&mut text, &mut spans, style);
    flush_line(&mut spans, &mut lines);

    // Drop the trailing blank line left by the last block
    while lines.last().is_some_and(|l| l.width() == 0) {
        lines.pop();
    }
    lines
}
