use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::icons;

const HELP_KEYS: &[(&str, &str)] = &[
    ("1/2  ", "Issues / Pull requests"),
    ("h/l  ", "Previous/next issue tab"),
    ("/    ", "Fuzzy search"),
    ("j/↓  ", "Move down"),
    ("k/↑  ", "Move up"),
    ("g/G  ", "Go to top/bottom"),
    ("⏎    ", "Preview issue"),
    ("o    ", "Open in browser"),
    ("O    ", "Open repository"),
    ("w    ", "Open website"),
    ("p    ", "Switch project"),
    ("r    ", "Reload"),
    ("q    ", "Quit"),
];

/// Render the help popup
pub fn render_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_height = HELP_KEYS.len() as u16 + 4;
    let popup_area = centered_rect(40, popup_height, area);

    f.render_widget(Clear, popup_area);

    let mut help_lines: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();
    help_lines.push(Line::raw(""));
    help_lines.push(Line::from("Press any key to close").centered());

    let help = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(help, popup_area);
}

/// Render the error popup
pub fn render_error_popup(f: &mut Frame, error: &str) {
    let area = f.area();
    let popup_width = (area.width * 60 / 100)
        .max(40)
        .min(area.width.saturating_sub(4));
    let popup_height = 7u16;
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let error_paragraph = Paragraph::new(error)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(error_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height,
        width: popup_area.width,
        height: 1,
    };

    if hint_area.y < area.height {
        let hint = Line::from(vec![
            Span::raw("Press "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to dismiss, "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" to retry"),
        ])
        .centered();
        f.render_widget(hint, hint_area);
    }
}

/// Render the project id prompt
pub fn render_project_prompt(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_area = centered_rect(50, 5, area);

    f.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Yellow)),
            Span::styled(&app.project_input, Style::default().fg(Color::White)),
            Span::styled(icons::CURSOR, Style::default().fg(Color::Cyan)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" load  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" cancel"),
        ])
        .centered(),
    ];

    let popup = Paragraph::new(content).block(
        Block::default()
            .title(" Open project ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(popup, popup_area);
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);

    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

/// Truncate a string to at most `max_len` characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}

/// Render the bottom legend with keyboard shortcuts
pub fn render_legend(f: &mut Frame, area: Rect) {
    let legend = Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" nav  "),
        Span::styled("h/l", Style::default().fg(Color::Yellow)),
        Span::raw(" tabs  "),
        Span::styled("1/2", Style::default().fg(Color::Yellow)),
        Span::raw(" view  "),
        Span::styled("o", Style::default().fg(Color::Yellow)),
        Span::raw(" open  "),
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(" search  "),
        Span::styled("p", Style::default().fg(Color::Yellow)),
        Span::raw(" project  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]);

    let paragraph = Paragraph::new(legend).style(Style::default().fg(Color::DarkGray));
    f.render_widget(paragraph, area);
}
