use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Row};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(f.area());

    // Full-width centered banner
    let label = format!("QUICKSTART  {} window(s)", app.total_windows());
    let width = chunks[0].width as usize;
    let pad_left = width.saturating_sub(label.len()) / 2;
    let banner = format!("{:pad$}{:<rest$}", "", label, pad = pad_left, rest = width.saturating_sub(pad_left));
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            banner,
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))),
        chunks[0],
    );

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::raw(" "),
            key("j/k"),
            Span::raw(" move  "),
            key("h/l"),
            Span::raw(" change  "),
            key("space"),
            Span::raw(" layout  "),
            key("enter"),
            Span::raw(" launch  "),
            key("q"),
            Span::raw(" quit"),
        ]),
        Line::from(""),
    ];

    let selected = app.current_row();
    for row in app.rows() {
        let prefix = if Some(row) == selected { "> " } else { "  " };
        match row {
            Row::Count(m) => {
                if m > 0 {
                    lines.push(Line::from(""));
                }
                let mon = &app.monitors[m];
                let mut spans = vec![
                    Span::raw(prefix),
                    Span::styled(mon.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}x{}", mon.width, mon.height), Style::default().fg(Color::DarkGray)),
                ];
                if mon.primary {
                    spans.push(Span::styled("  Primary", Style::default().fg(Color::Yellow)));
                }
                lines.push(Line::from(spans));
                lines.push(Line::from(vec![
                    Span::raw("    windows "),
                    Span::styled(
                        format!("< {} >", app.config.monitors[m].window_count()),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw("   layout "),
                    Span::styled(app.layout_of(m).name(), Style::default().fg(Color::Cyan)),
                ]));
            }
            Row::Window(m, w) => {
                let tool = app.config.monitors[m].tool_for(w);
                let color = if tool == "cx" { Color::Magenta } else { Color::Green };
                lines.push(Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!("    window {} ", w + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("[{}]", tool), Style::default().fg(color)),
                ]));
            }
        }
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, chunks[1]);

    if let Some(dialog) = &app.confirm {
        dialog.render(f);
    }
}
