// src/cli/tui/ui.rs
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::views::bookmark_view::{ControlKind, ItemView, ViewMode};
use crate::cli::tui::app::{App, ItemHit};
use crate::domain::services::notification::Severity;
use crate::util::helper::truncate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;
use std::time::Instant;

const DELETE_LABEL: &str = " ✕ ";
const NOT_SAVED: &str = "[not saved] ";
const HELP: &str = "j/k select  J/K move  enter open  e edit  d delete  q quit";

pub fn draw<S: BookmarkService>(frame: &mut Frame, app: &mut App<S>) {
    let clock_lines = app.clock_lines();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(clock_lines.len() as u16 + 2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_clocks(frame, chunks[0], &clock_lines);
    draw_list(frame, chunks[1], app);
    draw_status(frame, chunks[2], app);

    if let Some(pending) = &app.pending_delete {
        draw_confirm(frame, &pending.name);
    }
}

fn draw_clocks(frame: &mut Frame, area: Rect, lines: &[String]) {
    let text: Vec<Line> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i == 0 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(line.clone(), style))
        })
        .collect();
    let block = Block::default().borders(Borders::ALL).title(" New Tab ");
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn item_line(item: &ItemView, mode: ViewMode, width: usize) -> Line<'static> {
    let handle_style = if item.dragging {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };
    let name_style = if item.drop_target {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
    } else if item.dragging {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };

    let mut spans = vec![
        Span::styled("⠿ ", handle_style),
        Span::raw(format!("{} ", item.icon)),
        Span::styled(truncate(&item.name, 32), name_style),
    ];
    if mode == ViewMode::Editing {
        let url_room = width.saturating_sub(48);
        spans.push(Span::styled(
            format!("  {}", truncate(&item.url, url_room)),
            Style::default().fg(Color::Yellow),
        ));
        if item.control(ControlKind::Edit).is_some() {
            spans.push(Span::styled("  [edit]", Style::default().fg(Color::Blue)));
        }
    }
    Line::from(spans)
}

fn draw_list<S: BookmarkService>(frame: &mut Frame, area: Rect, app: &mut App<S>) {
    let view = app.view();
    let title = match view.mode {
        ViewMode::Idle => " Bookmarks ",
        ViewMode::Editing => " Bookmarks (editing) ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    if let Some(placeholder) = view.placeholder {
        app.hits.clear();
        frame.render_widget(
            Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray)).block(block),
            area,
        );
        return;
    }

    let control_width = DELETE_LABEL.chars().count() as u16;
    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|item| ListItem::new(item_line(item, view.mode, inner.width as usize)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.list_state);

    // Delete controls on the right edge, and the row map for mouse hit tests
    let offset = app.list_state.offset();
    let control_col = inner.x + inner.width.saturating_sub(control_width);
    app.hits = view
        .items
        .iter()
        .skip(offset)
        .take(inner.height as usize)
        .enumerate()
        .map(|(i, item)| ItemHit {
            row: inner.y + i as u16,
            id: item.id,
            control_col: item.control(ControlKind::Delete).map(|_| control_col),
        })
        .collect();
    for hit in &app.hits {
        if hit.control_col.is_some() {
            let cell = Rect::new(control_col, hit.row, control_width, 1);
            frame.render_widget(
                Paragraph::new(DELETE_LABEL).style(Style::default().fg(Color::Red)),
                cell,
            );
        }
    }
}

fn draw_status<S: BookmarkService>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let line = match app.toast(Instant::now()) {
        Some(toast) => {
            let color = match toast.notification.severity {
                Severity::Info => Color::Cyan,
                Severity::Success => Color::Green,
                Severity::Error => Color::Red,
            };
            Line::from(Span::styled(toast.notification.message, Style::default().fg(color)))
        }
        None => Line::from(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
    };
    let line = if app.is_durable() {
        line
    } else {
        let mut spans = vec![Span::styled(
            NOT_SAVED,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )];
        spans.extend(line.spans);
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_confirm(frame: &mut Frame, name: &str) {
    let area = centered(frame.area(), 44, 5);
    let block = Block::default().borders(Borders::ALL).title(" Delete ");
    let text = vec![
        Line::from(format!("Delete bookmark '{}'?", truncate(name, 24))),
        Line::from(Span::styled("y / n", Style::default().add_modifier(Modifier::BOLD))),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
