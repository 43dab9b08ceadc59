// src/cli/display.rs

use crate::application::views::bookmark_view::{ControlKind, ItemView, ListView, ViewMode};
use crate::domain::bookmark::Bookmark;
use crate::util::helper::format_timestamp;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn color_choice(no_color: bool) -> ColorChoice {
    if !no_color && io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn write_colored(stderr: &mut StandardStream, color: Color, text: &str) {
    if let Err(e) = stderr.set_color(ColorSpec::new().set_fg(Some(color))) {
        eprintln!("Error setting color: {}", e);
    }
    if let Err(e) = write!(stderr, "{}", text) {
        eprintln!("Error writing to stderr: {}", e);
    }
}

fn controls_line(item: &ItemView) -> String {
    item.controls
        .iter()
        .map(|c| match c.kind {
            ControlKind::Open => "open",
            ControlKind::Edit => "edit",
            ControlKind::Delete => "delete",
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Display the rendered list with color formatting on stderr.
///
/// `bookmarks` must be the list the view was rendered from; edit mode adds
/// the timestamps of each record.
pub fn show_list(view: &ListView, bookmarks: &[Bookmark], no_color: bool) {
    if let Some(placeholder) = view.placeholder {
        eprintln!("{}", placeholder);
        return;
    }

    let mut stderr = StandardStream::stderr(color_choice(no_color));
    let first_col_width = view.items.len().to_string().len();

    for (item, bookmark) in view.items.iter().zip(bookmarks) {
        // Name (green) with icon
        write_colored(
            &mut stderr,
            Color::Green,
            &format!(
                "{:first_col_width$}. {} {}",
                item.position + 1,
                item.icon,
                item.name
            ),
        );
        // ID (white)
        write_colored(&mut stderr, Color::White, &format!(" [{}]\n", item.id));
        // URL (yellow)
        write_colored(
            &mut stderr,
            Color::Yellow,
            &format!("{:first_col_width$}  {}\n", "", item.url),
        );

        if view.mode == ViewMode::Editing {
            write_colored(
                &mut stderr,
                Color::Magenta,
                &format!(
                    "{:first_col_width$}  added {} | modified {}\n",
                    "",
                    format_timestamp(bookmark.date_added),
                    format_timestamp(bookmark.date_modified)
                ),
            );
            write_colored(
                &mut stderr,
                Color::Blue,
                &format!("{:first_col_width$}  {}\n", "", controls_line(item)),
            );
        }
    }

    if let Err(e) = stderr.reset() {
        eprintln!("Error resetting color: {}", e);
    }
}
