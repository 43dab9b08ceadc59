// src/util/helper.rs
use chrono::{DateTime, Local, Utc};
use std::io::{self, Write};

/// Interactive confirmation prompt; anything but y/yes, or an unreadable stdin, is a no
pub fn confirm(prompt: &str) -> bool {
    print!("{} (y/N): ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut user_input = String::new();
    if io::stdin().read_line(&mut user_input).is_err() {
        return false;
    }

    matches!(user_input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Shorten to at most `max_chars` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push('…');
    shortened
}

/// Lower-case identifier made of ascii letters and digits, e.g. for display slots
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Local date and time for listing output
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("GitHub", 10, "GitHub")]
    #[case("A very long bookmark name", 8, "A very …")]
    #[case("🔖🔖🔖", 2, "🔖…")]
    #[case("abc", 0, "…")]
    fn given_text_when_truncate_then_char_bounded(
        #[case] text: &str,
        #[case] max: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(truncate(text, max), expected);
    }

    #[rstest]
    #[case("Australia/Sydney", "australia-sydney")]
    #[case("  Dhaka Time ", "dhaka-time")]
    #[case("UTC", "utc")]
    #[case("--", "")]
    fn given_label_when_slugify_then_ascii_slug(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(slugify(text), expected);
    }

    #[test]
    fn given_no_timestamp_when_format_then_empty() {
        assert_eq!(format_timestamp(None), "");
    }
}
