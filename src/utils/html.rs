//! HTML escaping for user-supplied text placed in email bodies.
//!
//! [`EmailHtml`] is registered in `askama.toml` under the `email` extension,
//! so every `{{ expr }}` in an email template goes through it unless marked
//! `|safe`.

use askama::filters::Escaper;
use std::fmt::{self, Write};

/// Askama escaper for `& < > " ' / ` =`.
///
/// Wider than askama's built-in HTML escaper: the result is inert in text
/// and in quoted or unquoted attribute values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailHtml;

fn entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        '/' => Some("&#x2F;"),
        '`' => Some("&#x60;"),
        '=' => Some("&#x3D;"),
        _ => None,
    }
}

impl Escaper for EmailHtml {
    fn write_escaped_str<W: Write>(&self, mut dest: W, string: &str) -> fmt::Result {
        let mut last = 0;

        for (idx, c) in string.char_indices() {
            if let Some(escaped) = entity(c) {
                dest.write_str(&string[last..idx])?;
                dest.write_str(escaped)?;
                last = idx + c.len_utf8();
            }
        }

        dest.write_str(&string[last..])
    }

    fn write_escaped_char<W: Write>(&self, mut dest: W, c: char) -> fmt::Result {
        match entity(c) {
            Some(escaped) => dest.write_str(escaped),
            None => dest.write_char(c),
        }
    }
}
