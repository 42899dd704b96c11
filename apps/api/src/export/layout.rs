//! Flattens a rendered resume view into typed text lines, word-wrapped
//! against the raster canvas's column budget. The raster stage only ever
//! sees lines; all document structure decisions happen here.

use crate::export::{CANVAS_MARGIN_PX, CANVAS_WIDTH_PX, GLYPH_CELL_PX};
use crate::render::ResumeView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// The person's name at the top of the document.
    Title,
    /// A section header, rendered uppercase.
    Section,
    /// Regular content.
    Text,
    /// Vertical whitespace; carries no glyphs.
    Spacer,
}

impl LineKind {
    /// Multiplier applied to the 8×8 glyph cell.
    pub(crate) fn glyph_scale(&self) -> u32 {
        match self {
            LineKind::Title => 4,
            LineKind::Section => 3,
            LineKind::Text | LineKind::Spacer => 2,
        }
    }

    /// Extra vertical pixels below the line.
    pub(crate) fn leading(&self) -> u32 {
        match self {
            LineKind::Title => 16,
            LineKind::Section => 10,
            LineKind::Text => 6,
            LineKind::Spacer => 0,
        }
    }

    /// Glyph columns that fit a full-width line at this scale.
    pub(crate) fn columns(&self) -> usize {
        let usable = CANVAS_WIDTH_PX - 2 * CANVAS_MARGIN_PX;
        (usable / (GLYPH_CELL_PX * self.glyph_scale())) as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn spacer() -> Self {
        Self::new(LineKind::Spacer, "")
    }
}

/// Greedy word-wrap at `columns` glyphs. Words longer than a full line are
/// hard-split so a single token can never overflow the canvas.
pub(crate) fn wrap(text: &str, columns: usize) -> Vec<String> {
    debug_assert!(columns > 0);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        // Hard-split oversized tokens (long URLs, mostly).
        while word.chars().count() > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(columns)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let (head, tail) = word.split_at(split_at);
            lines.push(head.to_string());
            word = tail;
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_wrapped(lines: &mut Vec<Line>, kind: LineKind, text: &str) {
    for wrapped in wrap(text, kind.columns()) {
        lines.push(Line::new(kind, wrapped));
    }
}

/// The full line sequence for a rendered view, in document order.
pub(crate) fn layout(view: &ResumeView) -> Vec<Line> {
    let mut lines = Vec::new();

    push_wrapped(&mut lines, LineKind::Title, &view.name);
    if !view.contact.is_empty() {
        push_wrapped(&mut lines, LineKind::Text, &view.contact.join("  |  "));
    }
    for link in &view.links {
        push_wrapped(
            &mut lines,
            LineKind::Text,
            &format!("{}: {}", link.platform, link.url),
        );
    }
    lines.push(Line::spacer());

    if let Some(summary) = &view.summary {
        push_wrapped(&mut lines, LineKind::Section, "SUMMARY");
        push_wrapped(&mut lines, LineKind::Text, summary);
        lines.push(Line::spacer());
    }

    if !view.skills.is_empty() {
        push_wrapped(&mut lines, LineKind::Section, "SKILLS");
        push_wrapped(&mut lines, LineKind::Text, &view.skills.join(", "));
        lines.push(Line::spacer());
    }

    for section in &view.sections {
        push_wrapped(&mut lines, LineKind::Section, &section.title.to_uppercase());
        for item in &section.items {
            let heading = match &item.subheading {
                Some(sub) => format!("{} - {}", item.heading, sub),
                None => item.heading.clone(),
            };
            push_wrapped(&mut lines, LineKind::Text, &heading);
            if let Some(meta) = &item.meta {
                push_wrapped(&mut lines, LineKind::Text, meta);
            }
            if let Some(body) = &item.body {
                push_wrapped(&mut lines, LineKind::Text, body);
            }
            lines.push(Line::spacer());
        }
    }

    // Trim a trailing spacer so short documents don't end in dead space.
    while lines.last().map(|l| l.kind) == Some(LineKind::Spacer) {
        lines.pop();
    }
    lines
}
