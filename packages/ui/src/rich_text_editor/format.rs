//! Toolbar actions as edits on Markdown text.
//!
//! Offsets in [`Selection`] are byte offsets into the source. The browser
//! reports UTF-16 offsets; convert with [`utf16_to_byte`] / [`byte_to_utf16`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp to `text` and snap both ends onto char boundaries.
    fn clamp(self, text: &str) -> Self {
        let snap = |mut i: usize| {
            i = i.min(text.len());
            while !text.is_char_boundary(i) {
                i -= 1;
            }
            i
        };
        Self::new(snap(self.start), snap(self.end))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Heading(u8),
    BulletList,
    OrderedList,
    Quote,
    Code,
    Link(String),
    Image(String),
}

/// Result of a toolbar action: the new text and what to select afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Selection,
}

pub fn apply(text: &str, selection: Selection, format: &Format) -> Edit {
    let sel = selection.clamp(text);
    match format {
        Format::Bold => toggle_inline(text, sel, "**"),
        Format::Italic => toggle_inline(text, sel, "_"),
        Format::Code if text[sel.start..sel.end].contains('\n') => fence(text, sel),
        Format::Code => toggle_inline(text, sel, "`"),
        Format::Heading(level) => {
            let prefix = format!("{} ", "#".repeat((*level).clamp(1, 6) as usize));
            toggle_lines(text, sel, |_| prefix.clone(), heading_prefix_len)
        }
        Format::BulletList => toggle_lines(text, sel, |_| "- ".to_string(), |l| {
            if l.starts_with("- ") {
                2
            } else {
                0
            }
        }),
        Format::OrderedList => {
            toggle_lines(text, sel, |i| format!("{}. ", i + 1), ordered_prefix_len)
        }
        Format::Quote => toggle_lines(text, sel, |_| "> ".to_string(), |l| {
            if l.starts_with("> ") {
                2
            } else {
                0
            }
        }),
        Format::Link(url) => insert_link(text, sel, "", "link text", url),
        Format::Image(url) => insert_link(text, sel, "!", "image", url),
    }
}

fn splice(text: &str, sel: Selection, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..sel.start]);
    out.push_str(replacement);
    out.push_str(&text[sel.end..]);
    out
}

/// Wrap the selection in `marker`, or unwrap it when already wrapped.
fn toggle_inline(text: &str, sel: Selection, marker: &str) -> Edit {
    let m = marker.len();
    let inner = &text[sel.start..sel.end];

    // markers just outside the selection
    if sel.start >= m
        && text[..sel.start].ends_with(marker)
        && text[sel.end..].starts_with(marker)
    {
        let outer = Selection::new(sel.start - m, sel.end + m);
        return Edit {
            text: splice(text, outer, inner),
            selection: Selection::new(sel.start - m, sel.end - m),
        };
    }

    // markers selected along with the text
    if inner.len() >= 2 * m && inner.starts_with(marker) && inner.ends_with(marker) {
        let stripped = &inner[m..inner.len() - m];
        return Edit {
            text: splice(text, sel, stripped),
            selection: Selection::new(sel.start, sel.start + stripped.len()),
        };
    }

    let wrapped = format!("{marker}{inner}{marker}");
    Edit {
        text: splice(text, sel, &wrapped),
        selection: Selection::new(sel.start + m, sel.end + m),
    }
}

fn fence(text: &str, sel: Selection) -> Edit {
    let inner = text[sel.start..sel.end].trim_end_matches('\n');
    let lead = if sel.start == 0 || text[..sel.start].ends_with('\n') { "" } else { "\n" };
    let block = format!("{lead}```\n{inner}\n```\n");
    let body_start = sel.start + lead.len() + 4;
    Edit {
        text: splice(text, sel, &block),
        selection: Selection::new(body_start, body_start + inner.len()),
    }
}

fn heading_prefix_len(line: &str) -> usize {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        hashes + 1
    } else {
        0
    }
}

fn ordered_prefix_len(line: &str) -> usize {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && line[digits..].starts_with(". ") {
        digits + 2
    } else {
        0
    }
}

/// Add `prefix(i)` to every selected line, or strip it when every line
/// already carries exactly that prefix. `existing` reports the length of a
/// prefix of the same family, which is replaced rather than stacked.
fn toggle_lines(
    text: &str,
    sel: Selection,
    prefix: impl Fn(usize) -> String,
    existing: impl Fn(&str) -> usize,
) -> Edit {
    let block_start = text[..sel.start].rfind('\n').map_or(0, |i| i + 1);
    let block_end = text[sel.end..].find('\n').map_or(text.len(), |i| sel.end + i);
    let block = &text[block_start..block_end];
    let lines: Vec<&str> = block.split('\n').collect();

    let all_set = lines.iter().enumerate().all(|(i, line)| {
        let n = existing(line);
        n > 0 && line[..n] == prefix(i)
    });

    let rewritten: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let rest = &line[existing(line)..];
            if all_set {
                rest.to_string()
            } else {
                format!("{}{}", prefix(i), rest)
            }
        })
        .collect();
    let replacement = rewritten.join("\n");

    Edit {
        text: splice(text, Selection::new(block_start, block_end), &replacement),
        selection: Selection::new(block_start, block_start + replacement.len()),
    }
}

fn insert_link(text: &str, sel: Selection, bang: &str, fallback: &str, url: &str) -> Edit {
    let label = if sel.is_empty() { fallback } else { &text[sel.start..sel.end] };
    let markdown = format!("{bang}[{label}]({})", url.trim());
    let label_start = sel.start + bang.len() + 1;
    Edit {
        text: splice(text, sel, &markdown),
        selection: Selection::new(label_start, label_start + label.len()),
    }
}

pub fn utf16_to_byte(text: &str, utf16: usize) -> usize {
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        if units >= utf16 {
            return byte;
        }
        units += ch.len_utf16();
    }
    text.len()
}

pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    text.char_indices()
        .take_while(|(i, _)| *i < byte)
        .map(|(_, ch)| ch.len_utf16())
        .sum()
}

/// Undo/redo stacks of whole-text snapshots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditHistory {
    undo: Vec<String>,
    redo: Vec<String>,
}

const HISTORY_LIMIT: usize = 100;

impl EditHistory {
    /// Remember `previous` before a change. Clears the redo stack.
    pub fn record(&mut self, previous: String) {
        if self.undo.last() == Some(&previous) {
            return;
        }
        self.undo.push(previous);
        if self.undo.len() > HISTORY_LIMIT {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    pub fn undo(&mut self, current: &str) -> Option<String> {
        let previous = self.undo.pop()?;
        self.redo.push(current.to_string());
        Some(previous)
    }

    pub fn redo(&mut self, current: &str) -> Option<String> {
        let next = self.redo.pop()?;
        self.undo.push(current.to_string());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: usize, e: usize) -> Selection {
        Selection::new(s, e)
    }

    #[test]
    fn test_bold_wraps_and_unwraps() {
        let edit = apply("make this bold", sel(5, 9), &Format::Bold);
        assert_eq!(edit.text, "make **this** bold");
        assert_eq!(&edit.text[edit.selection.start..edit.selection.end], "this");

        let undone = apply(&edit.text, edit.selection, &Format::Bold);
        assert_eq!(undone.text, "make this bold");

        // markers inside the selection are stripped too
        let stripped = apply("**x**", sel(0, 5), &Format::Bold);
        assert_eq!(stripped.text, "x");
    }

    #[test]
    fn test_empty_selection_places_cursor_between_markers() {
        let edit = apply("ab", sel(1, 1), &Format::Italic);
        assert_eq!(edit.text, "a__b");
        assert_eq!(edit.selection, sel(2, 2));
    }

    #[test]
    fn test_code_inline_or_fenced() {
        assert_eq!(apply("x = 1", sel(0, 5), &Format::Code).text, "`x = 1`");
        let edit = apply("intro\nfn a()\nfn b()", sel(6, 19), &Format::Code);
        assert_eq!(edit.text, "intro\n```\nfn a()\nfn b()\n```\n");
        assert_eq!(&edit.text[edit.selection.start..edit.selection.end], "fn a()\nfn b()");
    }

    #[test]
    fn test_heading_replaces_other_level() {
        let h1 = apply("Title\nbody", sel(2, 2), &Format::Heading(1));
        assert_eq!(h1.text, "# Title\nbody");
        let h2 = apply(&h1.text, sel(3, 3), &Format::Heading(2));
        assert_eq!(h2.text, "## Title\nbody");
        let off = apply(&h2.text, sel(3, 3), &Format::Heading(2));
        assert_eq!(off.text, "Title\nbody");
    }

    #[test]
    fn test_lists_number_each_line() {
        let text = "one\ntwo\nthree";
        let ordered = apply(text, sel(0, text.len()), &Format::OrderedList);
        assert_eq!(ordered.text, "1. one\n2. two\n3. three");
        let bullets = apply(&ordered.text, sel(0, ordered.text.len()), &Format::BulletList);
        assert_eq!(bullets.text, "- 1. one\n- 2. two\n- 3. three");
        let back = apply(&ordered.text, sel(0, ordered.text.len()), &Format::OrderedList);
        assert_eq!(back.text, text);
    }

    #[test]
    fn test_quote_only_touches_selected_lines() {
        let edit = apply("a\nb\nc", sel(2, 3), &Format::Quote);
        assert_eq!(edit.text, "a\n> b\nc");
    }

    #[test]
    fn test_link_and_image() {
        let link = apply("see docs", sel(4, 8), &Format::Link(" https://x.io ".into()));
        assert_eq!(link.text, "see [docs](https://x.io)");
        assert_eq!(&link.text[link.selection.start..link.selection.end], "docs");

        let image = apply("", sel(0, 0), &Format::Image("/a.png".into()));
        assert_eq!(image.text, "![image](/a.png)");
    }

    #[test]
    fn test_offsets_snap_to_char_boundaries() {
        // 'é' is two bytes; offset 2 falls inside it
        let edit = apply("héllo", sel(2, 6), &Format::Bold);
        assert_eq!(edit.text, "h**éllo**");
    }

    #[test]
    fn test_utf16_conversion() {
        let text = "a😀b";
        assert_eq!(utf16_to_byte(text, 0), 0);
        assert_eq!(utf16_to_byte(text, 1), 1);
        assert_eq!(utf16_to_byte(text, 3), 5);
        assert_eq!(utf16_to_byte(text, 99), text.len());
        assert_eq!(byte_to_utf16(text, 5), 3);
        assert_eq!(byte_to_utf16(text, text.len()), 4);
    }

    #[test]
    fn test_history_undo_redo() {
        let mut history = EditHistory::default();
        history.record("a".into());
        history.record("ab".into());
        assert!(history.can_undo());

        assert_eq!(history.undo("abc").as_deref(), Some("ab"));
        assert_eq!(history.undo("ab").as_deref(), Some("a"));
        assert_eq!(history.undo("a"), None);
        assert_eq!(history.redo("a").as_deref(), Some("ab"));

        history.record("x".into());
        assert!(!history.can_redo());
    }
}
