/// Re-flow `text` into lines no wider than `width` columns, each prefixed by
/// `indent` spaces (the indent counts toward the width).
///
/// - Blank lines separate paragraphs and are kept.
/// - Line breaks inside a paragraph become spaces.
/// - A word ending in `.` followed by two or more spaces or a line break ends
///   a sentence and is followed by two spaces in the output.
/// - A word ending in `.` followed by exactly one space is kept on the same
///   line as the next word (`Mr. Dobalina`).
/// - Words longer than the width are never split.
pub fn wordwrap(indent: usize, width: usize, text: &str) -> String {
    let prefix = " ".repeat(indent);
    let available = width.saturating_sub(indent);

    paragraphs(text)
        .iter()
        .map(|paragraph| {
            fill(&units(paragraph), available)
                .iter()
                .map(|line| format!("{prefix}{line}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

/// A run of words that must stay on one line.
struct Unit {
    text: String,
    ends_sentence: bool,
}

fn units(paragraph: &str) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    let mut glue = false;
    let mut rest = paragraph.trim_start();

    while !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..end];
        let after = &rest[end..];
        let next = after.trim_start();
        let gap = &after[..after.len() - next.len()];

        match units.last_mut() {
            Some(last) if glue => {
                last.text.push(' ');
                last.text.push_str(word);
            }
            _ => units.push(Unit {
                text: word.to_string(),
                ends_sentence: false,
            }),
        }

        glue = false;
        if word.ends_with('.') && !next.is_empty() {
            if gap == " " {
                glue = true;
            } else if let Some(last) = units.last_mut() {
                last.ends_sentence = true;
            }
        }
        rest = next;
    }
    units
}

fn fill(units: &[Unit], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;
    let mut after_sentence = false;

    for unit in units {
        let unit_width = unit.text.chars().count();
        let separator = if after_sentence { "  " } else { " " };

        if line.is_empty() {
            line.push_str(&unit.text);
            line_width = unit_width;
        } else if line_width + separator.len() + unit_width <= width {
            line.push_str(separator);
            line.push_str(&unit.text);
            line_width += separator.len() + unit_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(&unit.text);
            line_width = unit_width;
        }
        after_sentence = unit.ends_sentence;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
