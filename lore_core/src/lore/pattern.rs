//! Line matchers compiled from lore templates

use crate::lore::color::strip_color;
use crate::lore::template::VALUE_PLACEHOLDER;

/// A compiled matcher for one stat kind's lore line.
///
/// The color-stripped template is split at `{value}` into a literal prefix
/// and suffix. A line matches wherever the prefix occurs followed by a run
/// of digits/dots (the captured value), an optional `%` for percent kinds,
/// then the suffix. Literal characters match literally; nothing in the
/// template is interpreted.
#[derive(Debug, Clone)]
pub(crate) struct LinePattern {
    prefix: String,
    suffix: String,
    percent: bool,
}

impl LinePattern {
    /// Compile a template; `None` when its color-stripped form lacks the
    /// `{value}` placeholder.
    pub fn compile(format: &str, percent: bool) -> Option<LinePattern> {
        let stripped = strip_color(format);
        let at = stripped.find(VALUE_PLACEHOLDER)?;
        Some(LinePattern {
            prefix: stripped[..at].to_string(),
            suffix: stripped[at + VALUE_PLACEHOLDER.len()..].to_string(),
            percent,
        })
    }

    /// Find the captured numeric text in an already color-stripped line.
    ///
    /// Returns the raw digit/dot run of the first structural match, or
    /// `None` when the line does not match. The caller decides whether the
    /// capture parses as a number.
    pub fn find_raw<'a>(&self, line: &'a str) -> Option<&'a str> {
        let mut start = 0;
        loop {
            let at = start + line[start..].find(&self.prefix)?;
            let rest = &line[at + self.prefix.len()..];
            let run = numeric_run(rest);
            // longest capture first, shrinking until the suffix fits
            for len in (1..=run).rev() {
                let tail = &rest[len..];
                if self.percent
                    && tail
                        .strip_prefix('%')
                        .is_some_and(|t| t.starts_with(&self.suffix))
                {
                    return Some(&rest[..len]);
                }
                if tail.starts_with(&self.suffix) {
                    return Some(&rest[..len]);
                }
            }
            // no match at this occurrence; resume one character later
            let next = line[at..].chars().next()?;
            start = at + next.len_utf8();
        }
    }
}

/// Length in bytes of the leading `[0-9.]` run.
fn numeric_run(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count()
}
