use crate::types::RawSection;

/// Trailing marker that turns a line into a section title.
pub const TITLE_MARKER: char = ':';

/// Scanner state while walking the non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    /// No title seen yet; body lines here have nowhere to go and are dropped.
    NoTitle,
    InSection { title: String, items: Vec<String> },
}

#[derive(Debug)]
struct Scan {
    sections: Vec<RawSection>,
    state: ScanState,
}

impl Scan {
    fn start() -> Self {
        Self {
            sections: Vec::new(),
            state: ScanState::NoTitle,
        }
    }

    fn step(mut self, line: &str) -> Self {
        match title_of(line) {
            Some(title) => {
                self.close_current();
                self.state = ScanState::InSection {
                    title: title.to_string(),
                    items: Vec::new(),
                };
            }
            None => {
                if let ScanState::InSection { items, .. } = &mut self.state {
                    items.push(line.to_string());
                }
            }
        }
        self
    }

    /// Emit the open section if it has a body. A title without items is dropped.
    fn close_current(&mut self) {
        if let ScanState::InSection { title, items } =
            std::mem::replace(&mut self.state, ScanState::NoTitle)
        {
            if !items.is_empty() {
                self.sections.push(RawSection { title, items });
            }
        }
    }

    fn finish(mut self) -> Vec<RawSection> {
        self.close_current();
        self.sections
    }
}

/// Returns the section title if the (already trimmed) line is a title line.
fn title_of(line: &str) -> Option<&str> {
    line.strip_suffix(TITLE_MARKER).map(str::trim)
}

/// Trimmed, non-blank lines in input order.
pub fn content_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Split raw feedback into titled groups of item lines.
///
/// Total: absent, empty or title-less input yields an empty vec. Body lines
/// before the first title are dropped, and so is any title that gets no
/// items before the next title or the end of input.
pub fn segment(raw: Option<&str>) -> Vec<RawSection> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    content_lines(raw).fold(Scan::start(), Scan::step).finish()
}
