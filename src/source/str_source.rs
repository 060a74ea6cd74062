use super::Source;
use crate::error::SourceError;
use crate::Mark;

/// A `Source` backed by an in-memory string. Column tracking is `pos -
/// line_start + 1`, per the design note: cheap because the whole buffer is
/// resident.
pub struct StrSource<'a> {
    chars: Vec<char>,
    pos: usize,
    line: u64,
    line_start: usize,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        let chars: Vec<char> = strip_bom(input).chars().collect();
        Self {
            chars,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }
}

fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{feff}').unwrap_or(input)
}

impl<'a> Source for StrSource<'a> {
    fn peek(&mut self) -> Result<Option<char>, SourceError> {
        Ok(self.chars.get(self.pos).copied())
    }

    fn peek_at(&mut self, n: usize) -> Result<Option<char>, SourceError> {
        Ok(self.chars.get(self.pos + n).copied())
    }

    fn advance(&mut self) -> Result<Option<char>, SourceError> {
        let ch = self.chars.get(self.pos).copied();
        if let Some(ch) = ch {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
                self.line_start = self.pos;
            }
        }
        Ok(ch)
    }

    fn mark(&self) -> Mark {
        Mark::new(self.line, (self.pos - self.line_start + 1) as u64)
    }

    fn current_line_text(&mut self) -> Result<String, SourceError> {
        let end = self.chars[self.line_start..]
            .iter()
            .position(|&c| c == '\n')
            .map(|p| self.line_start + p)
            .unwrap_or(self.chars.len());
        Ok(self.chars[self.line_start..end].iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_and_column() {
        let mut src = StrSource::new("ab\ncd");
        assert_eq!(src.mark(), Mark::new(1, 1));
        src.advance().unwrap();
        assert_eq!(src.mark(), Mark::new(1, 2));
        src.advance().unwrap();
        src.advance().unwrap(); // consumes '\n'
        assert_eq!(src.mark(), Mark::new(2, 1));
        assert_eq!(src.peek().unwrap(), Some('c'));
    }

    #[test]
    fn strips_leading_bom() {
        let mut src = StrSource::new("\u{feff}a");
        assert_eq!(src.advance().unwrap(), Some('a'));
    }
}
