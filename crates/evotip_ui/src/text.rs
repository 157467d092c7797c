//! Fixed-pitch text measurement and greedy word wrapping.
//!
//! The host font is not available to the overlay, so text is measured with a
//! fixed advance per character. Popup heights only need the line count.

/// Fixed-pitch text metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Horizontal advance per character.
    pub char_width: f32,
    /// Height of one line including leading.
    pub line_height: f32,
}

impl TextMetrics {
    /// Creates new metrics.
    #[must_use]
    pub const fn new(char_width: f32, line_height: f32) -> Self {
        Self { char_width, line_height }
    }

    /// Width of `text` on a single line.
    #[must_use]
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    /// Height of `lines` wrapped lines.
    #[must_use]
    pub fn block_height(&self, lines: usize) -> f32 {
        lines as f32 * self.line_height
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

/// Wraps `text` to lines no wider than `max_width`.
///
/// Explicit newlines are kept. Words longer than a full line are broken at
/// the character that overflows. Whitespace-only input yields no lines.
#[must_use]
pub fn wrap_text(text: &str, max_width: f32, metrics: &TextMetrics) -> Vec<String> {
    let max_chars = if metrics.char_width > 0.0 {
        ((max_width / metrics.char_width).floor() as usize).max(1)
    } else {
        usize::MAX
    };

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-break words that can never fit
            while word.len() > max_chars {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > max_chars {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }

        if line_len > 0 {
            lines.push(line);
        }
    }
    lines
}
