use rust_decimal::Decimal;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// Like [`format_amount`], with an em dash for missing values.
pub(crate) fn format_optional(val: Option<Decimal>) -> String {
    val.map(format_amount).unwrap_or_else(|| "—".into())
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Cursor over a scrolling list: the selected row and the first visible row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListCursor {
    pub(crate) index: usize,
    pub(crate) scroll: usize,
}

impl ListCursor {
    /// Move down one row, scrolling so the cursor stays within `page` rows.
    pub(crate) fn down(&mut self, len: usize, page: usize) {
        if self.index + 1 < len {
            self.index += 1;
            if self.index >= self.scroll + page {
                self.scroll = self.index.saturating_sub(page.saturating_sub(1));
            }
        }
    }

    pub(crate) fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
        if self.index < self.scroll {
            self.scroll = self.index;
        }
    }

    pub(crate) fn top(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn bottom(&mut self, len: usize, page: usize) {
        if len > 0 {
            self.index = len - 1;
            self.scroll = self.index.saturating_sub(page.saturating_sub(1));
        }
    }

    pub(crate) fn page_down(&mut self, len: usize, page: usize) {
        for _ in 0..(page / 2).max(1) {
            self.down(len, page);
        }
    }

    pub(crate) fn page_up(&mut self, page: usize) {
        for _ in 0..(page / 2).max(1) {
            self.up();
        }
    }

    /// Pull the cursor back inside a list that shrank to `len` rows.
    pub(crate) fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.top();
        } else if self.index >= len {
            self.index = len - 1;
            self.scroll = self.scroll.min(self.index);
        }
    }
}
