//! The rejection ledger: why a release did not match a filter.
//!
//! Entries keep insertion order. A custom format may reference `{key}`,
//! `{got}` and `{want}`; without one an entry renders as
//! `[key] not matching: got <got> want: <want>`.

use parking_lot::RwLock;
use std::fmt;

/// Cap applied to each observed/expected value by [`Rejections::render_truncated`].
pub const TRUNCATE_LIMIT: usize = 1024;

/// One failed criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    key: String,
    got: String,
    want: String,
    format: Option<String>,
}

impl Rejection {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn got(&self) -> &str {
        &self.got
    }

    pub fn want(&self) -> &str {
        &self.want
    }

    fn render(&self, limit: Option<usize>) -> String {
        let got = truncate(&self.got, limit);
        let want = truncate(&self.want, limit);
        match &self.format {
            Some(format) => expand(format, &self.key, got, want),
            None => format!("[{}] not matching: got {} want: {}", self.key, got, want),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

fn truncate(s: &str, limit: Option<usize>) -> &str {
    match limit.and_then(|max| s.char_indices().nth(max)) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Single-pass placeholder expansion so substituted values are never rescanned.
fn expand(format: &str, key: &str, got: &str, want: &str) -> String {
    let mut out = String::with_capacity(format.len() + got.len() + want.len());
    let mut rest = format;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, len) = if tail.starts_with("{key}") {
            (key, 5)
        } else if tail.starts_with("{got}") {
            (got, 5)
        } else if tail.starts_with("{want}") {
            (want, 6)
        } else {
            ("{", 1)
        };
        out.push_str(value);
        rest = &tail[len..];
    }
    out.push_str(rest);
    out
}

/// Ordered, internally synchronized list of rejections.
#[derive(Debug, Default)]
pub struct Rejections {
    data: RwLock<Vec<Rejection>>,
}

impl Rejections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejection with the default rendering.
    pub fn add(&self, key: &str, got: impl fmt::Display, want: impl fmt::Display) {
        self.data.write().push(Rejection {
            key: key.to_string(),
            got: got.to_string(),
            want: want.to_string(),
            format: None,
        });
    }

    /// Record a rejection with a custom format.
    pub fn addf(
        &self,
        key: &str,
        format: impl Into<String>,
        got: impl fmt::Display,
        want: impl fmt::Display,
    ) {
        self.data.write().push(Rejection {
            key: key.to_string(),
            got: got.to_string(),
            want: want.to_string(),
            format: Some(format.into()),
        });
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    pub fn clear(&self) {
        self.data.write().clear();
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<Rejection> {
        self.data.read().clone()
    }

    /// Field keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.data.read().iter().map(|r| r.key.clone()).collect()
    }

    /// One rendered string per entry.
    pub fn reasons(&self) -> Vec<String> {
        self.data.read().iter().map(|r| r.render(None)).collect()
    }

    /// All entries rendered and joined with `", "`.
    pub fn render(&self) -> String {
        self.render_with(None)
    }

    /// Like [`render`](Self::render), with each value capped at [`TRUNCATE_LIMIT`] characters.
    pub fn render_truncated(&self) -> String {
        self.render_with(Some(TRUNCATE_LIMIT))
    }

    fn render_with(&self, limit: Option<usize>) -> String {
        self.data
            .read()
            .iter()
            .map(|r| r.render(limit))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Clone for Rejections {
    fn clone(&self) -> Self {
        Self {
            data: RwLock::new(self.data.read().clone()),
        }
    }
}

impl PartialEq for Rejections {
    fn eq(&self, other: &Self) -> bool {
        *self.data.read() == *other.data.read()
    }
}

impl fmt::Display for Rejections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a list value as `[a, b]`.
pub(crate) fn display_list<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
    format!("[{}]", items.join(", "))
}
