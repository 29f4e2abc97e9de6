//! Toast queue: stored at `toast/list`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first. At most [`ToastList::MAX_VISIBLE`] are
/// kept; pushing past that drops the oldest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToastList {
    pub items: Vec<Toast>,
    #[serde(skip)]
    next_id: u64,
}

impl ToastList {
    pub const PATH: &'static str = "toast/list";
    pub const MAX_VISIBLE: usize = 5;

    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        if self.items.len() > Self::MAX_VISIBLE {
            let overflow = self.items.len() - Self::MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        self.next_id
    }

    /// Id the next toast will get; one past every id handed out so far.
    pub fn next_id(&self) -> u64 {
        self.next_id + 1
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let len = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() < len
    }

    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|t| t.message.as_str()).collect()
    }
}
