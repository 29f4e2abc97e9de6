use std::sync::Mutex;

use crate::error::Result;

/// Write-only system clipboard.
pub trait Clipboard: Send + Sync + 'static {
    fn write(&self, text: &str) -> Result<()>;
}

/// Keeps the last written text in memory.
#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&self, text: &str) -> Result<()> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}
