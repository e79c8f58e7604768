//! System clipboard backed by `arboard`.

use contactteam_core::{Clipboard, ClipboardError};

/// Native clipboard handle, opened on first write.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().map_err(clipboard_error)?);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError("clipboard handle missing".to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?.set_text(text).map_err(clipboard_error)
    }
}

fn clipboard_error(err: arboard::Error) -> ClipboardError {
    ClipboardError(err.to_string())
}
