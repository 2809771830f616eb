// services/feedback-dash/src/clipboard.rs
//
// Clipboard sink for the translate box copy action

pub trait Clipboard: Send {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// System clipboard through `cli-clipboard` (X11/Wayland, macOS, Windows).
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        cli_clipboard::set_contents(text.to_owned()).map_err(|e| e.to_string())
    }
}
