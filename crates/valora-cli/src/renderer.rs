//! Terminal rendering for the markdown-ish output of the core display types.
//!
//! Rich mode runs each line through termimad and colors headers and status
//! lines; plain mode prints the text unchanged.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

/// ANSI color for a line, if it gets one outside termimad.
fn line_color(line: &str) -> Option<&'static str> {
    if line.starts_with('#') {
        Some("\x1b[34m")
    } else if line.starts_with("Success:") {
        Some("\x1b[32m")
    } else if line.starts_with("Warning:") {
        Some("\x1b[33m")
    } else if line.starts_with("Error:") {
        Some("\x1b[31m")
    } else {
        None
    }
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            if markdown.ends_with('\n') {
                print!("{markdown}");
            } else {
                println!("{markdown}");
            }
            return Ok(());
        }

        for line in markdown.lines() {
            match line_color(line) {
                Some(color) => println!("{color}{line}\x1b[0m"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
