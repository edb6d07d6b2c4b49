//! Plain-text rendering for the command line.
//!
//! Like the HTML adapter, the renderer keeps the latest contents of the story
//! and pagination containers; [`TerminalRenderer::screen`] joins them for
//! printing. Summaries always have their markup stripped here.

use super::{Card, Renderer, page_buttons};
use crate::utils::strip_markup;
use std::fmt::Write;

#[derive(Debug, Clone, Default)]
pub struct TerminalRenderer {
    cards_text: String,
    pagination_text: String,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything currently shown, ready to print.
    pub fn screen(&self) -> String {
        if self.pagination_text.is_empty() {
            self.cards_text.clone()
        } else {
            format!("{}\n{}\n", self.cards_text, self.pagination_text)
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render_cards(&mut self, cards: &[Card]) {
        let mut text = String::new();
        for card in cards {
            writeln!(text, "[{}] {}", card.badge_label, card.title).unwrap();
            writeln!(text, "    {}", card.meta_line()).unwrap();
            let summary = strip_markup(&card.summary);
            if !summary.is_empty() {
                writeln!(text, "    {summary}").unwrap();
            }
            writeln!(text, "    Read more: {}", card.link).unwrap();
            text.push('\n');
        }
        self.cards_text = text;
    }

    fn render_empty(&mut self, message: &str) {
        self.cards_text = format!("{message}\n");
    }

    fn render_pagination(&mut self, total_pages: usize, current_page: usize) {
        let buttons = page_buttons(total_pages, current_page);
        self.pagination_text = if buttons.is_empty() {
            String::new()
        } else {
            let labels: Vec<String> = buttons
                .iter()
                .map(|b| {
                    if b.active {
                        format!("[{}]", b.page)
                    } else {
                        b.page.to_string()
                    }
                })
                .collect();
            format!("Pages: {}", labels.join(" "))
        };
    }

    fn render_error(&mut self, message: &str) {
        self.cards_text = format!("{message}\n");
        self.pagination_text.clear();
    }
}
