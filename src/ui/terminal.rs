use colored::Colorize;
use minibadge_core::{results_label, EmptyState, Facet, Item, ViewReconciler};
use std::io::{self, Write};

use super::formatting::{format_card, format_facet_control, format_row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Cards,
    Rows,
}

/// Renders each view update straight to a writer, in the order the session
/// drives it.
pub struct TerminalView<W: Write> {
    out: W,
    layout: Layout,
    show_facets: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, layout: Layout) -> Self {
        Self {
            out,
            layout,
            show_facets: true,
            error: None,
        }
    }

    pub fn with_facets(mut self, show: bool) -> Self {
        self.show_facets = show;
        self
    }

    /// Flush and report the first write error, if any.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", line) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> ViewReconciler for TerminalView<W> {
    fn show_items(&mut self, visible: &[&Item]) {
        for item in visible {
            let text = match self.layout {
                Layout::Cards => format!("{}\n", format_card(item)),
                Layout::Rows => format_row(item),
            };
            self.write_line(&text);
        }
    }

    fn set_facet_options(&mut self, facet: Facet, options: &[String], selected: &str) {
        if self.show_facets {
            let line = format_facet_control(facet, options, selected);
            self.write_line(&line);
        }
    }

    fn set_counts(&mut self, visible: usize, total: usize) {
        let label = results_label(visible, total);
        self.write_line(&label.bold().to_string());
    }

    fn set_empty_state(&mut self, state: EmptyState) {
        match state {
            EmptyState::Hidden => {}
            EmptyState::NoMatches => {
                let line = "No minibadges match these filters.".yellow().to_string();
                self.write_line(&line);
            }
            EmptyState::LoadFailed { message } => {
                let line = message.red().to_string();
                self.write_line(&line);
            }
        }
    }
}
