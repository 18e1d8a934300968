//! Terminal output
//!
//! Status lines go to stderr, the grid itself to stdout.

use console::Style;
use imagehub::config::EMPTY_STATE_LABEL;
use imagehub::gallery::{Card, GridContent, GridView};

pub struct Output {
    green: Style,
    red: Style,
    bold: Style,
    dim: Style,
}

impl Output {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Format: "       Saved image #3"
    pub fn status(&self, action: &str, target: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{:>12} {}", self.red.apply_to("Error"), message);
    }

    pub fn hint(&self, message: &str) {
        eprintln!("{:>12} {}", "", self.dim.apply_to(message));
    }

    /// Print a render pass. Links are only useful while the handles live.
    pub fn grid(&self, view: &GridView, show_links: bool) {
        let count = if view.filter.is_empty() {
            format!("{} posts", view.total)
        } else {
            format!("{} posts, filter {:?}", view.total, view.filter)
        };
        println!("{}", self.bold.apply_to(count));

        match &view.content {
            GridContent::NoRecords | GridContent::Empty => {
                println!("  {}", self.dim.apply_to(EMPTY_STATE_LABEL));
            }
            GridContent::Cards(cards) => {
                for card in cards {
                    self.card(card, show_links);
                }
            }
        }
    }

    /// Format: "#3 Cat (2026-10-19 09:12) [pet, orange]"
    fn card(&self, card: &Card, show_link: bool) {
        let date = chrono::DateTime::from_timestamp_millis(card.created)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "N/A".to_string());

        let tags = if card.tags.is_empty() {
            String::new()
        } else {
            format!(" {}", self.dim.apply_to(format!("[{}]", card.tags)))
        };

        println!(
            "{} {} {}{}",
            self.dim.apply_to(format!("#{}", card.id)),
            self.bold.apply_to(&card.title),
            self.dim.apply_to(format!("({})", date)),
            tags
        );

        if show_link {
            println!("    {}", self.dim.apply_to(card.open_url()));
        }
    }
}
