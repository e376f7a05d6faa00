use colored::{ColoredString, Colorize};
use minibadge_core::{Difficulty, Facet, Item};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Difficulty tag colored by tier
pub fn difficulty_tag(item: &Item) -> ColoredString {
    let text = item.soldering_difficulty.trim();
    let tag = if text.is_empty() {
        "unrated".to_string()
    } else {
        format!("[{}]", text)
    };

    match item.difficulty() {
        Difficulty::PreSoldered => tag.green().bold(),
        Difficulty::Beginner => tag.bright_green(),
        Difficulty::Intermediate => tag.yellow(),
        Difficulty::Advanced => tag.bright_red(),
        Difficulty::Torture => tag.red().bold(),
        Difficulty::Other => tag.normal(),
    }
}

/// Format one item as a multi-line card
pub fn format_card(item: &Item) -> String {
    let mut lines = vec![format!("{}  {}", item.title.bold(), difficulty_tag(item))];

    let byline: Vec<&str> = [
        item.author.as_str(),
        item.category.as_str(),
        item.conference_year.as_str(),
    ]
    .into_iter()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect();
    if !byline.is_empty() {
        lines.push(format!("  {}", byline.join(" · ").dimmed()));
    }

    let details = [
        ("Made", item.quantity_made.as_str()),
        ("Board house", item.board_house.as_str()),
        ("Rarity", item.rarity.as_deref().unwrap_or("")),
        ("Description", item.description.as_str()),
        ("Special instructions", item.special_instructions.as_str()),
        ("Soldering", item.soldering_instructions.as_str()),
        ("How to get one", item.how_to_acquire.as_str()),
    ];
    for (label, value) in details {
        let value = value.trim();
        if !value.is_empty() {
            lines.push(format!("  {}: {}", label.cyan(), value));
        }
    }

    lines.push(format!(
        "  {}",
        format!(
            "front {} · back {} · author {}",
            item.front_image_url(),
            item.back_image_url(),
            item.profile_picture_url()
        )
        .dimmed()
    ));

    lines.join("\n")
}

/// Format one item as a single aligned row
pub fn format_row(item: &Item) -> String {
    format!(
        "{}  {}  {}  {}",
        fit_to_width(&item.title, 32),
        fit_to_width(&item.author, 16),
        fit_to_width(&item.category, 12),
        difficulty_tag(item)
    )
}

/// Format a facet control: label, options and the current selection marked
pub fn format_facet_control(facet: Facet, options: &[String], selected: &str) -> String {
    let mut choices = vec![if selected.is_empty() {
        format!("*{}*", facet.label()).bold().to_string()
    } else {
        facet.label().to_string()
    }];

    choices.extend(options.iter().map(|option| {
        if option == selected {
            format!("*{}*", option).bold().to_string()
        } else {
            option.clone()
        }
    }));

    format!("{} {}", fit_to_width(facet.name(), 11), choices.join(" | "))
}

/// Truncate with an ellipsis or pad with spaces to exactly `width` columns
pub fn fit_to_width(text: &str, width: usize) -> String {
    let text = text.trim();
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
