//! Text rendering of list rows, snapshots and detail cards.

use colored::{ColoredString, Colorize};

use portal_core::Character;
use portal_view::{CharacterDetail, ListSnapshot, StatusTone};

use crate::output;

fn paint(text: &str, tone: StatusTone) -> ColoredString {
    match tone {
        StatusTone::Positive => text.green(),
        StatusTone::Negative => text.red(),
        StatusTone::Neutral => text.bright_black(),
    }
}

/// One list row: position, status dot, name, species and status.
pub fn row(position: usize, character: &Character) -> String {
    let detail = CharacterDetail::new(character);
    let (name, species, status) = detail.summary();
    format!(
        "{:>4}  {} {}  {} - {}",
        position,
        paint("●", detail.tone()),
        name.bold(),
        species,
        status
    )
}

/// Print rows for `items`, numbering from `first`.
pub fn rows(items: &[Character], first: usize) {
    for (offset, character) in items.iter().enumerate() {
        println!("{}", row(first + offset, character));
    }
}

/// Footer describing how much of the listing is shown.
pub fn footer(snapshot: &ListSnapshot) -> String {
    let shown = snapshot.items.len();
    let mut line = match snapshot.total {
        Some(total) => format!("Showing {shown} of {total}"),
        None => format!("Showing {shown}"),
    };
    if !snapshot.query.is_empty() {
        line.push_str(&format!(" matching \"{}\"", snapshot.query));
    }
    if snapshot.has_more {
        line.push_str(" (more available)");
    }
    line
}

/// Print the detail card for a character.
pub fn detail(character: &Character) {
    let detail = CharacterDetail::new(character);

    println!("{}", paint(detail.title(), detail.tone()).bold());
    for row in detail.rows() {
        match row.tone {
            Some(tone) => output::field(row.label, &paint(&row.value, tone).to_string()),
            None => output::field(row.label, &row.value),
        }
    }
    output::field("Image", detail.image());
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_view::Phase;
    use serde_json::json;

    fn rick() -> Character {
        serde_json::from_value(json!({
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "" },
            "location": { "name": "Citadel of Ricks", "url": "" },
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": []
        }))
        .unwrap()
    }

    fn snapshot(items: Vec<Character>, query: &str, has_more: bool) -> ListSnapshot {
        ListSnapshot {
            phase: Phase::Ready,
            items,
            query: query.to_string(),
            has_more,
            total: Some(826),
            last_error: None,
            generation: 1,
            search_pending: false,
        }
    }

    #[test]
    fn row_shows_name_species_and_status() {
        colored::control::set_override(false);
        assert_eq!(row(1, &rick()), "   1  ● Rick Sanchez  Human - Alive");
    }

    #[test]
    fn footer_variants() {
        assert_eq!(footer(&snapshot(vec![rick()], "", false)), "Showing 1 of 826");
        assert_eq!(
            footer(&snapshot(vec![rick()], "rick", true)),
            "Showing 1 of 826 matching \"rick\" (more available)"
        );
    }
}
