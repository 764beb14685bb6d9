//! Detail view field mapping.

use portal_core::{Character, Status};

/// Display tone for a character's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Alive.
    Positive,
    /// Dead.
    Negative,
    Neutral,
}

impl From<Status> for StatusTone {
    fn from(status: Status) -> Self {
        match status {
            Status::Alive => StatusTone::Positive,
            Status::Dead => StatusTone::Negative,
            Status::Unknown => StatusTone::Neutral,
        }
    }
}

/// One labelled line of a detail card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    pub tone: Option<StatusTone>,
}

impl DetailRow {
    fn plain(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            tone: None,
        }
    }
}

/// Read-only presentation of an already-fetched character.
#[derive(Debug, Clone, Copy)]
pub struct CharacterDetail<'a> {
    character: &'a Character,
}

impl<'a> CharacterDetail<'a> {
    pub fn new(character: &'a Character) -> Self {
        Self { character }
    }

    pub fn title(&self) -> &'a str {
        &self.character.name
    }

    pub fn image(&self) -> &'a str {
        &self.character.image
    }

    pub fn tone(&self) -> StatusTone {
        self.character.status.into()
    }

    /// The detail card rows, in display order. `Type` is omitted when the
    /// character has no subtype.
    pub fn rows(&self) -> Vec<DetailRow> {
        let c = self.character;
        let mut rows = vec![
            DetailRow {
                label: "Status",
                value: c.status.to_string(),
                tone: Some(self.tone()),
            },
            DetailRow::plain("Species", &c.species),
            DetailRow::plain("Gender", &c.gender),
        ];

        if let Some(subtype) = &c.subtype {
            rows.push(DetailRow::plain("Type", subtype));
        }

        rows.push(DetailRow::plain("Origin", &c.origin.name));
        rows.push(DetailRow::plain("Location", &c.location.name));
        rows.push(DetailRow::plain(
            "Episodes",
            match c.episode_count() {
                1 => "1 episode".to_string(),
                n => format!("{n} episodes"),
            },
        ));
        rows
    }

    /// Compact one-line form used by list rows: name, species and status.
    pub fn summary(&self) -> (&'a str, &'a str, Status) {
        (&self.character.name, &self.character.species, self.character.status)
    }
}
