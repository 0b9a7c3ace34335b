//! Two-state detail overlay.
//!
//! `Closed` is the initial state. A details trigger opens it with a full
//! record; a click on the backdrop, Escape, or the close action closes it.
//! Every other input leaves the state as it was.

use serde::Serialize;

use crate::render::format_authors;
use crate::taxonomy::PaperRecord;

pub const ABSTRACT_FALLBACK: &str = "Abstract not available.";
pub const BIBTEX_FALLBACK: &str = "BibTeX not available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay layer itself, outside the content box.
    Backdrop,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM-style key name.
    pub fn named(name: &str) -> Key {
        match name {
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    Details(Box<PaperRecord>),
    Click(ClickTarget),
    Key(Key),
    Close,
}

impl From<Key> for ModalEvent {
    fn from(key: Key) -> Self {
        ModalEvent::Key(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Box<PaperRecord>),
}

impl ModalState {
    pub fn transition(self, event: ModalEvent) -> ModalState {
        match (self, event) {
            (ModalState::Closed, ModalEvent::Details(record)) => ModalState::Open(record),
            (ModalState::Open(_), ModalEvent::Click(ClickTarget::Backdrop))
            | (ModalState::Open(_), ModalEvent::Key(Key::Escape))
            | (ModalState::Open(_), ModalEvent::Close) => ModalState::Closed,
            (state, _) => state,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }
}

/// Holds the current state and applies events to it.
#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    pub fn new() -> Self {
        ModalController::default()
    }

    /// Applies `event`; returns whether the state changed between open and closed.
    pub fn dispatch(&mut self, event: ModalEvent) -> bool {
        let was_open = self.state.is_open();
        self.state = std::mem::take(&mut self.state).transition(event);
        was_open != self.state.is_open()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Background scrolling is suppressed while the overlay is open.
    pub fn scroll_locked(&self) -> bool {
        self.state.is_open()
    }

    pub fn view(&self) -> Option<ModalView> {
        match &self.state {
            ModalState::Open(record) => Some(ModalView::from_record(record)),
            ModalState::Closed => None,
        }
    }
}

/// The fields shown in the open overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub title: String,
    /// Every author, never truncated.
    pub authors: String,
    pub year: String,
    pub venue: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub bibtex: String,
}

impl ModalView {
    pub fn from_record(record: &PaperRecord) -> ModalView {
        ModalView {
            title: record.title.clone(),
            authors: format_authors(&record.authors, usize::MAX),
            year: record.year_label(),
            venue: record.venue().unwrap_or_default().to_string(),
            abstract_text: record.abstract_text().unwrap_or(ABSTRACT_FALLBACK).to_string(),
            bibtex: record.bibtex().unwrap_or(BIBTEX_FALLBACK).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Year;

    fn record() -> PaperRecord {
        PaperRecord {
            title: "Decoupling Representation and Classifier".to_string(),
            authors: "Kang and Xie and Rohrbach and Yan and Gordo".to_string(),
            year: Some(Year::Number(2020)),
            venue: Some("ICLR".to_string()),
            abstract_text: Some("Two-stage training.".to_string()),
            bibtex: Some("@inproceedings{kang2020,}".to_string()),
            ..PaperRecord::default()
        }
    }

    fn details(r: PaperRecord) -> ModalEvent {
        ModalEvent::Details(Box::new(r))
    }

    #[test]
    fn details_opens_with_every_field() {
        let mut modal = ModalController::new();
        assert!(modal.dispatch(details(record())));
        assert!(modal.scroll_locked());

        let view = modal.view().unwrap();
        assert_eq!(view.title, "Decoupling Representation and Classifier");
        assert_eq!(view.authors, "Kang, Xie, Rohrbach, Yan, Gordo");
        assert_eq!(view.year, "2020");
        assert_eq!(view.venue, "ICLR");
        assert_eq!(view.abstract_text, "Two-stage training.");
        assert_eq!(view.bibtex, "@inproceedings{kang2020,}");
    }

    #[test]
    fn absent_fields_use_fallbacks() {
        let view = ModalView::from_record(&PaperRecord {
            title: "Untitled".to_string(),
            authors: "Solo".to_string(),
            ..PaperRecord::default()
        });
        assert_eq!(view.venue, "");
        assert_eq!(view.abstract_text, ABSTRACT_FALLBACK);
        assert_eq!(view.bibtex, BIBTEX_FALLBACK);
        assert_eq!(view.year, "");
    }

    #[test]
    fn escape_backdrop_and_close_all_close() {
        for event in [
            ModalEvent::Key(Key::Escape),
            ModalEvent::Click(ClickTarget::Backdrop),
            ModalEvent::Close,
        ] {
            let mut modal = ModalController::new();
            modal.dispatch(details(record()));
            assert!(modal.dispatch(event));
            assert_eq!(modal.state(), &ModalState::Closed);
            assert!(!modal.scroll_locked());
        }
    }

    #[test]
    fn other_inputs_are_ignored() {
        let open = ModalState::Closed.transition(details(record()));
        assert_eq!(
            open.clone().transition(ModalEvent::Click(ClickTarget::Content)),
            open
        );
        assert_eq!(open.clone().transition(Key::named("Enter").into()), open);
        assert_eq!(open.clone().transition(details(PaperRecord::default())), open);

        for event in [
            ModalEvent::Key(Key::Escape),
            ModalEvent::Click(ClickTarget::Backdrop),
            ModalEvent::Close,
        ] {
            assert_eq!(ModalState::Closed.transition(event), ModalState::Closed);
        }
    }

    #[test]
    fn reopening_needs_a_fresh_trigger() {
        let mut modal = ModalController::new();
        modal.dispatch(details(record()));
        modal.dispatch(ModalEvent::Close);
        assert!(modal.view().is_none());

        let other = PaperRecord {
            title: "Other".to_string(),
            ..PaperRecord::default()
        };
        modal.dispatch(details(other));
        assert_eq!(modal.view().unwrap().title, "Other");
    }
}
