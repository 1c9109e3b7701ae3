//! Response review - submissions for one form with expandable entries

use std::collections::BTreeSet;

use crate::models::{ResponseEntry, Submission};

pub const NO_RESPONSES: &str = "No responses have been submitted for this form yet.";

#[derive(Clone, Debug, Default)]
pub struct ResponseReview {
    pub form_id: String,
    pub submissions: Vec<Submission>,
    expanded: BTreeSet<usize>,
    pub selected: usize,
}

impl ResponseReview {
    pub fn new(form_id: impl Into<String>, submissions: Vec<Submission>) -> Self {
        ResponseReview {
            form_id: form_id.into(),
            submissions,
            expanded: BTreeSet::new(),
            selected: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn toggle(&mut self, index: usize) {
        if index >= self.submissions.len() {
            return;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    pub fn toggle_selected(&mut self) {
        self.toggle(self.selected);
    }

    pub fn select_next(&mut self) {
        if !self.submissions.is_empty() {
            self.selected = (self.selected + 1) % self.submissions.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.submissions.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.submissions.len() - 1);
        }
    }
}

/// Text shown for an answer; blank answers read as N/A
pub fn display_response(entry: &ResponseEntry) -> &str {
    if entry.response.is_empty() {
        "N/A"
    } else {
        &entry.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(pairs: &[(&str, &str)]) -> Submission {
        Submission {
            responses: pairs
                .iter()
                .map(|(l, r)| ResponseEntry { label: l.to_string(), response: r.to_string() })
                .collect(),
        }
    }

    #[test]
    fn test_toggle_twice_collapses() {
        let mut review = ResponseReview::new("f", vec![submission(&[("a", "1")]), submission(&[])]);
        review.toggle(1);
        assert!(review.is_expanded(1));
        assert!(!review.is_expanded(0));
        review.toggle(1);
        assert!(!review.is_expanded(1));
    }

    #[test]
    fn test_toggle_out_of_range_ignored() {
        let mut review = ResponseReview::new("f", vec![]);
        review.toggle(0);
        assert!(!review.is_expanded(0));
        assert!(review.is_empty());
    }

    #[test]
    fn test_selection_wraps() {
        let mut review = ResponseReview::new("f", vec![submission(&[]), submission(&[])]);
        review.select_prev();
        assert_eq!(review.selected, 1);
        review.select_next();
        assert_eq!(review.selected, 0);
        review.toggle_selected();
        assert!(review.is_expanded(0));
    }

    #[test]
    fn test_blank_response_shows_na() {
        let s = submission(&[("Name", ""), ("Age", "30")]);
        assert_eq!(display_response(&s.responses[0]), "N/A");
        assert_eq!(display_response(&s.responses[1]), "30");
    }
}
