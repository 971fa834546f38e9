//! Form controller — the single dispatch point that turns a user event into a
//! state transition and keeps every derived view in step with the form.
//!
//! # Submission
//! Validate contact fields, then either reject or render. A rejected
//! submission leaves both the form and the last preview untouched and records
//! the notice plus the field that should receive focus. Submission runs to
//! completion inside one dispatch, so no intermediate state is observable.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::form::completion::{compute_completion, CompletionMetric};
use crate::form::length_guard::{check_length, LengthCheck, DESCRIPTION_LIMIT, SUMMARY_LIMIT};
use crate::form::preview::{render_preview, Preview};
use crate::form::repeater::{add_entry, remove_entry, truncate_to_first};
use crate::form::validators::{validate_contact, FocusTarget, ValidationFailure};
use crate::models::form::{
    EducationEntry, EntryId, EntryKind, EntryRef, ExperienceEntry, FieldRef, FormState, Identity,
};

// ────────────────────────────────────────────────────────────────────────────
// Events and effects
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    FieldChanged { field: FieldRef, value: String },
    EntryAdded { kind: EntryKind },
    EntryRemoved { entry: EntryRef },
    Submitted,
    ResetRequested,
    ThemeToggled,
}

/// What a successfully dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventEffect {
    FieldUpdated { applied: bool },
    EntryAdded { entry: EntryRef },
    EntryRemoved { removed: bool },
    PreviewRendered,
    FormReset,
    ThemeChanged { theme: Theme },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Blocking message left by the most recent rejected submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub focus: FocusTarget,
}

impl From<ValidationFailure> for Notice {
    fn from(failure: ValidationFailure) -> Self {
        Notice {
            message: failure.to_string(),
            focus: failure.focus(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Derived view
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionLength {
    pub entry_id: EntryId,
    pub length: LengthCheck,
    pub counter_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLength {
    pub length: LengthCheck,
    pub counter_text: String,
}

/// Everything the presentation layer needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormView {
    pub form: FormState,
    pub completion: CompletionMetric,
    pub progress_text: String,
    pub summary_length: SummaryLength,
    pub description_lengths: Vec<DescriptionLength>,
    pub preview: Preview,
    pub theme: Theme,
    pub notice: Option<Notice>,
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FormController {
    form: FormState,
    preview: Preview,
    theme: Theme,
    notice: Option<Notice>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            form: FormState::default(),
            preview: Preview::default(),
            theme: Theme::default(),
            notice: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[cfg(test)]
    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Applies one user event. Only a submission can fail.
    pub fn dispatch(&mut self, event: UserEvent) -> Result<EventEffect, ValidationFailure> {
        match event {
            UserEvent::FieldChanged { field, value } => {
                let applied = self.set_field(field, value);
                Ok(EventEffect::FieldUpdated { applied })
            }
            UserEvent::EntryAdded { kind } => {
                let id = add_entry(&mut self.form, kind);
                Ok(EventEffect::EntryAdded {
                    entry: EntryRef { kind, id },
                })
            }
            UserEvent::EntryRemoved { entry } => {
                let removed = remove_entry(&mut self.form, entry);
                Ok(EventEffect::EntryRemoved { removed })
            }
            UserEvent::Submitted => self.submit().map(|_| EventEffect::PreviewRendered),
            UserEvent::ResetRequested => {
                self.reset();
                Ok(EventEffect::FormReset)
            }
            UserEvent::ThemeToggled => {
                self.theme = self.theme.toggled();
                debug!("Theme switched to {:?}", self.theme);
                Ok(EventEffect::ThemeChanged { theme: self.theme })
            }
        }
    }

    fn set_field(&mut self, field: FieldRef, value: String) -> bool {
        match self.form.field_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                debug!("Ignored edit for field on a removed entry: {field:?}");
                false
            }
        }
    }

    /// Validates contact fields, then replaces the preview. On rejection the
    /// notice is recorded and nothing else changes.
    fn submit(&mut self) -> Result<(), ValidationFailure> {
        let identity = &self.form.identity;
        if let Err(failure) = validate_contact(&identity.email, &identity.phone) {
            warn!("Submission rejected: {failure}");
            self.notice = Some(failure.into());
            return Err(failure);
        }

        self.preview = render_preview(&self.form);
        self.notice = None;
        info!(
            "Preview rendered: {} education, {} experience, {} skills",
            self.preview.education.len(),
            self.preview.experience.len(),
            self.preview.skills.len()
        );
        Ok(())
    }

    /// Clears every value, trims repeated sections back to one entry each and
    /// drops the rendered preview. The theme is left alone.
    fn reset(&mut self) {
        truncate_to_first(&mut self.form);
        self.form.identity = Identity::default();
        for entry in &mut self.form.education {
            let id = entry.id;
            *entry = EducationEntry::empty(id);
        }
        for entry in &mut self.form.experience {
            let id = entry.id;
            *entry = ExperienceEntry::empty(id);
        }
        self.preview = Preview::default();
        self.notice = None;
        info!("Form reset");
    }

    /// Re-derives the full view from the current state.
    pub fn view(&self) -> FormView {
        let completion = compute_completion(&self.form);
        let progress_text = completion.progress_text();
        let summary = check_length(&self.form.identity.summary, SUMMARY_LIMIT);
        let description_lengths = self
            .form
            .experience
            .iter()
            .map(|e| {
                let length = check_length(&e.description, DESCRIPTION_LIMIT);
                DescriptionLength {
                    entry_id: e.id,
                    counter_text: length.counter_text(),
                    length,
                }
            })
            .collect();

        FormView {
            form: self.form.clone(),
            completion,
            progress_text,
            summary_length: SummaryLength {
                counter_text: summary.counter_text(),
                length: summary,
            },
            description_lengths,
            preview: self.preview.clone(),
            theme: self.theme,
            notice: self.notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{EducationField, ExperienceField, IdentityField};

    fn set(ctrl: &mut FormController, field: IdentityField, value: &str) {
        ctrl.dispatch(UserEvent::FieldChanged {
            field: FieldRef::identity(field),
            value: value.to_string(),
        })
        .unwrap();
    }

    #[test]
    fn test_field_change_updates_completion() {
        let mut ctrl = FormController::new();
        set(&mut ctrl, IdentityField::Name, "Jane Doe");
        let view = ctrl.view();
        assert_eq!(view.completion.filled_count, 1);
        assert_eq!(view.progress_text, "8%");
    }

    #[test]
    fn test_summary_length_guard_is_advisory() {
        let mut ctrl = FormController::new();
        let long = "x".repeat(600);
        set(&mut ctrl, IdentityField::Summary, &long);
        let view = ctrl.view();
        assert_eq!(view.form.identity.summary.len(), 600);
        assert!(view.summary_length.length.exceeded);
        assert_eq!(view.summary_length.counter_text, "600/500 characters");
    }

    #[test]
    fn test_added_experience_gets_description_guard() {
        let mut ctrl = FormController::new();
        let effect = ctrl
            .dispatch(UserEvent::EntryAdded {
                kind: EntryKind::Experience,
            })
            .unwrap();
        let EventEffect::EntryAdded { entry } = effect else {
            panic!("expected an added entry");
        };
        ctrl.dispatch(UserEvent::FieldChanged {
            field: FieldRef::Experience {
                id: entry.id,
                field: ExperienceField::Description,
            },
            value: "y".repeat(1001),
        })
        .unwrap();
        let view = ctrl.view();
        assert_eq!(view.description_lengths.len(), 2);
        assert_eq!(view.description_lengths[1].entry_id, entry.id);
        assert!(view.description_lengths[1].length.exceeded);
        assert_eq!(view.description_lengths[1].counter_text, "1001/1000 characters");
    }

    #[test]
    fn test_edit_on_removed_entry_is_ignored() {
        let mut ctrl = FormController::new();
        let id = ctrl.form().education[0].id;
        ctrl.dispatch(UserEvent::EntryRemoved {
            entry: EntryRef {
                kind: EntryKind::Education,
                id,
            },
        })
        .unwrap();
        let effect = ctrl
            .dispatch(UserEvent::FieldChanged {
                field: FieldRef::Education {
                    id,
                    field: EducationField::Degree,
                },
                value: "BS".into(),
            })
            .unwrap();
        assert_eq!(effect, EventEffect::FieldUpdated { applied: false });
    }

    #[test]
    fn test_submit_renders_preview() {
        let mut ctrl = FormController::new();
        set(&mut ctrl, IdentityField::Name, "Jane Doe");
        set(&mut ctrl, IdentityField::Email, "jane@x.com");
        set(&mut ctrl, IdentityField::Skills, "Go, Rust, , C++");
        let id = ctrl.form().education[0].id;
        ctrl.dispatch(UserEvent::FieldChanged {
            field: FieldRef::Education {
                id,
                field: EducationField::Degree,
            },
            value: "BS".into(),
        })
        .unwrap();

        assert_eq!(
            ctrl.dispatch(UserEvent::Submitted),
            Ok(EventEffect::PreviewRendered)
        );
        let preview = ctrl.preview();
        assert_eq!(preview.name, "Jane Doe");
        assert_eq!(preview.contact, "jane@x.com");
        assert_eq!(preview.education, vec!["BS"]);
        assert_eq!(preview.skills, vec!["Go", "Rust", "", "C++"]);
    }

    #[test]
    fn test_bad_email_rejected_and_preview_kept() {
        let mut ctrl = FormController::new();
        set(&mut ctrl, IdentityField::Name, "First");
        set(&mut ctrl, IdentityField::Email, "first@x.com");
        ctrl.dispatch(UserEvent::Submitted).unwrap();
        let before = ctrl.preview().clone();

        set(&mut ctrl, IdentityField::Name, "Second");
        set(&mut ctrl, IdentityField::Email, "bad-email");
        let form_before = ctrl.form().clone();
        let err = ctrl.dispatch(UserEvent::Submitted).unwrap_err();

        assert_eq!(err, ValidationFailure::InvalidEmail);
        assert_eq!(ctrl.preview(), &before);
        assert_eq!(ctrl.form(), &form_before);
        let notice = ctrl.view().notice.unwrap();
        assert_eq!(notice.focus, FocusTarget::Email);
        assert_eq!(notice.message, "Please enter a valid email address");
    }

    #[test]
    fn test_bad_phone_rejected() {
        let mut ctrl = FormController::new();
        set(&mut ctrl, IdentityField::Email, "jane@x.com");
        set(&mut ctrl, IdentityField::Phone, "123");
        let err = ctrl.dispatch(UserEvent::Submitted).unwrap_err();
        assert_eq!(err.focus(), FocusTarget::Phone);
        assert_eq!(ctrl.preview(), &Preview::default());
    }

    #[test]
    fn test_successful_submit_clears_notice() {
        let mut ctrl = FormController::new();
        assert!(ctrl.dispatch(UserEvent::Submitted).is_err());
        set(&mut ctrl, IdentityField::Email, "jane@x.com");
        ctrl.dispatch(UserEvent::Submitted).unwrap();
        assert!(ctrl.view().notice.is_none());
    }

    #[test]
    fn test_reset_clears_everything_but_theme() {
        let mut ctrl = FormController::new();
        ctrl.dispatch(UserEvent::ThemeToggled).unwrap();
        set(&mut ctrl, IdentityField::Name, "Jane Doe");
        set(&mut ctrl, IdentityField::Email, "jane@x.com");
        set(&mut ctrl, IdentityField::Summary, &"s".repeat(700));
        ctrl.dispatch(UserEvent::EntryAdded {
            kind: EntryKind::Education,
        })
        .unwrap();
        ctrl.dispatch(UserEvent::EntryAdded {
            kind: EntryKind::Experience,
        })
        .unwrap();
        ctrl.dispatch(UserEvent::Submitted).unwrap();
        let first_edu = ctrl.form().education[0].id;

        ctrl.dispatch(UserEvent::ResetRequested).unwrap();
        let view = ctrl.view();
        assert_eq!(view.form.education.len(), 1);
        assert_eq!(view.form.experience.len(), 1);
        assert_eq!(view.form.education[0].id, first_edu);
        assert_eq!(view.form.identity, Identity::default());
        assert_eq!(view.completion.percentage, 0);
        assert_eq!(view.summary_length.counter_text, "0/500 characters");
        assert!(!view.summary_length.length.exceeded);
        assert_eq!(view.description_lengths[0].counter_text, "0/1000 characters");
        assert_eq!(view.preview, Preview::default());
        assert_eq!(view.theme, Theme::Dark);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut ctrl = FormController::new();
        set(&mut ctrl, IdentityField::Name, "Jane Doe");
        ctrl.dispatch(UserEvent::EntryAdded {
            kind: EntryKind::Education,
        })
        .unwrap();
        ctrl.dispatch(UserEvent::ResetRequested).unwrap();
        let once = ctrl.view();
        ctrl.dispatch(UserEvent::ResetRequested).unwrap();
        assert_eq!(ctrl.view(), once);
    }

    #[test]
    fn test_reset_after_removing_all_entries() {
        let mut ctrl = FormController::new();
        let id = ctrl.form().experience[0].id;
        ctrl.dispatch(UserEvent::EntryRemoved {
            entry: EntryRef {
                kind: EntryKind::Experience,
                id,
            },
        })
        .unwrap();
        assert!(ctrl.form().experience.is_empty());
        ctrl.dispatch(UserEvent::ResetRequested).unwrap();
        assert_eq!(ctrl.form().experience.len(), 1);
    }

    #[test]
    fn test_removing_entry_drops_it_from_next_preview() {
        let mut ctrl = FormController::new();
        set(&mut ctrl, IdentityField::Email, "jane@x.com");
        let id = ctrl.form().education[0].id;
        ctrl.dispatch(UserEvent::FieldChanged {
            field: FieldRef::Education {
                id,
                field: EducationField::Degree,
            },
            value: "BS".into(),
        })
        .unwrap();
        ctrl.dispatch(UserEvent::EntryRemoved {
            entry: EntryRef {
                kind: EntryKind::Education,
                id,
            },
        })
        .unwrap();
        ctrl.dispatch(UserEvent::Submitted).unwrap();
        assert!(ctrl.preview().education.is_empty());
        assert_eq!(ctrl.view().completion.total_count, 10);
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"type":"field_changed","field":{"section":"identity","field":"email"},"value":"a@b.co"}"#;
        let event: UserEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            UserEvent::FieldChanged {
                field: FieldRef::identity(IdentityField::Email),
                value: "a@b.co".into(),
            }
        );
        let submit: UserEvent = serde_json::from_str(r#"{"type":"submitted"}"#).unwrap();
        assert_eq!(submit, UserEvent::Submitted);
    }
}
