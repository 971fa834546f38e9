//! Repeated sections: education and experience entries that the user can add
//! and remove freely.

use tracing::debug;

use crate::models::form::{EducationEntry, EntryId, EntryKind, EntryRef, ExperienceEntry, FormState};

/// Appends an empty entry and returns its id.
pub fn add_entry(form: &mut FormState, kind: EntryKind) -> EntryId {
    let id = form.allocate_id();
    match kind {
        EntryKind::Education => form.education.push(EducationEntry::empty(id)),
        EntryKind::Experience => form.experience.push(ExperienceEntry::empty(id)),
    }
    debug!("Added {kind:?} entry {id}");
    id
}

/// Removes the referenced entry. Removing the last entry of a section is
/// allowed. Returns `false` when no such entry exists.
pub fn remove_entry(form: &mut FormState, entry: EntryRef) -> bool {
    let before = section_len(form, entry.kind);
    match entry.kind {
        EntryKind::Education => form.education.retain(|e| e.id != entry.id),
        EntryKind::Experience => form.experience.retain(|e| e.id != entry.id),
    }
    let removed = section_len(form, entry.kind) < before;
    if removed {
        debug!("Removed {:?} entry {}", entry.kind, entry.id);
    } else {
        debug!("Ignored removal of unknown {:?} entry {}", entry.kind, entry.id);
    }
    removed
}

/// Keeps only the first entry of each section, leaving its values as they
/// are. An emptied section gets one fresh entry back.
pub fn truncate_to_first(form: &mut FormState) {
    form.education.truncate(1);
    form.experience.truncate(1);
    if form.education.is_empty() {
        add_entry(form, EntryKind::Education);
    }
    if form.experience.is_empty() {
        add_entry(form, EntryKind::Experience);
    }
}

fn section_len(form: &FormState, kind: EntryKind) -> usize {
    match kind {
        EntryKind::Education => form.education.len(),
        EntryKind::Experience => form.experience.len(),
    }
}
