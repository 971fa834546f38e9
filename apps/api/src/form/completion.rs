use serde::{Deserialize, Serialize};

use crate::models::form::FormState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSection {
    Identity,
    Education,
    Experience,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCompletion {
    pub section: FormSection,
    pub entry_count: usize,
    pub filled_count: usize,
    pub total_count: usize,
}

/// How much of the form currently present has been filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMetric {
    pub filled_count: usize,
    pub total_count: usize,
    /// 0 – 100, rounded half up.
    pub percentage: u8,
    pub sections: Vec<SectionCompletion>,
}

impl CompletionMetric {
    pub fn progress_text(&self) -> String {
        format!("{}%", self.percentage)
    }
}

/// Counts every field currently on the form: six identity fields, three per
/// education entry and four per experience entry. A field is filled when its
/// trimmed value is non-empty.
pub fn compute_completion(form: &FormState) -> CompletionMetric {
    let identity = tally(
        FormSection::Identity,
        1,
        std::iter::once(form.identity.fields().to_vec()),
    );
    let education = tally(
        FormSection::Education,
        form.education.len(),
        form.education.iter().map(|e| e.fields().to_vec()),
    );
    let experience = tally(
        FormSection::Experience,
        form.experience.len(),
        form.experience.iter().map(|e| e.fields().to_vec()),
    );

    let sections = vec![identity, education, experience];
    let filled_count: usize = sections.iter().map(|s| s.filled_count).sum();
    let total_count: usize = sections.iter().map(|s| s.total_count).sum();

    CompletionMetric {
        filled_count,
        total_count,
        percentage: percentage(filled_count, total_count),
        sections,
    }
}

fn tally<'a>(
    section: FormSection,
    entry_count: usize,
    groups: impl Iterator<Item = Vec<&'a str>>,
) -> SectionCompletion {
    let mut filled_count = 0;
    let mut total_count = 0;
    for fields in groups {
        total_count += fields.len();
        filled_count += fields.iter().filter(|v| !v.trim().is_empty()).count();
    }
    SectionCompletion {
        section,
        entry_count,
        filled_count,
        total_count,
    }
}

fn percentage(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // Integer form of round(filled / total * 100) with halves rounding up.
    ((filled * 200 + total) / (total * 2)).min(100) as u8
}
