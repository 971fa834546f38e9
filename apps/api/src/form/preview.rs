//! Preview renderer — turns the whole form into the read-only document shown
//! beside it. Rebuilt from scratch on every accepted submission.

use serde::{Deserialize, Serialize};

use crate::models::form::{EducationEntry, ExperienceEntry, FormState};

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const CONTACT_PLACEHOLDER: &str = "Email | Phone | Address";
pub const SUMMARY_PLACEHOLDER: &str = "Your professional summary will appear here.";
const JOB_TITLE_PLACEHOLDER: &str = "Job Title";
const COMPANY_PLACEHOLDER: &str = "Company";
const YEARS_PLACEHOLDER: &str = "Years";
const DESCRIPTION_PLACEHOLDER: &str = "Description";

/// One experience line: bold title, "company, years", then the description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub name: String,
    pub contact: String,
    pub summary: String,
    pub education: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub skills: Vec<String>,
}

impl Default for Preview {
    /// The placeholder document shown before the first submission.
    fn default() -> Self {
        Self {
            name: NAME_PLACEHOLDER.to_string(),
            contact: CONTACT_PLACEHOLDER.to_string(),
            summary: SUMMARY_PLACEHOLDER.to_string(),
            education: Vec::new(),
            experience: Vec::new(),
            skills: Vec::new(),
        }
    }
}

pub fn render_preview(form: &FormState) -> Preview {
    let identity = &form.identity;

    let contact = join_present(
        [
            identity.email.as_str(),
            identity.phone.as_str(),
            identity.address.as_str(),
        ],
        " | ",
    );

    Preview {
        name: or_placeholder(&identity.name, NAME_PLACEHOLDER),
        contact: if contact.is_empty() {
            CONTACT_PLACEHOLDER.to_string()
        } else {
            contact
        },
        summary: or_placeholder(&identity.summary, SUMMARY_PLACEHOLDER),
        education: form.education.iter().filter_map(education_item).collect(),
        experience: form.experience.iter().filter_map(experience_item).collect(),
        skills: split_skills(&identity.skills),
    }
}

fn education_item(entry: &EducationEntry) -> Option<String> {
    let line = join_present(entry.fields(), ", ");
    (!line.is_empty()).then_some(line)
}

fn experience_item(entry: &ExperienceEntry) -> Option<ExperienceItem> {
    if entry.fields().iter().all(|f| f.is_empty()) {
        return None;
    }
    Some(ExperienceItem {
        title: or_placeholder(&entry.job_title, JOB_TITLE_PLACEHOLDER),
        subtitle: format!(
            "{}, {}",
            or_placeholder(&entry.company, COMPANY_PLACEHOLDER),
            or_placeholder(&entry.year_range, YEARS_PLACEHOLDER)
        ),
        description: or_placeholder(&entry.description, DESCRIPTION_PLACEHOLDER),
    })
}

/// Splits on commas and trims each piece. Blank pieces such as the gap in
/// "Go, , Rust" stay in the list as empty items.
fn split_skills(skills: &str) -> Vec<String> {
    if skills.is_empty() {
        return Vec::new();
    }
    skills.split(',').map(|s| s.trim().to_string()).collect()
}

fn join_present<'a>(values: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Renders a preview as a standalone markdown document.
pub fn render_preview_to_md(preview: &Preview) -> String {
    let mut md = format!("# {}\n\n{}\n\n", preview.name, preview.contact);
    md.push_str(&format!("## Summary\n\n{}\n\n", preview.summary));

    if !preview.education.is_empty() {
        md.push_str("## Education\n\n");
        for item in &preview.education {
            md.push_str(&format!("- {item}\n"));
        }
        md.push('\n');
    }

    if !preview.experience.is_empty() {
        md.push_str("## Experience\n\n");
        for item in &preview.experience {
            md.push_str(&format!("### {}\n", item.title));
            md.push_str(&format!("*{}*\n\n", item.subtitle));
            md.push_str(&format!("{}\n\n", item.description));
        }
    }

    if !preview.skills.is_empty() {
        md.push_str("## Skills\n\n");
        for skill in &preview.skills {
            md.push_str(&format!("- {skill}\n"));
        }
        md.push('\n');
    }
    md
}
