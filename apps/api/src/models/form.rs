use serde::{Deserialize, Serialize};

/// Stable identifier of a repeated entry. Allocated per form, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Education,
    Experience,
}

/// Points at one repeated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRef {
    pub kind: EntryKind,
    pub id: EntryId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    /// Comma-separated, split only when the preview is rendered.
    pub skills: String,
}

impl Identity {
    pub fn fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.address.as_str(),
            self.summary.as_str(),
            self.skills.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: EntryId,
    pub degree: String,
    pub institution: String,
    pub year_range: String,
}

impl EducationEntry {
    pub fn empty(id: EntryId) -> Self {
        Self {
            id,
            degree: String::new(),
            institution: String::new(),
            year_range: String::new(),
        }
    }

    pub fn fields(&self) -> [&str; 3] {
        [
            self.degree.as_str(),
            self.institution.as_str(),
            self.year_range.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub job_title: String,
    pub company: String,
    pub year_range: String,
    pub description: String,
}

impl ExperienceEntry {
    pub fn empty(id: EntryId) -> Self {
        Self {
            id,
            job_title: String::new(),
            company: String::new(),
            year_range: String::new(),
            description: String::new(),
        }
    }

    pub fn fields(&self) -> [&str; 4] {
        [
            self.job_title.as_str(),
            self.company.as_str(),
            self.year_range.as_str(),
            self.description.as_str(),
        ]
    }
}

/// Everything the user has typed into the form at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub identity: Identity,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    next_entry_id: u64,
}

impl Default for FormState {
    /// A fresh form starts with one empty entry in each repeated section.
    fn default() -> Self {
        let mut form = Self {
            identity: Identity::default(),
            education: Vec::new(),
            experience: Vec::new(),
            next_entry_id: 0,
        };
        let edu = form.allocate_id();
        form.education.push(EducationEntry::empty(edu));
        let exp = form.allocate_id();
        form.experience.push(ExperienceEntry::empty(exp));
        form
    }
}

impl FormState {
    pub fn allocate_id(&mut self) -> EntryId {
        let id = EntryId(self.next_entry_id);
        self.next_entry_id += 1;
        id
    }

    pub fn education_mut(&mut self, id: EntryId) -> Option<&mut EducationEntry> {
        self.education.iter_mut().find(|e| e.id == id)
    }

    pub fn experience_mut(&mut self, id: EntryId) -> Option<&mut ExperienceEntry> {
        self.experience.iter_mut().find(|e| e.id == id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field addressing
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    Name,
    Email,
    Phone,
    Address,
    Summary,
    Skills,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationField {
    Degree,
    Institution,
    YearRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceField {
    JobTitle,
    Company,
    YearRange,
    Description,
}

/// Address of a single editable field anywhere in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum FieldRef {
    Identity { field: IdentityField },
    Education { id: EntryId, field: EducationField },
    Experience { id: EntryId, field: ExperienceField },
}

#[cfg(test)]
impl FieldRef {
    pub fn identity(field: IdentityField) -> Self {
        FieldRef::Identity { field }
    }
}

impl FormState {
    /// Returns the slot backing `field`, or `None` when its entry is gone.
    pub fn field_mut(&mut self, field: FieldRef) -> Option<&mut String> {
        match field {
            FieldRef::Identity { field } => {
                let identity = &mut self.identity;
                Some(match field {
                    IdentityField::Name => &mut identity.name,
                    IdentityField::Email => &mut identity.email,
                    IdentityField::Phone => &mut identity.phone,
                    IdentityField::Address => &mut identity.address,
                    IdentityField::Summary => &mut identity.summary,
                    IdentityField::Skills => &mut identity.skills,
                })
            }
            FieldRef::Education { id, field } => {
                let entry = self.education_mut(id)?;
                Some(match field {
                    EducationField::Degree => &mut entry.degree,
                    EducationField::Institution => &mut entry.institution,
                    EducationField::YearRange => &mut entry.year_range,
                })
            }
            FieldRef::Experience { id, field } => {
                let entry = self.experience_mut(id)?;
                Some(match field {
                    ExperienceField::JobTitle => &mut entry.job_title,
                    ExperienceField::Company => &mut entry.company,
                    ExperienceField::YearRange => &mut entry.year_range,
                    ExperienceField::Description => &mut entry.description,
                })
            }
        }
    }
}
