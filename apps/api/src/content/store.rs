//! Content Store: owns the single [`ResumeRecord`] being edited.
//!
//! Every edit runs against a copy of the current record. The copy replaces
//! the stored record only when the edit succeeds, so a failed edit never
//! leaves a half-applied change behind.

use tracing::debug;
use uuid::Uuid;

use crate::content::entries::{find_mut, remove_at, EditError, FieldValue};
use crate::content::sections::Section;
use crate::models::resume::ResumeRecord;

#[derive(Debug, Clone)]
pub struct ContentStore {
    current: ResumeRecord,
    seed: ResumeRecord,
}

impl ContentStore {
    pub fn new(seed: ResumeRecord) -> Self {
        Self {
            current: seed.clone(),
            seed,
        }
    }

    pub fn record(&self) -> &ResumeRecord {
        &self.current
    }

    /// Discards unpublished edits and goes back to the seed record.
    pub fn reset(&mut self) -> &ResumeRecord {
        self.current = self.seed.clone();
        &self.current
    }

    /// Applies `edit` to a copy of the record and swaps it in on success.
    pub fn apply<R>(
        &mut self,
        edit: impl FnOnce(&mut ResumeRecord) -> Result<R, EditError>,
    ) -> Result<R, EditError> {
        let mut next = self.current.clone();
        let out = edit(&mut next)?;
        self.current = next;
        Ok(out)
    }

    // ── Structured lists ────────────────────────────────────────────────────

    pub fn add_entry(&mut self, section: Section) -> Uuid {
        let mut next = self.current.clone();
        let id = section.add(&mut next);
        self.current = next;
        debug!("Added {section} entry {id}");
        id
    }

    pub fn set_entry_field(
        &mut self,
        section: Section,
        id: Uuid,
        field: &str,
        value: FieldValue,
    ) -> Result<(), EditError> {
        self.apply(|record| section.set_field(record, id, field, value))
    }

    /// Removes an entry. `confirmed` stands in for the destructive-action prompt.
    pub fn delete_entry(
        &mut self,
        section: Section,
        id: Uuid,
        confirmed: bool,
    ) -> Result<(), EditError> {
        if !confirmed {
            return Err(EditError::ConfirmationRequired);
        }
        self.apply(|record| section.remove(record, id))?;
        debug!("Deleted {section} entry {id}");
        Ok(())
    }

    // ── Basic information ───────────────────────────────────────────────────

    /// Sets `name`, `title`, `summary` or a `contact.<field>` path.
    pub fn set_basic_field(&mut self, path: &str, value: String) -> Result<(), EditError> {
        self.apply(|record| {
            let slot = match path {
                "name" => &mut record.name,
                "title" => &mut record.title,
                "summary" => &mut record.summary,
                "contact.email" => &mut record.contact.email,
                "contact.phone" => &mut record.contact.phone,
                "contact.location" => &mut record.contact.location,
                "contact.linkedin" => &mut record.contact.linkedin,
                "contact.website" => &mut record.contact.website,
                _ => {
                    return Err(EditError::UnknownField {
                        entity: "basic info",
                        field: path.to_string(),
                    })
                }
            };
            *slot = value;
            Ok(())
        })
    }

    // ── Plain string lists ──────────────────────────────────────────────────

    pub fn add_ability(&mut self, ability: &str) -> Result<(), EditError> {
        let ability = non_blank(ability, "core ability")?;
        self.apply(|record| {
            record.core_abilities.push(ability);
            Ok(())
        })
    }

    pub fn remove_ability(&mut self, index: usize) -> Result<String, EditError> {
        self.apply(|record| remove_at(&mut record.core_abilities, "core abilities", index))
    }

    pub fn add_language(&mut self, language: &str) -> Result<(), EditError> {
        let language = non_blank(language, "language")?;
        self.apply(|record| {
            record.languages.push(language);
            Ok(())
        })
    }

    pub fn remove_language(&mut self, index: usize) -> Result<String, EditError> {
        self.apply(|record| remove_at(&mut record.languages, "languages", index))
    }

    pub fn add_highlight(&mut self, experience_id: Uuid, text: &str) -> Result<(), EditError> {
        let text = non_blank(text, "highlight")?;
        self.apply(|record| {
            find_mut(&mut record.experience, experience_id)?
                .highlights
                .push(text);
            Ok(())
        })
    }

    pub fn replace_highlight(
        &mut self,
        experience_id: Uuid,
        index: usize,
        text: &str,
    ) -> Result<(), EditError> {
        let text = non_blank(text, "highlight")?;
        self.apply(|record| {
            let highlights = &mut find_mut(&mut record.experience, experience_id)?.highlights;
            let len = highlights.len();
            let slot = highlights
                .get_mut(index)
                .ok_or(EditError::IndexOutOfRange {
                    list: "highlights",
                    index,
                    len,
                })?;
            *slot = text;
            Ok(())
        })
    }

    pub fn remove_highlight(
        &mut self,
        experience_id: Uuid,
        index: usize,
    ) -> Result<String, EditError> {
        self.apply(|record| {
            let entry = find_mut(&mut record.experience, experience_id)?;
            remove_at(&mut entry.highlights, "highlights", index)
        })
    }

    pub fn add_skill(&mut self, category_id: Uuid, skill: &str) -> Result<(), EditError> {
        let skill = non_blank(skill, "skill")?;
        self.apply(|record| {
            find_mut(&mut record.technical_skills, category_id)?
                .skills
                .push(skill);
            Ok(())
        })
    }

    pub fn remove_skill(&mut self, category_id: Uuid, index: usize) -> Result<String, EditError> {
        self.apply(|record| {
            let category = find_mut(&mut record.technical_skills, category_id)?;
            remove_at(&mut category.skills, "skills", index)
        })
    }
}

fn non_blank(value: &str, what: &'static str) -> Result<String, EditError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EditError::BlankValue(what));
    }
    Ok(trimmed.to_string())
}
