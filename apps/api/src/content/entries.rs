//! Per-entity field editors.
//!
//! Every structured list entry implements [`ListEntry`], which gives the
//! generic add / edit-field / delete helpers below everything they need:
//! a stable id, a placeholder for new entries, and a by-name field setter.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProjectEntry, SkillCategory,
};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("Field '{field}' expects {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("No {entity} entry with id {id}")]
    EntryNotFound { entity: &'static str, id: Uuid },

    #[error("Index {index} is out of range for {list} (length {len})")]
    IndexOutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Deleting an entry requires confirmation")]
    ConfirmationRequired,

    #[error("Value for {0} cannot be blank")]
    BlankValue(&'static str),
}

/// A value submitted by a field editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Null,
}

impl FieldValue {
    pub fn into_text(self, field: &str) -> Result<String, EditError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            _ => Err(wrong_type(field, "a string")),
        }
    }

    pub fn into_flag(self, field: &str) -> Result<bool, EditError> {
        match self {
            FieldValue::Flag(flag) => Ok(flag),
            _ => Err(wrong_type(field, "a boolean")),
        }
    }

    pub fn into_list(self, field: &str) -> Result<Vec<String>, EditError> {
        match self {
            FieldValue::List(items) => Ok(items),
            _ => Err(wrong_type(field, "a list of strings")),
        }
    }

    /// `null` and the empty string both clear an optional field.
    pub fn into_optional_text(self, field: &str) -> Result<Option<String>, EditError> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Text(text) if text.is_empty() => Ok(None),
            FieldValue::Text(text) => Ok(Some(text)),
            _ => Err(wrong_type(field, "a string or null")),
        }
    }
}

fn wrong_type(field: &str, expected: &'static str) -> EditError {
    EditError::WrongType {
        field: field.to_string(),
        expected,
    }
}

fn unknown_field(entity: &'static str, field: &str) -> EditError {
    EditError::UnknownField {
        entity,
        field: field.to_string(),
    }
}

pub trait ListEntry: Clone {
    /// Human-readable entity name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// The default-valued entry appended by add-entry.
    fn placeholder() -> Self;

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError>;
}

impl ListEntry for ExperienceEntry {
    const KIND: &'static str = "experience";

    fn id(&self) -> Uuid {
        self.id
    }

    fn placeholder() -> Self {
        ExperienceEntry {
            id: Uuid::new_v4(),
            title: "New Role".to_string(),
            company: "Company Name".to_string(),
            period: "Present".to_string(),
            location: "Location".to_string(),
            description: "Job description...".to_string(),
            highlights: Vec::new(),
            featured: false,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "title" => self.title = value.into_text(field)?,
            "company" => self.company = value.into_text(field)?,
            "period" => self.period = value.into_text(field)?,
            "location" => self.location = value.into_text(field)?,
            "description" => self.description = value.into_text(field)?,
            "highlights" => self.highlights = value.into_list(field)?,
            "highlighted" | "featured" => self.featured = value.into_flag(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}

impl ListEntry for EducationEntry {
    const KIND: &'static str = "education";

    fn id(&self) -> Uuid {
        self.id
    }

    fn placeholder() -> Self {
        EducationEntry {
            id: Uuid::new_v4(),
            degree: "Degree".to_string(),
            major: "Major".to_string(),
            institution: "Institution".to_string(),
            year: "Year".to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "degree" => self.degree = value.into_text(field)?,
            "major" => self.major = value.into_text(field)?,
            "institution" => self.institution = value.into_text(field)?,
            "year" => self.year = value.into_text(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}

impl ListEntry for CertificationEntry {
    const KIND: &'static str = "certification";

    fn id(&self) -> Uuid {
        self.id
    }

    fn placeholder() -> Self {
        CertificationEntry {
            id: Uuid::new_v4(),
            name: "New Certification".to_string(),
            code: "CODE-123".to_string(),
            issuer: "Issuer".to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "name" => self.name = value.into_text(field)?,
            "code" => self.code = value.into_text(field)?,
            "issuer" => self.issuer = value.into_text(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}

impl ListEntry for ProjectEntry {
    const KIND: &'static str = "project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn placeholder() -> Self {
        ProjectEntry {
            id: Uuid::new_v4(),
            title: "New Project".to_string(),
            description: "Project description...".to_string(),
            kind: "Personal".to_string(),
            details: None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "title" => self.title = value.into_text(field)?,
            "description" => self.description = value.into_text(field)?,
            "type" => self.kind = value.into_text(field)?,
            "details" => self.details = value.into_optional_text(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}

impl ListEntry for SkillCategory {
    const KIND: &'static str = "skill category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn placeholder() -> Self {
        SkillCategory {
            id: Uuid::new_v4(),
            category: "New Category".to_string(),
            skills: Vec::new(),
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        match field {
            "category" => self.category = value.into_text(field)?,
            "skills" => self.skills = value.into_list(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}

/// Appends a placeholder entry and returns its id.
pub fn append_placeholder<T: ListEntry>(list: &mut Vec<T>) -> Uuid {
    let entry = T::placeholder();
    let id = entry.id();
    list.push(entry);
    id
}

pub fn find_mut<T: ListEntry>(list: &mut [T], id: Uuid) -> Result<&mut T, EditError> {
    list.iter_mut()
        .find(|entry| entry.id() == id)
        .ok_or(EditError::EntryNotFound {
            entity: T::KIND,
            id,
        })
}

pub fn update_field<T: ListEntry>(
    list: &mut [T],
    id: Uuid,
    field: &str,
    value: FieldValue,
) -> Result<(), EditError> {
    find_mut(list, id)?.set_field(field, value)
}

/// Removes the entry with `id`; entries after it shift down one position.
pub fn remove_by_id<T: ListEntry>(list: &mut Vec<T>, id: Uuid) -> Result<T, EditError> {
    let position = list
        .iter()
        .position(|entry| entry.id() == id)
        .ok_or(EditError::EntryNotFound {
            entity: T::KIND,
            id,
        })?;
    Ok(list.remove(position))
}

/// Removes a plain string by index from a value list.
pub fn remove_at(
    list: &mut Vec<String>,
    name: &'static str,
    index: usize,
) -> Result<String, EditError> {
    if index >= list.len() {
        return Err(EditError::IndexOutOfRange {
            list: name,
            index,
            len: list.len(),
        });
    }
    Ok(list.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_untagged_forms() {
        let text: FieldValue = serde_json::from_str("\"Acme\"").unwrap();
        let flag: FieldValue = serde_json::from_str("true").unwrap();
        let list: FieldValue = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        let null: FieldValue = serde_json::from_str("null").unwrap();
        assert_eq!(text, FieldValue::Text("Acme".to_string()));
        assert_eq!(flag, FieldValue::Flag(true));
        assert_eq!(
            list,
            FieldValue::List(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(null, FieldValue::Null);
    }

    #[test]
    fn test_certification_placeholder_values() {
        let cert = CertificationEntry::placeholder();
        assert_eq!(cert.name, "New Certification");
        assert_eq!(cert.code, "CODE-123");
        assert_eq!(cert.issuer, "Issuer");
    }

    #[test]
    fn test_set_unknown_field_is_rejected() {
        let mut edu = EducationEntry::placeholder();
        let err = edu
            .set_field("gpa", FieldValue::Text("4.0".to_string()))
            .unwrap_err();
        assert!(matches!(err, EditError::UnknownField { field, .. } if field == "gpa"));
    }

    #[test]
    fn test_set_field_wrong_type_is_rejected() {
        let mut exp = ExperienceEntry::placeholder();
        let err = exp
            .set_field("highlighted", FieldValue::Text("yes".to_string()))
            .unwrap_err();
        assert!(matches!(err, EditError::WrongType { expected: "a boolean", .. }));
        assert!(!exp.featured);
    }

    #[test]
    fn test_project_details_cleared_by_null_or_empty() {
        let mut project = ProjectEntry::placeholder();
        project
            .set_field("details", FieldValue::Text("Rust + Axum".to_string()))
            .unwrap();
        assert_eq!(project.details.as_deref(), Some("Rust + Axum"));
        project.set_field("details", FieldValue::Null).unwrap();
        assert!(project.details.is_none());
        project
            .set_field("details", FieldValue::Text(String::new()))
            .unwrap();
        assert!(project.details.is_none());
    }

    #[test]
    fn test_remove_by_id_shifts_following_entries() {
        let mut list: Vec<EducationEntry> = (0..3).map(|_| EducationEntry::placeholder()).collect();
        let ids: Vec<Uuid> = list.iter().map(|e| e.id).collect();
        let removed = remove_by_id(&mut list, ids[1]).unwrap();
        assert_eq!(removed.id, ids[1]);
        assert_eq!(list.iter().map(|e| e.id).collect::<Vec<_>>(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn test_remove_by_unknown_id_leaves_list() {
        let mut list = vec![SkillCategory::placeholder()];
        let err = remove_by_id(&mut list, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, EditError::EntryNotFound { entity: "skill category", .. }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut list = vec!["Leadership".to_string()];
        let err = remove_at(&mut list, "core abilities", 3).unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                list: "core abilities",
                index: 3,
                len: 1
            }
        );
    }
}
