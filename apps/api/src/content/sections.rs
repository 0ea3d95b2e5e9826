use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::entries::{
    append_placeholder, remove_by_id, update_field, EditError, FieldValue,
};
use crate::models::resume::{Projects, ResumeRecord};

/// The structured lists of a [`ResumeRecord`] that support add / edit-field / delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Skills,
    Experience,
    Education,
    CertificationsCompleted,
    CertificationsStudying,
    ProjectsCurrent,
    ProjectsCompleted,
}

/// Binds `$list` to the mutable list behind `$section` and evaluates `$body`.
/// Touching a projects list materializes the optional `projects` aggregate.
macro_rules! with_list {
    ($section:expr, $record:expr, $list:ident => $body:expr) => {
        match $section {
            Section::Skills => {
                let $list = &mut $record.technical_skills;
                $body
            }
            Section::Experience => {
                let $list = &mut $record.experience;
                $body
            }
            Section::Education => {
                let $list = &mut $record.education;
                $body
            }
            Section::CertificationsCompleted => {
                let $list = &mut $record.certifications.completed;
                $body
            }
            Section::CertificationsStudying => {
                let $list = &mut $record.certifications.studying;
                $body
            }
            Section::ProjectsCurrent => {
                let $list = &mut $record.projects.get_or_insert_with(Projects::default).current;
                $body
            }
            Section::ProjectsCompleted => {
                let $list = &mut $record
                    .projects
                    .get_or_insert_with(Projects::default)
                    .completed;
                $body
            }
        }
    };
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::CertificationsCompleted => "certifications-completed",
            Section::CertificationsStudying => "certifications-studying",
            Section::ProjectsCurrent => "projects-current",
            Section::ProjectsCompleted => "projects-completed",
        }
    }

    pub(crate) fn add(self, record: &mut ResumeRecord) -> Uuid {
        with_list!(self, record, list => append_placeholder(list))
    }

    pub(crate) fn set_field(
        self,
        record: &mut ResumeRecord,
        id: Uuid,
        field: &str,
        value: FieldValue,
    ) -> Result<(), EditError> {
        with_list!(self, record, list => update_field(list, id, field, value))
    }

    pub(crate) fn remove(self, record: &mut ResumeRecord, id: Uuid) -> Result<(), EditError> {
        with_list!(self, record, list => remove_by_id(list, id).map(|_| ()))
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
