use serde::{Deserialize, Serialize};

use crate::models::resume::{CertificationEntry, ProjectEntry, ResumeRecord};

/// One blank required field, located by a human-readable path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordIssue {
    pub location: String,
    pub field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordValidationResult {
    pub passed: bool,
    pub issues: Vec<RecordIssue>,
}

impl RecordValidationResult {
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(|i| format!("{}.{}", i.location, i.field))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Checks that every required string field is non-blank.
///
/// Publishing overwrites the site's data file wholesale, so a record that
/// fails this check is not committed.
pub fn validate_record(record: &ResumeRecord) -> RecordValidationResult {
    let mut issues = Vec::new();
    let mut require = |location: String, field: &str, value: &str| {
        if value.trim().is_empty() {
            issues.push(RecordIssue {
                location,
                field: field.to_string(),
            });
        }
    };

    require("basic".to_string(), "name", &record.name);
    require("basic".to_string(), "title", &record.title);

    for (i, cat) in record.technical_skills.iter().enumerate() {
        require(format!("skills[{i}]"), "category", &cat.category);
    }

    for (i, exp) in record.experience.iter().enumerate() {
        let loc = format!("experience[{i}]");
        require(loc.clone(), "title", &exp.title);
        require(loc.clone(), "company", &exp.company);
        require(loc.clone(), "period", &exp.period);
        require(loc.clone(), "location", &exp.location);
        require(loc, "description", &exp.description);
    }

    for (i, edu) in record.education.iter().enumerate() {
        let loc = format!("education[{i}]");
        require(loc.clone(), "degree", &edu.degree);
        require(loc.clone(), "major", &edu.major);
        require(loc.clone(), "institution", &edu.institution);
        require(loc, "year", &edu.year);
    }

    let certs = [
        ("certifications.completed", &record.certifications.completed),
        ("certifications.studying", &record.certifications.studying),
    ];
    for (list, entries) in certs {
        for (i, cert) in entries.iter().enumerate() {
            check_certification(&mut require, format!("{list}[{i}]"), cert);
        }
    }

    if let Some(projects) = &record.projects {
        let lists = [
            ("projects.current", &projects.current),
            ("projects.completed", &projects.completed),
        ];
        for (list, entries) in lists {
            for (i, project) in entries.iter().enumerate() {
                check_project(&mut require, format!("{list}[{i}]"), project);
            }
        }
    }

    RecordValidationResult {
        passed: issues.is_empty(),
        issues,
    }
}

fn check_certification(
    require: &mut impl FnMut(String, &str, &str),
    loc: String,
    cert: &CertificationEntry,
) {
    require(loc.clone(), "name", &cert.name);
    require(loc.clone(), "code", &cert.code);
    require(loc, "issuer", &cert.issuer);
}

fn check_project(require: &mut impl FnMut(String, &str, &str), loc: String, p: &ProjectEntry) {
    require(loc.clone(), "title", &p.title);
    require(loc.clone(), "description", &p.description);
    require(loc, "type", &p.kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::seed::bundled_record;

    #[test]
    fn test_bundled_record_passes() {
        let result = validate_record(&bundled_record().unwrap());
        assert!(result.passed, "unexpected issues: {}", result.summary());
    }

    #[test]
    fn test_blank_fields_are_reported_with_location() {
        let mut record = bundled_record().unwrap();
        record.title = "   ".to_string();
        record.education[0].year = String::new();

        let result = validate_record(&record);

        assert!(!result.passed);
        assert_eq!(
            result.issues,
            vec![
                RecordIssue {
                    location: "basic".to_string(),
                    field: "title".to_string()
                },
                RecordIssue {
                    location: "education[0]".to_string(),
                    field: "year".to_string()
                },
            ]
        );
        assert_eq!(result.summary(), "basic.title, education[0].year");
    }

    #[test]
    fn test_optional_project_details_not_required() {
        let mut record = bundled_record().unwrap();
        if let Some(projects) = record.projects.as_mut() {
            for p in projects.current.iter_mut() {
                p.details = None;
            }
        }
        assert!(validate_record(&record).passed);
    }
}
