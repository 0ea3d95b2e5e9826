use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// The single structured aggregate holding all editable résumé content.
///
/// Field names serialize in camelCase so the committed data module matches
/// what the site's view templates import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub name: String,
    pub title: String,
    pub contact: Contact,
    pub summary: String,
    #[serde(default)]
    pub technical_skills: Vec<SkillCategory>,
    #[serde(default)]
    pub core_abilities: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "certifications_any_shape")]
    pub certifications: Certifications,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Projects>,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillCategory {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub category: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub period: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Featured role flag. Serialized as `highlighted` for the site.
    #[serde(rename = "highlighted", default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub degree: String,
    pub major: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CertificationEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub issuer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Certifications {
    #[serde(default)]
    pub completed: Vec<CertificationEntry>,
    #[serde(default)]
    pub studying: Vec<CertificationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Projects {
    #[serde(default)]
    pub current: Vec<ProjectEntry>,
    #[serde(default)]
    pub completed: Vec<ProjectEntry>,
}

/// Older data files stored certifications as a bare array of completed ones.
#[derive(Deserialize)]
#[serde(untagged)]
enum CertificationsShape {
    Legacy(Vec<CertificationEntry>),
    Split(Certifications),
}

fn certifications_any_shape<'de, D>(deserializer: D) -> Result<Certifications, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CertificationsShape::deserialize(deserializer)? {
        CertificationsShape::Legacy(completed) => Certifications {
            completed,
            studying: Vec::new(),
        },
        CertificationsShape::Split(certs) => certs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> serde_json::Value {
        json!({
            "name": "Ana Souza",
            "title": "Cloud Engineer",
            "contact": {
                "email": "ana@example.com",
                "phone": "+55 11 0000-0000",
                "location": "São Paulo",
                "linkedin": "linkedin.com/in/ana",
                "website": "ana.dev"
            },
            "summary": "Builds things."
        })
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let record: ResumeRecord = serde_json::from_value(minimal()).unwrap();
        assert!(record.experience.is_empty());
        assert!(record.certifications.completed.is_empty());
        assert!(record.projects.is_none());
        assert!(record.languages.is_empty());
    }

    #[test]
    fn test_legacy_certification_array_reads_as_completed() {
        let mut value = minimal();
        value["certifications"] = json!([
            { "name": "Solutions Architect", "code": "AWS-SAA", "issuer": "AWS" }
        ]);
        let record: ResumeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.certifications.completed.len(), 1);
        assert_eq!(record.certifications.completed[0].code, "AWS-SAA");
        assert!(record.certifications.studying.is_empty());
    }

    #[test]
    fn test_entries_without_ids_get_distinct_ids() {
        let mut value = minimal();
        value["education"] = json!([
            { "degree": "BSc", "major": "CS", "institution": "USP", "year": "2015" },
            { "degree": "MSc", "major": "CS", "institution": "USP", "year": "2018" }
        ]);
        let record: ResumeRecord = serde_json::from_value(value).unwrap();
        assert_ne!(record.education[0].id, record.education[1].id);
    }

    #[test]
    fn test_featured_flag_uses_site_key() {
        let entry = ExperienceEntry {
            id: Uuid::new_v4(),
            title: "SRE".to_string(),
            company: "Acme".to_string(),
            period: "2020 - Present".to_string(),
            location: "Remote".to_string(),
            description: "On call.".to_string(),
            highlights: vec![],
            featured: true,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["highlighted"], json!(true));
        assert!(value.get("featured").is_none());
    }

    #[test]
    fn test_project_kind_serializes_as_type() {
        let project = ProjectEntry {
            id: Uuid::new_v4(),
            title: "Homelab".to_string(),
            description: "k3s cluster".to_string(),
            kind: "Personal".to_string(),
            details: None,
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], json!("Personal"));
        assert!(value.get("details").is_none());
    }
}
