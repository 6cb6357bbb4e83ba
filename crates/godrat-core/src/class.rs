//! The class record shape shared by the router and the record store.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Columns projected by every class query, in store naming.
pub const CLASS_COLUMNS: &[&str] = &["id", "name", "master", "link", "semester", "is_primary"];

/// A registered class (course group).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: Uuid,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(rename = "master", default, deserialize_with = "nullable_string")]
    pub instructor: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub link: String,
    #[serde(default, deserialize_with = "semester_text")]
    pub semester: String,
    #[serde(default, deserialize_with = "nullable_bool")]
    pub is_primary: bool,
}

/// Validated user input for a new class, before an id is assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewClass {
    pub name: String,
    pub instructor: String,
    pub link: String,
    pub semester: String,
    pub is_primary: bool,
}

impl ClassRecord {
    /// Assign a fresh random id to validated input.
    pub fn create(new: NewClass) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            instructor: new.instructor,
            link: new.link,
            semester: new.semester,
            is_primary: new.is_primary,
        }
    }
}

fn nullable_string<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

fn nullable_bool<'de, D>(de: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(de)?.unwrap_or_default())
}

/// Seeded rows may carry the semester as a JSON number.
fn semester_text<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Raw>::deserialize(de)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Int(n)) => n.to_string(),
        Some(Raw::Float(f)) => f.to_string(),
        None => String::new(),
    })
}
