use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Stored user document (`users` collection).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub full_name: String,
    pub email: String,
    /// bcrypt hash, never the plaintext.
    pub password: String,
    #[serde(default)]
    pub courses: Vec<String>,
    pub created_at: BsonDateTime,
}

impl User {
    pub fn new(full_name: String, email: String, password_hash: String) -> Self {
        Self {
            id: ObjectId::new(),
            full_name,
            email,
            password: password_hash,
            courses: Vec::new(),
            created_at: BsonDateTime::now(),
        }
    }

    pub fn user_id(&self) -> String {
        self.id.to_hex()
    }

    pub fn has_course(&self, course: &str) -> bool {
        self.courses.iter().any(|c| c == course)
    }

    /// Appends unless already present. Returns false on a duplicate.
    pub fn add_course(&mut self, course: &str) -> bool {
        if self.has_course(course) {
            return false;
        }
        self.courses.push(course.to_string());
        true
    }

    /// Drops every exact match.
    pub fn remove_course(&mut self, course: &str) {
        self.courses.retain(|c| c != course);
    }

    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            id: self.user_id(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            courses: self.courses.clone(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user: self.public_view(),
            created_at: self
                .created_at
                .try_to_rfc3339_string()
                .unwrap_or_default(),
        }
    }
}

/// User without the password hash.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub courses: Vec<String>,
}

/// Dashboard payload: the public view plus the creation timestamp.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new("Alice".into(), "a@x.com".into(), "$2b$04$hash".into())
    }

    #[test]
    fn add_course_rejects_duplicates() {
        let mut user = sample();
        assert!(user.add_course("Math"));
        assert!(!user.add_course("Math"));
        assert_eq!(user.courses, vec!["Math"]);
    }

    #[test]
    fn remove_course_is_exact_match_and_idempotent() {
        let mut user = sample();
        user.add_course("Math");
        user.add_course("math");
        user.remove_course("History");
        assert_eq!(user.courses, vec!["Math", "math"]);
        user.remove_course("Math");
        assert_eq!(user.courses, vec!["math"]);
    }

    #[test]
    fn public_view_omits_password() {
        let json = serde_json::to_value(sample().profile()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["fullName"], "Alice");
        assert_eq!(json["courses"], serde_json::json!([]));
        assert!(json["createdAt"].as_str().is_some());
    }

    #[test]
    fn document_uses_camel_case_fields() {
        let doc = mongodb::bson::to_document(&sample()).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(doc.contains_key("fullName"));
        assert!(doc.contains_key("createdAt"));
    }
}
