use serde::{Deserialize, Deserializer, Serialize};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    PATCH,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
        }
    }
}

/// The API hands out numeric ids; they are kept as strings on the client.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(u64),
        Str(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Num(n) => n.to_string(),
        Id::Str(s) => s,
    })
}

/// Signed-in user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Stored avatar reference (file name on the server), not a URL
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Exercise as returned by `/exercises/...`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub group: String,
    pub series: u32,
    pub repetitions: u32,
    /// Demo media reference
    pub demo: String,
    #[serde(default)]
    pub thumb: String,
}

/// One completed exercise in the history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub hour: String,
    #[serde(default)]
    pub created_at: String,
}

/// History section: all entries logged on the same day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryDay {
    pub title: String,
    pub data: Vec<HistoryEntry>,
}

/// Response of `POST /sessions`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

// Request payloads

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `PUT /users` body. Unchanged password fields are left out entirely.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterHistoryRequest {
    pub exercise_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_accepts_numeric_id() {
        let json = r#"{"id":7,"name":"Puxada frontal","group":"costas","series":3,"repetitions":12,"demo":"puxada.gif","thumb":"puxada.png"}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.id, "7");
        assert_eq!(exercise.series, 3);
    }

    #[test]
    fn test_user_without_avatar() {
        let json = r#"{"id":"u1","name":"Ana","email":"ana@gym.com"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.avatar, None);
        assert_eq!(user.role, None);
    }

    #[test]
    fn test_update_profile_omits_unchanged_passwords() {
        let body = UpdateProfileRequest {
            name: "Ana".to_string(),
            old_password: None,
            password: None,
            confirm_password: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Ana" }));
    }
}
