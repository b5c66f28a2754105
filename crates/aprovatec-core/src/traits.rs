//! Core trait definitions for the persistence backend.
//!
//! These async traits are implemented by the `aprovatec-client` crate, both
//! over HTTP and in memory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{SemesterPayload, StoredSemester, User};

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Account operations of the backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a bearer token and the account it belongs to.
    async fn login(&self, request: &LoginRequest) -> anyhow::Result<LoginResponse>;

    /// Create an account. Returns the backend's confirmation message, if any.
    async fn register(&self, request: &RegisterRequest) -> anyhow::Result<RegisterResponse>;
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl RegisterResponse {
    /// The backend's message, or the default confirmation.
    pub fn message_or_default(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or("Cadastro realizado com sucesso")
    }
}

// ---------------------------------------------------------------------------
// Grades
// ---------------------------------------------------------------------------

/// Semester storage of the backend. Every call is scoped to the signed-in user.
#[async_trait]
pub trait GradesBackend: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Every stored semester of the user.
    async fn list_semesters(&self) -> anyhow::Result<Vec<StoredSemester>>;

    /// Store a new semester.
    async fn create_semester(&self, payload: &SemesterPayload) -> anyhow::Result<SavedSemester>;

    /// Replace the semester with the given id.
    async fn update_semester(
        &self,
        id: &str,
        payload: &SemesterPayload,
    ) -> anyhow::Result<SavedSemester>;

    async fn delete_semester(&self, id: &str) -> anyhow::Result<()>;
}

/// What the backend answers to a save. Only the id is relied upon; the
/// backend may omit it on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSemester {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

impl SavedSemester {
    /// The saved id, falling back to the id that was being edited.
    pub fn id_or(&self, editing: Option<&str>) -> Option<String> {
        self.id.clone().or_else(|| editing.map(str::to_string))
    }
}

/// Create or update, depending on whether an id is being edited.
pub async fn save_semester(
    backend: &dyn GradesBackend,
    editing: Option<&str>,
    payload: &SemesterPayload,
) -> anyhow::Result<SavedSemester> {
    match editing {
        Some(id) => backend.update_semester(id, payload).await,
        None => backend.create_semester(payload).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Term;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GradesBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        async fn list_semesters(&self) -> anyhow::Result<Vec<StoredSemester>> {
            Ok(vec![])
        }

        async fn create_semester(&self, _payload: &SemesterPayload) -> anyhow::Result<SavedSemester> {
            self.calls.lock().unwrap().push("create".into());
            Ok(SavedSemester {
                id: Some("new".into()),
            })
        }

        async fn update_semester(
            &self,
            id: &str,
            _payload: &SemesterPayload,
        ) -> anyhow::Result<SavedSemester> {
            self.calls.lock().unwrap().push(format!("update {id}"));
            Ok(SavedSemester::default())
        }

        async fn delete_semester(&self, _id: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn payload() -> SemesterPayload {
        SemesterPayload {
            year: 2025,
            term: Term::First,
            disciplines: vec![],
        }
    }

    #[tokio::test]
    async fn save_dispatches_on_editing_id() {
        let backend = RecordingBackend::default();

        let created = save_semester(&backend, None, &payload()).await.unwrap();
        assert_eq!(created.id_or(None).as_deref(), Some("new"));

        let updated = save_semester(&backend, Some("abc"), &payload()).await.unwrap();
        assert_eq!(updated.id_or(Some("abc")).as_deref(), Some("abc"));

        assert_eq!(*backend.calls.lock().unwrap(), vec!["create", "update abc"]);
    }

    #[test]
    fn passwords_are_masked_in_debug() {
        let req = LoginRequest {
            email: "ana@example.com".into(),
            password: "hunter2".into(),
        };
        let debug = format!("{req:?}");
        assert!(debug.contains("ana@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn register_message_default() {
        let resp: RegisterResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.message_or_default(), "Cadastro realizado com sucesso");
    }
}
