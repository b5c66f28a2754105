//! In-memory backend for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use aprovatec_core::engine::evaluate_semester;
use aprovatec_core::model::{SemesterPayload, StoredDiscipline, StoredSemester, User};
use aprovatec_core::traits::{
    AuthBackend, GradesBackend, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    SavedSemester,
};

use crate::error::ApiError;

/// A backend that keeps everything in memory and derives stored figures
/// with the local engine.
#[derive(Default)]
pub struct InMemoryBackend {
    semesters: Mutex<Vec<StoredSemester>>,
    /// email → (user, password)
    accounts: Mutex<HashMap<String, (User, String)>>,
    next_id: AtomicU32,
    /// Number of calls made.
    call_count: AtomicU32,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-loaded with semesters.
    pub fn with_semesters(semesters: Vec<StoredSemester>) -> Self {
        let backend = Self::default();
        backend
            .next_id
            .store(semesters.len() as u32, Ordering::Relaxed);
        *backend.semesters.lock().unwrap_or_else(|e| e.into_inner()) = semesters;
        backend
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn tick(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn next_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("sem-{n}")
    }
}

/// Build the record a backend stores for a payload, with derived figures.
pub fn stored_from_payload(id: &str, payload: &SemesterPayload) -> StoredSemester {
    let eval = evaluate_semester(&payload.disciplines);
    let disciplines = payload
        .disciplines
        .iter()
        .zip(eval.disciplines)
        .enumerate()
        .map(|(i, (d, r))| StoredDiscipline {
            id: Some(format!("{id}-d{}", i + 1)),
            name: d.name.clone(),
            workload: d.workload,
            absences: Some(d.absences),
            av1: d.av1,
            av2: d.av2,
            av3: d.av3,
            edag: d.edag,
            average: r.average,
            status: Some(r.status.to_string()),
            limit_absences: Some(r.limit_absences),
            required_score: r.required_score,
            max_achievable: Some(r.max_achievable),
            missing_assessments: r.missing_assessments,
        })
        .collect();

    StoredSemester {
        id: id.to_string(),
        year: payload.year,
        term: payload.term,
        disciplines,
        average: eval.average,
        approved: eval.approved,
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Semestre não encontrado".into(),
    }
}

#[async_trait]
impl AuthBackend for InMemoryBackend {
    async fn login(&self, request: &LoginRequest) -> anyhow::Result<LoginResponse> {
        self.tick();
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        match accounts.get(&request.email) {
            Some((user, password)) if *password == request.password => Ok(LoginResponse {
                token: format!("token-{}", user.id),
                user: user.clone(),
            }),
            _ => Err(ApiError::Status {
                status: 400,
                message: "Credenciais inválidas".into(),
            }
            .into()),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> anyhow::Result<RegisterResponse> {
        self.tick();
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        if accounts.contains_key(&request.email) {
            return Err(ApiError::Status {
                status: 400,
                message: "E-mail já cadastrado".into(),
            }
            .into());
        }
        let user = User {
            id: format!("user-{}", accounts.len() + 1),
            name: request.name.clone(),
            email: request.email.clone(),
        };
        accounts.insert(request.email.clone(), (user, request.password.clone()));
        Ok(RegisterResponse {
            message: Some("Usuário cadastrado com sucesso".into()),
        })
    }
}

#[async_trait]
impl GradesBackend for InMemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_semesters(&self) -> anyhow::Result<Vec<StoredSemester>> {
        self.tick();
        Ok(self
            .semesters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn create_semester(&self, payload: &SemesterPayload) -> anyhow::Result<SavedSemester> {
        self.tick();
        let id = self.next_id();
        let stored = stored_from_payload(&id, payload);
        self.semesters
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(stored);
        Ok(SavedSemester { id: Some(id) })
    }

    async fn update_semester(
        &self,
        id: &str,
        payload: &SemesterPayload,
    ) -> anyhow::Result<SavedSemester> {
        self.tick();
        let mut semesters = self.semesters.lock().unwrap_or_else(|e| e.into_inner());
        let slot = semesters
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(not_found)?;
        *slot = stored_from_payload(id, payload);
        Ok(SavedSemester {
            id: Some(id.to_string()),
        })
    }

    async fn delete_semester(&self, id: &str) -> anyhow::Result<()> {
        self.tick();
        let mut semesters = self.semesters.lock().unwrap_or_else(|e| e.into_inner());
        let before = semesters.len();
        semesters.retain(|s| s.id != id);
        if semesters.len() == before {
            return Err(not_found().into());
        }
        Ok(())
    }
}
