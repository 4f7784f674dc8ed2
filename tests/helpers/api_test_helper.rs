// ==========================================
// Integration test environment
// ==========================================
// AppState over in-memory collaborators, with handles kept on the
// scripted AI and the storage so tests can drive and inspect them.
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;

use piar_portal::app::{AppState, Collaborators};
use piar_portal::collaborators::ai::{ScriptedGenerativeService, ScriptedReply};
use piar_portal::collaborators::auth::InMemoryAuthProvider;
use piar_portal::collaborators::error::{CollaboratorError, CollaboratorResult};
use piar_portal::collaborators::storage::{InMemoryObjectStorage, ObjectStorage};
use piar_portal::config::{ConfigManager, PortalConfig};
use piar_portal::domain::student::Student;
use piar_portal::domain::user::User;
use piar_portal::seed;

use super::test_data_builder::{standard_students, standard_users};

/// Storage that rejects every upload.
pub struct FailingStorage;

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn upload(&self, _path: &str, _bytes: Vec<u8>, _content_type: &str) -> CollaboratorResult<String> {
        Err(CollaboratorError::Service {
            status: 507,
            message: "insufficient storage".to_string(),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("memory://failing/{}", path)
    }
}

pub struct ApiTestEnv {
    pub state: AppState,
    pub ai: Arc<ScriptedGenerativeService>,
    pub storage: Arc<InMemoryObjectStorage>,
    pub auth: Arc<InMemoryAuthProvider>,
}

impl ApiTestEnv {
    /// Standard users (accounts registered) and students.
    pub async fn new() -> Self {
        Self::with_data(standard_users(), standard_students()).await
    }

    pub async fn with_data(users: Vec<User>, students: Vec<Student>) -> Self {
        Self::build(users, students, PortalConfig::default(), None).await
    }

    pub async fn with_config(config: PortalConfig) -> Self {
        Self::build(standard_users(), standard_students(), config, None).await
    }

    /// Standard data, but every upload fails.
    pub async fn with_failing_storage() -> Self {
        Self::build(
            standard_users(),
            standard_students(),
            PortalConfig::default(),
            Some(Arc::new(FailingStorage) as Arc<dyn ObjectStorage>),
        )
        .await
    }

    async fn build(
        users: Vec<User>,
        students: Vec<Student>,
        config: PortalConfig,
        storage_override: Option<Arc<dyn ObjectStorage>>,
    ) -> Self {
        piar_portal::logging::init_test();

        let ai = Arc::new(ScriptedGenerativeService::new());
        let storage = Arc::new(InMemoryObjectStorage::new("memory://test"));
        let auth = Arc::new(InMemoryAuthProvider::new());
        seed::register_accounts(auth.as_ref(), &users)
            .await
            .expect("register test accounts");

        let collaborators = Collaborators {
            auth: auth.clone(),
            storage: storage_override.unwrap_or_else(|| storage.clone() as Arc<dyn ObjectStorage>),
            ai: ai.clone(),
        };
        let config = Arc::new(ConfigManager::from_config(config).expect("valid test config"));

        Self {
            state: AppState::new(config, collaborators, users, students),
            ai,
            storage,
            auth,
        }
    }

    /// Sign in as a standard user (password `{username}-pass`).
    pub async fn login_as(&self, username: &str) -> User {
        self.state
            .login(username, &format!("{}-pass", username))
            .await
            .expect("login")
    }

    pub fn reply(&self, text: &str) {
        self.ai.push_reply(ScriptedReply::Text(text.to_string()));
    }

    pub fn student(&self, id: &str) -> Student {
        self.state.students.get(id).expect("student exists")
    }
}

pub const PLAN_JSON: &str = r#"{
    "summary": "Dificultades de atención sostenida en tareas largas",
    "strengths": ["Creatividad", "Buena memoria visual"],
    "barriers": ["Instrucciones extensas"],
    "adjustments": [{"area": "Matemáticas", "adjustments": ["Dividir ejercicios en pasos cortos"]}],
    "reinforcementActivities": [{"area": "Lenguaje", "activities": ["Lectura guiada con pictogramas"]}],
    "followUpStrategies": ["Revisión quincenal con la familia"]
}"#;
