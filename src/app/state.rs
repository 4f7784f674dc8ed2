// ==========================================
// PIAR Portal - application state
// ==========================================
// Single owner of the collections and the session.
// Every mutating action goes through here: apply the mutation, then
// bring the selection in line with the authoritative collection.
// The session lock is never held across an await.
// ==========================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::api::{
    ApiError, ApiResult, AssistantApi, AuthApi, DashboardApi, DocumentUpload, GeneratedPlan,
    PiarApi, Service, StudentApi, UserApi, UserDeletion, ValidationIssue,
};
use crate::collaborators::ai::{GeminiClient, GenerativeService, ScriptedGenerativeService};
use crate::collaborators::auth::{AuthProvider, InMemoryAuthProvider};
use crate::collaborators::storage::{InMemoryObjectStorage, LocalObjectStorage, ObjectStorage};
use crate::config::ConfigManager;
use crate::domain::chat::{ChatMessage, Conversation};
use crate::domain::plan::StrategySuggestion;
use crate::domain::student::{NewStudent, Student};
use crate::domain::types::DocumentType;
use crate::domain::user::{NewUser, RegistrationForm, User};
use crate::engine::dashboard::DashboardSummary;
use crate::engine::navigation::{DashboardTab, TabState};
use crate::engine::selection::Selection;
use crate::engine::visibility::{ScopedStudentsMemo, StudentFilter};
use crate::repository::{StudentRepository, UserRepository};

// ==========================================
// Collaborators
// ==========================================
pub struct Collaborators {
    pub auth: Arc<dyn AuthProvider>,
    pub storage: Arc<dyn ObjectStorage>,
    pub ai: Arc<dyn GenerativeService>,
}

impl Collaborators {
    /// Everything in memory. The AI stand-in has no replies, so every
    /// generation ends in the "could not generate" soft failure.
    pub fn offline(storage_base_url: &str) -> Self {
        Self {
            auth: Arc::new(InMemoryAuthProvider::new()),
            storage: Arc::new(InMemoryObjectStorage::new(storage_base_url)),
            ai: Arc::new(ScriptedGenerativeService::new()),
        }
    }

    /// Storage from `storage.localRoot`, hosted AI when its API key is set.
    pub fn from_config(config: &ConfigManager) -> ApiResult<Self> {
        let current = config.current()?;

        let storage: Arc<dyn ObjectStorage> = match &current.storage.local_root {
            Some(root) => {
                info!(root = %root.display(), "local object storage");
                Arc::new(LocalObjectStorage::new(root.clone(), &current.storage.public_base_url))
            }
            None => Arc::new(InMemoryObjectStorage::new(&current.storage.public_base_url)),
        };

        let ai: Arc<dyn GenerativeService> = match config.ai_api_key()? {
            Some(key) => {
                let client = GeminiClient::new(&current.ai.endpoint, &current.ai.model, key)
                    .map_err(|e| ApiError::from_collaborator(Service::Ai, e))?;
                info!(model = %current.ai.model, "generative AI enabled");
                Arc::new(client)
            }
            None => {
                warn!(
                    env = %current.ai.api_key_env,
                    "no AI API key; plan and assistant generation unavailable"
                );
                Arc::new(ScriptedGenerativeService::new())
            }
        };

        Ok(Self {
            auth: Arc::new(InMemoryAuthProvider::new()),
            storage,
            ai,
        })
    }
}

// ==========================================
// Session
// ==========================================
#[derive(Default)]
struct Session {
    user: Option<User>,
    tabs: Option<TabState>,
    selection: Selection,
    memo: ScopedStudentsMemo,
    conversation: Conversation,
}

/// Marks a collaborator call in flight; cleared on drop.
pub struct BusyGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

// ==========================================
// AppState
// ==========================================
pub struct AppState {
    pub config: Arc<ConfigManager>,
    pub students: Arc<StudentRepository>,
    pub users: Arc<UserRepository>,

    pub auth_api: Arc<AuthApi>,
    pub user_api: Arc<UserApi>,
    pub student_api: Arc<StudentApi>,
    pub piar_api: Arc<PiarApi>,
    pub assistant_api: Arc<AssistantApi>,
    pub dashboard_api: Arc<DashboardApi>,

    session: Mutex<Session>,
    in_flight: AtomicUsize,
}

impl AppState {
    pub fn new(
        config: Arc<ConfigManager>,
        collaborators: Collaborators,
        users: Vec<User>,
        students: Vec<Student>,
    ) -> Self {
        info!(users = users.len(), students = students.len(), "initializing AppState");

        let users = Arc::new(UserRepository::new(users));
        let students = Arc::new(StudentRepository::new(students));
        let Collaborators { auth, storage, ai } = collaborators;

        let auth_api = Arc::new(AuthApi::new(
            users.clone(),
            students.clone(),
            auth.clone(),
            config.clone(),
        ));
        let user_api = Arc::new(UserApi::new(
            users.clone(),
            students.clone(),
            auth,
            config.clone(),
        ));
        let student_api = Arc::new(StudentApi::new(students.clone(), users.clone(), storage.clone()));
        let piar_api = Arc::new(PiarApi::new(
            students.clone(),
            ai.clone(),
            storage,
            config.clone(),
        ));
        let assistant_api = Arc::new(AssistantApi::new(ai, config.clone()));
        let dashboard_api = Arc::new(DashboardApi::new(students.clone()));

        Self {
            config,
            students,
            users,
            auth_api,
            user_api,
            student_api,
            piar_api,
            assistant_api,
            dashboard_api,
            session: Mutex::new(Session::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn session(&self) -> ApiResult<MutexGuard<'_, Session>> {
        self.session
            .lock()
            .map_err(|e| ApiError::InternalError(format!("session lock poisoned: {}", e)))
    }

    fn begin_call(&self) -> BusyGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            in_flight: &self.in_flight,
        }
    }

    /// True while a collaborator call is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    // ==========================================
    // Session
    // ==========================================

    pub async fn login(&self, identifier: &str, password: &str) -> ApiResult<User> {
        let user = {
            let _busy = self.begin_call();
            self.auth_api.login(identifier, password).await?
        };

        let mut session = self.session()?;
        *session = Session {
            tabs: Some(TabState::new(user.role)),
            user: Some(user.clone()),
            ..Session::default()
        };
        Ok(user.redacted())
    }

    /// Create an account from the sign-up form. Does not sign in.
    pub async fn register(&self, form: RegistrationForm) -> ApiResult<User> {
        let _busy = self.begin_call();
        Ok(self.auth_api.register(form).await?.redacted())
    }

    pub async fn reset_password(&self, email: &str) -> ApiResult<()> {
        let _busy = self.begin_call();
        self.auth_api.reset_password(email).await
    }

    pub fn logout(&self) -> ApiResult<()> {
        let mut session = self.session()?;
        if let Some(user) = &session.user {
            info!(username = %user.username, "signed out");
        }
        *session = Session::default();
        Ok(())
    }

    pub fn current_user(&self) -> ApiResult<Option<User>> {
        Ok(self.session()?.user.as_ref().map(User::redacted))
    }

    fn require_user(&self) -> ApiResult<User> {
        self.session()?.user.clone().ok_or(ApiError::NotAuthenticated)
    }

    // ==========================================
    // Navigation
    // ==========================================

    pub fn active_tab(&self) -> ApiResult<DashboardTab> {
        let session = self.session()?;
        session
            .tabs
            .as_ref()
            .map(TabState::active)
            .ok_or(ApiError::NotAuthenticated)
    }

    pub fn available_tabs(&self) -> ApiResult<Vec<DashboardTab>> {
        let session = self.session()?;
        session
            .tabs
            .as_ref()
            .map(|t| t.available().to_vec())
            .ok_or(ApiError::NotAuthenticated)
    }

    /// Returns false (active tab unchanged) for a tab the role lacks.
    pub fn select_tab(&self, tab: DashboardTab) -> ApiResult<bool> {
        let mut session = self.session()?;
        session
            .tabs
            .as_mut()
            .map(|t| t.select(tab))
            .ok_or(ApiError::NotAuthenticated)
    }

    // ==========================================
    // Students: views
    // ==========================================

    /// Role-scoped students of the signed-in user. Same `Arc` as long as
    /// neither the collection nor the user changed.
    pub fn scoped_students(&self) -> ApiResult<Arc<Vec<Student>>> {
        let snapshot = self.students.list()?;
        let mut session = self.session()?;
        let Session { user, memo, .. } = &mut *session;
        let user = user.as_ref().ok_or(ApiError::NotAuthenticated)?;
        Ok(memo.derive(&snapshot, user))
    }

    pub fn list_students(&self, filter: &StudentFilter) -> ApiResult<Vec<Student>> {
        let viewer = self.require_user()?;
        self.student_api.list_scoped(&viewer, filter)
    }

    /// Select a student from the scoped view.
    pub fn select_student(&self, student_id: &str) -> ApiResult<Student> {
        let scoped = self.scoped_students()?;
        let student = scoped
            .iter()
            .find(|s| s.id == student_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Student", student_id))?;
        self.session()?.selection.select(student.clone());
        Ok(student)
    }

    pub fn selected_student(&self) -> ApiResult<Option<Student>> {
        Ok(self.session()?.selection.current().cloned())
    }

    pub fn clear_selection(&self) -> ApiResult<()> {
        self.session()?.selection.clear();
        Ok(())
    }

    pub fn dashboard(&self) -> ApiResult<DashboardSummary> {
        let viewer = self.require_user()?;
        self.dashboard_api.summary(&viewer)
    }

    // ==========================================
    // Students: mutations
    // ==========================================

    /// Selection follows the updated record when ids match.
    fn sync_selection(&self, updated: Student) -> ApiResult<Student> {
        self.session()?.selection.refresh(&updated);
        Ok(updated)
    }

    pub fn create_student(&self, input: NewStudent) -> ApiResult<Student> {
        self.require_user()?;
        self.student_api.create_student(input)
    }

    pub fn update_student(&self, updated: Student) -> ApiResult<Student> {
        self.require_user()?;
        let updated = self.student_api.update_student(updated)?;
        self.sync_selection(updated)
    }

    pub fn assign_teacher(&self, student_id: &str, teacher_name: Option<&str>) -> ApiResult<Student> {
        self.require_user()?;
        let updated = self.student_api.assign_teacher(student_id, teacher_name)?;
        self.sync_selection(updated)
    }

    /// Progress note authored by the signed-in user.
    pub fn add_progress(&self, student_id: &str, note: &str) -> ApiResult<Student> {
        let author = self.require_user()?;
        let updated = self.student_api.add_progress(student_id, &author.name, note)?;
        self.sync_selection(updated)
    }

    pub fn assign_strategy(&self, student_id: &str, strategy: &StrategySuggestion) -> ApiResult<Student> {
        let author = self.require_user()?;
        let updated = self.student_api.assign_strategy(student_id, &author.name, strategy)?;
        self.sync_selection(updated)
    }

    pub fn add_document(
        &self,
        student_id: &str,
        title: &str,
        doc_type: DocumentType,
        url: Option<String>,
    ) -> ApiResult<Student> {
        self.require_user()?;
        let updated = self.student_api.add_document(student_id, title, doc_type, url)?;
        self.sync_selection(updated)
    }

    pub fn delete_document(&self, student_id: &str, document_id: &str) -> ApiResult<Student> {
        self.require_user()?;
        let updated = self.student_api.delete_document(student_id, document_id)?;
        self.sync_selection(updated)
    }

    pub async fn upload_document(&self, student_id: &str, upload: DocumentUpload) -> ApiResult<Student> {
        self.require_user()?;
        let updated = {
            let _busy = self.begin_call();
            self.student_api.upload_document(student_id, upload).await?
        };
        self.sync_selection(updated)
    }

    // ==========================================
    // PIAR generation
    // ==========================================

    pub async fn generate_plan(&self, student_id: &str, context: &str) -> ApiResult<GeneratedPlan> {
        self.require_user()?;
        let generated = {
            let _busy = self.begin_call();
            self.piar_api.generate_plan(student_id, context).await?
        };
        self.session()?.selection.refresh(&generated.student);
        Ok(generated)
    }

    pub async fn suggest_strategies(
        &self,
        student_id: &str,
        focus: Option<&str>,
    ) -> ApiResult<Vec<StrategySuggestion>> {
        self.require_user()?;
        let _busy = self.begin_call();
        self.piar_api.suggest_strategies(student_id, focus).await
    }

    // ==========================================
    // Users
    // ==========================================

    pub async fn create_user(&self, new_user: NewUser) -> ApiResult<User> {
        self.require_user()?;
        let _busy = self.begin_call();
        self.user_api.create_user(new_user).await
    }

    /// Deleting a teacher unassigns their students; the selection is then
    /// re-read from the collection.
    pub fn delete_user(&self, user_id: &str) -> ApiResult<UserDeletion> {
        let actor = self.require_user()?;
        if actor.id == user_id {
            return Err(ApiError::validation(ValidationIssue::Rejected(
                "cannot delete the signed-in account".to_string(),
            )));
        }

        let deletion = self.user_api.delete_user(user_id)?;
        if !deletion.unassigned_students.is_empty() {
            let snapshot = self.students.list()?;
            self.session()?.selection.resync(&snapshot.items);
        }
        Ok(deletion)
    }

    pub fn list_users(&self) -> ApiResult<Vec<User>> {
        let viewer = self.require_user()?;
        self.user_api.list_visible(&viewer)
    }

    pub fn list_teachers(&self) -> ApiResult<Vec<User>> {
        self.require_user()?;
        self.user_api.list_teachers()
    }

    // ==========================================
    // Assistant
    // ==========================================

    /// Ask the assistant. The exchange is kept only when a reply arrives.
    pub async fn ask_assistant(&self, question: &str) -> ApiResult<ChatMessage> {
        self.require_user()?;
        let history = self.session()?.conversation.messages().to_vec();

        let reply = {
            let _busy = self.begin_call();
            self.assistant_api.ask(history, question).await?
        };

        let limit = self.config.current()?.assistant_history_limit;
        self.session()?
            .conversation
            .push_exchange(ChatMessage::user(question.trim()), reply.clone(), limit);
        Ok(reply)
    }

    pub fn conversation(&self) -> ApiResult<Vec<ChatMessage>> {
        Ok(self.session()?.conversation.messages().to_vec())
    }

    pub fn clear_conversation(&self) -> ApiResult<()> {
        self.session()?.conversation.clear();
        Ok(())
    }
}
