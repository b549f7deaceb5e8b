//! In-memory backends shared by the application tests.

#![allow(dead_code)]

use async_trait::async_trait;
use scenesmith_application::ScenesmithApp;
use scenesmith_core::chain::{ChainGenerator, GenerateChainRequest, MacroChain, MacroScene};
use scenesmith_core::characters::{CharacterRoster, CharactersRepository};
use scenesmith_core::context::{BlockType, ContextHealth, ContextRepository, SessionContext};
use scenesmith_core::navigation::Navigator;
use scenesmith_core::project::{Project, ProjectRepository};
use scenesmith_core::{Result, RetryPolicy, ScenesmithError};
use scenesmith_infrastructure::UrlRouter;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn project(id: &str, title: &str, updated_at: &str) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        created_at: updated_at.to_string(),
        updated_at: updated_at.to_string(),
    }
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(2, Duration::from_millis(1))
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Default)]
pub struct MockProjectRepository {
    projects: Mutex<Vec<Project>>,
    list_failures: Mutex<VecDeque<ScenesmithError>>,
    delete_failures: Mutex<VecDeque<ScenesmithError>>,
    find_failures: Mutex<VecDeque<ScenesmithError>>,
    delete_gate: Mutex<Option<Arc<Notify>>>,
    find_gate: Mutex<Option<Arc<Notify>>>,
    pub list_calls: AtomicU32,
    pub create_calls: AtomicU32,
    pub delete_calls: AtomicU32,
}

impl MockProjectRepository {
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
            ..Self::default()
        }
    }

    pub fn fail_list_with(&self, error: ScenesmithError) {
        self.list_failures.lock().unwrap().push_back(error);
    }

    pub fn fail_delete_with(&self, error: ScenesmithError) {
        self.delete_failures.lock().unwrap().push_back(error);
    }

    pub fn fail_find_with(&self, error: ScenesmithError) {
        self.find_failures.lock().unwrap().push_back(error);
    }

    /// Makes the next deletes wait until the returned gate is notified.
    pub fn gate_deletes(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.delete_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Makes the next lookups wait until the returned gate is notified.
    pub fn gate_finds(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.find_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn stored_ids(&self) -> Vec<String> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }
}

#[async_trait]
impl ProjectRepository for MockProjectRepository {
    async fn list_all(&self) -> Result<Vec<Project>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.list_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn find_by_id(&self, project_id: &str) -> Result<Option<Project>> {
        let gate = self.find_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(error) = self.find_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned())
    }

    async fn create(&self, title: &str) -> Result<Project> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst);
        let created = project(&format!("new{n}"), title, "2030-01-01T00:00:00Z");
        self.projects.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete(&self, project_id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.delete_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if let Some(error) = self.delete_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != project_id);
        if projects.len() == before {
            return Err(ScenesmithError::not_found("Project", project_id));
        }
        Ok(())
    }
}

// ============================================================================
// Contexts
// ============================================================================

#[derive(Default)]
pub struct MockContextRepository {
    contexts: Mutex<HashMap<String, Value>>,
    get_gate: Mutex<Option<Arc<Notify>>>,
    append_failures: Mutex<VecDeque<ScenesmithError>>,
    pub get_calls: AtomicU32,
    pub append_calls: AtomicU32,
}

impl MockContextRepository {
    pub fn insert(&self, session_id: &str, context: Value) {
        self.contexts
            .lock()
            .unwrap()
            .insert(session_id.to_string(), context);
    }

    /// Makes the next fetch wait until the returned gate is notified.
    pub fn gate_gets(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.get_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn fail_append_with(&self, error: ScenesmithError) {
        self.append_failures.lock().unwrap().push_back(error);
    }

    pub fn stored(&self, session_id: &str) -> Option<Value> {
        self.contexts.lock().unwrap().get(session_id).cloned()
    }

    fn decode(value: Value) -> SessionContext {
        serde_json::from_value(value).unwrap()
    }

    fn update(&self, session_id: &str, change: impl FnOnce(&mut Value)) -> SessionContext {
        let mut contexts = self.contexts.lock().unwrap();
        let entry = contexts
            .entry(session_id.to_string())
            .or_insert_with(|| json!({"sessionId": session_id, "blocks": {}, "locks": {}}));
        change(entry);
        Self::decode(entry.clone())
    }
}

#[async_trait]
impl ContextRepository for MockContextRepository {
    async fn get(&self, session_id: &str) -> Result<Option<SessionContext>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.get_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.stored(session_id).map(Self::decode))
    }

    async fn append(
        &self,
        session_id: &str,
        block_type: BlockType,
        data: Value,
    ) -> Result<SessionContext> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.append_failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        Ok(self.update(session_id, |context| {
            context["blocks"][block_type.as_ref()] = data;
        }))
    }

    async fn set_lock(
        &self,
        session_id: &str,
        block_type: BlockType,
        locked: bool,
    ) -> Result<SessionContext> {
        Ok(self.update(session_id, |context| {
            context["locks"][block_type.as_ref()] = json!(locked);
        }))
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        self.contexts.lock().unwrap().remove(session_id);
        Ok(())
    }

    async fn health(&self, session_id: &str) -> Result<ContextHealth> {
        let stored = self.stored(session_id);
        Ok(ContextHealth {
            session_id: session_id.to_string(),
            exists: stored.is_some(),
            blocks_count: stored
                .as_ref()
                .and_then(|context| context["blocks"].as_object())
                .map(|blocks| blocks.len() as u64),
            ..ContextHealth::default()
        })
    }
}

/// The characters endpoints read and write the same stored documents.
#[async_trait]
impl CharactersRepository for MockContextRepository {
    async fn list(&self, session_id: &str) -> Result<CharacterRoster> {
        let Some(context) = self.stored(session_id) else {
            return Ok(CharacterRoster::default());
        };
        Ok(CharacterRoster {
            list: context["blocks"]["characters"]["characters"]
                .as_array()
                .cloned()
                .unwrap_or_default(),
            locked: context["locks"]["characters"].as_bool().unwrap_or(false),
            version: context["blocks"]["characters"]["version"].as_u64().unwrap_or(0),
        })
    }

    async fn set_locked(&self, session_id: &str, locked: bool) -> Result<SessionContext> {
        Ok(self.update(session_id, |context| {
            context["locks"]["characters"] = json!(locked);
        }))
    }
}

// ============================================================================
// Chain generation
// ============================================================================

pub struct MockChainGenerator {
    response: Mutex<Result<MacroChain>>,
    pub requests: Mutex<Vec<GenerateChainRequest>>,
}

impl MockChainGenerator {
    pub fn returning(response: Result<MacroChain>) -> Self {
        Self {
            response: Mutex::new(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainGenerator for MockChainGenerator {
    async fn generate(&self, request: &GenerateChainRequest) -> Result<MacroChain> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.lock().unwrap().clone()
    }
}

pub fn sample_chain() -> MacroChain {
    MacroChain {
        chain_id: "chain-1".to_string(),
        scenes: vec![MacroScene {
            id: "s1".to_string(),
            order: 1,
            title: "Arrival at the drowned gate".to_string(),
            objective: "Get inside".to_string(),
        }],
        ..MacroChain::default()
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub app: ScenesmithApp,
    pub projects: Arc<MockProjectRepository>,
    pub contexts: Arc<MockContextRepository>,
    pub generator: Arc<MockChainGenerator>,
    pub router: Arc<UrlRouter>,
}

impl Harness {
    pub fn new(projects: MockProjectRepository, location: &str) -> Self {
        Self::with_generator(projects, location, MockChainGenerator::returning(Ok(sample_chain())))
    }

    pub fn with_generator(
        projects: MockProjectRepository,
        location: &str,
        generator: MockChainGenerator,
    ) -> Self {
        let projects = Arc::new(projects);
        let contexts = Arc::new(MockContextRepository::default());
        let generator = Arc::new(generator);
        let router = Arc::new(UrlRouter::from_location(location).unwrap());

        let app = ScenesmithApp::new(
            projects.clone(),
            contexts.clone(),
            contexts.clone(),
            generator.clone(),
            router.clone() as Arc<dyn Navigator>,
            fast_retry(),
        );

        Self {
            app,
            projects,
            contexts,
            generator,
            router,
        }
    }
}
