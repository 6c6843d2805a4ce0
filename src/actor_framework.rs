use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::LogisticsError;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Human-facing name used in logs and not-found errors.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Natural key that must be unique across the store, if the entity has one.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Construct the full Entity from the ID and creation parameters
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, LogisticsError>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), LogisticsError> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), LogisticsError>;
    fn on_delete(&self) -> Result<(), LogisticsError> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, LogisticsError>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, LogisticsError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    FindByKey {
        key: String,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Count {
        respond_to: Response<usize>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Single owner of every record of one entity type.
///
/// Requests are handled one at a time, so each create/update/action is atomic
/// with respect to the store. Updates and actions run against a copy of the
/// record that is committed only on success: a rejected request never leaves a
/// half-applied change behind.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    keys: HashMap<String, T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            keys: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    pub async fn run(mut self) {
        info!(kind = T::KIND, "ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::FindByKey { key, respond_to } => {
                    let item = self.keys.get(&key).and_then(|id| self.store.get(id)).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
            }
        }

        info!(kind = T::KIND, "ResourceActor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, LogisticsError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params)?;
        item.on_create()?;

        let key = item.unique_key();
        if let Some(key) = &key {
            self.ensure_key_free(key, None)?;
        }

        if let Some(key) = key {
            self.keys.insert(key, id.clone());
        }
        self.store.insert(id.clone(), item.clone());
        debug!(kind = T::KIND, id = %id, "Created");
        Ok(item)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, LogisticsError> {
        let current = self.lookup(&id)?;
        let old_key = current.unique_key();

        let mut updated = current.clone();
        updated.on_update(patch)?;

        let new_key = updated.unique_key();
        if let Some(key) = &new_key {
            self.ensure_key_free(key, Some(&id))?;
        }

        if let Some(key) = old_key {
            self.keys.remove(&key);
        }
        if let Some(key) = new_key {
            self.keys.insert(key, id.clone());
        }
        self.store.insert(id, updated.clone());
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), LogisticsError> {
        let item = self.lookup(&id)?;
        item.on_delete()?;

        if let Some(key) = item.unique_key() {
            self.keys.remove(&key);
        }
        self.store.remove(&id);
        debug!(kind = T::KIND, id = %id, "Deleted");
        Ok(())
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, LogisticsError> {
        let mut working = self.lookup(&id)?.clone();
        match working.handle_action(action) {
            Ok(result) => {
                self.store.insert(id, working);
                Ok(result)
            }
            Err(e) => {
                warn!(kind = T::KIND, id = %id, error = %e, "Action rejected");
                Err(e)
            }
        }
    }

    fn lookup(&self, id: &T::Id) -> Result<&T, LogisticsError> {
        self.store
            .get(id)
            .ok_or_else(|| LogisticsError::not_found(T::KIND, id.to_string()))
    }

    fn ensure_key_free(&self, key: &str, owner: Option<&T::Id>) -> Result<(), LogisticsError> {
        match self.keys.get(key) {
            Some(existing) if Some(existing) != owner => Err(LogisticsError::Conflict(format!(
                "{} '{}' already exists",
                T::KIND,
                key
            ))),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        request: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, LogisticsError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| LogisticsError::ActorCommunication(format!("{} actor closed", T::KIND)))?;
        response
            .await
            .map_err(|_| LogisticsError::ActorCommunication(format!("{} actor dropped", T::KIND)))?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, LogisticsError> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, LogisticsError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    /// Like [`get`](Self::get), but a missing record is a `NotFound` error.
    pub async fn fetch(&self, id: T::Id) -> Result<T, LogisticsError> {
        let label = id.to_string();
        self.get(id)
            .await?
            .ok_or_else(|| LogisticsError::not_found(T::KIND, label))
    }

    pub async fn find_by_key(&self, key: impl Into<String>) -> Result<Option<T>, LogisticsError> {
        let key = key.into();
        self.call(|respond_to| ResourceRequest::FindByKey { key, respond_to }).await
    }

    /// Snapshot of every record; callers own the returned copies.
    pub async fn list(&self) -> Result<Vec<T>, LogisticsError> {
        self.call(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn count(&self) -> Result<usize, LogisticsError> {
        self.call(|respond_to| ResourceRequest::Count { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, LogisticsError> {
        self.call(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), LogisticsError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, LogisticsError> {
        self.call(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Depot {
        id: String,
        code: String,
        bays: u32,
        open: bool,
    }

    #[derive(Debug)]
    struct DepotCreate {
        code: String,
        bays: u32,
    }

    #[derive(Debug)]
    struct DepotPatch {
        code: Option<String>,
    }

    #[derive(Debug)]
    enum DepotAction {
        Close,
        TakeBays(u32),
    }

    impl Entity for Depot {
        type Id = String;
        type CreateParams = DepotCreate;
        type Patch = DepotPatch;
        type Action = DepotAction;
        type ActionResult = u32;

        const KIND: &'static str = "Depot";

        fn id(&self) -> &String {
            &self.id
        }

        fn unique_key(&self) -> Option<String> {
            Some(self.code.to_lowercase())
        }

        fn from_create_params(id: String, params: DepotCreate) -> Result<Self, LogisticsError> {
            Ok(Self {
                id,
                code: params.code,
                bays: params.bays,
                open: true,
            })
        }

        fn on_update(&mut self, patch: DepotPatch) -> Result<(), LogisticsError> {
            if let Some(code) = patch.code {
                self.code = code;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), LogisticsError> {
            if self.open {
                Err(LogisticsError::Conflict("depot still open".into()))
            } else {
                Ok(())
            }
        }

        fn handle_action(&mut self, action: DepotAction) -> Result<u32, LogisticsError> {
            match action {
                DepotAction::Close => {
                    self.open = false;
                    Ok(self.bays)
                }
                DepotAction::TakeBays(n) => {
                    // Mutate first, then fail: the actor must discard the copy.
                    self.bays = self.bays.saturating_sub(n);
                    if n > 3 {
                        return Err(LogisticsError::Unavailable("too many bays".into()));
                    }
                    Ok(self.bays)
                }
            }
        }
    }

    fn start() -> ResourceClient<Depot> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("depot_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = start();

        let depot = client
            .create(DepotCreate { code: "NORTH".into(), bays: 5 })
            .await
            .unwrap();
        assert_eq!(depot.id, "depot_1");

        assert_eq!(client.perform_action(depot.id.clone(), DepotAction::TakeBays(2)).await, Ok(3));

        let stored = client.fetch(depot.id.clone()).await.unwrap();
        assert_eq!(stored.bays, 3);
    }

    #[tokio::test]
    async fn failed_action_leaves_record_untouched() {
        let client = start();
        let depot = client
            .create(DepotCreate { code: "EAST".into(), bays: 5 })
            .await
            .unwrap();

        let result = client.perform_action(depot.id.clone(), DepotAction::TakeBays(4)).await;
        assert!(matches!(result, Err(LogisticsError::Unavailable(_))));

        assert_eq!(client.fetch(depot.id).await.unwrap().bays, 5);
    }

    #[tokio::test]
    async fn unique_keys_are_enforced_on_create_and_update() {
        let client = start();
        let north = client.create(DepotCreate { code: "North".into(), bays: 1 }).await.unwrap();
        let south = client.create(DepotCreate { code: "South".into(), bays: 1 }).await.unwrap();

        let dup = client.create(DepotCreate { code: "NORTH".into(), bays: 1 }).await;
        assert!(matches!(dup, Err(LogisticsError::Conflict(_))));

        let clash = client
            .update(south.id.clone(), DepotPatch { code: Some("north".into()) })
            .await;
        assert!(matches!(clash, Err(LogisticsError::Conflict(_))));
        assert_eq!(client.fetch(south.id.clone()).await.unwrap().code, "South");

        // Renaming to its own key is fine, and frees the old one.
        client
            .update(north.id.clone(), DepotPatch { code: Some("Polar".into()) })
            .await
            .unwrap();
        assert!(client.find_by_key("north").await.unwrap().is_none());
        assert_eq!(client.find_by_key("polar").await.unwrap().unwrap().id, north.id);
        client.create(DepotCreate { code: "north".into(), bays: 2 }).await.unwrap();
        assert_eq!(client.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_respects_hook_and_reports_missing() {
        let client = start();
        let depot = client.create(DepotCreate { code: "WEST".into(), bays: 2 }).await.unwrap();

        let refused = client.delete(depot.id.clone()).await;
        assert!(matches!(refused, Err(LogisticsError::Conflict(_))));

        client.perform_action(depot.id.clone(), DepotAction::Close).await.unwrap();
        client.delete(depot.id.clone()).await.unwrap();

        assert_eq!(
            client.delete(depot.id.clone()).await,
            Err(LogisticsError::not_found("Depot", depot.id.clone()))
        );
        assert!(client.get(depot.id).await.unwrap().is_none());
        assert!(client.find_by_key("west").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_independent_snapshots() {
        let client = start();
        let depot = client.create(DepotCreate { code: "HUB".into(), bays: 4 }).await.unwrap();

        let mut snapshot = client.list().await.unwrap();
        snapshot[0].bays = 99;

        assert_eq!(client.fetch(depot.id).await.unwrap().bays, 4);
    }
}
