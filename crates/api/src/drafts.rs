//! Server-held ordering drafts.
//!
//! Every signed-in user owns at most one ticker draft and one carousel
//! draft. A draft is opened by fetching the active rows and seeding an
//! [`OrderedDraft`]; edits then happen in memory until the user saves or
//! discards. Locks are never held across a database call.

use std::collections::HashMap;
use std::future::Future;

use newsdesk_core::content::{CarouselDraftItem, TickerDraftItem};
use newsdesk_core::ordering::{DraftItem, OrderedDraft};
use newsdesk_core::types::DbId;
use tokio::sync::RwLock;

/// Drafts of one list kind, keyed by user id.
pub struct DraftMap<T> {
    drafts: RwLock<HashMap<DbId, OrderedDraft<T>>>,
}

impl<T> Default for DraftMap<T> {
    fn default() -> Self {
        Self {
            drafts: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: DraftItem + Clone> DraftMap<T> {
    /// Snapshot of the user's open draft, if any.
    pub async fn get(&self, user_id: DbId) -> Option<OrderedDraft<T>> {
        self.drafts.read().await.get(&user_id).cloned()
    }

    /// Open the user's draft, seeding it with `fetched`.
    ///
    /// When a draft already exists the fetch is ignored (see
    /// [`OrderedDraft::seed`]) and the existing draft is returned.
    pub async fn open(&self, user_id: DbId, fetched: Vec<T>) -> OrderedDraft<T> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.entry(user_id).or_default();
        draft.seed(fetched);
        draft.clone()
    }

    /// Return the user's draft, opening it from `load` when there is none.
    ///
    /// `load` runs without holding the lock. Errors are returned as-is and
    /// no draft is created.
    pub async fn get_or_open<E, F, Fut>(&self, user_id: DbId, load: F) -> Result<OrderedDraft<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if let Some(draft) = self.get(user_id).await {
            return Ok(draft);
        }
        let fetched = load().await?;
        Ok(self.open(user_id, fetched).await)
    }

    /// Run `f` against the user's draft. `None` when no draft is open.
    pub async fn with_draft<R>(
        &self,
        user_id: DbId,
        f: impl FnOnce(&mut OrderedDraft<T>) -> R,
    ) -> Option<R> {
        let mut drafts = self.drafts.write().await;
        drafts.get_mut(&user_id).map(f)
    }

    /// Drop the user's draft. Returns `true` if one was open.
    pub async fn discard(&self, user_id: DbId) -> bool {
        self.drafts.write().await.remove(&user_id).is_some()
    }

    /// Number of open drafts across all users.
    pub async fn len(&self) -> usize {
        self.drafts.read().await.len()
    }
}

/// All open ordering drafts.
#[derive(Default)]
pub struct DraftStore {
    pub ticker: DraftMap<TickerDraftItem>,
    pub carousel: DraftMap<CarouselDraftItem>,
}
