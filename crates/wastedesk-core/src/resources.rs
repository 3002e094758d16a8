//! List controller shared by both managed record types.
//!
//! A `ResourceList` owns the in-memory copy of one REST collection. Every
//! successful mutation is followed by exactly one full re-fetch; there is no
//! incremental patching and no optimistic update. Deletes are two-phase: a
//! pending item must be confirmed before the request is sent.

use tracing::{debug, error, info};

use crate::api::DashboardApi;
use crate::models::Resource;
use crate::notify::Notification;

/// Result of a mutation plus the re-fetch that follows it. A failed re-fetch
/// never turns a successful mutation into a failure.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub notification: Notification,
    pub reload_error: Option<Notification>,
}

impl MutationOutcome {
    fn failed(notification: Notification) -> Self {
        Self {
            notification,
            reload_error: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        !self.notification.is_error()
    }

    /// Every notification to show, mutation result first
    pub fn into_notifications(self) -> impl Iterator<Item = Notification> {
        std::iter::once(self.notification).chain(self.reload_error)
    }
}

pub struct ResourceList<R: Resource> {
    items: Vec<R>,
    loading: bool,
    pending_delete: Option<R>,
}

impl<R: Resource> Default for ResourceList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ResourceList<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            pending_delete: None,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn pending_delete(&self) -> Option<&R> {
        self.pending_delete.as_ref()
    }

    /// Drop the cached list, e.g. on logout
    pub fn reset(&mut self) {
        self.items.clear();
        self.loading = false;
        self.pending_delete = None;
    }

    /// Fetch the whole collection and replace the in-memory list.
    /// Returns a notification only on failure.
    pub async fn refresh<A: DashboardApi>(&mut self, api: &A) -> Option<Notification> {
        self.loading = true;
        let result = api.list::<R>().await;
        self.loading = false;

        match result {
            Ok(items) => {
                debug!(collection = R::COLLECTION, count = items.len(), "List refreshed");
                self.items = items;
                None
            }
            Err(e) => {
                error!(error = %e, collection = R::COLLECTION, "Failed to load list");
                Some(Notification::error(
                    "Error",
                    format!("Could not load the {} list", R::SINGULAR),
                ))
            }
        }
    }

    pub async fn create<A: DashboardApi>(&mut self, api: &A, draft: &R::Draft) -> MutationOutcome {
        match api.create::<R>(draft).await {
            Ok(()) => {
                info!(collection = R::COLLECTION, "Record created");
                self.after_mutation(api, format!("{} added", capitalize(R::SINGULAR)))
                    .await
            }
            Err(e) => {
                error!(error = %e, collection = R::COLLECTION, "Create failed");
                MutationOutcome::failed(Notification::error(
                    "Error",
                    format!("Could not create {}", R::SINGULAR),
                ))
            }
        }
    }

    pub async fn update<A: DashboardApi>(
        &mut self,
        api: &A,
        id: &str,
        patch: &R::Patch,
        success: &str,
    ) -> MutationOutcome {
        match api.update::<R>(id, patch).await {
            Ok(()) => {
                info!(collection = R::COLLECTION, id = id, "Record updated");
                self.after_mutation(api, success.to_string()).await
            }
            Err(e) => {
                error!(error = %e, collection = R::COLLECTION, id = id, "Update failed");
                MutationOutcome::failed(Notification::error(
                    "Error",
                    format!("Could not update {} data", R::SINGULAR),
                ))
            }
        }
    }

    /// First phase of a delete: remember the item, send nothing.
    pub fn request_delete(&mut self, item: R) {
        self.pending_delete = Some(item);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second phase: send the delete for the pending item, if any.
    pub async fn confirm_delete<A: DashboardApi>(&mut self, api: &A) -> Option<MutationOutcome> {
        let item = self.pending_delete.take()?;
        let outcome = match api.delete::<R>(item.id()).await {
            Ok(()) => {
                info!(collection = R::COLLECTION, id = item.id(), "Record deleted");
                self.after_mutation(api, format!("{} removed", capitalize(R::SINGULAR)))
                    .await
            }
            Err(e) => {
                error!(error = %e, collection = R::COLLECTION, id = item.id(), "Delete failed");
                MutationOutcome::failed(Notification::error(
                    "Error",
                    format!("Could not remove {}", R::SINGULAR),
                ))
            }
        };
        Some(outcome)
    }

    /// Re-fetch once after a successful mutation
    async fn after_mutation<A: DashboardApi>(&mut self, api: &A, success: String) -> MutationOutcome {
        MutationOutcome {
            notification: Notification::success(success),
            reload_error: self.refresh(api).await,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
