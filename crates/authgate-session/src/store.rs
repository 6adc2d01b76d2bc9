//! The shared user cell.
//!
//! One `SessionHandle` is created at bootstrap and cloned into whatever needs
//! the current user. Every write is observable through `subscribe`.

use std::sync::Arc;

use authgate_core::BrowserContext;
use authgate_core::clients::{BackendClient, ClientError};
use authgate_types::User;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct SessionHandle {
    cell: Arc<watch::Sender<Option<User>>>,
    backend: BackendClient,
    ctx: BrowserContext,
}

impl SessionHandle {
    /// An empty cell that fetches through `backend` with the tab's credentials.
    pub fn new(backend: BackendClient, ctx: BrowserContext) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            cell: Arc::new(tx),
            backend,
            ctx,
        }
    }

    pub fn read(&self) -> Option<User> {
        self.cell.borrow().clone()
    }

    pub fn write(&self, user: Option<User>) {
        self.cell.send_replace(user);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.cell.subscribe()
    }

    /// GETs the signed-in user. Does not touch the cell.
    ///
    /// # Errors
    /// Any backend failure other than a 401/403.
    pub async fn fetch_user(&self) -> Result<Option<User>, ClientError> {
        self.backend.current_user(&self.ctx).await
    }
}
