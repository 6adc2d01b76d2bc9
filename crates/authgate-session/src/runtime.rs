//! Session runtime: owns the state, runs the reducer, executes effects.
//!
//! Effects run to completion before the next queued event is reduced, so one
//! runtime never has two requests in flight.

use std::collections::VecDeque;

use authgate_core::clients::error_chain;
use authgate_core::{AuthGateway, BrowserContext, Navigator};
use authgate_types::User;

use crate::effects::SessionEffect;
use crate::events::SessionEvent;
use crate::state::SessionState;
use crate::store::SessionHandle;
use crate::update::update;
use crate::view::{View, view};

pub struct SessionRuntime<N> {
    state: SessionState,
    handle: SessionHandle,
    gateway: AuthGateway,
    ctx: BrowserContext,
    navigator: N,
}

impl<N: Navigator> SessionRuntime<N> {
    /// Creates the runtime and the user cell it owns; clone the cell out
    /// through `handle()`.
    pub fn new(gateway: AuthGateway, ctx: BrowserContext, navigator: N) -> Self {
        let state = SessionState::new(ctx.path.clone(), gateway.reset_password_path());
        let handle = SessionHandle::new(gateway.backend().clone(), ctx.clone());
        Self {
            state,
            handle,
            gateway,
            ctx,
            navigator,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn view(&self) -> View<'_> {
        view(&self.state)
    }

    /// Mounts the guarded area and waits for the user fetch to settle.
    pub async fn mount(&mut self) -> View<'_> {
        self.dispatch(SessionEvent::Mounted).await;
        self.view()
    }

    /// Writes the cell and lets the state machine react.
    pub async fn set_user(&mut self, user: Option<User>) {
        self.handle.write(user.clone());
        self.dispatch(SessionEvent::UserUpdated(user)).await;
    }

    pub async fn logout(&mut self) {
        self.dispatch(SessionEvent::LogoutRequested).await;
    }

    pub async fn unmount(&mut self) {
        self.dispatch(SessionEvent::Unmounted).await;
    }

    /// Reduces `event` and every follow-up event its effects produce.
    pub async fn dispatch(&mut self, event: SessionEvent) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in update(&mut self.state, event) {
                if let Some(next) = self.execute(effect).await {
                    queue.push_back(next);
                }
            }
        }
    }

    async fn execute(&mut self, effect: SessionEffect) -> Option<SessionEvent> {
        match effect {
            SessionEffect::FetchUser => {
                let user = match self.handle.fetch_user().await {
                    Ok(user) => user,
                    Err(err) => {
                        tracing::warn!(error = %error_chain(&err), "Failed to fetch current user");
                        None
                    }
                };
                Some(SessionEvent::UserFetched(user))
            }
            SessionEffect::PublishUser(user) => {
                self.handle.write(Some(user));
                None
            }
            SessionEffect::Navigate(navigation) => {
                self.navigator.navigate(navigation);
                None
            }
            SessionEffect::Logout => {
                let navigation = self.gateway.logout().run(&self.ctx).await;
                self.navigator.navigate(navigation);
                None
            }
            SessionEffect::ClearUser => {
                self.handle.write(None);
                None
            }
        }
    }
}
