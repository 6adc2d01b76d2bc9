//! `authgate session`: mounts the authenticated area once and reports.

use anyhow::Result;
use authgate_core::{AuthGateway, BrowserContext, Navigation, Navigator};
use authgate_session::{SessionRuntime, View};
use authgate_types::User;
use serde::Serialize;

use super::print_json;

/// Collects navigations instead of performing them.
#[derive(Debug, Default)]
struct CollectingNavigator(Vec<Navigation>);

impl Navigator for CollectingNavigator {
    fn navigate(&mut self, navigation: Navigation) {
        tracing::debug!(url = navigation.url(), "navigation requested");
        self.0.push(navigation);
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Rendered {
    Loading,
    Children,
    Nothing,
}

#[derive(Debug, Serialize)]
struct SessionReport<'a> {
    render: Rendered,
    user: Option<&'a User>,
    navigations: &'a [Navigation],
}

pub async fn run(gateway: AuthGateway, ctx: BrowserContext) -> Result<()> {
    let mut runtime = SessionRuntime::new(gateway, ctx, CollectingNavigator::default());
    runtime.mount().await;

    let (render, user) = match runtime.view() {
        View::Loading => (Rendered::Loading, None),
        View::Children(user) => (Rendered::Children, Some(user)),
        View::Nothing => (Rendered::Nothing, None),
    };
    print_json(&SessionReport {
        render,
        user,
        navigations: &runtime.navigator().0,
    })
}
