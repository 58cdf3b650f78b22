//! Access-gated views
//!
//! View models a UI drives. Each one reads the session to decide whether it
//! may call its endpoints, keeps its own loading/error/data state, and
//! reports server refusals locally instead of touching the session. The one
//! exception is a 401 on a live session, which ends it (see
//! [`AuthService::guard`](crate::auth::AuthService::guard)).

mod login_form;
mod pii_viewer;
mod plan_creator;
mod system_logs;

pub use login_form::LoginForm;
pub use pii_viewer::UserPiiViewer;
pub use plan_creator::PlanCreator;
pub use system_logs::SystemLogViewer;

use std::future::Future;

use shared::Permission;

use crate::client::RampClient;
use crate::{ClientError, ClientResult};

/// A view that only works for an authenticated session
pub trait GatedView {
    /// Permission the server checks for this view's calls. Declarative only;
    /// the server makes the decision.
    const PERMISSION: Permission;
    const TITLE: &'static str;

    fn client(&self) -> &RampClient;

    /// Whether the view may call its endpoints right now
    fn is_available(&self) -> bool {
        self.client().session().is_authenticated()
    }
}

/// Local state of one view action
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
        }
    }
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.data = None;
    }

    fn settle(&mut self, result: &ClientResult<T>)
    where
        T: Clone,
    {
        self.loading = false;
        match result {
            Ok(data) => self.data = Some(data.clone()),
            Err(e) => self.error = Some(e.user_message()),
        }
    }
}

/// Run a protected call for a view.
///
/// Without a user the call is never polled and the view gets
/// `NotAuthenticated`. Results go through the session guard.
pub(crate) async fn run_gated<T, F>(
    client: &RampClient,
    state: &mut ViewState<T>,
    call: F,
) -> ClientResult<T>
where
    T: Clone,
    F: Future<Output = ClientResult<T>>,
{
    if !client.session().is_authenticated() {
        let err = ClientError::NotAuthenticated;
        state.error = Some(err.user_message());
        return Err(err);
    }

    state.begin();
    let result = client.auth().guard(call.await);
    state.settle(&result);
    result
}
