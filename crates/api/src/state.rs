use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mail::ContactMailer;

/// State handed to every handler through `State<AppState>`. Cloning is
/// cheap; the pool and config are shared handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: sitedesk_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// `None` when SMTP is unconfigured; the contact endpoint then answers
    /// with a mailer error.
    pub mailer: Option<Arc<ContactMailer>>,
}
