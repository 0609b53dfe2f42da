//! Landing page.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::{components::NavView, filters, middleware::OptionalSession};

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Option<NavView>,
}

/// Landing page handler.
///
/// Logged-in visitors get a link to their dashboard instead of the sign-in
/// button.
#[instrument(skip_all)]
pub async fn index(OptionalSession(current): OptionalSession) -> HomeTemplate {
    HomeTemplate {
        nav: current.as_ref().map(|c| NavView::new(c, "/")),
    }
}
