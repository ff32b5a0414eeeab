//! Auth route handlers.
//!
//! Demo login only: a username is enough to claim a cart and wishlist.
//! There are no accounts and no passwords, the same trust level as the
//! original fixture users.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use greengrocer_core::Username;

use crate::error::Result;
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;

/// Maximum accepted username length.
const MAX_USERNAME_LENGTH: usize = 32;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
}

/// Display the login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Demo login action: store the username in the session.
#[instrument(skip(session, form))]
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Response> {
    let username = form.username.trim();

    if !is_valid_username(username) {
        return Ok(LoginTemplate {
            error: Some(
                "Usernames are 1-32 letters, digits, '-', '_' or '.'".to_string(),
            ),
        }
        .into_response());
    }

    let user = CurrentUser {
        username: Username::new(username),
    };
    set_current_user(&session, &user).await?;
    tracing::info!(username = %user.username, "user logged in");

    Ok(Redirect::to("/").into_response())
}

/// Logout action: drop the session user.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    Ok(Redirect::to("/"))
}

/// Accept short names of letters, digits, `-`, `_` and `.`.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LENGTH
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
