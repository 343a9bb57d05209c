//! Route resolution and the dispatcher middleware that gates each action
//! behind its authentication scheme.

use crate::{
  app::{
    error::{ApiError, AppError},
    AppState,
  },
  http::auth,
};
use axum::{
  extract::{Request, State},
  http::{header, Method, StatusCode, Uri},
  middleware::Next,
  response::{IntoResponse, Response},
};
use tracing::warn;

pub const SHOW_LOGS_PATH: &str = "/";
pub const STORE_LOG_PATH: &str = "/api/v1/log";

/// The two things this service does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  ShowLogs,
  StoreLog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
  Basic,
  ApiKey,
}

impl Action {
  /// Resolve a request target (query string allowed) to an action.
  pub fn resolve(method: &Method, target: &str) -> Result<Self, AppError> {
    let path = target.split_once('?').map_or(target, |(p, _)| p);
    let (action, allowed) = match path {
      SHOW_LOGS_PATH => (Action::ShowLogs, Method::GET),
      STORE_LOG_PATH => (Action::StoreLog, Method::POST),
      _ => return Err(AppError::NotFound),
    };
    if *method != allowed {
      return Err(AppError::MethodNotAllowed);
    }
    Ok(action)
  }

  pub fn auth_scheme(self) -> AuthScheme {
    match self {
      Action::ShowLogs => AuthScheme::Basic,
      Action::StoreLog => AuthScheme::ApiKey,
    }
  }
}

/// Resolve the route and enforce authentication before any handler runs.
pub async fn dispatch(State(state): State<AppState>, req: Request, next: Next) -> Response {
  let action = match Action::resolve(req.method(), req.uri().path()) {
    Ok(action) => action,
    Err(e) => return e.into_response(),
  };

  let auth_config = &state.config.auth;
  match action.auth_scheme() {
    AuthScheme::Basic => {
      if !auth::web_request_is_authorized(auth_config, req.headers()) {
        return request_authorization();
      }
    }
    AuthScheme::ApiKey => {
      if !auth::api_request_is_authorized(auth_config, req.headers()) {
        warn!("rejected ingestion request with missing or unknown api key");
        return ApiError(AppError::Unauthorized).into_response();
      }
    }
  }

  next.run(req).await
}

/// Basic-auth challenge for the web UI.
pub fn request_authorization() -> Response {
  (
    StatusCode::UNAUTHORIZED,
    [(header::WWW_AUTHENTICATE, auth::BASIC_REALM)],
    "Authorization required. Please log in.",
  )
    .into_response()
}

/// Fallback for requests the router itself could not match.
pub async fn unmatched(method: Method, uri: Uri) -> AppError {
  Action::resolve(&method, uri.path())
    .err()
    .unwrap_or(AppError::NotFound)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_known_routes() {
    assert_eq!(Action::resolve(&Method::GET, "/").unwrap(), Action::ShowLogs);
    assert_eq!(
      Action::resolve(&Method::GET, "/?s[]=api&page=2").unwrap(),
      Action::ShowLogs
    );
    assert_eq!(
      Action::resolve(&Method::POST, "/api/v1/log").unwrap(),
      Action::StoreLog
    );
  }

  #[test]
  fn unknown_paths_are_not_found() {
    for path in ["/foo", "/api/v1/log/", "/api/v1/logs", ""] {
      assert!(matches!(
        Action::resolve(&Method::GET, path),
        Err(AppError::NotFound)
      ));
    }
  }

  #[test]
  fn wrong_methods_are_not_allowed() {
    assert!(matches!(
      Action::resolve(&Method::POST, "/"),
      Err(AppError::MethodNotAllowed)
    ));
    assert!(matches!(
      Action::resolve(&Method::GET, "/api/v1/log"),
      Err(AppError::MethodNotAllowed)
    ));
    assert!(matches!(
      Action::resolve(&Method::DELETE, "/api/v1/log?x=1"),
      Err(AppError::MethodNotAllowed)
    ));
  }

  #[test]
  fn actions_declare_auth_schemes() {
    assert_eq!(Action::ShowLogs.auth_scheme(), AuthScheme::Basic);
    assert_eq!(Action::StoreLog.auth_scheme(), AuthScheme::ApiKey);
  }

  #[test]
  fn challenge_carries_basic_realm() {
    let res = request_authorization();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      res.headers()[header::WWW_AUTHENTICATE],
      r#"Basic realm="Restricted access""#
    );
  }
}
