//! Router-level tests for the account crate, backed by an in-memory repository

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use kernel::id::UserId;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::{AuthConfig, TokenService};
    use crate::domain::entity::{credentials::UserCredentials, user::User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{email::Email, user_password::UserPassword};
    use crate::error::{AuthError, AuthResult};
    use crate::presentation::router::auth_router_generic;

    #[derive(Clone, Default)]
    pub struct InMemoryUsers {
        rows: Arc<Mutex<HashMap<UserId, (User, UserPassword)>>>,
    }

    impl InMemoryUsers {
        pub fn remove(&self, user_id: &UserId) {
            self.rows.lock().unwrap().remove(user_id);
        }
    }

    impl UserRepository for InMemoryUsers {
        async fn create(&self, user: &User, password: &UserPassword) -> AuthResult<()> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|(u, _)| u.email == user.email) {
                return Err(AuthError::EmailTaken);
            }
            rows.insert(user.user_id, (user.clone(), password.clone()));
            Ok(())
        }

        async fn find_credentials_by_email(
            &self,
            email: &Email,
        ) -> AuthResult<Option<UserCredentials>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .find(|(u, _)| &u.email == email)
                .map(|(user, password_hash)| UserCredentials {
                    user: user.clone(),
                    password_hash: password_hash.clone(),
                }))
        }

        async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
            Ok(self.rows.lock().unwrap().get(user_id).map(|(u, _)| u.clone()))
        }
    }

    pub struct TestApp {
        pub router: Router,
        pub repo: InMemoryUsers,
    }

    pub fn app() -> TestApp {
        let repo = InMemoryUsers::default();
        let config = Arc::new(AuthConfig::development());
        let tokens = Arc::new(TokenService::new(&config));
        TestApp {
            router: auth_router_generic(repo.clone(), config, tokens),
            repo,
        }
    }

    pub async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub fn registration(email: &str) -> Value {
        serde_json::json!({
            "correo_institucional": email,
            "nombre": "Ana Pérez",
            "password": "Mercado#Campus2025",
            "facultad": "Ingeniería",
        })
    }
}

#[cfg(test)]
mod register_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_returns_token_and_public_user() {
        let app = app();
        let (status, body) = send(
            &app.router,
            "POST",
            "/register",
            Some(registration("ana@correo.unicordoba.edu.co")),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["correo_institucional"], "ana@correo.unicordoba.edu.co");
        assert_eq!(body["user"]["rol"], "estudiante");
        assert_eq!(body["user"]["reputacion"], "0");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_non_institutional_email() {
        let app = app();
        let (status, body) = send(
            &app.router,
            "POST",
            "/register",
            Some(registration("ana@gmail.com")),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "Solo se permiten correos institucionales @correo.unicordoba.edu.co"
        );
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let app = app();
        let (first, _) = send(
            &app.router,
            "POST",
            "/register",
            Some(registration("ana@correo.unicordoba.edu.co")),
            None,
        )
        .await;
        // Same account after trim/lowercase
        let (second, body) = send(
            &app.router,
            "POST",
            "/register",
            Some(registration("  ANA@correo.unicordoba.edu.co ")),
            None,
        )
        .await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "El correo ya está registrado");
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let app = app();
        for body in [
            json!({ "correo_institucional": "ana@correo.unicordoba.edu.co", "password": "Mercado#Campus2025" }),
            json!({ "correo_institucional": "ana@correo.unicordoba.edu.co", "nombre": "   ", "password": "Mercado#Campus2025" }),
            json!({ "nombre": "Ana", "password": "Mercado#Campus2025" }),
            json!({ "correo_institucional": "ana@correo.unicordoba.edu.co", "nombre": "Ana" }),
        ] {
            let (status, resp) = send(&app.router, "POST", "/register", Some(body), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(resp["detail"], "Faltan campos obligatorios");
        }
    }

    #[tokio::test]
    async fn test_register_accepts_short_and_simple_passwords() {
        let app = app();
        for (i, pw) in ["abc123", "12345678", "password"].into_iter().enumerate() {
            let email = format!("usuario{i}@correo.unicordoba.edu.co");
            let mut body = registration(&email);
            body["password"] = json!(pw);

            let (status, _) = send(&app.router, "POST", "/register", Some(body), None).await;
            assert_eq!(status, StatusCode::CREATED, "password {pw} was rejected");

            let login = json!({ "correo_institucional": email, "password": pw });
            let (status, resp) = send(&app.router, "POST", "/login", Some(login), None).await;
            assert_eq!(status, StatusCode::OK);
            assert!(resp["token"].is_string());
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app();
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/register")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let response = tower::ServiceExt::oneshot(app.router.clone(), request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn registered() -> TestApp {
        let app = app();
        let (status, _) = send(
            &app.router,
            "POST",
            "/register",
            Some(registration("ana@correo.unicordoba.edu.co")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        app
    }

    #[tokio::test]
    async fn test_login_success() {
        let app = registered().await;
        let (status, body) = send(
            &app.router,
            "POST",
            "/login",
            Some(json!({
                "correo_institucional": "Ana@Correo.Unicordoba.edu.co",
                "password": "Mercado#Campus2025",
            })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());
        assert_eq!(body["user"]["nombre"], "Ana Pérez");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_identical() {
        let app = registered().await;

        let wrong_password = send(
            &app.router,
            "POST",
            "/login",
            Some(json!({
                "correo_institucional": "ana@correo.unicordoba.edu.co",
                "password": "NoEsLaClave#2025",
            })),
            None,
        )
        .await;
        let unknown_email = send(
            &app.router,
            "POST",
            "/login",
            Some(json!({
                "correo_institucional": "nadie@correo.unicordoba.edu.co",
                "password": "Mercado#Campus2025",
            })),
            None,
        )
        .await;
        let malformed_email = send(
            &app.router,
            "POST",
            "/login",
            Some(json!({ "correo_institucional": "nadie", "password": "x" })),
            None,
        )
        .await;

        assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password, malformed_email);
        assert_eq!(wrong_password.1["detail"], "Credenciales inválidas");
    }

    #[tokio::test]
    async fn test_login_missing_credentials() {
        let app = app();
        let (status, body) = send(
            &app.router,
            "POST",
            "/login",
            Some(json!({ "correo_institucional": "ana@correo.unicordoba.edu.co" })),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Faltan credenciales");
    }
}

#[cfg(test)]
mod me_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use kernel::id::UserId;
    use serde_json::json;

    #[tokio::test]
    async fn test_token_from_login_authorizes_me() {
        let app = app();
        let (_, registered) = send(
            &app.router,
            "POST",
            "/register",
            Some(registration("ana@correo.unicordoba.edu.co")),
            None,
        )
        .await;
        let (_, logged_in) = send(
            &app.router,
            "POST",
            "/login",
            Some(json!({
                "correo_institucional": "ana@correo.unicordoba.edu.co",
                "password": "Mercado#Campus2025",
            })),
            None,
        )
        .await;

        let token = logged_in["token"].as_str().unwrap();
        let (status, me) = send(&app.router, "GET", "/me", None, Some(token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(me, registered["user"]);
        assert!(me.get("password_hash").is_none());
        let keys: Vec<&str> = me.as_object().unwrap().keys().map(String::as_str).collect();
        for field in [
            "id",
            "correo_institucional",
            "nombre",
            "facultad",
            "telefono",
            "rol",
            "reputacion",
            "created_at",
        ] {
            assert!(keys.contains(&field), "missing {field}");
        }
        assert_eq!(keys.len(), 8);
    }

    #[tokio::test]
    async fn test_me_requires_bearer() {
        let app = app();
        let (status, body) = send(&app.router, "GET", "/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "No autorizado");

        let (status, body) = send(&app.router, "GET", "/me", None, Some("garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Token inválido o expirado");
    }

    #[tokio::test]
    async fn test_me_for_deleted_user() {
        let app = app();
        let (_, registered) = send(
            &app.router,
            "POST",
            "/register",
            Some(registration("ana@correo.unicordoba.edu.co")),
            None,
        )
        .await;
        let token = registered["token"].as_str().unwrap().to_string();
        let id: uuid::Uuid = registered["user"]["id"].as_str().unwrap().parse().unwrap();
        app.repo.remove(&UserId::from_uuid(id));

        let (status, body) = send(&app.router, "GET", "/me", None, Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Usuario no encontrado");
    }
}
