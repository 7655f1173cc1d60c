// src/upstream/user_repo.rs

use reqwest::Method;
use serde_json::Value;

use crate::{
    common::error::AppError,
    middleware::auth::Session,
    models::{
        auth::{AuthResponse, RegisterUserPayload},
        user::User,
    },
    upstream::{
        client::UpstreamClient,
        wire::{RawLoginRequest, RawRegisterRequest, RawUpdateRequest, RawUser},
    },
};

// O repositório do backend de usuários do portal
#[derive(Clone)]
pub struct UserRepository {
    client: UpstreamClient,
}

impl UserRepository {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let request = self
            .client
            .request(Method::POST, "/users/login", None)
            .json(&RawLoginRequest { email, password });

        // Qualquer recusa do backend no login vira "credenciais inválidas"
        let response: AuthResponse = self
            .client
            .fetch(request, "Usuário")
            .await
            .map_err(|e| match e {
                AppError::InvalidToken | AppError::NotFound(_) => AppError::InvalidCredentials,
                AppError::Upstream { status, .. } if (400..500).contains(&status) => {
                    AppError::InvalidCredentials
                }
                other => other,
            })?;

        if response.token.trim().is_empty() {
            return Err(AppError::MalformedResponse("login sem token".into()));
        }
        Ok(response.token)
    }

    pub async fn profile(&self, session: &Session) -> Result<User, AppError> {
        let request = self.client.request(Method::GET, "/users/get", Some(session));
        let raw: RawUser = self.client.fetch(request, "Usuário").await?;
        User::try_from(raw)
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<(), AppError> {
        let request = self
            .client
            .request(Method::PATCH, "/users/update", Some(session))
            .json(&RawUpdateRequest { username, password });

        // O corpo de resposta (o usuário atualizado) não é usado
        let _: Value = self.client.fetch(request, "Usuário").await?;
        Ok(())
    }

    pub async fn register_user(
        &self,
        session: &Session,
        payload: &RegisterUserPayload,
        admin: &User,
    ) -> Result<Value, AppError> {
        let request = self
            .client
            .request(Method::POST, "/users/register", Some(session))
            .json(&RawRegisterRequest::new(payload, admin));

        self.client.fetch(request, "Usuário").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{middleware::auth::tests::token_for, upstream::test_support::serve};
    use axum::{http::StatusCode, routing::{get, patch, post}, Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn repo(base_url: &str) -> UserRepository {
        UserRepository::new(UpstreamClient::new(reqwest::Client::new(), base_url))
    }

    #[tokio::test]
    async fn login_returns_token_or_invalid_credentials() {
        let app = Router::new().route(
            "/users/login",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "admin@banco.com.br" && body["password"] == "segredo" {
                    Ok(Json(json!({ "token": "abc.def.ghi" })))
                } else {
                    Err(StatusCode::BAD_REQUEST)
                }
            }),
        );
        let base = serve(app).await;
        let repo = repo(&base);

        assert_eq!(repo.login("admin@banco.com.br", "segredo").await.unwrap(), "abc.def.ghi");
        assert!(matches!(
            repo.login("admin@banco.com.br", "errada").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn profile_and_update() {
        let seen = Arc::new(Mutex::new(None::<Value>));
        let seen_by_handler = seen.clone();
        let app = Router::new()
            .route(
                "/users/get",
                get(|| async {
                    Json(json!({
                        "id": "1", "email": "admin@banco.com.br", "username": "admin",
                        "companyName": "Banco", "cnpj": "1", "roles": [{ "name": "ROLE_ADMIN" }]
                    }))
                }),
            )
            .route(
                "/users/update",
                patch(move |Json(body): Json<Value>| {
                    let seen = seen_by_handler.clone();
                    async move {
                        *seen.lock().unwrap() = Some(body);
                        Json(json!({ "id": "1" }))
                    }
                }),
            );
        let base = serve(app).await;
        let repo = repo(&base);
        let session = Session::from_bearer(&token_for("admin", None)).unwrap();

        let user = repo.profile(&session).await.unwrap();
        assert!(user.is_admin());

        repo.update_profile(&session, None, Some("nova-senha")).await.unwrap();
        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body, json!({ "password": "nova-senha" }));
    }
}
