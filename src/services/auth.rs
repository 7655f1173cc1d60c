// src/services/auth.rs

use serde_json::Value;

use crate::{
    common::error::AppError,
    middleware::auth::Session,
    models::{auth::RegisterUserPayload, user::User},
    upstream::UserRepository,
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let token = self.user_repo.login(email.trim(), password).await?;

        // Falha aqui = o backend emitiu um token que nem é um JWT
        let session = Session::from_bearer(&token).map_err(|e| match e {
            AppError::SessionExpired => e,
            _ => AppError::MalformedResponse("login devolveu um token inválido".into()),
        })?;
        tracing::info!("🔑 Login de {:?}", session.subject());

        Ok(token)
    }

    pub async fn profile(&self, session: &Session) -> Result<User, AppError> {
        self.user_repo.profile(session).await
    }

    /// Troca o nome de usuário. Mesmo nome = nada é enviado ao backend.
    pub async fn update_username(&self, session: &Session, username: &str) -> Result<User, AppError> {
        let username = username.trim();
        let current = self.user_repo.profile(session).await?;
        if current.username == username {
            return Ok(current);
        }

        self.user_repo
            .update_profile(session, Some(username), None)
            .await?;

        self.user_repo.profile(session).await
    }

    pub async fn change_password(&self, session: &Session, new_password: &str) -> Result<(), AppError> {
        self.user_repo
            .update_profile(session, None, Some(new_password))
            .await
    }

    /// Só administradores cadastram usuários.
    pub async fn register_user(
        &self,
        session: &Session,
        payload: &RegisterUserPayload,
    ) -> Result<Value, AppError> {
        let admin = self.user_repo.profile(session).await?;
        if !admin.is_admin() {
            return Err(AppError::Forbidden(format!(
                "{} tentou cadastrar um usuário sem ser ADMIN",
                admin.email
            )));
        }

        let created = self.user_repo.register_user(session, payload, &admin).await?;
        tracing::info!("👤 Usuário {} cadastrado por {}", payload.email, admin.email);
        Ok(created)
    }
}
