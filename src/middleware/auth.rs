// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use chrono::{DateTime, Utc};
use jsonwebtoken::dangerous::insecure_decode;

use crate::{
    common::error::{ApiError, AppError},
    middleware::i18n::Locale,
    models::auth::Claims,
};

/// A sessão do administrador: o token do backend + o que sabemos dele.
///
/// É o único ponto de entrada do token no portal. Todo acesso aos backends
/// recebe a sessão explicitamente, nunca lê o token de um lugar global.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    subject: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn from_bearer(token: &str) -> Result<Self, AppError> {
        Self::from_bearer_at(token, Utc::now())
    }

    pub(crate) fn from_bearer_at(token: &str, now: DateTime<Utc>) -> Result<Self, AppError> {
        // A assinatura (e o algoritmo dela) pertence ao backend de usuários;
        // aqui só lemos as claims. A expiração é conferida logo abaixo.
        let token_data = insecure_decode::<Claims>(token).map_err(|_| AppError::InvalidToken)?;

        let expires_at = match token_data.claims.exp {
            Some(exp) => Some(DateTime::from_timestamp(exp, 0).ok_or(AppError::InvalidToken)?),
            None => None,
        };

        let session = Self {
            token: token.to_string(),
            subject: token_data.claims.sub,
            expires_at,
        };

        if session.is_expired_at(now) {
            return Err(AppError::SessionExpired);
        }
        Ok(session)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

// O middleware em si
pub async fn auth_guard(
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::MissingToken)
        .map_err(|e| e.to_api_error(&locale))?;

    let session = Session::from_bearer(bearer.token()).map_err(|e| e.to_api_error(&locale))?;

    // Insere a sessão nos "extensions" da requisição
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

// Extrator para obter a sessão diretamente nos handlers
pub struct AuthenticatedSession(pub Session);

impl<S> FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AuthenticatedSession)
            .ok_or(AppError::MissingToken)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};

    /// Token assinado com um segredo qualquer, como o backend faria.
    pub(crate) fn token_for(subject: &str, exp: Option<DateTime<Utc>>) -> String {
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: exp.map(|at| at.timestamp()),
            iat: Some(Utc::now().timestamp()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"segredo-do-backend"),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_builds_session() {
        let exp = Utc::now() + Duration::hours(1);
        let token = token_for("admin@banco.com.br", Some(exp));

        let session = Session::from_bearer(&token).unwrap();
        assert_eq!(session.token(), token);
        assert_eq!(session.subject(), Some("admin@banco.com.br"));
        assert_eq!(session.expires_at().map(|e| e.timestamp()), Some(exp.timestamp()));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = token_for("admin", Some(Utc::now() - Duration::minutes(5)));
        let err = Session::from_bearer(&token).unwrap_err();
        assert!(matches!(err, AppError::SessionExpired));
    }

    #[test]
    fn expiry_is_checked_against_the_given_clock() {
        let exp = Utc::now() + Duration::minutes(10);
        let token = token_for("admin", Some(exp));
        let later = exp + Duration::seconds(1);
        assert!(matches!(
            Session::from_bearer_at(&token, later),
            Err(AppError::SessionExpired)
        ));
    }

    #[test]
    fn token_without_exp_never_expires() {
        let token = token_for("admin", None);
        let session = Session::from_bearer(&token).unwrap();
        assert!(session.expires_at().is_none());
    }

    #[test]
    fn any_signing_algorithm_is_accepted() {
        // {"alg":"RS256"} e {"alg":"ES256"}, payload {"sub":"admin","exp":4102444800}
        let payload = "eyJzdWIiOiJhZG1pbiIsImV4cCI6NDEwMjQ0NDgwMH0";
        for header in [
            "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9",
            "eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9",
        ] {
            let token = format!("{header}.{payload}.YXNzaW5hdHVyYQ");
            let session = Session::from_bearer(&token).unwrap();
            assert_eq!(session.subject(), Some("admin"));
            assert_eq!(session.expires_at().map(|e| e.timestamp()), Some(4102444800));
        }
    }

    #[test]
    fn garbage_is_an_invalid_token() {
        assert!(matches!(
            Session::from_bearer("nao-e-um-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
