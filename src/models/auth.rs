// src/models/auth.rs

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "admin@banco.com.br")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve conter ao menos 6 caracteres."))]
    #[schema(example = "segredo123")]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Cadastro de um novo usuário (só administradores).
// Empresa e CNPJ não vêm do cliente: são sempre os do administrador logado.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "leitor@banco.com.br")]
    pub email: String,

    #[validate(length(min = 3, message = "Nome de usuário deve ter ao menos 3 caracteres"))]
    #[schema(example = "leitor")]
    pub username: String,

    #[validate(length(min = 6, message = "A senha deve conter ao menos 6 caracteres"))]
    pub password: String,

    #[validate(length(min = 1, message = "Selecione uma permissão"))]
    pub roles: Vec<String>,
}

// Alteração do nome de usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfilePayload {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "novo_nome")]
    pub username: String,
}

// Troca de senha
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    #[validate(length(min = 6, message = "A senha deve conter ao menos 6 caracteres"))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "As senhas não coincidem"))]
    pub confirm_password: String,
}

// Estrutura de dados ("claims") dentro do JWT emitido pelo backend de usuários.
// Só lemos o que precisamos; o resto é ignorado.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("O campo não pode ser vazio")));
    }
    Ok(())
}
