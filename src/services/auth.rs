// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UsuarioRepository,
    models::auth::{Claims, CriarUsuarioPayload, Usuario},
};

#[derive(Clone)]
pub struct AuthService {
    usuario_repo: UsuarioRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(usuario_repo: UsuarioRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self { usuario_repo, jwt_secret, pool }
    }

    pub async fn login(&self, email: &str, senha: &str) -> Result<(String, Usuario), AppError> {
        let usuario = self.usuario_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verificar_senha(senha, &usuario.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("🔑 Login de {} ({:?})", usuario.email, usuario.perfil);
        let token = self.create_token(usuario.id)?;
        Ok((token, usuario))
    }

    pub async fn criar_usuario(&self, payload: &CriarUsuarioPayload) -> Result<Usuario, AppError> {
        let password_hash = gerar_hash(&payload.senha).await?;

        let usuario = self.usuario_repo
            .create_usuario(
                &self.pool,
                &payload.nome,
                &payload.email,
                &payload.departamento,
                payload.perfil,
                &password_hash,
            )
            .await?;

        tracing::info!("👤 Usuário criado: {} ({:?})", usuario.email, usuario.perfil);
        Ok(usuario)
    }

    pub async fn listar_usuarios(&self) -> Result<Vec<Usuario>, AppError> {
        self.usuario_repo.list_all().await
    }

    pub async fn alterar_senha(&self, usuario: &Usuario, senha_atual: &str, nova_senha: &str) -> Result<(), AppError> {
        if !verificar_senha(senha_atual, &usuario.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let novo_hash = gerar_hash(nova_senha).await?;
        self.usuario_repo.update_password(usuario.id, &novo_hash).await?;

        tracing::info!("🔒 Senha alterada para {}", usuario.email);
        Ok(())
    }

    pub async fn validate_token(&self, token: &str) -> Result<Usuario, AppError> {
        let claims = decode_token(token, &self.jwt_secret)?;

        self.usuario_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        encode_token(user_id, &self.jwt_secret)
    }
}

fn encode_token(user_id: Uuid, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(7);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref()))?)
}

fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
}

// bcrypt é CPU-bound: roda fora do runtime
async fn gerar_hash(senha: &str) -> Result<String, AppError> {
    let senha = senha.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&senha, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

async fn verificar_senha(senha: &str, password_hash: &str) -> Result<bool, AppError> {
    let senha = senha.to_owned();
    let password_hash = password_hash.to_owned();
    let valida = tokio::task::spawn_blocking(move || verify(&senha, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(valida)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ida_e_volta() {
        let id = Uuid::new_v4();
        let token = encode_token(id, "segredo").unwrap();
        let claims = decode_token(&token, "segredo").unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn token_com_outro_segredo_e_rejeitado() {
        let token = encode_token(Uuid::new_v4(), "segredo").unwrap();
        assert!(matches!(decode_token(&token, "outro"), Err(AppError::InvalidToken)));
        assert!(matches!(decode_token("lixo", "segredo"), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn hash_confere_so_com_a_senha_certa() {
        let hashed = gerar_hash("senha123").await.unwrap();
        assert_ne!(hashed, "senha123");
        assert!(verificar_senha("senha123", &hashed).await.unwrap());
        assert!(!verificar_senha("senha124", &hashed).await.unwrap());
    }
}
