// src/middleware/perfil.rs

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::Perfil,
};

/// Conjunto de perfis que podem executar uma ação.
pub trait PerfilDef: Send + Sync + 'static {
    fn permitidos() -> &'static [Perfil];
}

/// Guardião por perfil. Superadmin sempre passa.
pub struct RequirePerfil<T>(pub PhantomData<T>);

pub fn perfil_permitido<T: PerfilDef>(perfil: Perfil) -> bool {
    perfil == Perfil::Superadmin || T::permitidos().contains(&perfil)
}

impl<T, S> FromRequestParts<S> for RequirePerfil<T>
where
    T: PerfilDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_headers(&parts.headers);

        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or(ApiError {
                status: StatusCode::UNAUTHORIZED,
                error: "Usuário não autenticado".into(),
                details: None,
            })?;

        if !perfil_permitido::<T>(user.0.perfil) {
            tracing::warn!("🚫 {} ({:?}) barrado em {}", user.0.email, user.0.perfil, parts.uri.path());
            return Err(AppError::PerfilSemAcesso.to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequirePerfil(PhantomData))
    }
}

// ---
// PERFIS POR AÇÃO
// ---

pub struct PodeAvaliar;
impl PerfilDef for PodeAvaliar {
    fn permitidos() -> &'static [Perfil] { &[Perfil::Aprovador, Perfil::Administrador] }
}

pub struct PodeLiberar;
impl PerfilDef for PodeLiberar {
    fn permitidos() -> &'static [Perfil] { &[Perfil::Administrador] }
}

pub struct PodeAdministrar;
impl PerfilDef for PodeAdministrar {
    fn permitidos() -> &'static [Perfil] { &[Perfil::Administrador] }
}

pub struct PodeMigrar;
impl PerfilDef for PodeMigrar {
    fn permitidos() -> &'static [Perfil] { &[Perfil::Suporte, Perfil::Administrador] }
}

/// Dashboard e métricas de economia.
pub struct PodeVerIndicadores;
impl PerfilDef for PodeVerIndicadores {
    fn permitidos() -> &'static [Perfil] { &[Perfil::Administrador, Perfil::Gestor] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superadmin_passa_em_tudo() {
        assert!(perfil_permitido::<PodeLiberar>(Perfil::Superadmin));
        assert!(perfil_permitido::<PodeMigrar>(Perfil::Superadmin));
    }

    #[test]
    fn perfis_por_acao() {
        assert!(perfil_permitido::<PodeAvaliar>(Perfil::Aprovador));
        assert!(!perfil_permitido::<PodeAvaliar>(Perfil::Solicitante));
        assert!(!perfil_permitido::<PodeLiberar>(Perfil::Aprovador));
        assert!(perfil_permitido::<PodeMigrar>(Perfil::Suporte));
        assert!(!perfil_permitido::<PodeVerIndicadores>(Perfil::Recepcao));
    }
}
