// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::common::i18n::DEFAULT_LANG;

// Idioma da resposta, vindo do Accept-Language
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Locale {
    pub fn padrao() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }

    /// "pt-BR,en;q=0.8" -> "pt". Sem cabeçalho: idioma padrão.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|valor| valor.to_str().ok())
            .and_then(|texto| {
                accept_language::parse(texto)
                    .first()
                    .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
            })
            .map(Locale)
            .unwrap_or_else(Self::padrao)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extrair(accept_language: Option<&str>) -> String {
        let mut req = Request::builder();
        if let Some(valor) = accept_language {
            req = req.header(header::ACCEPT_LANGUAGE, valor);
        }
        let (mut parts, _) = req.body(()).unwrap().into_parts();
        let Ok(locale) = Locale::from_request_parts(&mut parts, &()).await;
        locale.0
    }

    #[tokio::test]
    async fn pega_o_idioma_de_maior_peso() {
        assert_eq!(extrair(Some("en-US,en;q=0.9,pt;q=0.8")).await, "en");
        assert_eq!(extrair(Some("pt-BR")).await, "pt");
        assert_eq!(extrair(Some("fr;q=0.5, en;q=0.9")).await, "en");
    }

    #[tokio::test]
    async fn sem_cabecalho_usa_portugues() {
        assert_eq!(extrair(None).await, "pt");
    }
}
