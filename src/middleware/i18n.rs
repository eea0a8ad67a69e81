// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

/// Idioma das mensagens de erro, vindo do `Accept-Language`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    pub fn from_header(value: &str) -> Self {
        // Primeiro idioma suportado na ordem de preferência do cliente
        accept_language::parse(value)
            .iter()
            .find_map(|tag| match tag.split('-').next().unwrap_or(tag.as_str()) {
                "pt" => Some(Locale::Pt),
                "en" => Some(Locale::En),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn pick<'a>(&self, pt: &'a str, en: &'a str) -> &'a str {
        match self {
            Locale::Pt => pt,
            Locale::En => en,
        }
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}
