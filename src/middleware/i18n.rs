// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Idiomas que o workspace suporta; o primeiro é o padrão.
const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "es"];

// Extrator de idioma: resolve o Accept-Language da requisição contra a lista
// suportada. Alimenta o idioma padrão das configurações no primeiro acesso.
pub struct Locale(pub String);

/// Percorre as preferências do cliente em ordem e devolve o primeiro idioma
/// suportado, comparando só o subtag primário ("es-MX" conta como "es").
fn negotiate(header_value: &str) -> Option<String> {
    accept_language::parse(header_value)
        .into_iter()
        .filter_map(|tag| tag.split('-').next().map(str::to_string))
        .find(|primary| SUPPORTED_LANGUAGES.contains(&primary.as_str()))
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(negotiate)
            .unwrap_or_else(|| SUPPORTED_LANGUAGES[0].to_string());

        Ok(Locale(lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_supported_language() {
        assert_eq!(negotiate("es-MX,es;q=0.9,en;q=0.8"), Some("es".to_string()));
        assert_eq!(negotiate("en-US,en;q=0.5"), Some("en".to_string()));
    }

    #[test]
    fn skips_unsupported_preferences() {
        assert_eq!(negotiate("fr-FR,fr;q=0.9,es;q=0.4"), Some("es".to_string()));
        assert_eq!(negotiate("fr-FR,de;q=0.9"), None);
        assert_eq!(negotiate(""), None);
    }
}
