// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "pt";

const PT: &[(&str, &str)] = &[
    ("validation_error", "Um ou mais campos são inválidos."),
    ("required", "Campo obrigatório."),
    ("invalid_email", "O e-mail fornecido é inválido."),
    ("password_too_short", "A senha deve ter no mínimo 6 caracteres."),
    ("email_already_exists", "Este e-mail já está em uso."),
    ("invalid_credentials", "E-mail ou senha inválidos."),
    ("invalid_token", "Token de autenticação inválido ou ausente."),
    ("user_not_found", "Usuário não encontrado."),
    ("perfil_sem_acesso", "Seu perfil não tem acesso a esta funcionalidade."),
    ("solicitacao_nao_encontrada", "Solicitação não encontrada."),
    ("prestador_nao_encontrado", "Prestador não encontrado."),
    ("solicitacao_sem_prestadores", "Adicione pelo menos um prestador."),
    ("prestador_sem_identificacao", "Todo prestador precisa de nome e documento."),
    ("periodo_invalido", "A data final não pode ser anterior à data inicial."),
    ("justificativa_obrigatoria", "Justificativa é obrigatória para reprovação ou exceção."),
    ("observacao_obrigatoria", "Observação é obrigatória para negar a liberação."),
    ("status_avaliacao_invalido", "Status de avaliação inválido."),
    ("checagem_pendente", "A checagem deste prestador ainda está pendente."),
    ("documento_ja_cadastrado", "Já existe um prestador com este documento."),
    ("visao_desconhecida", "Visão desconhecida."),
    ("coluna_desconhecida", "Coluna desconhecida."),
    ("arquivo_invalido", "Arquivo inválido."),
    ("timeout", "A consulta demorou demais. Tente novamente."),
    ("internal_error", "Ocorreu um erro inesperado."),
];

const EN: &[(&str, &str)] = &[
    ("validation_error", "One or more fields are invalid."),
    ("required", "Required field."),
    ("invalid_email", "The e-mail provided is invalid."),
    ("password_too_short", "The password must have at least 6 characters."),
    ("email_already_exists", "This e-mail is already in use."),
    ("invalid_credentials", "Invalid e-mail or password."),
    ("invalid_token", "Missing or invalid authentication token."),
    ("user_not_found", "User not found."),
    ("perfil_sem_acesso", "Your profile cannot access this feature."),
    ("solicitacao_nao_encontrada", "Request not found."),
    ("prestador_nao_encontrado", "Provider not found."),
    ("solicitacao_sem_prestadores", "Add at least one provider."),
    ("prestador_sem_identificacao", "Every provider needs a name and a document."),
    ("periodo_invalido", "The end date cannot be before the start date."),
    ("justificativa_obrigatoria", "A justification is required to reject or grant an exception."),
    ("observacao_obrigatoria", "A note is required to deny the release."),
    ("status_avaliacao_invalido", "Invalid evaluation status."),
    ("checagem_pendente", "This provider's background check is still pending."),
    ("documento_ja_cadastrado", "A provider with this document already exists."),
    ("visao_desconhecida", "Unknown view."),
    ("coluna_desconhecida", "Unknown column."),
    ("arquivo_invalido", "Invalid file."),
    ("timeout", "The query took too long. Please try again."),
    ("internal_error", "An unexpected error occurred."),
];

// Mensagens por idioma, chaveadas pelo código do erro
#[derive(Debug)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages = HashMap::new();
        messages.insert("pt", PT.iter().copied().collect());
        messages.insert("en", EN.iter().copied().collect());
        Self { messages }
    }

    /// Idioma desconhecido cai para o português; chave desconhecida volta como está.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.messages
            .get(lang)
            .and_then(|m| m.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idiomas_tem_as_mesmas_chaves() {
        let pt: Vec<_> = PT.iter().map(|(k, _)| *k).collect();
        let en: Vec<_> = EN.iter().map(|(k, _)| *k).collect();
        assert_eq!(pt, en);
    }

    #[test]
    fn fallback_para_portugues_e_para_chave() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "timeout"), store.translate("pt", "timeout"));
        assert_eq!(store.translate("en", "nao_existe"), "nao_existe");
    }
}
