use std::{future::Future, time::Duration};

use sqlx::{Postgres, Transaction};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::auth::AuthenticatedUser;

/// Variável de sessão lida pelo trigger de `log_alteracoes`.
pub(crate) const VARIAVEL_AUDITORIA: &str = "app.usuario_nome";

// ---
// Helper de auditoria: a "assinatura" do usuário na transação
// ---
/// Abre uma transação e grava o nome do usuário da ação para o trigger de
/// `log_alteracoes`. O chamador faz o commit.
pub(crate) async fn get_audited_transaction(
    app_state: &AppState,
    user: &AuthenticatedUser,
) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = app_state.db_pool.begin().await?;

    sqlx::query("SELECT set_config($1, $2, true)")
        .bind(VARIAVEL_AUDITORIA)
        .bind(&user.0.nome)
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

/// Corta consultas lentas com `AppError::Timeout`.
pub(crate) async fn with_timeout<T, F>(limite: Duration, consulta: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limite, consulta).await {
        Ok(resultado) => resultado,
        Err(_) => {
            tracing::warn!("Consulta excedeu o limite de {:?}", limite);
            Err(AppError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn consulta_lenta_vira_timeout() {
        let resultado: Result<(), AppError> = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(resultado, Err(AppError::Timeout)));
    }

    #[tokio::test]
    async fn consulta_rapida_passa_o_resultado() {
        let resultado = with_timeout(Duration::from_secs(1), async { Ok::<_, AppError>(42) }).await;
        assert!(matches!(resultado, Ok(42)));
    }

    #[test]
    fn trigger_le_a_variavel_gravada_na_transacao() {
        let trigger = include_str!("../../migrations/20250110120500_log_alteracoes.sql");
        let lida = format!("current_setting('{}', true)", VARIAVEL_AUDITORIA);

        assert!(trigger.contains(&lida));
        assert_eq!(trigger.matches("current_setting(").count(), 1);
    }
}
