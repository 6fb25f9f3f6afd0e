pub mod auth;
pub mod busca;
pub mod dashboard_service;
pub mod economia;
pub mod economia_service;
pub mod export_service;
pub mod migracao_service;
pub mod preferencias_service;
pub mod prestador_service;
pub mod prioridade;
pub mod solicitacao_service;
pub mod status;
pub mod visao_service;

#[cfg(test)]
mod fixtures;
