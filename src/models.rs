pub mod auth;
pub mod dashboard;
pub mod economia;
pub mod exportacao;
pub mod migracao;
pub mod preferencias;
pub mod prestador;
pub mod solicitacao;
pub mod visao;
