pub mod auth;
pub mod dashboard;
pub mod economias;
pub mod exportacao;
pub mod migracao;
pub mod preferencias;
pub mod prestadores;
pub mod solicitacoes;
pub mod visoes;
