pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
pub mod solicitacao_repo;
pub use solicitacao_repo::SolicitacaoRepository;
pub mod prestador_repo;
pub use prestador_repo::PrestadorRepository;
pub mod economia_repo;
pub use economia_repo::EconomiaRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod preferencias_repo;
pub use preferencias_repo::PreferenciasRepository;
