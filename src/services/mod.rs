pub mod catalog;
pub mod credentials;
pub mod favorites;

pub use catalog::CatalogService;
pub use credentials::{CredentialService, Session};
pub use favorites::FavoritesLedger;
