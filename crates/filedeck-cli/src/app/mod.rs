pub mod bootstrap;
pub mod state;

pub use bootstrap::AppBootstrap;
pub use state::AppContext;
