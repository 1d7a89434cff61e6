// HTTP層 - actix-webによる /api/items エンドポイント

pub mod routes;
pub mod server;
pub mod state;

pub use routes::configure_routes;
pub use server::run_server;
pub use state::AppState;
