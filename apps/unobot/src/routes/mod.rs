use actix_web::web;

pub mod health;
pub mod uno;

/// Register every route. `main.rs` adds the middleware around these.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Chat commands: /api/uno/{guild_id}/{channel_id}
    cfg.service(web::scope("/api/uno").configure(uno::configure_routes));
}
