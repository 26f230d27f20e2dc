use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use unobot::config::db::DbProfile;
use unobot::config::game::GameConfig;
use unobot::infra::state::build_state;
use unobot::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use unobot::routes;
use unobot::services::LogSink;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let host = std::env::var("UNO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("UNO_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ UNO_PORT must be a valid port number");
            std::process::exit(1);
        });

    let game_config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid game configuration: {e}");
            std::process::exit(1);
        }
    };

    let builder = build_state()
        .with_game_config(game_config)
        .with_sink(Arc::new(LogSink));
    let builder = match std::env::var("UNO_STORE").as_deref() {
        Ok("memory") => builder.with_memory_store(),
        Ok("postgres") | Err(_) => builder.with_db(DbProfile::Prod),
        Ok(other) => {
            eprintln!("❌ UNO_STORE must be `postgres` or `memory`, got `{other}`");
            std::process::exit(1);
        }
    };

    println!("🚀 Starting UNO bot backend on http://{}:{}", host, port);

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Session store ready");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
