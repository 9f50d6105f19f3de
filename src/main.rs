mod db;
mod errors;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::from_fn, middleware::Logger, web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use crate::middleware::access::access_gate;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🔌 Connexion à la base de données...");
    let db = db::establish_connection()
        .await
        .expect("Failed to connect to database");
    tracing::info!("✅ Base de données connectée");

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    tracing::info!("🚀 Démarrage du serveur sur http://127.0.0.1:{}", port);

    let db_data = web::Data::new(db);

    HttpServer::new(move || {
        App::new()
            .app_data(db_data.clone())
            .wrap(from_fn(access_gate))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(routes::configure_routes)
    })
        .bind(("127.0.0.1", port))?
        .run()
        .await
}
