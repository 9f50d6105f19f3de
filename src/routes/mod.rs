pub mod admin;
pub mod auth;
pub mod avis;
pub mod etablissement;
pub mod health;
pub mod service;
pub mod tuteur;
pub mod user;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health_check)
        .configure(auth::auth_routes)
        .configure(etablissement::etablissement_routes)
        .configure(tuteur::tuteur_routes)
        .configure(service::service_routes)
        .configure(avis::avis_routes)
        .configure(user::user_routes)
        .configure(admin::admin_routes);
}
