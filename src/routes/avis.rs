use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::CreateAvisRequest;
use crate::services::avis_service::AvisService;

/// POST /avis - Déposer un avis (tout rôle authentifié).
/// L'auteur est l'identité du token, jamais un champ de la requête.
#[post("")]
pub async fn create_avis(
    auth_user: AuthUser,
    body: web::Json<CreateAvisRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let avis = AvisService::create(db.get_ref(), auth_user.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(avis))
}

/// GET /avis/etablissement/{id} - Avis d'un établissement (PUBLIC)
#[get("/etablissement/{id}")]
pub async fn get_avis_by_etablissement(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let avis = AvisService::get_by_etablissement(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(avis))
}

/// GET /avis/utilisateur/{id} - Avis déposés par un utilisateur (authentifié)
#[get("/utilisateur/{id}")]
pub async fn get_avis_by_utilisateur(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let avis = AvisService::get_by_utilisateur(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(avis))
}

pub fn avis_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/avis")
            .service(create_avis)
            .service(get_avis_by_etablissement)
            .service(get_avis_by_utilisateur),
    );
}
