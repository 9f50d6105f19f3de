use actix_web::{get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::errors::{AppError, SuccessResponse};
use crate::middleware::AuthUser;
use crate::models::dto::CreateEtablissementRequest;
use crate::services::etablissement_service::EtablissementService;

/// POST /tuteur/etablissement - Créer ou re-soumettre son établissement (TUTEUR)
#[post("/etablissement")]
pub async fn create_etablissement(
    auth_user: AuthUser,
    body: web::Json<CreateEtablissementRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    EtablissementService::create(db.get_ref(), auth_user.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new(
        "Établissement créé avec succès et en attente de validation",
    )))
}

/// PUT /tuteur/etablissement/{id} - Mettre à jour son propre établissement (TUTEUR)
#[put("/etablissement/{id}")]
pub async fn update_etablissement(
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<CreateEtablissementRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    EtablissementService::update(
        db.get_ref(),
        path.into_inner(),
        auth_user.user_id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new("Établissement mis à jour avec succès")))
}

/// GET /tuteur/etablissement - Son établissement, quel que soit le statut (TUTEUR)
#[get("/etablissement")]
pub async fn get_my_etablissement(
    auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let etablissement =
        EtablissementService::get_my_etablissement(db.get_ref(), auth_user.user_id).await?;
    Ok(HttpResponse::Ok().json(etablissement))
}

pub fn tuteur_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tuteur")
            .service(create_etablissement)
            .service(update_etablissement)
            .service(get_my_etablissement),
    );
}
