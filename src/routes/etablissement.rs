use actix_web::{delete, get, put, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::errors::{AppError, SuccessResponse};
use crate::services::etablissement_service::EtablissementService;

/// GET /etablissements - Listing public, statut VALIDE uniquement
#[get("")]
pub async fn get_etablissements(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let etablissements = EtablissementService::get_all_public(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(etablissements))
}

/// GET /etablissements/admin - Tous statuts (ADMIN)
#[get("/admin")]
pub async fn get_etablissements_admin(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let etablissements = EtablissementService::get_all_admin(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(etablissements))
}

/// GET /etablissements/admin/en-attente - File de modération
#[get("/admin/en-attente")]
pub async fn get_etablissements_en_attente(
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let etablissements = EtablissementService::get_en_attente(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(etablissements))
}

/// GET /etablissements/admin/{id} - Détail admin, tous statuts
#[get("/admin/{id}")]
pub async fn get_etablissement_admin_by_id(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let etablissement =
        EtablissementService::get_admin_by_id(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(etablissement))
}

/// PUT /etablissements/admin/{id}/valider - Transition vers VALIDE (ADMIN)
#[put("/admin/{id}/valider")]
pub async fn valider_etablissement(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    EtablissementService::valider(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new("Établissement validé avec succès")))
}

/// PUT /etablissements/admin/{id}/rejeter - Transition vers REJETE (ADMIN)
#[put("/admin/{id}/rejeter")]
pub async fn rejeter_etablissement(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    EtablissementService::rejeter(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new("Établissement rejeté avec succès")))
}

/// DELETE /etablissements/admin/{id} - Suppression avec cascade sur les avis
#[delete("/admin/{id}")]
pub async fn delete_etablissement(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    EtablissementService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new("Établissement supprimé avec succès")))
}

/// GET /etablissements/{id} - Détail public (404 si non VALIDE)
#[get("/{id}")]
pub async fn get_etablissement_by_id(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let etablissement =
        EtablissementService::get_public_by_id(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(etablissement))
}

pub fn etablissement_routes(cfg: &mut web::ServiceConfig) {
    // Les routes /admin/... sont enregistrées avant /{id} pour que
    // "admin" ne soit pas capturé comme un identifiant
    cfg.service(
        web::scope("/etablissements")
            .service(get_etablissements_admin)
            .service(get_etablissements_en_attente)
            .service(get_etablissement_admin_by_id)
            .service(valider_etablissement)
            .service(rejeter_etablissement)
            .service(delete_etablissement)
            .service(get_etablissements)
            .service(get_etablissement_by_id),
    );
}
