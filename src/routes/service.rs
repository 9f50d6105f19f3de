use actix_web::{delete, get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::errors::{AppError, SuccessResponse};
use crate::models::dto::CreateServiceRequest;
use crate::services::catalogue_service::CatalogueService;

/// GET /services - Catalogue complet (PUBLIC)
#[get("")]
pub async fn get_services(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let services = CatalogueService::get_all(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(services))
}

/// POST /services/create - Ajouter un service au catalogue (ADMIN)
#[post("/create")]
pub async fn create_service(
    body: web::Json<CreateServiceRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = CatalogueService::create(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(service))
}

/// GET /services/{id} - Détail d'un service (PUBLIC)
#[get("/{id}")]
pub async fn get_service_by_id(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let service = CatalogueService::get_by_id(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(service))
}

/// DELETE /services/{id}/delete - Supprimer un service, détaché d'abord (ADMIN)
#[delete("/{id}/delete")]
pub async fn delete_service(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    CatalogueService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new("Service supprimé avec succès")))
}

pub fn service_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .service(get_services)
            .service(create_service)
            .service(delete_service)
            .service(get_service_by_id),
    );
}
