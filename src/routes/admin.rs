use actix_web::{delete, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::errors::{AppError, SuccessResponse};
use crate::services::avis_service::AvisService;

/// DELETE /admin/avis/{id} - Modération : retirer un avis (ADMIN)
#[delete("/avis/{id}")]
pub async fn delete_avis(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    AvisService::delete(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new("Avis supprimé avec succès")))
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/admin").service(delete_avis));
}
