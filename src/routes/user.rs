use actix_web::{get, web, HttpResponse};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::AppError;
use crate::models::dto::UtilisateurDTO;
use crate::models::utilisateur;

/// GET /user/all - Tous les utilisateurs, rôle aplati (ADMIN)
#[get("/all")]
pub async fn get_all_users(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, AppError> {
    let utilisateurs = utilisateur::Entity::find().all(db.get_ref()).await?;

    let dtos: Vec<UtilisateurDTO> = utilisateurs.into_iter().map(UtilisateurDTO::from).collect();
    Ok(HttpResponse::Ok().json(dtos))
}

/// GET /user/{id} - Un utilisateur (ADMIN)
#[get("/{id}")]
pub async fn get_user_by_id(
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, AppError> {
    let utilisateur = utilisateur::Entity::find_by_id(path.into_inner())
        .one(db.get_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("Utilisateur non trouvé".to_string()))?;

    Ok(HttpResponse::Ok().json(UtilisateurDTO::from(utilisateur)))
}

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(get_all_users)
            .service(get_user_by_id),
    );
}
