use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::errors::AppError;
use crate::models::dto::{CreateServiceRequest, ServiceDTO};
use crate::models::{etablissement_service, service};

/// Catalogue plat des services offerts (Pédiatrie, Cardiologie, ...).
/// Les bornes de longueur (nom 2-100, description 500 max) sont validées
/// à la frontière de la requête.
pub struct CatalogueService;

impl CatalogueService {
    pub async fn create(
        db: &DatabaseConnection,
        request: CreateServiceRequest,
    ) -> Result<service::Model, AppError> {
        let nouveau = service::ActiveModel {
            nom: Set(request.nom.clone()),
            description: Set(request.description.clone()),
            ..Default::default()
        };

        Ok(nouveau.insert(db).await?)
    }

    pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<ServiceDTO>, AppError> {
        let services = service::Entity::find().all(db).await?;
        Ok(services.into_iter().map(ServiceDTO::from).collect())
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<ServiceDTO, AppError> {
        let service = service::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Service non trouvé".to_string()))?;

        Ok(ServiceDTO::from(service))
    }

    /// Le service est d'abord détaché de tous les établissements qui le
    /// référencent, puis supprimé, dans la même transaction
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        let existe = service::Entity::find_by_id(id).one(db).await?;
        if existe.is_none() {
            return Err(AppError::NotFound("Service non trouvé".to_string()));
        }

        let txn = db.begin().await?;

        etablissement_service::Entity::delete_many()
            .filter(etablissement_service::Column::IdService.eq(id))
            .exec(&txn)
            .await?;

        service::Entity::delete_many()
            .filter(service::Column::IdService.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        tracing::info!("service {} supprimé et détaché des établissements", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn un_service(id: i32) -> service::Model {
        service::Model {
            id_service: id,
            nom: "Pédiatrie".to_string(),
            description: Some("Soins des enfants".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_service() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![un_service(1)]])
            .into_connection();

        let service = CatalogueService::create(
            &db,
            CreateServiceRequest {
                nom: "Pédiatrie".to_string(),
                description: Some("Soins des enfants".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(service.nom, "Pédiatrie");
    }

    #[tokio::test]
    async fn test_get_by_id_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<service::Model>::new()])
            .into_connection();

        let err = CatalogueService::get_by_id(&db, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_detache_puis_supprime() {
        // Une requête d'existence puis deux DELETE dans la transaction :
        // d'abord les liens de jonction, ensuite la ligne du service
        let exec = MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![un_service(1)]])
            .append_exec_results([exec.clone(), exec])
            .into_connection();

        CatalogueService::delete(&db, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_service_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<service::Model>::new()])
            .into_connection();

        let err = CatalogueService::delete(&db, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
