use sea_orm::entity::prelude::*;

/// Table de jonction etablissement <-> service.
/// C'est le sens faisant foi de la relation : l'ensemble des services
/// d'un établissement est remplacé en bloc à chaque création/mise à jour.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "etablissement_service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_etablissement: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_service: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::etablissement::Entity",
        from = "Column::IdEtablissement",
        to = "super::etablissement::Column::IdEtablissement"
    )]
    Etablissement,

    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::IdService",
        to = "super::service::Column::IdService"
    )]
    Service,
}

impl ActiveModelBehavior for ActiveModel {}
