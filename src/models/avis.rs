use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "avis")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_avis: i32,
    pub note: i32, // 1 à 5, validé à la frontière
    pub commentaire: Option<String>,
    pub date_creation: DateTime, // assignée côté serveur à la création
    // Nullable : l'auteur peut disparaître sans emporter l'avis
    pub id_utilisateur: Option<i32>,
    pub id_service: i32,
    pub id_etablissement: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::utilisateur::Entity",
        from = "Column::IdUtilisateur",
        to = "super::utilisateur::Column::IdUtilisateur"
    )]
    Utilisateur,

    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::IdService",
        to = "super::service::Column::IdService"
    )]
    Service,

    #[sea_orm(
        belongs_to = "super::etablissement::Entity",
        from = "Column::IdEtablissement",
        to = "super::etablissement::Column::IdEtablissement"
    )]
    Etablissement,
}

impl Related<super::utilisateur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Utilisateur.def()
    }
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::etablissement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Etablissement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
