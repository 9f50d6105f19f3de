use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_service: i32,
    pub nom: String, // 2 à 100 caractères, validé à la frontière
    pub description: Option<String>, // 500 caractères max
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::avis::Entity")]
    Avis,
}

impl Related<super::avis::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Avis.def()
    }
}

// Many-to-many service <-> etablissement, sens inverse dérivé de la jonction
impl Related<super::etablissement::Entity> for Entity {
    fn to() -> RelationDef {
        super::etablissement_service::Relation::Etablissement.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::etablissement_service::Relation::Service.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
