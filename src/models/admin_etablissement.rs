use sea_orm::entity::prelude::*;

/// Table de jonction administrateur <-> etablissement (ensemble administré)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_etablissement")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_etablissement: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id_admin: i32,
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
        belongs_to = "super::utilisateur::Entity",
        from = "Column::IdAdmin",
        to = "super::utilisateur::Column::IdUtilisateur"
    )]
    Admin,
}

impl ActiveModelBehavior for ActiveModel {}
