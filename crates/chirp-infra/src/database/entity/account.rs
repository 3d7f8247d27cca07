//! Account entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use chirp_core::domain::{Account, NewAccount};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub subject: String,
    #[sea_orm(unique)]
    pub handle: String,
    #[sea_orm(unique)]
    pub email: String,
    pub active: bool,
    pub registered_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    #[sea_orm(has_many = "super::reply::Entity")]
    Replies,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            subject: model.subject,
            handle: model.handle,
            email: model.email,
            active: model.active,
            registered_at: model.registered_at.into(),
        }
    }
}

/// New rows start active; the id comes from the sequence.
impl From<NewAccount> for ActiveModel {
    fn from(account: NewAccount) -> Self {
        Self {
            id: NotSet,
            subject: Set(account.subject),
            handle: Set(account.handle),
            email: Set(account.email),
            active: Set(true),
            registered_at: Set(account.registered_at.into()),
        }
    }
}
