use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(nullable)]
    pub created_date: Option<String>,
    #[sea_orm(nullable)]
    pub updated_date: Option<String>,

    #[sea_orm(nullable)]
    pub title: Option<String>,
    #[sea_orm(nullable)]
    pub summary: Option<String>,
    #[sea_orm(nullable)]
    pub content: Option<String>,
    #[sea_orm(nullable)]
    pub category: Option<String>,
    #[sea_orm(nullable)]
    pub author: Option<String>,
    #[sea_orm(nullable)]
    pub publish_date: Option<String>,
    #[sea_orm(nullable)]
    pub is_published: Option<bool>,
    #[sea_orm(nullable)]
    pub is_featured: Option<bool>,
    #[sea_orm(nullable)]
    pub featured_image_url: Option<String>,
    #[sea_orm(nullable)]
    pub external_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
