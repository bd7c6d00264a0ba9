use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
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
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub event_date: Option<String>,
    #[sea_orm(nullable)]
    pub start_time: Option<String>,
    #[sea_orm(nullable)]
    pub end_time: Option<String>,
    #[sea_orm(nullable)]
    pub location: Option<String>,
    #[sea_orm(nullable)]
    pub event_type: Option<String>,
    #[sea_orm(nullable)]
    pub registration_required: Option<bool>,
    #[sea_orm(nullable)]
    pub max_attendees: Option<i64>,
    #[sea_orm(nullable)]
    pub registration_deadline: Option<String>,
    #[sea_orm(nullable)]
    pub registration_url: Option<String>,
    #[sea_orm(nullable)]
    pub contact_email: Option<String>,
    #[sea_orm(nullable)]
    pub image_url: Option<String>,
    #[sea_orm(nullable)]
    pub is_featured: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
