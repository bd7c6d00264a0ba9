use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alumni")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(nullable)]
    pub created_date: Option<String>,
    #[sea_orm(nullable)]
    pub updated_date: Option<String>,

    #[sea_orm(nullable)]
    pub first_name: Option<String>,
    #[sea_orm(nullable)]
    pub last_name: Option<String>,
    #[sea_orm(nullable)]
    pub email: Option<String>,
    #[sea_orm(nullable)]
    pub phone: Option<String>,
    #[sea_orm(nullable)]
    pub graduation_year: Option<i32>,
    #[sea_orm(nullable)]
    pub degree: Option<String>,
    #[sea_orm(nullable)]
    pub major: Option<String>,
    #[sea_orm(nullable)]
    pub current_company: Option<String>,
    #[sea_orm(nullable)]
    pub current_position: Option<String>,
    #[sea_orm(nullable)]
    pub industry: Option<String>,
    #[sea_orm(nullable)]
    pub location: Option<String>,
    #[sea_orm(nullable)]
    pub bio: Option<String>,
    #[sea_orm(nullable)]
    pub linkedin_url: Option<String>,
    #[sea_orm(nullable)]
    pub profile_photo_url: Option<String>,
    // JSON array
    pub tags_json: String,
    #[sea_orm(nullable)]
    pub is_active: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
