use super::query::{apply_query, new_record_id, now_rfc3339};
use crate::gateway::{FieldPredicate, GatewayError, SortSpec};
use crate::model::{AlumniProfile, Record};
use crate::storage::entity::alumni::{ActiveModel as AlumniActiveModel, Entity as Alumni, Model};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

impl From<Model> for Record<AlumniProfile> {
    fn from(m: Model) -> Self {
        Record {
            id: m.id,
            created_date: m.created_date,
            updated_date: m.updated_date,
            data: AlumniProfile {
                first_name: m.first_name,
                last_name: m.last_name,
                email: m.email,
                phone: m.phone,
                graduation_year: m.graduation_year,
                degree: m.degree,
                major: m.major,
                current_company: m.current_company,
                current_position: m.current_position,
                industry: m.industry,
                location: m.location,
                bio: m.bio,
                linkedin_url: m.linkedin_url,
                profile_photo_url: m.profile_photo_url,
                tags: serde_json::from_str(&m.tags_json).unwrap_or_default(),
                is_active: m.is_active.into(),
            },
        }
    }
}

fn active_model(
    id: String,
    created_date: Option<String>,
    updated_date: Option<String>,
    d: &AlumniProfile,
) -> Result<AlumniActiveModel, GatewayError> {
    Ok(AlumniActiveModel {
        id: Set(id),
        created_date: Set(created_date),
        updated_date: Set(updated_date),
        first_name: Set(d.first_name.clone()),
        last_name: Set(d.last_name.clone()),
        email: Set(d.email.clone()),
        phone: Set(d.phone.clone()),
        graduation_year: Set(d.graduation_year),
        degree: Set(d.degree.clone()),
        major: Set(d.major.clone()),
        current_company: Set(d.current_company.clone()),
        current_position: Set(d.current_position.clone()),
        industry: Set(d.industry.clone()),
        location: Set(d.location.clone()),
        bio: Set(d.bio.clone()),
        linkedin_url: Set(d.linkedin_url.clone()),
        profile_photo_url: Set(d.profile_photo_url.clone()),
        tags_json: Set(serde_json::to_string(&d.tags)?),
        is_active: Set(d.is_active.into()),
    })
}

pub struct AlumniRepository;

impl AlumniRepository {
    pub async fn find(
        db: &DatabaseConnection,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<AlumniProfile>>, GatewayError> {
        let rows = apply_query(Alumni::find(), predicates, sort)?.all(db).await?;
        Ok(rows.into_iter().map(Record::from).collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        data: &AlumniProfile,
    ) -> Result<Record<AlumniProfile>, GatewayError> {
        let now = now_rfc3339();
        let model = active_model(new_record_id(), Some(now.clone()), Some(now), data)?
            .insert(db)
            .await?;
        Ok(model.into())
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        data: &AlumniProfile,
    ) -> Result<Record<AlumniProfile>, GatewayError> {
        let existing = Alumni::find_by_id(id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| GatewayError::NotFound {
                kind: "Alumni",
                id: id.to_string(),
            })?;
        let model = active_model(
            existing.id,
            existing.created_date,
            Some(now_rfc3339()),
            data,
        )?
        .update(db)
        .await?;
        Ok(model.into())
    }

    pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), GatewayError> {
        let res = Alumni::delete_by_id(id.to_string()).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(GatewayError::NotFound {
                kind: "Alumni",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
