use super::query::{apply_query, new_record_id, now_rfc3339};
use crate::gateway::{FieldPredicate, GatewayError, SortSpec};
use crate::model::{EventDetails, EventType, Record};
use crate::storage::entity::event::{ActiveModel as EventActiveModel, Entity as Event, Model};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

impl From<Model> for Record<EventDetails> {
    fn from(m: Model) -> Self {
        Record {
            id: m.id,
            created_date: m.created_date,
            updated_date: m.updated_date,
            data: EventDetails {
                title: m.title,
                description: m.description,
                event_date: m.event_date,
                start_time: m.start_time,
                end_time: m.end_time,
                location: m.location,
                event_type: m.event_type.map(EventType::from),
                registration_required: m.registration_required,
                max_attendees: m.max_attendees.and_then(|n| u32::try_from(n).ok()),
                registration_deadline: m.registration_deadline,
                registration_url: m.registration_url,
                contact_email: m.contact_email,
                image_url: m.image_url,
                is_featured: m.is_featured,
            },
        }
    }
}

fn active_model(
    id: String,
    created_date: Option<String>,
    updated_date: Option<String>,
    d: &EventDetails,
) -> EventActiveModel {
    EventActiveModel {
        id: Set(id),
        created_date: Set(created_date),
        updated_date: Set(updated_date),
        title: Set(d.title.clone()),
        description: Set(d.description.clone()),
        event_date: Set(d.event_date.clone()),
        start_time: Set(d.start_time.clone()),
        end_time: Set(d.end_time.clone()),
        location: Set(d.location.clone()),
        event_type: Set(d.event_type.map(String::from)),
        registration_required: Set(d.registration_required),
        max_attendees: Set(d.max_attendees.map(i64::from)),
        registration_deadline: Set(d.registration_deadline.clone()),
        registration_url: Set(d.registration_url.clone()),
        contact_email: Set(d.contact_email.clone()),
        image_url: Set(d.image_url.clone()),
        is_featured: Set(d.is_featured),
    }
}

pub struct EventRepository;

impl EventRepository {
    pub async fn find(
        db: &DatabaseConnection,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<EventDetails>>, GatewayError> {
        let rows = apply_query(Event::find(), predicates, sort)?.all(db).await?;
        Ok(rows.into_iter().map(Record::from).collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        data: &EventDetails,
    ) -> Result<Record<EventDetails>, GatewayError> {
        let now = now_rfc3339();
        let model = active_model(new_record_id(), Some(now.clone()), Some(now), data)
            .insert(db)
            .await?;
        Ok(model.into())
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        data: &EventDetails,
    ) -> Result<Record<EventDetails>, GatewayError> {
        let existing = Event::find_by_id(id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| GatewayError::NotFound {
                kind: "Event",
                id: id.to_string(),
            })?;
        let model = active_model(
            existing.id,
            existing.created_date,
            Some(now_rfc3339()),
            data,
        )
        .update(db)
        .await?;
        Ok(model.into())
    }

    pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<(), GatewayError> {
        let res = Event::delete_by_id(id.to_string()).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(GatewayError::NotFound {
                kind: "Event",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
