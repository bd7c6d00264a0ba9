use super::query::{apply_query, new_record_id, now_rfc3339};
use crate::gateway::{FieldPredicate, GatewayError, SortSpec};
use crate::model::{NewsArticle, NewsCategory, Record};
use crate::storage::entity::news::{ActiveModel as NewsActiveModel, Entity as News, Model};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

impl From<Model> for Record<NewsArticle> {
    fn from(m: Model) -> Self {
        Record {
            id: m.id,
            created_date: m.created_date,
            updated_date: m.updated_date,
            data: NewsArticle {
                title: m.title,
                summary: m.summary,
                content: m.content,
                category: m.category.map(NewsCategory::from),
                author: m.author,
                publish_date: m.publish_date,
                is_published: m.is_published,
                is_featured: m.is_featured,
                featured_image_url: m.featured_image_url,
                external_url: m.external_url,
            },
        }
    }
}

fn active_model(
    id: String,
    created_date: Option<String>,
    updated_date: Option<String>,
    d: &NewsArticle,
) -> NewsActiveModel {
    NewsActiveModel {
        id: Set(id),
        created_date: Set(created_date),
        updated_date: Set(updated_date),
        title: Set(d.title.clone()),
        summary: Set(d.summary.clone()),
        content: Set(d.content.clone()),
        category: Set(d.category.map(String::from)),
        author: Set(d.author.clone()),
        publish_date: Set(d.publish_date.clone()),
        is_published: Set(d.is_published),
        is_featured: Set(d.is_featured),
        featured_image_url: Set(d.featured_image_url.clone()),
        external_url: Set(d.external_url.clone()),
    }
}

pub struct NewsRepository;

impl NewsRepository {
    pub async fn find(
        db: &DatabaseConnection,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<NewsArticle>>, GatewayError> {
        let rows = apply_query(News::find(), predicates, sort)?.all(db).await?;
        Ok(rows.into_iter().map(Record::from).collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        data: &NewsArticle,
    ) -> Result<Record<NewsArticle>, GatewayError> {
        let now = now_rfc3339();
        let model = active_model(new_record_id(), Some(now.clone()), Some(now), data)
            .insert(db)
            .await?;
        Ok(model.into())
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        data: &NewsArticle,
    ) -> Result<Record<NewsArticle>, GatewayError> {
        let existing = News::find_by_id(id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| GatewayError::NotFound {
                kind: "News",
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
        let res = News::delete_by_id(id.to_string()).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(GatewayError::NotFound {
                kind: "News",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
