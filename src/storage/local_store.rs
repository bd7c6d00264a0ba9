use super::repository::{AlumniRepository, EventRepository, NewsRepository};
use crate::gateway::{EntityGateway, FieldPredicate, FileUploader, Gateway, GatewayError, SortSpec};
use crate::model::{AlumniProfile, EventDetails, NewsArticle, Record};
use async_trait::async_trait;
use log::info;
use sea_orm::DatabaseConnection;
use std::path::PathBuf;
use std::sync::Arc;

/// Gateway backed by the local SQLite database and an uploads directory.
pub struct LocalStore {
    db: Arc<DatabaseConnection>,
    upload_dir: PathBuf,
}

impl LocalStore {
    pub fn new(db: Arc<DatabaseConnection>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            upload_dir: upload_dir.into(),
        }
    }
}

#[async_trait]
impl EntityGateway<AlumniProfile> for LocalStore {
    async fn list(&self, sort: &SortSpec) -> Result<Vec<Record<AlumniProfile>>, GatewayError> {
        AlumniRepository::find(&self.db, &[], sort).await
    }

    async fn filter(
        &self,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<AlumniProfile>>, GatewayError> {
        AlumniRepository::find(&self.db, predicates, sort).await
    }

    async fn create(&self, data: &AlumniProfile) -> Result<Record<AlumniProfile>, GatewayError> {
        let rec = AlumniRepository::insert(&self.db, data).await?;
        info!("local create Alumni [{}]", rec.id);
        Ok(rec)
    }

    async fn update(
        &self,
        id: &str,
        data: &AlumniProfile,
    ) -> Result<Record<AlumniProfile>, GatewayError> {
        AlumniRepository::update(&self.db, id, data).await
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        AlumniRepository::delete(&self.db, id).await
    }
}

#[async_trait]
impl EntityGateway<EventDetails> for LocalStore {
    async fn list(&self, sort: &SortSpec) -> Result<Vec<Record<EventDetails>>, GatewayError> {
        EventRepository::find(&self.db, &[], sort).await
    }

    async fn filter(
        &self,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<EventDetails>>, GatewayError> {
        EventRepository::find(&self.db, predicates, sort).await
    }

    async fn create(&self, data: &EventDetails) -> Result<Record<EventDetails>, GatewayError> {
        let rec = EventRepository::insert(&self.db, data).await?;
        info!("local create Event [{}]", rec.id);
        Ok(rec)
    }

    async fn update(
        &self,
        id: &str,
        data: &EventDetails,
    ) -> Result<Record<EventDetails>, GatewayError> {
        EventRepository::update(&self.db, id, data).await
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        EventRepository::delete(&self.db, id).await
    }
}

#[async_trait]
impl EntityGateway<NewsArticle> for LocalStore {
    async fn list(&self, sort: &SortSpec) -> Result<Vec<Record<NewsArticle>>, GatewayError> {
        NewsRepository::find(&self.db, &[], sort).await
    }

    async fn filter(
        &self,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<NewsArticle>>, GatewayError> {
        NewsRepository::find(&self.db, predicates, sort).await
    }

    async fn create(&self, data: &NewsArticle) -> Result<Record<NewsArticle>, GatewayError> {
        let rec = NewsRepository::insert(&self.db, data).await?;
        info!("local create News [{}]", rec.id);
        Ok(rec)
    }

    async fn update(
        &self,
        id: &str,
        data: &NewsArticle,
    ) -> Result<Record<NewsArticle>, GatewayError> {
        NewsRepository::update(&self.db, id, data).await
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        NewsRepository::delete(&self.db, id).await
    }
}

/// Keeps only the final path component, so names like `../x.png` stay
/// inside the uploads directory.
fn safe_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload.bin".to_string()
    } else {
        base.to_string()
    }
}

#[async_trait]
impl FileUploader for LocalStore {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, GatewayError> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let stored = format!(
            "{}-{}",
            super::repository::query::new_record_id(),
            safe_file_name(file_name)
        );
        let path = self.upload_dir.join(stored);
        tokio::fs::write(&path, &bytes).await?;
        info!("local upload [{} bytes] -> {}", bytes.len(), path.display());
        Ok(format!("file://{}", path.display()))
    }
}

impl Gateway for LocalStore {
    fn describe(&self) -> String {
        format!("local store (uploads in {})", self.upload_dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_names_are_reduced_to_their_last_component() {
        assert_eq!(safe_file_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_file_name(r"C:\photos\gala.jpg"), "gala.jpg");
        assert_eq!(safe_file_name(".."), "upload.bin");
        assert_eq!(safe_file_name("banner.png"), "banner.png");
    }
}
