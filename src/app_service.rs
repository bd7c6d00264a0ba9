use crate::app_state::AppEvent;
use crate::commands::EntityTarget;
use crate::gateway::{EntityGateway, FieldPredicate, Gateway, GatewayError, SortSpec};
use crate::model::{AlumniProfile, EntityKind, EventDetails, NewsArticle, Record};
use crate::query::{DashboardSnapshot, QueryContext};
use log::{error, info};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Work for the background gateway task.
#[derive(Debug, Clone)]
pub enum ServiceRequest {
    LoadDashboard,
    LoadAlumni,
    LoadEvents,
    LoadNews,
    CreateAlumni(AlumniProfile),
    UpdateAlumni { id: String, data: AlumniProfile },
    CreateEvent(EventDetails),
    UpdateEvent { id: String, data: EventDetails },
    DeleteEvent { id: String },
    /// Uploads the file, then saves `data` with the returned `image_url`.
    UploadEventImage {
        id: String,
        path: PathBuf,
        data: EventDetails,
    },
    CreateNews(NewsArticle),
    UpdateNews { id: String, data: NewsArticle },
}

/// Full collection in the kind's default order.
pub async fn load_collection<T, G>(gw: &G) -> Result<Vec<Record<T>>, GatewayError>
where
    T: EntityKind,
    G: EntityGateway<T> + ?Sized,
{
    gw.list(&SortSpec::default_for::<T>()).await
}

/// Events dated today or later, soonest first.
pub async fn upcoming_events<G>(
    gw: &G,
    ctx: &QueryContext,
) -> Result<Vec<Record<EventDetails>>, GatewayError>
where
    G: EntityGateway<EventDetails> + ?Sized,
{
    gw.filter(
        &[FieldPredicate::gte("event_date", ctx.today_iso())],
        &SortSpec::ascending("event_date"),
    )
    .await
}

pub async fn load_dashboard<G: Gateway + ?Sized>(
    gw: &G,
    ctx: &QueryContext,
) -> Result<DashboardSnapshot, GatewayError> {
    let (alumni, events, upcoming, news) = futures::join!(
        load_collection::<AlumniProfile, G>(gw),
        load_collection::<EventDetails, G>(gw),
        upcoming_events(gw, ctx),
        load_collection::<NewsArticle, G>(gw),
    );
    Ok(DashboardSnapshot::assemble(
        alumni?, events?, upcoming?, news?, ctx,
    ))
}

async fn upload_event_image<G: Gateway + ?Sized>(
    gw: &G,
    id: &str,
    path: PathBuf,
    mut data: EventDetails,
) -> Result<Record<EventDetails>, GatewayError> {
    let bytes = tokio::fs::read(&path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.bin".to_string());
    let url = gw.upload(&file_name, bytes).await?;
    data.image_url = Some(url);
    <G as EntityGateway<EventDetails>>::update(gw, id, &data).await
}

fn mutation_result<T>(
    tx: &mpsc::UnboundedSender<AppEvent>,
    target: EntityTarget,
    action: &str,
    result: Result<T, GatewayError>,
    describe: impl FnOnce(&T) -> String,
) {
    match result {
        Ok(v) => {
            let message = format!("{} {}", action, describe(&v));
            info!("{}", message);
            let _ = tx.send(AppEvent::MutationDone { target, message });
        }
        Err(e) => {
            error!("{} failed: {}", action, e);
            let _ = tx.send(AppEvent::MutationFailed {
                target,
                error: format!("{} failed: {}", action, e),
            });
        }
    }
}

/// Runs one request against the gateway and reports the outcome as events.
pub async fn handle_request<G: Gateway + ?Sized>(
    gw: &G,
    req: ServiceRequest,
    ctx: &QueryContext,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    fn stringify<T>(r: Result<T, GatewayError>) -> Result<T, String> {
        r.map_err(|e| e.to_string())
    }

    match req {
        ServiceRequest::LoadDashboard => {
            let res = load_dashboard(gw, ctx).await;
            let _ = tx.send(AppEvent::Dashboard(stringify(res)));
        }
        ServiceRequest::LoadAlumni => {
            let res = load_collection::<AlumniProfile, G>(gw).await;
            let _ = tx.send(AppEvent::AlumniLoaded(stringify(res)));
        }
        ServiceRequest::LoadEvents => {
            let res = load_collection::<EventDetails, G>(gw).await;
            let _ = tx.send(AppEvent::EventsLoaded(stringify(res)));
        }
        ServiceRequest::LoadNews => {
            let res = load_collection::<NewsArticle, G>(gw).await;
            let _ = tx.send(AppEvent::NewsLoaded(stringify(res)));
        }
        ServiceRequest::CreateAlumni(data) => {
            let res = <G as EntityGateway<AlumniProfile>>::create(gw, &data).await;
            mutation_result(tx, EntityTarget::Alumni, "created alumni", res, |r| {
                format!("{} [{}]", r.data.display_name(), r.id)
            });
        }
        ServiceRequest::UpdateAlumni { id, data } => {
            let res = <G as EntityGateway<AlumniProfile>>::update(gw, &id, &data).await;
            mutation_result(tx, EntityTarget::Alumni, "updated alumni", res, |r| {
                format!("[{}]", r.id)
            });
        }
        ServiceRequest::CreateEvent(data) => {
            let res = <G as EntityGateway<EventDetails>>::create(gw, &data).await;
            mutation_result(tx, EntityTarget::Event, "created event", res, |r| {
                format!("[{}]", r.id)
            });
        }
        ServiceRequest::UpdateEvent { id, data } => {
            let res = <G as EntityGateway<EventDetails>>::update(gw, &id, &data).await;
            mutation_result(tx, EntityTarget::Event, "updated event", res, |r| {
                format!("[{}]", r.id)
            });
        }
        ServiceRequest::DeleteEvent { id } => {
            let res = <G as EntityGateway<EventDetails>>::delete(gw, &id).await;
            mutation_result(tx, EntityTarget::Event, "deleted event", res, |_| {
                format!("[{}]", id)
            });
        }
        ServiceRequest::UploadEventImage { id, path, data } => {
            let res = upload_event_image(gw, &id, path, data).await;
            mutation_result(tx, EntityTarget::Event, "set event image", res, |r| {
                format!("[{}] {}", r.id, r.data.image_url.as_deref().unwrap_or_default())
            });
        }
        ServiceRequest::CreateNews(data) => {
            let res = <G as EntityGateway<NewsArticle>>::create(gw, &data).await;
            mutation_result(tx, EntityTarget::News, "created news", res, |r| {
                format!("[{}]", r.id)
            });
        }
        ServiceRequest::UpdateNews { id, data } => {
            let res = <G as EntityGateway<NewsArticle>>::update(gw, &id, &data).await;
            mutation_result(tx, EntityTarget::News, "updated news", res, |r| {
                format!("[{}]", r.id)
            });
        }
    }
}
