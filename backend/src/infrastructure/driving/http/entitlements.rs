use std::collections::HashMap;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{CreateEntitlementRequest, EntitlementResponse, Page};
use url::form_urlencoded;
use uuid::Uuid;
use crate::application::entitlements::commands::{
    create_entitlement, get_entitlement, list_entitlements, revoke_entitlement, CreateEntitlementCommand,
};
use crate::application::ports::{EntitlementFilter, UserRepository};
use crate::domain::entities::Entitlement;
use crate::domain::error::DomainError;
use crate::domain::value_objects::UserId;
use crate::infrastructure::driving::http::error::ApiError;
use crate::infrastructure::driving::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::infrastructure::driving::http::middleware::StaffUser;
use crate::infrastructure::AppState;

pub const ENTITLEMENTS_PATH: &str = "/api/entitlements/v1/entitlements/";
const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 100;

pub fn entitlement_routes() -> Router<AppState> {
    Router::new()
        .route(ENTITLEMENTS_PATH, get(list).post(create))
        .route("/api/entitlements/v1/entitlements/:uuid/", get(retrieve).delete(revoke))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEntitlementsQuery {
    pub user: Option<String>,
    pub course_uuid: Option<Uuid>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

fn to_response(entitlement: &Entitlement, usernames: &HashMap<UserId, String>) -> EntitlementResponse {
    EntitlementResponse {
        uuid: *entitlement.uuid(),
        user: usernames
            .get(entitlement.owner())
            .cloned()
            .unwrap_or_else(|| entitlement.owner().to_string()),
        course_uuid: *entitlement.course_uuid(),
        mode: entitlement.mode().to_string(),
        order_number: entitlement.order_number().to_string(),
        created: entitlement.created_at(),
        expired_at: entitlement.expired_at(),
        enrollment_course_run: entitlement.enrollment().map(|e| e.course_run_id.to_string()),
    }
}

async fn usernames(
    users: &dyn UserRepository,
    entitlements: &[Entitlement],
) -> Result<HashMap<UserId, String>, DomainError> {
    let mut names = HashMap::new();
    for owner in entitlements.iter().map(Entitlement::owner) {
        if names.contains_key(owner) {
            continue;
        }
        if let Some(user) = users.find_by_id(owner).await.map_err(DomainError::storage)? {
            names.insert(*owner, user.username().to_string());
        }
    }
    Ok(names)
}

fn page_link(query: &ListEntitlementsQuery, page: usize, page_size: usize) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    if let Some(user) = &query.user {
        params.append_pair("user", user);
    }
    if let Some(course_uuid) = &query.course_uuid {
        params.append_pair("course_uuid", &course_uuid.to_string());
    }
    params.append_pair("page", &page.to_string());
    params.append_pair("page_size", &page_size.to_string());
    format!("{ENTITLEMENTS_PATH}?{}", params.finish())
}

fn paginate<T>(items: Vec<T>, query: &ListEntitlementsQuery) -> Result<Page<T>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let count = items.len();
    let num_pages = count.div_ceil(page_size).max(1);
    if page > num_pages {
        return Err(DomainError::not_found("Page", page).into());
    }

    let results = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    Ok(Page {
        count,
        next: (page < num_pages).then(|| page_link(query, page + 1, page_size)),
        previous: (page > 1).then(|| page_link(query, page - 1, page_size)),
        results,
    })
}

async fn create(
    State(state): State<AppState>,
    StaffUser(actor): StaffUser,
    ApiJson(payload): ApiJson<CreateEntitlementRequest>,
) -> Result<(StatusCode, Json<EntitlementResponse>), ApiError> {
    let cmd = CreateEntitlementCommand {
        user: payload.user,
        course_uuid: payload.course_uuid,
        mode: payload.mode,
        order_number: payload.order_number,
    };
    let entitlement = create_entitlement::execute(&*state.entitlement_repo, &*state.user_repo, cmd).await?;
    tracing::info!(actor = %actor.username, actor_id = %actor.id, entitlement = %entitlement.uuid(), "Entitlement created via API");

    let names = usernames(&*state.user_repo, std::slice::from_ref(&entitlement)).await?;
    Ok((StatusCode::CREATED, Json(to_response(&entitlement, &names))))
}

async fn list(
    State(state): State<AppState>,
    StaffUser(_actor): StaffUser,
    ApiQuery(query): ApiQuery<ListEntitlementsQuery>,
) -> Result<Json<Page<EntitlementResponse>>, ApiError> {
    let owner = match &query.user {
        Some(username) => match state.user_repo.find_by_username(username).await.map_err(DomainError::storage)? {
            Some(user) => Some(*user.id()),
            // Unknown user owns nothing.
            None => return Ok(Json(paginate(Vec::new(), &query)?)),
        },
        None => None,
    };
    let filter = EntitlementFilter {
        owner,
        course_uuid: query.course_uuid,
    };

    let entitlements = list_entitlements::execute(&*state.entitlement_repo, &filter).await?;
    let page = paginate(entitlements, &query)?;
    let names = usernames(&*state.user_repo, &page.results).await?;
    Ok(Json(Page {
        count: page.count,
        next: page.next,
        previous: page.previous,
        results: page.results.iter().map(|e| to_response(e, &names)).collect(),
    }))
}

async fn retrieve(
    State(state): State<AppState>,
    StaffUser(_actor): StaffUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<EntitlementResponse>, ApiError> {
    let entitlement = get_entitlement::execute(&*state.entitlement_repo, &uuid).await?;
    let names = usernames(&*state.user_repo, std::slice::from_ref(&entitlement)).await?;
    Ok(Json(to_response(&entitlement, &names)))
}

async fn revoke(
    State(state): State<AppState>,
    StaffUser(actor): StaffUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let outcome =
        revoke_entitlement::execute(&*state.entitlement_repo, &*state.enrollment_service, &uuid).await?;
    tracing::info!(
        actor = %actor.username,
        entitlement = %uuid,
        expired = outcome.expired,
        persisted = outcome.persisted,
        "Entitlement revoked via API"
    );
    Ok(StatusCode::NO_CONTENT)
}
