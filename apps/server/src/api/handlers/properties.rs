//! Listing catalog handlers.

use crate::api::extractors::RequestCancellation;
use crate::error::{ErrorBody, ValidationProblem};
use crate::request_context::RequestContext;
use crate::{state::AppState, Error, Result};
use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
        FromRequest, Multipart, Path, Query, Request, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Form, Json,
};
use estate_catalog::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use estate_catalog::{NewProperty, Pagination, PropertyQuery, PublicProperty, PublicPropertyPage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

/// Search parameters. Numbers arrive as text so that blank values read as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListPropertiesQuery {
    /// Name prefix; case and accents are ignored
    pub name: Option<String>,
    /// Address prefix; case and accents are ignored
    pub address: Option<String>,
    /// Inclusive lower price bound
    pub price_min: Option<String>,
    /// Inclusive upper price bound
    pub price_max: Option<String>,
    /// 1-based page number; values below 1 read as 1
    pub page: Option<String>,
    /// Items per page, clamped to 1..=100
    pub page_size: Option<String>,
}

fn parse_optional<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| Error::BadRequest(format!("The value '{value}' is not valid for {name}."))),
    }
}

impl ListPropertiesQuery {
    fn into_parts(self) -> Result<(PropertyQuery, Pagination)> {
        let price_min = parse_optional::<Decimal>("priceMin", self.price_min.as_deref())?;
        let price_max = parse_optional::<Decimal>("priceMax", self.price_max.as_deref())?;
        let page = parse_optional::<i64>("page", self.page.as_deref())?
            .unwrap_or(DEFAULT_PAGE);
        let page_size = parse_optional::<i64>("pageSize", self.page_size.as_deref())?
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let query = PropertyQuery {
            name: self.name,
            address: self.address,
            price_min,
            price_max,
        };
        Ok((query, Pagination::new(page, page_size)))
    }
}

/// Search listings, ordered by name.
#[utoipa::path(get, path = "/api/properties", tag = "Properties",
    params(ListPropertiesQuery),
    responses(
        (status = 200, description = "One page of matching listings", body = PublicPropertyPage),
        (status = 400, description = "Malformed numeric parameter", body = ErrorBody),
    )
)]
pub async fn list_properties(
    State(state): State<AppState>,
    cancel: RequestCancellation,
    query: std::result::Result<Query<ListPropertiesQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query.map_err(|e| Error::BadRequest(e.body_text()))?;
    let (query, pagination) = query.into_parts()?;

    let page = state
        .catalog
        .find(&query, pagination, cancel.token())
        .await?;

    Ok((StatusCode::OK, Json(page)).into_response())
}

#[utoipa::path(get, path = "/api/properties/{id}", tag = "Properties",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "The listing", body = PublicProperty),
        (status = 404, description = "Unknown or malformed id", body = ErrorBody),
    )
)]
pub async fn get_property(
    State(state): State<AppState>,
    cancel: RequestCancellation,
    Path(id): Path<String>,
) -> Result<Response> {
    match state.catalog.get_by_id(&id, cancel.token()).await? {
        Some(property) => Ok((StatusCode::OK, Json(property)).into_response()),
        None => Err(Error::NotFound),
    }
}

#[utoipa::path(post, path = "/api/properties", tag = "Properties",
    request_body = NewProperty,
    responses(
        (status = 201, description = "Created listing", body = PublicProperty),
        (status = 400, description = "Validation failure", body = ValidationProblem),
        (status = 415, description = "Body is not JSON", body = ErrorBody),
    )
)]
pub async fn create_property(
    State(state): State<AppState>,
    cancel: RequestCancellation,
    context: Option<Extension<RequestContext>>,
    body: std::result::Result<Json<NewProperty>, JsonRejection>,
) -> Result<Response> {
    let Json(new) = body.map_err(|e| Error::rejected(e.status(), e.body_text()))?;
    let created = state.catalog.create(new, cancel.token()).await?;

    if let Some(Extension(ctx)) = context {
        tracing::debug!(request_id = %ctx.request_id, "Created property from JSON");
    }
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Form fields, named as submitted by HTML forms.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PropertyForm {
    #[serde(rename = "IdOwner")]
    pub owner_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "AddressProperty")]
    pub address: String,
    #[serde(rename = "PriceProperty")]
    pub price: String,
    #[serde(rename = "Image")]
    pub image: String,
}

fn multipart_error(e: MultipartError) -> Error {
    Error::rejected(e.status(), e.body_text())
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
        .unwrap_or(false)
}

impl PropertyForm {
    /// Read the known text fields of a multipart body; other parts are skipped.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = PropertyForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let slot = match field.name() {
                Some("IdOwner") => &mut form.owner_id,
                Some("Name") => &mut form.name,
                Some("AddressProperty") => &mut form.address,
                Some("PriceProperty") => &mut form.price,
                Some("Image") => &mut form.image,
                _ => continue,
            };
            *slot = field.text().await.map_err(multipart_error)?;
        }
        Ok(form)
    }

    /// Accept either `multipart/form-data` or `application/x-www-form-urlencoded`.
    async fn from_body(request: Request, state: &AppState) -> Result<Self> {
        if is_multipart(request.headers()) {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|e| Error::rejected(e.status(), e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Form(form) = Form::<PropertyForm>::from_request(request, state)
            .await
            .map_err(|e| Error::rejected(e.status(), e.body_text()))?;
        Ok(form)
    }

    /// Convert to a create request, reporting an unparseable price alongside
    /// any other field failures.
    fn into_new_property(self) -> std::result::Result<NewProperty, ValidationErrors> {
        let price_text = self.price.trim();
        let price = if price_text.is_empty() {
            Ok(Decimal::ZERO)
        } else {
            Decimal::from_str(price_text)
        };

        let new = NewProperty {
            owner_id: self.owner_id,
            name: self.name,
            address: self.address,
            price: *price.as_ref().unwrap_or(&Decimal::ZERO),
            image: self.image,
        };

        if price.is_ok() {
            return Ok(new);
        }

        let mut errors = new.validate().err().unwrap_or_default();
        let mut failure = ValidationError::new("parse");
        failure.message = Some(Cow::Owned(format!(
            "The value '{price_text}' is not valid for PriceProperty."
        )));
        errors.add("price", failure);
        Err(errors)
    }
}

/// Create a listing from an HTML form; multipart bodies are accepted too.
#[utoipa::path(post, path = "/api/properties/form", tag = "Properties",
    request_body(content = PropertyForm, content_type = "application/x-www-form-urlencoded",
        description = "Also accepted as multipart/form-data"),
    responses(
        (status = 201, description = "Created listing", body = PublicProperty),
        (status = 400, description = "Validation failure", body = ValidationProblem),
        (status = 415, description = "Not a form body", body = ErrorBody),
    )
)]
pub async fn create_property_from_form(
    State(state): State<AppState>,
    cancel: RequestCancellation,
    request: Request,
) -> Result<Response> {
    let form = PropertyForm::from_body(request, &state).await?;
    let new = form
        .into_new_property()
        .map_err(|errors| Error::Catalog(errors.into()))?;

    let created = state.catalog.create(new, cancel.token()).await?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GenerateQuery {
    /// Listings to generate, clamped to 1..=50; defaults to 1
    pub count: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratedProperties {
    pub inserted: usize,
    pub items: Vec<PublicProperty>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeedOutcome {
    /// Zero when the catalog already held listings
    pub inserted: u64,
}

#[utoipa::path(post, path = "/api/properties/auto", tag = "Properties",
    params(GenerateQuery),
    responses((status = 201, description = "Generated listings", body = GeneratedProperties))
)]
pub async fn generate_properties(
    State(state): State<AppState>,
    cancel: RequestCancellation,
    query: std::result::Result<Query<GenerateQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query.map_err(|e| Error::BadRequest(e.body_text()))?;
    let items = state
        .catalog
        .create_many(query.count.unwrap_or(1), cancel.token())
        .await?;

    let body = GeneratedProperties {
        inserted: items.len(),
        items,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// Insert the demo listings when the catalog is empty.
#[utoipa::path(post, path = "/api/properties/seed", tag = "Properties",
    responses((status = 200, description = "Number of listings inserted", body = SeedOutcome))
)]
pub async fn seed_properties(
    State(state): State<AppState>,
    cancel: RequestCancellation,
) -> Result<Response> {
    let inserted = state.catalog.seed_if_empty(cancel.token()).await?;
    Ok((StatusCode::OK, Json(SeedOutcome { inserted })).into_response())
}
