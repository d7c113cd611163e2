//! Route search
//!
//! A search is answered by the configured webhook when it responds with at
//! least one offer. Any failure along that path falls back to three generated
//! quotes for the popular rail corridors.

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::database::{self, AppState, SETTINGS_WEBHOOK, TABLE_SETTINGS};
use crate::error::AppError;
use crate::model::{SearchQuery, SearchResult, WebhookSettings};

/// Marker attached to generated offers
pub const FALLBACK_NOTICE: &str = "Test data (webhook unavailable)";

/// Carrier reported for webhook offers
pub const WEBHOOK_CARRIER: &str = "Railway Express";

const WEBHOOK_PRICE_FILTER: &str = "5100";
const WEBHOOK_TRANSIT_DAYS: &str = "35";
const DEFAULT_TRANSIT_DAYS: u32 = 15;
const WEBHOOK_AVAILABLE_CONTAINERS: u32 = 5;

const DANGEROUS_MARKUP: f64 = 1.3;
const MULTI_CONTAINER_FACTOR: f64 = 0.95;

struct Corridor {
    carrier: &'static str,
    base_price: f64,
    transit_days: u32,
}

const CORRIDORS: [Corridor; 3] = [
    Corridor {
        carrier: "China Railways Express",
        base_price: 4750.0,
        transit_days: 15,
    },
    Corridor {
        carrier: "New Silk Road Express",
        base_price: 4700.0,
        transit_days: 18,
    },
    Corridor {
        carrier: "RZD Logistics",
        base_price: 5200.0,
        transit_days: 12,
    },
];

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned status {0}")]
    Status(u16),

    #[error("webhook response malformed: {0}")]
    Malformed(String),

    #[error("no results from webhook")]
    Empty,
}

/// Webhook URL stored by the admin, or the configured default
pub fn current_webhook_url(state: &AppState) -> Result<String, AppError> {
    let stored: Option<WebhookSettings> =
        database::get(&state.db, TABLE_SETTINGS, SETTINGS_WEBHOOK)?;
    Ok(stored
        .map(|settings| settings.webhook_url)
        .unwrap_or_else(|| state.config.default_webhook_url.clone()))
}

pub async fn search(state: &AppState, query: &SearchQuery) -> Result<Vec<SearchResult>, AppError> {
    let webhook_url = current_webhook_url(state)?;
    tracing::debug!(
        origin = %query.origin_port,
        destination = %query.destination_port,
        webhook = %webhook_url,
        "searching routes"
    );

    match fetch_webhook_quotes(&state.http, &webhook_url, query).await {
        Ok(results) => {
            tracing::info!(count = results.len(), "webhook returned offers");
            Ok(results)
        }
        Err(err) => {
            tracing::warn!("Webhook failed, using fallback data: {}", err);
            Ok(fallback_quotes(query))
        }
    }
}

pub async fn fetch_webhook_quotes(
    client: &reqwest::Client,
    url: &str,
    query: &SearchQuery,
) -> Result<Vec<SearchResult>, WebhookError> {
    let etd = query.departure_date_from.to_string();
    let response = client
        .get(url)
        .query(&[
            ("from", query.origin_port.as_str()),
            ("to", query.destination_port.as_str()),
            ("container_size", container_size_param(&query.container_type)),
            ("price", WEBHOOK_PRICE_FILTER),
            ("ETD", etd.as_str()),
            ("TT", WEBHOOK_TRANSIT_DAYS),
        ])
        .send()
        .await?;

    // Only a plain 200 carries offers
    if response.status() != reqwest::StatusCode::OK {
        return Err(WebhookError::Status(response.status().as_u16()));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| WebhookError::Malformed(e.to_string()))?;
    parse_webhook_body(&body, query)
}

/// Converts a `{"result": [...]}` webhook body into offers
pub fn parse_webhook_body(
    body: &Value,
    query: &SearchQuery,
) -> Result<Vec<SearchResult>, WebhookError> {
    let Some(items) = body.get("result").and_then(Value::as_array) else {
        return Err(WebhookError::Empty);
    };

    let results = items
        .iter()
        .map(|item| webhook_offer(item, query))
        .collect::<Result<Vec<_>, _>>()?;

    if results.is_empty() {
        return Err(WebhookError::Empty);
    }
    Ok(results)
}

fn webhook_offer(item: &Value, query: &SearchQuery) -> Result<SearchResult, WebhookError> {
    let id = match item.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    let transit_time_days = number_field(item, "TT")?
        .filter(|days| *days > 0.0)
        .map(|days| days as u32)
        .unwrap_or(DEFAULT_TRANSIT_DAYS);
    let price_from_usd = number_field(item, "price")?.unwrap_or(0.0);

    Ok(SearchResult {
        id,
        origin_port: string_field(item, "from").unwrap_or_else(|| query.origin_port.clone()),
        destination_port: string_field(item, "to")
            .unwrap_or_else(|| query.destination_port.clone()),
        carrier: WEBHOOK_CARRIER.to_string(),
        departure_date_range: departure_range(query),
        transit_time_days,
        container_type: query.container_type.clone(),
        price_from_usd,
        is_dangerous_cargo: query.is_dangerous_cargo,
        available_containers: WEBHOOK_AVAILABLE_CONTAINERS,
        booking_deadline: query.departure_date_from,
        webhook_success: Some(true),
        webhook_error: None,
    })
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Accepts JSON numbers and numeric strings; null or absent is `None`
fn number_field(item: &Value, key: &str) -> Result<Option<f64>, WebhookError> {
    match item.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| WebhookError::Malformed(format!("{key} is not a number: {s}"))),
        Some(other) => Err(WebhookError::Malformed(format!("{key} has type {other}"))),
    }
}

/// Generated offers used when the webhook cannot answer
pub fn fallback_quotes(query: &SearchQuery) -> Vec<SearchResult> {
    let departure_date_range = departure_range(query);

    CORRIDORS
        .iter()
        .enumerate()
        .map(|(index, corridor)| SearchResult {
            id: Uuid::new_v4().to_string(),
            origin_port: query.origin_port.clone(),
            destination_port: query.destination_port.clone(),
            carrier: corridor.carrier.to_string(),
            departure_date_range: departure_date_range.clone(),
            transit_time_days: corridor.transit_days,
            container_type: query.container_type.clone(),
            price_from_usd: quote_price(
                corridor.base_price,
                query.is_dangerous_cargo,
                query.containers_count,
            ),
            is_dangerous_cargo: query.is_dangerous_cargo,
            available_containers: WEBHOOK_AVAILABLE_CONTAINERS + index as u32,
            booking_deadline: query.departure_date_from,
            webhook_success: None,
            webhook_error: Some(FALLBACK_NOTICE.to_string()),
        })
        .collect()
}

/// Dangerous cargo adds 30%; several containers are priced at 95% each.
/// Each step truncates to whole dollars.
pub fn quote_price(base_price: f64, dangerous: bool, containers: u32) -> f64 {
    let mut price = base_price;
    if dangerous {
        price = (price * DANGEROUS_MARKUP).trunc();
    }
    if containers > 1 {
        price = (price * MULTI_CONTAINER_FACTOR * f64::from(containers)).trunc();
    }
    price
}

/// Container size sent to the webhook: "20" or "40"
pub fn container_size_param(container_type: &str) -> &'static str {
    match container_type {
        "40ft" => "40",
        _ => "20",
    }
}

/// "dd.mm - dd.mm.yyyy"
pub fn departure_range(query: &SearchQuery) -> String {
    format!(
        "{} - {}",
        query.departure_date_from.format("%d.%m"),
        query.departure_date_to.format("%d.%m.%Y")
    )
}

/// Stores a new webhook URL, replacing the previous setting
pub fn store_webhook_url(state: &AppState, url: &str) -> Result<WebhookSettings, AppError> {
    let settings = WebhookSettings {
        webhook_url: url.trim().to_string(),
        updated_at: Utc::now(),
    };
    database::put(&state.db, TABLE_SETTINGS, SETTINGS_WEBHOOK, &settings)?;
    Ok(settings)
}
