use contracts::domain::a001_restaurant_profile::aggregate::RestaurantProfileDto;
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

const API_PATH: &str = "/api/restaurant/profile";

/// Load the restaurant profile. `None` when the restaurant has not saved one yet.
pub async fn fetch_profile() -> Result<Option<RestaurantProfileDto>, String> {
    let response = Request::get(&api_url(API_PATH))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if response.status() == 404 {
        return Ok(None);
    }
    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: RestaurantProfileDto = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(Some(data))
}

/// Create or update the profile. Send a normalized DTO (no masks).
pub async fn save_profile(dto: &RestaurantProfileDto) -> Result<RestaurantProfileDto, String> {
    let response = Request::put(&api_url(API_PATH))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(if body.trim().is_empty() {
            format!("HTTP error: {}", status)
        } else {
            format!("HTTP error {}: {}", status, body.trim())
        });
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
