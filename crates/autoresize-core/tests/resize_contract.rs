//! Integration tests for the resize contract as seen from the widget:
//! viewport → grid-aligned size → request URL → response body → status text.

use autoresize_core::protocol::resize_url;
use autoresize_core::{quantize, ApiEndpoint, ResizeResponse, Size, StatusMessage};
use serde_json::json;

#[test]
fn test_quantized_viewport_produces_grid_aligned_query() {
    let endpoint = ApiEndpoint::for_host("192.168.1.20");
    let size = quantize(1365, 767);

    let url = resize_url(&endpoint, size);

    assert_eq!(url, "http://192.168.1.20:6081/resize?width=1360&height=760");
}

#[test]
fn test_successful_body_maps_to_size_status() {
    let size = quantize(1024, 768);
    let body = json!({"success": true, "width": 1024, "height": 768});

    let outcome = ResizeResponse::from_json(&body).into_outcome(size);

    assert_eq!(StatusMessage::for_outcome(&outcome).to_string(), "1024x768");
}

#[test]
fn test_server_error_body_maps_to_failure_status() {
    let body = json!({"error": "Resize failed"});

    let outcome = ResizeResponse::from_json(&body).into_outcome(Size::new(640, 480));

    assert!(!outcome.is_success());
    assert_eq!(StatusMessage::for_outcome(&outcome).to_string(), "Resize failed");
}
