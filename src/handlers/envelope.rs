//! Success response envelope
//!
//! Every success body is `{"success": true, "message"?, "data"?}`; the error
//! counterpart (`{"success": false, "error"}`) lives in [`crate::error`].

use serde::Serialize;

/// Success envelope wrapping a response payload
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Wrap a payload with a human-readable message
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// Pagination metadata attached to list responses
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Normalize caller-supplied pagination parameters
pub fn page_params(page: Option<u32>, per_page: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page
        .unwrap_or(crate::constants::DEFAULT_PAGE_SIZE)
        .clamp(1, crate::constants::MAX_PAGE_SIZE);
    (page, per_page)
}

/// Row offset for a page. Widened to `i64` before multiplying so that
/// arbitrary well-typed page numbers cannot overflow.
pub fn page_offset(page: u32, per_page: u32) -> i64 {
    (i64::from(page.max(1)) - 1) * i64::from(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"id": 1}))).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["id"], json!(1));
        assert!(body.get("message").is_none());
    }

    #[test]
    fn test_envelope_with_message() {
        let body =
            serde_json::to_value(ApiResponse::with_message("created", json!(null))).unwrap();
        assert_eq!(body["message"], json!("created"));
    }

    #[test]
    fn test_page_params_defaults() {
        assert_eq!(
            page_params(None, None),
            (1, crate::constants::DEFAULT_PAGE_SIZE)
        );
    }

    #[test]
    fn test_page_params_clamped() {
        assert_eq!(page_params(Some(0), Some(0)), (1, 1));
        assert_eq!(
            page_params(Some(3), Some(10_000)),
            (3, crate::constants::MAX_PAGE_SIZE)
        );
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 20), 40);
        assert_eq!(page_offset(0, 20), 0);
    }

    #[test]
    fn test_page_offset_huge_page_does_not_overflow() {
        let (page, per_page) = page_params(Some(u32::MAX), Some(100));
        assert_eq!(
            page_offset(page, per_page),
            (i64::from(u32::MAX) - 1) * 100
        );
    }
}
