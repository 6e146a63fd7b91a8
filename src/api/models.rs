use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Engagement {
    pub id: i64,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub job_title: Option<String>,
    pub buyer_name: Option<String>,
    pub engagement_code: Option<String>,
    #[serde(rename = "timecardTemplateId")]
    pub timecard_template: Option<i64>,
}

impl Engagement {
    pub fn buyer_label(&self) -> &str {
        match self.buyer_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "(unknown buyer)",
        }
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("-")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EngagementPage {
    #[serde(default)]
    pub content: Vec<Engagement>,
}

/// Response of `POST billing-items`. Any non-null error field means the
/// portal rejected at least part of the week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveBillingItemsResponse {
    pub billing_item_id: i64,
    pub billing_item_ids: Value,
    pub errors: Value,
    pub billing_item_detail_errors: Value,
}

impl SaveBillingItemsResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_null() || !self.billing_item_detail_errors.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn engagement_tolerates_nulls_and_missing_fields() {
        let e: Engagement = serde_json::from_value(json!({
            "id": 42,
            "status": "ACTIVE",
            "buyerName": "  ",
            "jobTitle": null,
            "timecardTemplateId": 4
        }))
        .unwrap();
        assert_eq!(e.id, 42);
        assert_eq!(e.timecard_template, Some(4));
        assert_eq!(e.buyer_label(), "(unknown buyer)");
        assert_eq!(e.status_label(), "ACTIVE");
        assert!(e.job_title.is_none());
    }

    #[test]
    fn save_response_error_detection() {
        let ok: SaveBillingItemsResponse =
            serde_json::from_value(json!({"billingItemId": 9, "errors": null})).unwrap();
        assert_eq!(ok.billing_item_id, 9);
        assert!(!ok.has_errors());

        let rejected: SaveBillingItemsResponse = serde_json::from_value(json!({
            "billingItemId": 0,
            "billingItemDetailErrors": [{"message": "over 24h"}]
        }))
        .unwrap();
        assert!(rejected.has_errors());
    }
}
