//! Widgets (marketplace integrations) installed on the account.
//!
//! Widgets are addressed by their string code rather than a numeric id.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::Result;
use crate::query::QueryParams;
use crate::request::{self, CREATE_OK, DELETE_OK};
use crate::requester::Requester;

/// A widget and, when installed, its settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Widget {
    pub id: u64,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_template: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_lead_source: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_work_with_dp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_crm_template: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active_integration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_settings_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
}

const PATH: &str = "widgets";

fn widget_path(code: &str) -> String {
    format!("{PATH}/{}", urlencoding::encode(code))
}

/// One page of widgets.
#[tracing::instrument(skip(requester))]
pub async fn list(requester: &dyn Requester, page: u32, limit: u32) -> Result<Vec<Widget>> {
    let params = QueryParams::paginated(page, limit);
    let envelope: Envelope<Widget> =
        request::get_envelope(requester, PATH, "widgets", Some(&params)).await?;
    Ok(envelope.items)
}

#[tracing::instrument(skip(requester))]
pub async fn get(requester: &dyn Requester, code: &str) -> Result<Widget> {
    request::get_one(requester, &widget_path(code), None).await
}

/// Install a widget with the given settings (`POST widgets/<code>`).
#[tracing::instrument(skip(requester, settings))]
pub async fn install(
    requester: &dyn Requester,
    code: &str,
    settings: &serde_json::Value,
) -> Result<Widget> {
    request::send_json(requester, Method::POST, &widget_path(code), settings, CREATE_OK).await
}

/// Uninstall a widget (`DELETE widgets/<code>`).
#[tracing::instrument(skip(requester))]
pub async fn uninstall(requester: &dyn Requester, code: &str) -> Result<()> {
    request::send_unit::<()>(requester, Method::DELETE, &widget_path(code), None, DELETE_OK).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_code_is_escaped() {
        assert_eq!(widget_path("amo_dialog"), "widgets/amo_dialog");
        assert_eq!(widget_path("a b/c"), "widgets/a%20b%2Fc");
    }
}
