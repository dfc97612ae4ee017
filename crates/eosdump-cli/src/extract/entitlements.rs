//! Owned entitlements → `entitlements.json`.

use std::path::Path;

use eosdump_sdk::{Entitlement, Platform, WaitPolicy};
use serde_json::{Map, Value, json};

use crate::error::CliError;
use crate::store;

const ENTITLEMENTS_FILE: &str = "entitlements.json";

pub fn dump(platform: &Platform<'_>, root: &Path, policy: &WaitPolicy) -> Result<(), CliError> {
    let ecom = platform.ecom();
    let account = platform.auth().logged_in_account(0);

    ecom.query_entitlements(account, policy)?;
    let count = ecom.entitlements_count(account);
    tracing::info!(count, "entitlements");
    if count == 0 {
        return Ok(());
    }

    let mut collected = Vec::with_capacity(count as usize);
    for index in 0..count {
        match ecom.copy_entitlement(account, index) {
            Ok(entitlement) if !entitlement.entitlement_id.is_empty() => {
                collected.push(entitlement);
            }
            Ok(_) => {}
            Err(err) => tracing::error!(index, error = %err, "failed to copy entitlement"),
        }
    }

    store::save_json(
        &root.join(ENTITLEMENTS_FILE),
        &entitlements_document(&collected),
    )
}

/// Build the entitlements document, keyed by entitlement id.
pub fn entitlements_document(entitlements: &[Entitlement]) -> Value {
    let mut document = Map::new();
    for entitlement in entitlements {
        document.insert(
            entitlement.entitlement_id.clone(),
            json!({
                "EntitlementName": entitlement.entitlement_name,
                "CatalogItemId": entitlement.catalog_item_id,
                "Redeemed": entitlement.redeemed,
                "EndTimestamp": entitlement.end_timestamp,
            }),
        );
    }
    Value::Object(document)
}
