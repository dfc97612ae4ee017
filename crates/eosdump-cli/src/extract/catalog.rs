//! Catalog offers → `catalog.json`.

use std::path::Path;

use eosdump_sdk::{CatalogOffer, Platform, WaitPolicy};
use serde_json::{Map, Value, json};

use crate::error::CliError;
use crate::store;

const CATALOG_FILE: &str = "catalog.json";

pub fn dump(platform: &Platform<'_>, root: &Path, policy: &WaitPolicy) -> Result<(), CliError> {
    let ecom = platform.ecom();
    let account = platform.auth().logged_in_account(0);

    ecom.query_offers(account, policy)?;
    let count = ecom.offer_count(account);
    tracing::info!(count, "catalog offers");
    if count == 0 {
        return Ok(());
    }

    let mut offers = Vec::with_capacity(count as usize);
    for index in 0..count {
        let offer = match ecom.copy_offer(account, index) {
            Ok(offer) if !offer.id.is_empty() => offer,
            Ok(_) => continue,
            Err(err) => {
                tracing::error!(index, error = %err, "failed to copy offer");
                continue;
            }
        };

        match ecom.offer_item_count(account, &offer.id) {
            Ok(item_count) => {
                for item_index in 0..item_count {
                    match ecom.copy_offer_item(account, &offer.id, item_index) {
                        Ok(item) => {
                            tracing::trace!(offer = %offer.id, item = %item.id, "offer item");
                        }
                        Err(err) => {
                            tracing::error!(offer = %offer.id, item_index, error = %err, "failed to copy offer item");
                        }
                    }
                }
            }
            Err(err) => tracing::error!(offer = %offer.id, error = %err, "failed to count offer items"),
        }

        offers.push(offer);
    }

    store::save_json(&root.join(CATALOG_FILE), &catalog_document(&offers))
}

/// Build the catalog document, keyed by catalog item id. Everything listed
/// belongs to the logged-in account, hence `Owned` is always true.
pub fn catalog_document(offers: &[CatalogOffer]) -> Value {
    let mut document = Map::new();
    for offer in offers {
        document.insert(
            offer.id.clone(),
            json!({
                "Name": offer.title,
                "Namespace": offer.catalog_namespace,
                "Owned": true,
            }),
        );
    }
    Value::Object(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_document_shape() {
        let offers = vec![CatalogOffer {
            id: "offer-1".into(),
            title: "Base Game".into(),
            catalog_namespace: "sandbox-a".into(),
            description: String::new(),
        }];

        let document = catalog_document(&offers);
        assert_eq!(document["offer-1"]["Name"], "Base Game");
        assert_eq!(document["offer-1"]["Namespace"], "sandbox-a");
        assert_eq!(document["offer-1"]["Owned"], true);
    }
}
