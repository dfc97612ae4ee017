//! Achievement definitions → `achievements_db2.json` (or the legacy
//! `achievements_db1.json` when only the v1 surface exists).

use std::path::Path;

use eosdump_sdk::{
    AchievementDefinition, AchievementDefinitionV1, Platform, WaitPolicy,
};
use serde_json::{Value, json};

use crate::error::CliError;
use crate::icons::IconFetcher;
use crate::store;

const DB_FILE_V2: &str = "achievements_db2.json";
const DB_FILE_V1: &str = "achievements_db1.json";
const IMAGES_DIR: &str = "achievements_images";

pub fn dump(
    platform: &Platform<'_>,
    root: &Path,
    icons: &IconFetcher,
    policy: &WaitPolicy,
) -> Result<(), CliError> {
    let achievements = platform.achievements();
    if !achievements.has_v2() && !achievements.has_v1() {
        tracing::debug!("achievements not available, skipping");
        return Ok(());
    }

    let epic_user = platform.auth().logged_in_account(0);
    let user = platform.connect().logged_in_user(0);
    achievements.query_definitions(epic_user, user, policy)?;
    let count = achievements.definition_count()?;
    tracing::info!(count, "achievement definitions");

    if achievements.has_v2() {
        let mut definitions = Vec::with_capacity(count as usize);
        for index in 0..count {
            match achievements.copy_definition_v2(index) {
                Ok(definition) => definitions.push(definition),
                Err(err) => {
                    tracing::error!(index, error = %err, "failed to dump achievement");
                }
            }
        }
        for definition in &definitions {
            let images = root.join(IMAGES_DIR);
            icons.fetch(
                &definition.unlocked_icon_url,
                &images.join(&definition.achievement_id),
            );
            icons.fetch(
                &definition.locked_icon_url,
                &images.join(format!("{}_locked", definition.achievement_id)),
            );
        }
        store::save_json(&root.join(DB_FILE_V2), &achievements_document(&definitions))
    } else {
        let mut definitions = Vec::with_capacity(count as usize);
        for index in 0..count {
            match achievements.copy_definition_v1(index) {
                Ok(definition) => definitions.push(definition),
                Err(err) => {
                    tracing::error!(index, error = %err, "failed to dump achievement");
                }
            }
        }
        store::save_json(
            &root.join(DB_FILE_V1),
            &achievements_v1_document(&definitions),
        )
    }
}

/// Build the v2 document, one entry per definition in iteration order. Icon
/// fields carry the image names relative to the images directory.
pub fn achievements_document(definitions: &[AchievementDefinition]) -> Value {
    Value::Array(definitions.iter().map(entry_v2).collect())
}

fn entry_v2(definition: &AchievementDefinition) -> Value {
    let mut entry = json!({
        "AchievementId": definition.achievement_id,
        "UnlockedDisplayName": definition.unlocked_display_name,
        "UnlockedDescription": definition.unlocked_description,
        "LockedDisplayName": definition.locked_display_name,
        "LockedDescription": definition.locked_description,
        "HiddenDescription": definition.locked_description,
        "FlavorText": definition.flavor_text,
        "CompletionDescription": definition.unlocked_description,
        "UnlockedIconUrl": definition.achievement_id,
        "LockedIconUrl": format!("{}_locked", definition.achievement_id),
        "IsHidden": definition.is_hidden,
    });
    if !definition.stat_thresholds.is_empty() {
        entry["StatsThresholds"] = Value::Array(
            definition
                .stat_thresholds
                .iter()
                .map(|threshold| {
                    json!({
                        "Name": threshold.name,
                        "Threshold": threshold.threshold,
                    })
                })
                .collect(),
        );
    }
    entry
}

/// Build the legacy v1 document.
pub fn achievements_v1_document(definitions: &[AchievementDefinitionV1]) -> Value {
    Value::Array(
        definitions
            .iter()
            .map(|definition| {
                let mut entry = json!({
                    "AchievementId": definition.achievement_id,
                    "UnlockedDisplayName": definition.display_name,
                    "UnlockedDescription": definition.description,
                    "LockedDisplayName": definition.locked_display_name,
                    "LockedDescription": definition.locked_description,
                    "HiddenDescription": definition.hidden_description,
                    "FlavorText": "",
                    "CompletionDescription": definition.completion_description,
                    "UnlockedIconUrl": definition.achievement_id,
                    "LockedIconUrl": format!("{}_locked", definition.achievement_id),
                    "IsHidden": definition.is_hidden,
                });
                if !definition.stat_thresholds.is_empty() {
                    entry["StatsThresholds"] = Value::Array(
                        definition
                            .stat_thresholds
                            .iter()
                            .map(|threshold| {
                                json!({
                                    "Name": threshold.name,
                                    "Threshold": threshold.threshold,
                                })
                            })
                            .collect(),
                    );
                }
                entry
            })
            .collect(),
    )
}
