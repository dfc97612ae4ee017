//! Leaderboard definitions → `leaderboards_db.json`.

use std::path::Path;

use eosdump_sdk::{LeaderboardDefinition, Platform, WaitPolicy};
use serde_json::{Map, Value, json};

use crate::error::CliError;
use crate::store;

const LEADERBOARDS_FILE: &str = "leaderboards_db.json";

pub fn dump(platform: &Platform<'_>, root: &Path, policy: &WaitPolicy) -> Result<(), CliError> {
    let leaderboards = platform.leaderboards();
    if !leaderboards.is_available() {
        tracing::debug!("leaderboards not available, skipping");
        return Ok(());
    }

    let user = platform.connect().logged_in_user(0);
    leaderboards.query_definitions(user, policy)?;
    let count = leaderboards.definition_count()?;
    tracing::info!(count, "leaderboard definitions");
    if count == 0 {
        return Ok(());
    }

    let mut collected = Vec::with_capacity(count as usize);
    for index in 0..count {
        match leaderboards.copy_definition(index) {
            Ok(definition) if !definition.leaderboard_id.is_empty() => {
                collected.push(definition);
            }
            Ok(_) => {}
            Err(err) => tracing::error!(index, error = %err, "failed to copy leaderboard"),
        }
    }

    store::save_json(
        &root.join(LEADERBOARDS_FILE),
        &leaderboards_document(&collected),
    )
}

/// Build the leaderboards document, keyed by leaderboard id. `Aggregation`
/// keeps the raw native value.
pub fn leaderboards_document(definitions: &[LeaderboardDefinition]) -> Value {
    let mut document = Map::new();
    for definition in definitions {
        document.insert(
            definition.leaderboard_id.clone(),
            json!({
                "StatName": definition.stat_name,
                "StartTime": definition.start_time,
                "EndTime": definition.end_time,
                "Aggregation": definition.aggregation,
            }),
        );
    }
    Value::Object(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboards_document_shape() {
        let definitions = vec![LeaderboardDefinition {
            leaderboard_id: "weekly".into(),
            stat_name: "score".into(),
            aggregation: 1,
            start_time: -1,
            end_time: -1,
        }];

        let document = leaderboards_document(&definitions);
        assert_eq!(document["weekly"]["StatName"], "score");
        assert_eq!(document["weekly"]["Aggregation"], 1);
    }
}
