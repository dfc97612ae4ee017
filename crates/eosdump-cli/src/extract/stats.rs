//! Player stats → `stats.json`.

use std::path::Path;

use eosdump_sdk::{Platform, PlayerStat, WaitPolicy};
use serde_json::{Map, Value, json};

use crate::error::CliError;
use crate::store;

const STATS_FILE: &str = "stats.json";

pub fn dump(platform: &Platform<'_>, root: &Path, policy: &WaitPolicy) -> Result<(), CliError> {
    let stats = platform.stats();
    if !stats.is_available() {
        tracing::debug!("stats not available, skipping");
        return Ok(());
    }

    let user = platform.connect().logged_in_user(0);
    stats.query_stats(user, policy)?;
    let count = stats.count(user)?;
    tracing::info!(count, "stats");
    if count == 0 {
        return Ok(());
    }

    let mut collected = Vec::with_capacity(count as usize);
    for index in 0..count {
        match stats.copy_stat(user, index) {
            Ok(stat) => collected.push(stat),
            Err(err) => tracing::error!(index, error = %err, "failed to copy stat"),
        }
    }

    store::save_json(&root.join(STATS_FILE), &stats_document(&collected))
}

/// Build the stats document, keyed by stat name in iteration order.
pub fn stats_document(stats: &[PlayerStat]) -> Value {
    let mut document = Map::new();
    for stat in stats {
        document.insert(
            stat.name.clone(),
            json!({
                "Value": stat.value,
                "StartTime": stat.start_time,
                "EndTime": stat.end_time,
            }),
        );
    }
    Value::Object(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_document_shape() {
        let stats = vec![
            PlayerStat {
                name: "kills".into(),
                value: 12,
                start_time: -1,
                end_time: -1,
            },
            PlayerStat {
                name: "deaths".into(),
                value: 3,
                start_time: 0,
                end_time: 99,
            },
        ];

        let document = stats_document(&stats);
        assert_eq!(document["kills"]["Value"], 12);
        assert_eq!(document["deaths"]["EndTime"], 99);
        assert_eq!(document.as_object().unwrap().len(), 2);
    }
}
