//! End-to-end shape of the achievements document built from copied records.

use eosdump_cli::extract::achievements::achievements_document;
use eosdump_sdk::{AchievementDefinition, StatThreshold};

fn fake_definition(index: usize) -> AchievementDefinition {
    AchievementDefinition {
        achievement_id: format!("ach_{index}"),
        unlocked_display_name: format!("Achievement {index}"),
        unlocked_description: format!("You did thing {index}"),
        locked_display_name: "???".to_owned(),
        locked_description: format!("Do thing {index}"),
        flavor_text: String::new(),
        unlocked_icon_url: format!("https://cdn.example/ach_{index}.png"),
        locked_icon_url: format!("https://cdn.example/ach_{index}_locked.png"),
        is_hidden: index % 2 == 0,
        stat_thresholds: if index == 3 {
            vec![StatThreshold {
                name: "kills".to_owned(),
                threshold: 10,
            }]
        } else {
            Vec::new()
        },
    }
}

#[test]
fn five_backend_records_produce_five_entries_in_order() {
    let definitions: Vec<_> = (0..5).map(fake_definition).collect();

    let document = achievements_document(&definitions);
    let entries = document.as_array().expect("array document");
    assert_eq!(entries.len(), 5);

    for (index, entry) in entries.iter().enumerate() {
        assert_eq!(entry["AchievementId"], format!("ach_{index}"));
        assert_eq!(entry["UnlockedDisplayName"], format!("Achievement {index}"));
        assert_eq!(entry["UnlockedDescription"], format!("You did thing {index}"));
        assert_eq!(entry["LockedDisplayName"], "???");
        assert_eq!(entry["LockedDescription"], format!("Do thing {index}"));
        // The hidden description mirrors the locked one in the v2 mapping.
        assert_eq!(entry["HiddenDescription"], format!("Do thing {index}"));
        assert_eq!(entry["IsHidden"], index % 2 == 0);
        // Icon fields carry image names, not source URLs.
        assert_eq!(entry["UnlockedIconUrl"], format!("ach_{index}"));
        assert_eq!(entry["LockedIconUrl"], format!("ach_{index}_locked"));
    }

    // Thresholds appear only where the backend reported them.
    assert!(entries[0].get("StatsThresholds").is_none());
    let thresholds = entries[3]["StatsThresholds"].as_array().unwrap();
    assert_eq!(thresholds.len(), 1);
    assert_eq!(thresholds[0]["Name"], "kills");
    assert_eq!(thresholds[0]["Threshold"], 10);
}

#[test]
fn empty_backend_produces_empty_document() {
    let document = achievements_document(&[]);
    assert_eq!(document.as_array().unwrap().len(), 0);
}
