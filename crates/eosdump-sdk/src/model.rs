//! Owned Rust views of the records the SDK copies out.
//!
//! The feature-group facades copy native records, convert every C string
//! into owned data, release the native storage, and hand these back. The
//! extraction layer never touches raw pointers.

/// One stat-gated unlock condition of an achievement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatThreshold {
    pub name: String,
    pub threshold: i32,
}

/// Achievement definition, v2 shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub achievement_id: String,
    pub unlocked_display_name: String,
    pub unlocked_description: String,
    pub locked_display_name: String,
    pub locked_description: String,
    pub flavor_text: String,
    pub unlocked_icon_url: String,
    pub locked_icon_url: String,
    pub is_hidden: bool,
    pub stat_thresholds: Vec<StatThreshold>,
}

/// Achievement definition, legacy v1 shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementDefinitionV1 {
    pub achievement_id: String,
    pub display_name: String,
    pub description: String,
    pub locked_display_name: String,
    pub locked_description: String,
    pub hidden_description: String,
    pub completion_description: String,
    pub unlocked_icon_id: String,
    pub locked_icon_id: String,
    pub is_hidden: bool,
    pub stat_thresholds: Vec<StatThreshold>,
}

/// One per-player stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStat {
    pub name: String,
    pub value: i32,
    pub start_time: i64,
    pub end_time: i64,
}

/// One catalog offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOffer {
    pub id: String,
    pub title: String,
    pub catalog_namespace: String,
    pub description: String,
}

/// One item inside a catalog offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: String,
    pub entitlement_name: String,
    pub title: String,
}

/// One owned entitlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entitlement {
    pub entitlement_name: String,
    pub entitlement_id: String,
    pub catalog_item_id: String,
    pub redeemed: bool,
    pub end_timestamp: i64,
}

/// One leaderboard definition. `aggregation` keeps the raw native value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardDefinition {
    pub leaderboard_id: String,
    pub stat_name: String,
    pub aggregation: i32,
    pub start_time: i64,
    pub end_time: i64,
}

/// Tokens copied after a successful authentication login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAuthToken {
    pub access_token: String,
    pub refresh_token: String,
}

/// Metadata of one remote title-storage file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub filename: String,
    pub file_size_bytes: u32,
    pub md5_hash: String,
}
