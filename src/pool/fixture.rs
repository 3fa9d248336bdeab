//! Small two-season pool used by the store tests.
//!
//! 2022 (current): week 1 fully final, week 2 has a final tie (g3) and a
//! game in progress (g4). 2021: one final game in week 18.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use super::EntityStore;
use crate::storage::{Collection, MemoryStore, Record};

pub(crate) fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

/// Sunday kickoff of a 2022 week.
pub(crate) fn kickoff(week_no: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 9, 11, 17, 0, 0).unwrap() + Duration::weeks(i64::from(week_no) - 1)
}

fn team(id: &str, short_name: &str, city: &str, long_name: &str) -> Record {
    record(json!({
        "_id": id,
        "short_name": short_name,
        "city": city,
        "long_name": long_name,
        "wins": 0,
        "losses": 0,
        "ties": 0,
        "tgfp_nfl_team_id": format!("nfl.{}", short_name),
        "logo_url": format!("https://example.com/{}.png", short_name)
    }))
}

fn player(id: &str, first: &str, last: &str, nick: &str, active: bool, discord_id: u64) -> Record {
    record(json!({
        "_id": id,
        "first_name": first,
        "last_name": last,
        "nick_name": nick,
        "email": format!("{}@example.com", nick.to_lowercase()),
        "active": active,
        "discord_id": discord_id
    }))
}

#[allow(clippy::too_many_arguments)]
fn game(
    id: &str,
    season: u32,
    week_no: u32,
    home: &str,
    road: &str,
    scores: (u32, u32),
    status: &str,
    hour_offset: i64,
) -> Record {
    let start = kickoff(week_no) + Duration::hours(hour_offset);
    record(json!({
        "_id": id,
        "favorite_team_id": home,
        "game_status": status,
        "home_team_id": home,
        "home_team_score": scores.0,
        "road_team_id": road,
        "road_team_score": scores.1,
        "spread": 3.5,
        "start_time": start,
        "week_no": week_no,
        "season": season,
        "tgfp_nfl_game_id": format!("nfl.{}", id)
    }))
}

#[allow(clippy::too_many_arguments)]
fn pick(
    id: &str,
    player_id: &str,
    season: u32,
    week_no: u32,
    lock: &str,
    upset: Option<&str>,
    totals: (u32, u32, i32),
    detail: &[(&str, &str)],
) -> Record {
    let detail: Vec<Value> = detail
        .iter()
        .map(|(game_id, winner_id)| json!({"game_id": game_id, "winner_id": winner_id}))
        .collect();
    record(json!({
        "_id": id,
        "player_id": player_id,
        "week_no": week_no,
        "season": season,
        "lock_team_id": lock,
        "upset_team_id": upset,
        "wins": totals.0,
        "losses": totals.1,
        "bonus": totals.2,
        "pick_detail": detail
    }))
}

/// Raw store holding the fixture pool.
pub(crate) fn store() -> MemoryStore {
    MemoryStore::new()
        .with_records(
            Collection::Info,
            vec![record(json!({
                "_id": "info",
                "current_season": 2022,
                "home_page_text": "Welcome to the pool"
            }))],
        )
        .with_records(
            Collection::Teams,
            vec![
                team("team-a", "buf", "Buffalo", "Bills"),
                team("team-b", "lar", "Los Angeles", "Rams"),
                team("team-c", "kc", "Kansas City", "Chiefs"),
                team("team-d", "ari", "Arizona", "Cardinals"),
            ],
        )
        .with_records(
            Collection::Players,
            vec![
                player("p1", "John", "Sturgeon", "Sturg", true, 101),
                player("p2", "Bill", "Kahl", "Billy", true, 102),
                player("p3", "Old", "Timer", "Gramps", false, 103),
            ],
        )
        .with_records(
            Collection::Games,
            vec![
                game("g0", 2021, 18, "team-c", "team-d", (31, 20), "STATUS_FINAL", 0),
                game("g1", 2022, 1, "team-a", "team-b", (10, 3), "STATUS_FINAL", 3),
                game("g2", 2022, 1, "team-c", "team-d", (7, 24), "STATUS_FINAL", 0),
                game("g3", 2022, 2, "team-a", "team-c", (20, 20), "STATUS_FINAL", 0),
                game("g4", 2022, 2, "team-b", "team-d", (14, 7), "STATUS_IN_PROGRESS", 3),
            ],
        )
        .with_records(
            Collection::Picks,
            vec![
                pick(
                    "k1",
                    "p1",
                    2022,
                    1,
                    "team-a",
                    Some("team-d"),
                    (1, 1, 2),
                    &[("g1", "team-a"), ("g2", "team-c")],
                ),
                pick(
                    "k2",
                    "p2",
                    2022,
                    1,
                    "team-c",
                    None,
                    (1, 1, -1),
                    &[("g1", "team-b"), ("g2", "team-d")],
                ),
                pick(
                    "k3",
                    "p1",
                    2022,
                    2,
                    "team-a",
                    None,
                    (0, 1, 0),
                    &[("g3", "team-a"), ("g4", "team-b")],
                ),
                pick(
                    "k4",
                    "p2",
                    2022,
                    2,
                    "team-b",
                    None,
                    (0, 1, 0),
                    &[("g3", "team-c"), ("g4", "team-b")],
                ),
                pick(
                    "k0",
                    "p1",
                    2021,
                    18,
                    "team-c",
                    None,
                    (5, 0, 1),
                    &[("g0", "team-c")],
                ),
            ],
        )
        .with_records(
            Collection::Clans,
            vec![record(json!({
                "_id": "clan-1",
                "clan_name": "Team Don",
                "captain_id": "p1",
                "member_ids": [{"member_id": "p1"}]
            }))],
        )
}

pub(crate) fn pool() -> EntityStore<MemoryStore> {
    EntityStore::new(store())
}
