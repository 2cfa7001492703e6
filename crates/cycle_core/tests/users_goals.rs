use cycle_core::db::open_db_in_memory;
use cycle_core::{NewUser, SqliteUserRepository, UsageMode, UserRepository};
use rusqlite::Connection;
use std::collections::HashSet;

fn new_user(goals: &[&str]) -> NewUser {
    NewUser {
        birth_year: 1997,
        usage_mode: UsageMode::SelfTracking,
        goals: goals.iter().map(|goal| goal.to_string()).collect(),
    }
}

fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteUserRepository::new(&mut conn);

    let user_id = repo.create_user(&new_user(&["track-cycle"])).unwrap();
    let user = repo.get_user(user_id).unwrap().unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.birth_year, 1997);
    assert_eq!(user.usage_mode, UsageMode::SelfTracking);
    assert_eq!(user.goals, vec!["track-cycle".to_string()]);
    assert!(!user.created_at.is_empty());
}

#[test]
fn duplicate_goals_collapse_to_one_row_each() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteUserRepository::new(&mut conn);

    let user_id = repo
        .create_user(&new_user(&["weight", "pregnant", "weight", "pregnant", "sex-life"]))
        .unwrap();
    let goals: HashSet<String> = repo.list_goals(user_id).unwrap().into_iter().collect();

    let expected: HashSet<String> = ["weight", "pregnant", "sex-life"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(goals, expected);
    assert_eq!(count_rows(&conn, "user_goals"), 3);
}

#[test]
fn get_unknown_user_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&mut conn);
    assert!(repo.get_user(12345).unwrap().is_none());
}

#[test]
fn partner_codes_are_unique_and_url_safe_across_users() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteUserRepository::new(&mut conn);

    let mut codes = HashSet::new();
    for _ in 0..50 {
        let user_id = repo.create_user(&new_user(&[])).unwrap();
        let user = repo.get_user(user_id).unwrap().unwrap();
        assert!(user
            .partner_code
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'));
        codes.insert(user.partner_code);
    }
    assert_eq!(codes.len(), 50);
}

#[test]
fn failed_goal_insert_rolls_back_the_whole_user() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_goal BEFORE INSERT ON user_goals
         WHEN NEW.goal_type = 'rejected'
         BEGIN
             SELECT RAISE(ABORT, 'goal rejected');
         END;",
    )
    .unwrap();

    {
        let mut repo = SqliteUserRepository::new(&mut conn);
        let err = repo
            .create_user(&new_user(&["weight", "rejected"]))
            .unwrap_err();
        assert!(err.to_string().contains("goal rejected"));
    }

    assert_eq!(count_rows(&conn, "users"), 0);
    assert_eq!(count_rows(&conn, "user_goals"), 0);
}

#[test]
fn persisted_usage_mode_outside_enum_is_invalid_data() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO users (birth_year, usage_mode, partner_code) VALUES (1990, 'robot', 'abc');
         PRAGMA ignore_check_constraints = OFF;",
    )
    .unwrap();
    let user_id = conn.last_insert_rowid();

    let repo = SqliteUserRepository::new(&mut conn);
    let err = repo.get_user(user_id).unwrap_err();
    assert!(err.to_string().contains("invalid usage mode"));
}
