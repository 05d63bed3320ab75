//! Workout store integration tests

use fitlog::app::{
    workout_create, workout_delete, workout_get, workout_get_by_day, workout_list_by_range,
    workout_update, Lift, WorkoutCreateReq, WorkoutUpdateReq,
};
use fitlog::infra::db::init_test_db;
use fitlog::infra::DbPool;

// ──────────────────────── Helpers ────────────────────────

fn squat() -> Lift {
    Lift {
        name: "Squat".to_string(),
        weight: 60.0,
        reps: 5,
        sets: 3,
    }
}

fn bench() -> Lift {
    Lift {
        name: "Bench".to_string(),
        weight: 40.0,
        reps: 8,
        sets: 3,
    }
}

fn make_workout_req(day: &str) -> WorkoutCreateReq {
    WorkoutCreateReq {
        day: day.to_string(),
        time_in: "08:00".to_string(),
        time_out: "09:00".to_string(),
        mood_in: "Tired".to_string(),
        mood_out: "Good".to_string(),
        lifts: vec![squat(), bench()],
    }
}

fn sorted_by_name(mut lifts: Vec<Lift>) -> Vec<Lift> {
    lifts.sort_by(|a, b| a.name.cmp(&b.name));
    lifts
}

fn lift_row_count(pool: &DbPool, workout_id: i64) -> i64 {
    let conn = pool.0.lock().unwrap();
    conn.query_row(
        "SELECT COUNT(*) FROM lifts WHERE workout_id = ?1",
        [workout_id],
        |r| r.get(0),
    )
    .unwrap()
}

// ══════════════════════════════════════════════════════════
//  workout_create
// ══════════════════════════════════════════════════════════

#[test]
fn create_and_get_by_day_round_trip() {
    let pool = init_test_db();
    let created = workout_create(
        &pool,
        WorkoutCreateReq {
            day: "10/01/2023".to_string(),
            time_in: "08:00".to_string(),
            time_out: "09:00".to_string(),
            mood_in: "Tired".to_string(),
            mood_out: "Good".to_string(),
            lifts: vec![squat()],
        },
    )
    .unwrap();

    let fetched = workout_get_by_day(&pool, "10/01/2023").unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.day, "10/01/2023");
    assert_eq!(fetched.time_in, "08:00");
    assert_eq!(fetched.time_out, "09:00");
    assert_eq!(fetched.mood_in, "Tired");
    assert_eq!(fetched.mood_out, "Good");
    assert_eq!(fetched.lifts, vec![squat()]);
}

#[test]
fn create_round_trip_preserves_all_lifts() {
    let pool = init_test_db();
    workout_create(&pool, make_workout_req("11/01/2023")).unwrap();

    let fetched = workout_get_by_day(&pool, "11/01/2023").unwrap();
    assert_eq!(
        sorted_by_name(fetched.lifts),
        sorted_by_name(vec![squat(), bench()])
    );
}

#[test]
fn create_empty_day_fails() {
    let pool = init_test_db();
    let mut req = make_workout_req("");
    req.day = "   ".to_string();
    let err = workout_create(&pool, req);
    assert_eq!(err.unwrap_err().code(), "VALIDATION_ERROR");
}

#[test]
fn create_empty_mood_out_fails() {
    let pool = init_test_db();
    let mut req = make_workout_req("12/01/2023");
    req.mood_out = "".to_string();
    let err = workout_create(&pool, req);
    assert_eq!(err.unwrap_err().code(), "VALIDATION_ERROR");
}

#[test]
fn create_without_lifts_fails() {
    let pool = init_test_db();
    let mut req = make_workout_req("12/01/2023");
    req.lifts = vec![];
    let err = workout_create(&pool, req);
    assert_eq!(err.unwrap_err().code(), "VALIDATION_ERROR");
}

#[test]
fn create_blank_lift_name_fails() {
    let pool = init_test_db();
    let mut req = make_workout_req("12/01/2023");
    req.lifts[0].name = "  ".to_string();
    let err = workout_create(&pool, req);
    assert_eq!(err.unwrap_err().code(), "VALIDATION_ERROR");
}

#[test]
fn create_duplicate_day_rejected() {
    let pool = init_test_db();
    workout_create(&pool, make_workout_req("13/01/2023")).unwrap();
    let err = workout_create(&pool, make_workout_req("13/01/2023"));
    assert_eq!(err.unwrap_err().code(), "CONFLICT");
}

#[test]
fn failed_create_leaves_no_rows() {
    let pool = init_test_db();
    let first = workout_create(&pool, make_workout_req("14/01/2023")).unwrap();

    let err = workout_create(&pool, make_workout_req("14/01/2023"));
    assert!(err.is_err());

    // Only the first workout's rows exist
    let conn = pool.0.lock().unwrap();
    let workouts: i64 = conn
        .query_row("SELECT COUNT(*) FROM workouts", [], |r| r.get(0))
        .unwrap();
    let lifts: i64 = conn
        .query_row("SELECT COUNT(*) FROM lifts", [], |r| r.get(0))
        .unwrap();
    assert_eq!(workouts, 1);
    assert_eq!(lifts, first.lifts.len() as i64);
}

// ══════════════════════════════════════════════════════════
//  workout_get / workout_get_by_day
// ══════════════════════════════════════════════════════════

#[test]
fn get_by_day_not_found() {
    let pool = init_test_db();
    let err = workout_get_by_day(&pool, "01/01/1999");
    assert_eq!(err.unwrap_err().code(), "NOT_FOUND");
}

#[test]
fn get_by_id_not_found() {
    let pool = init_test_db();
    let err = workout_get(&pool, 42);
    assert_eq!(err.unwrap_err().code(), "NOT_FOUND");
}

// ══════════════════════════════════════════════════════════
//  workout_list_by_range
// ══════════════════════════════════════════════════════════

#[test]
fn range_query_inclusive_bounds() {
    let pool = init_test_db();
    // All within one month so textual comparison matches calendar order
    for day in ["05/03/2024", "10/03/2024", "15/03/2024", "20/03/2024"] {
        workout_create(&pool, make_workout_req(day)).unwrap();
    }

    let hits = workout_list_by_range(&pool, "10/03/2024", "15/03/2024").unwrap();
    let days: Vec<&str> = hits.iter().map(|w| w.day.as_str()).collect();
    assert_eq!(hits.len(), 2);
    assert!(days.contains(&"10/03/2024"));
    assert!(days.contains(&"15/03/2024"));
}

#[test]
fn range_query_excludes_outside_days() {
    let pool = init_test_db();
    for day in ["05/03/2024", "10/03/2024", "20/03/2024"] {
        workout_create(&pool, make_workout_req(day)).unwrap();
    }

    let hits = workout_list_by_range(&pool, "08/03/2024", "12/03/2024").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].day, "10/03/2024");
}

#[test]
fn range_query_empty_result_is_ok() {
    let pool = init_test_db();
    workout_create(&pool, make_workout_req("05/03/2024")).unwrap();

    let hits = workout_list_by_range(&pool, "25/03/2024", "28/03/2024").unwrap();
    assert!(hits.is_empty());
}

#[test]
fn range_query_returns_nested_lifts() {
    let pool = init_test_db();
    workout_create(&pool, make_workout_req("10/03/2024")).unwrap();

    let hits = workout_list_by_range(&pool, "01/03/2024", "31/03/2024").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].lifts.len(), 2);
}

// ══════════════════════════════════════════════════════════
//  workout_update
// ══════════════════════════════════════════════════════════

#[test]
fn update_only_mood_out_changes_one_column() {
    let pool = init_test_db();
    let created = workout_create(&pool, make_workout_req("01/02/2024")).unwrap();

    let updated = workout_update(
        &pool,
        WorkoutUpdateReq {
            id: created.id,
            mood_out: Some("Great".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(updated.mood_out, "Great");
    assert_eq!(updated.day, "01/02/2024"); // unchanged
    assert_eq!(updated.time_in, "08:00"); // unchanged
    assert_eq!(updated.time_out, "09:00"); // unchanged
    assert_eq!(updated.mood_in, "Tired"); // unchanged
    assert_eq!(
        sorted_by_name(updated.lifts),
        sorted_by_name(created.lifts)
    );
}

#[test]
fn update_empty_string_field_means_no_change() {
    let pool = init_test_db();
    let created = workout_create(&pool, make_workout_req("02/02/2024")).unwrap();

    let updated = workout_update(
        &pool,
        WorkoutUpdateReq {
            id: created.id,
            mood_in: Some("  ".to_string()),
            mood_out: Some("Energetic".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(updated.mood_in, "Tired");
    assert_eq!(updated.mood_out, "Energetic");
}

#[test]
fn update_with_lifts_replaces_full_set() {
    let pool = init_test_db();
    let created = workout_create(&pool, make_workout_req("03/02/2024")).unwrap();
    assert_eq!(created.lifts.len(), 2);

    let new_lift = Lift {
        name: "Deadlift".to_string(),
        weight: 100.0,
        reps: 3,
        sets: 5,
    };
    let updated = workout_update(
        &pool,
        WorkoutUpdateReq {
            id: created.id,
            lifts: Some(vec![new_lift.clone()]),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(updated.lifts, vec![new_lift]);
    assert_eq!(lift_row_count(&pool, created.id), 1);
    assert_eq!(updated.day, "03/02/2024"); // header untouched
}

#[test]
fn update_empty_lifts_list_leaves_rows_untouched() {
    let pool = init_test_db();
    let created = workout_create(&pool, make_workout_req("04/02/2024")).unwrap();

    let updated = workout_update(
        &pool,
        WorkoutUpdateReq {
            id: created.id,
            mood_out: Some("Meh".to_string()),
            lifts: Some(vec![]),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(updated.mood_out, "Meh");
    assert_eq!(updated.lifts.len(), 2);
}

#[test]
fn update_with_nothing_set_is_a_no_op() {
    let pool = init_test_db();
    let created = workout_create(&pool, make_workout_req("05/02/2024")).unwrap();

    let updated = workout_update(
        &pool,
        WorkoutUpdateReq {
            id: created.id,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(updated.day, created.day);
    assert_eq!(updated.mood_out, created.mood_out);
    assert_eq!(updated.lifts.len(), created.lifts.len());
}

#[test]
fn update_not_found() {
    let pool = init_test_db();
    let err = workout_update(
        &pool,
        WorkoutUpdateReq {
            id: 999,
            mood_out: Some("Good".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(err.unwrap_err().code(), "NOT_FOUND");
}

#[test]
fn update_day_conflict_rolls_back_lift_replacement() {
    let pool = init_test_db();
    workout_create(&pool, make_workout_req("10/02/2024")).unwrap();
    let victim = workout_create(&pool, make_workout_req("11/02/2024")).unwrap();

    // Moving victim onto an occupied day fails; the lift replacement in the
    // same transaction must roll back with it.
    let err = workout_update(
        &pool,
        WorkoutUpdateReq {
            id: victim.id,
            day: Some("10/02/2024".to_string()),
            lifts: Some(vec![Lift {
                name: "Press".to_string(),
                weight: 30.0,
                reps: 10,
                sets: 3,
            }]),
            ..Default::default()
        },
    );
    assert_eq!(err.unwrap_err().code(), "CONFLICT");

    let unchanged = workout_get(&pool, victim.id).unwrap();
    assert_eq!(unchanged.day, "11/02/2024");
    assert_eq!(
        sorted_by_name(unchanged.lifts),
        sorted_by_name(victim.lifts)
    );
}

// ══════════════════════════════════════════════════════════
//  workout_delete
// ══════════════════════════════════════════════════════════

#[test]
fn delete_removes_workout_and_all_lifts() {
    let pool = init_test_db();
    let created = workout_create(&pool, make_workout_req("20/02/2024")).unwrap();
    assert_eq!(lift_row_count(&pool, created.id), 2);

    workout_delete(&pool, created.id).unwrap();

    let err = workout_get_by_day(&pool, "20/02/2024");
    assert_eq!(err.unwrap_err().code(), "NOT_FOUND");
    assert_eq!(lift_row_count(&pool, created.id), 0);
}

#[test]
fn delete_missing_id_succeeds_silently() {
    let pool = init_test_db();
    workout_delete(&pool, 12345).unwrap();
}

#[test]
fn day_is_free_for_reuse_after_delete() {
    let pool = init_test_db();
    let created = workout_create(&pool, make_workout_req("21/02/2024")).unwrap();
    workout_delete(&pool, created.id).unwrap();

    workout_create(&pool, make_workout_req("21/02/2024")).unwrap();
}
