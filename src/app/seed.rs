//! Mock data generation for local development.

use crate::app::workout::{workout_create, Lift, WorkoutCreateReq, WorkoutDetailDto};
use crate::error::AppError;
use crate::infra::DbPool;
use chrono::{Duration, Local};
use rand::seq::IndexedRandom;
use rand::Rng;

const MOODS: &[&str] = &["Exhausted", "Tired", "Meh", "Good", "Great", "Energetic"];

const LIFT_NAMES: &[&str] = &[
    "Squat",
    "Bench",
    "Deadlift",
    "Press",
    "Curls",
    "Lat Pulldown",
    "Leg Press",
    "Leg Curl",
    "Leg Extension",
    "Tricep Extension",
    "Tricep Pushdown",
    "Tricep Dip",
    "Bicep Curl",
    "Bicep Hammer Curl",
    "Bicep Preacher Curl",
];

/// Insert `count` mock workouts on consecutive days starting today.
/// Days that already hold a workout are skipped.
pub fn seed_mock_data(pool: &DbPool, count: u32) -> Result<Vec<WorkoutDetailDto>, AppError> {
    let mut rng = rand::rng();
    let now = Local::now();
    let mut created = Vec::new();

    for i in 0..count {
        let day = (now + Duration::days(i as i64)).format("%d/%m/%Y").to_string();
        let lifts: Vec<Lift> = (0..5)
            .map(|_| Lift {
                name: LIFT_NAMES.choose(&mut rng).copied().unwrap_or("Squat").to_string(),
                weight: rng.random_range(0..100) as f64,
                reps: rng.random_range(1..=10),
                sets: rng.random_range(1..=5),
            })
            .collect();

        let req = WorkoutCreateReq {
            day,
            time_in: now.format("%H:%M").to_string(),
            time_out: (now + Duration::hours(1)).format("%H:%M").to_string(),
            mood_in: MOODS.choose(&mut rng).copied().unwrap_or("Good").to_string(),
            mood_out: MOODS.choose(&mut rng).copied().unwrap_or("Good").to_string(),
            lifts,
        };

        match workout_create(pool, req) {
            Ok(w) => created.push(w),
            Err(AppError::Conflict(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}
