//! Export / Import use cases: export all data to JSON, import from JSON,
//! legacy mobile sync payloads, wipe.

use crate::app::workout::{workout_create, Lift, WorkoutCreateReq, WorkoutDetailDto};
use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use chrono::Utc;
use rusqlite::params;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRoot {
    pub schema_version: i32,
    pub exported_at: String,
    pub workouts: Vec<ExportWorkout>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportWorkout {
    pub id: i64,
    pub day: String,
    pub time_in: String,
    pub time_out: String,
    pub mood_in: String,
    pub mood_out: String,
    pub lifts: Vec<Lift>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub workouts: usize,
    pub lifts: usize,
    pub skipped_duplicates: usize,
}

/// Workout shape sent by the old mobile client: four parallel columns
/// instead of a list of lift records. Converted at this boundary only.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileWorkoutPayload {
    pub date: String,
    pub time_in: String,
    pub time_out: String,
    pub mood_in: String,
    pub mood_out: String,
    #[serde(default)]
    pub lifts: Vec<String>,
    #[serde(default)]
    pub weight: Vec<f64>,
    #[serde(default)]
    pub reps: Vec<i32>,
    #[serde(default)]
    pub sets: Vec<i32>,
}

fn zip_lift_columns(payload: &MobileWorkoutPayload) -> Result<Vec<Lift>, AppError> {
    let n = payload.lifts.len();
    if payload.weight.len() != n || payload.reps.len() != n || payload.sets.len() != n {
        return Err(AppError::Validation(
            "lifts, weight, reps and sets must have the same length".into(),
        ));
    }
    Ok((0..n)
        .map(|i| Lift {
            name: payload.lifts[i].clone(),
            weight: payload.weight[i],
            reps: payload.reps[i],
            sets: payload.sets[i],
        })
        .collect())
}

/// Accept one workout in the legacy parallel-column shape and create it.
pub fn sync_workout_json(pool: &DbPool, json: &str) -> Result<WorkoutDetailDto, AppError> {
    let payload: MobileWorkoutPayload = serde_json::from_str(json)
        .map_err(|e| AppError::Validation(format!("Invalid JSON: {}", e)))?;
    let lifts = zip_lift_columns(&payload)?;
    workout_create(
        pool,
        WorkoutCreateReq {
            day: payload.date,
            time_in: payload.time_in,
            time_out: payload.time_out,
            mood_in: payload.mood_in,
            mood_out: payload.mood_out,
            lifts,
        },
    )
}

/// Export all workouts (with nested lifts) as a JSON string.
pub fn export_json_string(pool: &DbPool) -> Result<String, AppError> {
    let schema_version = 1;
    let exported_at = Utc::now().to_rfc3339();

    let conn = get_connection(pool);

    let mut workouts = Vec::new();
    let mut stmt = conn
        .prepare("SELECT id, day, time_in, time_out, mood_in, mood_out FROM workouts ORDER BY id")
        .map_err(|e| AppError::Db(e.to_string()))?;
    let mut rows = stmt.query([]).map_err(|e| AppError::Db(e.to_string()))?;
    while let Some(row) = rows.next().map_err(|e| AppError::Db(e.to_string()))? {
        let workout_id: i64 = row.get(0)?;

        let mut lifts = Vec::new();
        let mut lift_stmt = conn
            .prepare("SELECT name, weight, reps, sets FROM lifts WHERE workout_id = ?1")
            .map_err(|e| AppError::Db(e.to_string()))?;
        let lift_rows = lift_stmt
            .query_map([workout_id], |r| {
                Ok(Lift {
                    name: r.get(0)?,
                    weight: r.get(1)?,
                    reps: r.get(2)?,
                    sets: r.get(3)?,
                })
            })
            .map_err(|e| AppError::Db(e.to_string()))?;
        for lift in lift_rows {
            lifts.push(lift.map_err(|e| AppError::Db(e.to_string()))?);
        }

        workouts.push(ExportWorkout {
            id: workout_id,
            day: row.get(1)?,
            time_in: row.get(2)?,
            time_out: row.get(3)?,
            mood_in: row.get(4)?,
            mood_out: row.get(5)?,
            lifts,
        });
    }

    let export_root = ExportRoot {
        schema_version,
        exported_at,
        workouts,
    };

    serde_json::to_string_pretty(&export_root)
        .map_err(|e| AppError::Db(format!("JSON serialization failed: {}", e)))
}

/// Import data from a JSON string. Uses INSERT OR IGNORE for idempotency:
/// workouts whose id or day already exists are skipped, together with
/// their lifts.
pub fn import_json_string(pool: &DbPool, json: &str) -> Result<ImportResult, AppError> {
    let root: ExportRoot = serde_json::from_str(json)
        .map_err(|e| AppError::Validation(format!("Invalid JSON: {}", e)))?;

    if root.schema_version != 1 {
        return Err(AppError::Validation(format!(
            "Unsupported schema version: {} (expected 1)",
            root.schema_version
        )));
    }

    let conn = get_connection(pool);
    let tx = conn.unchecked_transaction()?;

    let mut workouts_count = 0usize;
    let mut lifts_count = 0usize;
    let mut skipped = 0usize;

    for w in &root.workouts {
        let changed = tx.execute(
            "INSERT OR IGNORE INTO workouts (id, day, time_in, time_out, mood_in, mood_out) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![w.id, w.day, w.time_in, w.time_out, w.mood_in, w.mood_out],
        )?;
        if changed > 0 {
            workouts_count += 1;
            for lift in &w.lifts {
                tx.execute(
                    "INSERT INTO lifts (workout_id, name, weight, reps, sets) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![w.id, lift.name, lift.weight, lift.reps, lift.sets],
                )?;
                lifts_count += 1;
            }
        } else {
            skipped += 1;
        }
    }

    tx.commit()?;

    Ok(ImportResult {
        workouts: workouts_count,
        lifts: lifts_count,
        skipped_duplicates: skipped,
    })
}

/// Empty both tables in one transaction.
pub fn wipe_all(pool: &DbPool) -> Result<(), AppError> {
    let conn = get_connection(pool);
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM lifts", [])?;
    tx.execute("DELETE FROM workouts", [])?;
    tx.commit()?;
    Ok(())
}
