//! Workout use cases: create, get by day, list by date range, update, delete.
//!
//! A workout is one header row in `workouts` plus zero-or-more rows in
//! `lifts`; lift rows never outlive their workout. Day and time values are
//! stored as plain text (`DD/MM/YYYY` and `HH:MM`).

use crate::error::AppError;
use crate::infra::{get_connection, DbPool};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use serde::{Deserialize, Serialize};

/// One exercise entry owned by a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lift {
    pub name: String,
    pub weight: f64,
    pub reps: i32,
    pub sets: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDetailDto {
    pub id: i64,
    pub day: String,
    pub time_in: String,
    pub time_out: String,
    pub mood_in: String,
    pub mood_out: String,
    pub lifts: Vec<Lift>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutCreateReq {
    pub day: String,
    pub time_in: String,
    pub time_out: String,
    pub mood_in: String,
    pub mood_out: String,
    pub lifts: Vec<Lift>,
}

/// Sparse update: absent or empty header fields keep their stored value.
/// A present, non-empty `lifts` list replaces the whole set of lift rows.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutUpdateReq {
    #[serde(default)]
    pub id: i64,
    pub day: Option<String>,
    pub time_in: Option<String>,
    pub time_out: Option<String>,
    pub mood_in: Option<String>,
    pub mood_out: Option<String>,
    pub lifts: Option<Vec<Lift>>,
}

fn validate_create(req: &WorkoutCreateReq) -> Result<(), AppError> {
    if req.day.trim().is_empty() {
        return Err(AppError::Validation("day is required".into()));
    }
    if req.time_in.trim().is_empty() {
        return Err(AppError::Validation("timeIn is required".into()));
    }
    if req.time_out.trim().is_empty() {
        return Err(AppError::Validation("timeOut is required".into()));
    }
    if req.mood_in.trim().is_empty() {
        return Err(AppError::Validation("moodIn is required".into()));
    }
    if req.mood_out.trim().is_empty() {
        return Err(AppError::Validation("moodOut is required".into()));
    }
    if req.lifts.is_empty() {
        return Err(AppError::Validation("at least one lift is required".into()));
    }
    validate_lifts(&req.lifts)
}

fn validate_lifts(lifts: &[Lift]) -> Result<(), AppError> {
    if lifts.iter().any(|l| l.name.trim().is_empty()) {
        return Err(AppError::Validation("lift name is required".into()));
    }
    Ok(())
}

fn insert_lifts(conn: &Connection, workout_id: i64, lifts: &[Lift]) -> Result<(), AppError> {
    let mut stmt = conn.prepare(
        "INSERT INTO lifts (workout_id, name, weight, reps, sets) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for lift in lifts {
        stmt.execute(params![
            workout_id,
            lift.name.trim(),
            lift.weight,
            lift.reps,
            lift.sets
        ])?;
    }
    Ok(())
}

fn fetch_lifts(conn: &Connection, workout_id: i64) -> Result<Vec<Lift>, AppError> {
    let mut stmt =
        conn.prepare("SELECT name, weight, reps, sets FROM lifts WHERE workout_id = ?1")?;
    let rows = stmt.query_map([workout_id], |r| {
        Ok(Lift {
            name: r.get(0)?,
            weight: r.get(1)?,
            reps: r.get(2)?,
            sets: r.get(3)?,
        })
    })?;

    let mut lifts = Vec::new();
    for lift in rows {
        lifts.push(lift?);
    }
    Ok(lifts)
}

/// Internal helper: reconstruct one workout with its lifts.
fn workout_get_inner(conn: &Connection, id: i64) -> Result<WorkoutDetailDto, AppError> {
    let (day, time_in, time_out, mood_in, mood_out): (String, String, String, String, String) =
        conn.query_row(
            "SELECT day, time_in, time_out, mood_in, mood_out FROM workouts WHERE id = ?1",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => AppError::NotFound(format!("workout {}", id)),
            other => other.into(),
        })?;

    Ok(WorkoutDetailDto {
        id,
        day,
        time_in,
        time_out,
        mood_in,
        mood_out,
        lifts: fetch_lifts(conn, id)?,
    })
}

/// Create a workout with at least one lift. Header insert and lift inserts
/// share one transaction; any failure leaves no rows behind.
pub fn workout_create(pool: &DbPool, req: WorkoutCreateReq) -> Result<WorkoutDetailDto, AppError> {
    validate_create(&req)?;

    let day = req.day.trim().to_string();
    let id: i64;
    {
        let conn = get_connection(pool);
        let tx = conn.unchecked_transaction()?;

        // One workout per day (UNIQUE index on day is the backstop for races).
        let taken: bool = tx
            .query_row("SELECT 1 FROM workouts WHERE day = ?1", [&day], |_| Ok(true))
            .unwrap_or(false);
        if taken {
            return Err(AppError::Conflict(format!(
                "workout already recorded for {}",
                day
            )));
        }

        tx.execute(
            "INSERT INTO workouts (day, time_in, time_out, mood_in, mood_out) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                day,
                req.time_in.trim(),
                req.time_out.trim(),
                req.mood_in.trim(),
                req.mood_out.trim()
            ],
        )?;
        id = tx.last_insert_rowid();

        insert_lifts(&tx, id, &req.lifts)?;

        tx.commit()?;
    } // release conn before workout_get to avoid deadlock

    workout_get(pool, id)
}

/// Fetch a workout by its surrogate key.
pub fn workout_get(pool: &DbPool, id: i64) -> Result<WorkoutDetailDto, AppError> {
    let conn = get_connection(pool);
    workout_get_inner(&conn, id)
}

/// Fetch the workout recorded for an exact day string.
pub fn workout_get_by_day(pool: &DbPool, day: &str) -> Result<WorkoutDetailDto, AppError> {
    let conn = get_connection(pool);
    let id: i64 = conn
        .query_row("SELECT id FROM workouts WHERE day = ?1", [day], |r| {
            r.get(0)
        })
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                AppError::NotFound(format!("no workout for {}", day))
            }
            other => other.into(),
        })?;
    workout_get_inner(&conn, id)
}

/// Fetch all workouts whose day falls within `[start, end]`, inclusive.
/// Empty result is not an error. Days compare as text, so ranges that cross
/// a month or year boundary do not follow calendar order with the
/// `DD/MM/YYYY` format.
pub fn workout_list_by_range(
    pool: &DbPool,
    start: &str,
    end: &str,
) -> Result<Vec<WorkoutDetailDto>, AppError> {
    let conn = get_connection(pool);
    let mut stmt = conn.prepare("SELECT id FROM workouts WHERE day BETWEEN ?1 AND ?2")?;
    let ids: Vec<i64> = stmt
        .query_map(params![start, end], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut workouts = Vec::new();
    for id in ids {
        workouts.push(workout_get_inner(&conn, id)?);
    }
    Ok(workouts)
}

/// An absent or blank update field means "keep the stored value".
fn normalize(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Build `col = ?N` pairs from the fields that are present and non-empty.
/// Returns None when nothing is set, so callers skip the UPDATE entirely.
fn build_set_clause(fields: &[(&str, Option<&str>)]) -> Option<(String, Vec<String>)> {
    let present: Vec<(&str, &str)> = fields
        .iter()
        .filter_map(|(col, val)| val.map(|v| (*col, v)))
        .collect();
    if present.is_empty() {
        return None;
    }
    let clause = present
        .iter()
        .enumerate()
        .map(|(i, (col, _))| format!("{} = ?{}", col, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let values = present.iter().map(|(_, v)| v.to_string()).collect();
    Some((clause, values))
}

/// Update the header fields that were supplied and, if a non-empty lift list
/// was supplied, replace the whole lift set. Both happen in one transaction.
pub fn workout_update(pool: &DbPool, req: WorkoutUpdateReq) -> Result<WorkoutDetailDto, AppError> {
    let lifts = req.lifts.as_deref().unwrap_or(&[]);
    validate_lifts(lifts)?;

    {
        let conn = get_connection(pool);
        let tx = conn.unchecked_transaction()?;

        let exists: bool = tx
            .query_row("SELECT 1 FROM workouts WHERE id = ?1", [req.id], |_| {
                Ok(true)
            })
            .unwrap_or(false);
        if !exists {
            return Err(AppError::NotFound(format!("workout {}", req.id)));
        }

        // Full replace, not a merge. An empty list leaves existing rows alone.
        if !lifts.is_empty() {
            tx.execute("DELETE FROM lifts WHERE workout_id = ?1", [req.id])?;
            insert_lifts(&tx, req.id, lifts)?;
        }

        let fields = [
            ("day", normalize(&req.day)),
            ("time_in", normalize(&req.time_in)),
            ("time_out", normalize(&req.time_out)),
            ("mood_in", normalize(&req.mood_in)),
            ("mood_out", normalize(&req.mood_out)),
        ];

        if let Some((clause, values)) = build_set_clause(&fields) {
            let sql = format!(
                "UPDATE workouts SET {} WHERE id = ?{}",
                clause,
                values.len() + 1
            );
            let mut bind: Vec<Value> = values.into_iter().map(Value::Text).collect();
            bind.push(Value::Integer(req.id));
            // Moving day onto another workout trips the UNIQUE index and
            // rolls back the lift replacement above.
            tx.execute(&sql, params_from_iter(bind))?;
        }

        tx.commit()?;
    }

    workout_get(pool, req.id)
}

/// Delete a workout and all its lift rows. Deleting a missing id succeeds
/// silently (zero rows affected is not an error).
pub fn workout_delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let conn = get_connection(pool);
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM lifts WHERE workout_id = ?1", [id])?;
    tx.execute("DELETE FROM workouts WHERE id = ?1", [id])?;
    tx.commit()?;
    Ok(())
}
