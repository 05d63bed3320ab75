//! Application use cases and transactions.

mod data_transfer;
mod seed;
mod workout;

pub use data_transfer::{
    export_json_string, import_json_string, sync_workout_json, wipe_all, ExportRoot,
    ExportWorkout, ImportResult, MobileWorkoutPayload,
};
pub use seed::seed_mock_data;
pub use workout::{
    workout_create, workout_delete, workout_get, workout_get_by_day, workout_list_by_range,
    workout_update, Lift, WorkoutCreateReq, WorkoutDetailDto, WorkoutUpdateReq,
};
