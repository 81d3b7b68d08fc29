//! Database repositories
//!
//! Data access layer. Repositories speak SQL and return plain records;
//! services own the business rules on top of them.

pub mod plan;
pub mod profile;
pub mod tracking;
pub mod user;

pub use plan::{
    CreatePlan, ExerciseRecord, MealRecord, NutritionDayRecord, PlanRecord, PlanRepository,
    WorkoutDayRecord,
};
pub use profile::{ProfileRecord, ProfileRepository, WriteProfile};
pub use tracking::{
    CreateMealTracking, CreateWaterTracking, CreateWorkoutTracking, MealTrackingRecord,
    TrackingRepository, WaterTrackingRecord, WorkoutTrackingRecord,
};
pub use user::{NewUser, UpdateUser, UserRecord, UserRepository};
