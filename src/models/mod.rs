pub mod recommendation;
pub mod workout;

pub use recommendation::Recommendation;
pub use workout::WorkoutSet;
