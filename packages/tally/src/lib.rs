pub mod actor;
pub mod candidate;
pub mod competition;
pub mod criteria;
pub mod error;
pub mod event;
pub mod scoresheet;
pub mod scoring;
pub mod shared;
pub mod standings;
pub mod user;

pub use actor::Actor;
pub use candidate::Candidate;
pub use competition::Competition;
pub use criteria::{CriteriaDefinition, CriteriaScore, validate_criteria};
pub use error::{ErrorBody, TallyError};
pub use event::Event;
pub use scoresheet::{Scoresheet, ScoresheetSubmission, SubmissionPlan};
pub use scoring::{ScoreAggregator, ScoreInput, ScoreUpdate, calculate_total, set_score};
pub use standings::Standing;
pub use user::User;
