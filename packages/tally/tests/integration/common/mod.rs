use std::sync::Once;

use chrono::NaiveDate;
use common::Role;
use common::config::TallyConfig;
use tally::candidate::CandidateRequest;
use tally::competition::{self, CompetitionRequest};
use tally::event::EventRequest;
use tally::scoresheet::{self, SubmissionPlan};
use tally::user::UserRequest;
use tally::{
    Actor, Candidate, Competition, CriteriaDefinition, Event, Scoresheet, ScoresheetSubmission,
    TallyError, User,
};

static TRACING: Once = Once::new();

/// Route library logs to the test harness. `RUST_LOG=tally=debug` shows them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub const EVENT_ID: &str = "ev1";

/// In-memory stand-in for the storage layer, seeded with one event, an admin,
/// a manager, two judges, a tabulator, three candidates and two competitions.
pub struct TestEvent {
    pub config: TallyConfig,
    pub events: Vec<Event>,
    pub users: Vec<User>,
    pub candidates: Vec<Candidate>,
    pub competitions: Vec<Competition>,
    pub scoresheets: Vec<Scoresheet>,
}

impl TestEvent {
    pub fn seed() -> Self {
        init_tracing();

        let event = EventRequest {
            name: "Foundation Week".into(),
            event_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            is_active: true,
        }
        .into_event(EVENT_ID);

        let users = vec![
            user("admin", Role::Admin, 0, None).into_user("admin"),
            user("manager1", Role::Manager, 0, Some(EVENT_ID)).into_user("manager1"),
            user("judge1", Role::Judge, 1, Some(EVENT_ID)).into_user("judge1"),
            user("judge2", Role::Judge, 2, Some(EVENT_ID)).into_user("judge2"),
            user("tab1", Role::Tabulator, 0, Some(EVENT_ID)).into_user("tab1"),
        ];

        let candidates = [(1, "Maria Santos"), (2, "Ana Cruz"), (3, "Liza Reyes")]
            .into_iter()
            .map(|(number, name)| {
                CandidateRequest {
                    event_id: EVENT_ID.into(),
                    number,
                    full_name: name.into(),
                    course: "BSED".into(),
                    photo: None,
                }
                .into_candidate(format!("cand{number}"))
            })
            .collect();

        let competitions = vec![
            competition_request("Talent", 1, 0.6).into_competition("talent"),
            competition_request("Evening Gown", 2, 0.4).into_competition("gown"),
        ];

        Self {
            config: TallyConfig::default(),
            events: vec![event],
            users,
            candidates,
            competitions,
            scoresheets: Vec::new(),
        }
    }

    pub fn actor(&self, user_id: &str) -> Actor {
        let user = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .unwrap_or_else(|| panic!("no seeded user {user_id}"));
        Actor::new(&user.id, user.role, user.event_id.as_deref())
    }

    pub fn activate(&mut self, competition_id: &str) {
        competition::toggle_active(&mut self.competitions, competition_id, true).unwrap();
    }

    pub fn competition(&self, id: &str) -> &Competition {
        self.competitions.iter().find(|c| c.id == id).unwrap()
    }

    /// Validate a submission and persist it the way the storage layer would.
    pub fn submit(
        &mut self,
        actor: &Actor,
        submission: ScoresheetSubmission,
    ) -> Result<Scoresheet, TallyError> {
        let competition = self.competition(&submission.competition_id).clone();
        let existing = self.scoresheets.iter().find(|s| match &submission.id {
            Some(id) => &s.id == id,
            None => {
                s.user_id == submission.user_id
                    && s.candidate_id == submission.candidate_id
                    && s.competition_id == submission.competition_id
            }
        });

        match scoresheet::plan_submission(actor, &competition, existing, submission)? {
            SubmissionPlan::Create(sheet) => {
                self.scoresheets.push(sheet.clone());
                Ok(sheet)
            }
            SubmissionPlan::Update(sheet) => {
                let slot = self
                    .scoresheets
                    .iter_mut()
                    .find(|s| s.id == sheet.id)
                    .unwrap();
                *slot = sheet.clone();
                Ok(sheet)
            }
        }
    }
}

pub fn user(username: &str, role: Role, judge_number: u32, event_id: Option<&str>) -> UserRequest {
    UserRequest {
        username: username.into(),
        full_name: format!("{username} full name"),
        email: String::new(),
        role,
        password: Some("Pa55w0rd99".into()),
        photo: None,
        judge_number,
        event_id: event_id.map(str::to_string),
        competition_ids: Vec::new(),
    }
}

pub fn competition_request(name: &str, number: u32, multiplier: f64) -> CompetitionRequest {
    CompetitionRequest {
        event_id: EVENT_ID.into(),
        number,
        name: name.into(),
        multiplier,
        finalists: 0,
        is_finalist: false,
        criteria: vec![
            CriteriaDefinition::new("Mastery", 50.0),
            CriteriaDefinition::new("Stage Presence", 30.0),
            CriteriaDefinition::new("Audience Impact", 20.0),
        ],
    }
}
