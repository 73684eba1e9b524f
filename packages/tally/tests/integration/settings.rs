use crate::common::{EVENT_ID, TestEvent, competition_request};
use common::config::TallyConfig;
use common::listing::paginate;
use common::{ListQuery, SortOrder};
use tally::TallyError;
use tally::candidate::{self, CandidateRequest};
use tally::competition::{self, active_competition};
use tally::criteria::CriteriaDefinition;
use tally::event;

mod competitions {
    use super::*;

    #[test]
    fn manager_adds_a_competition() {
        let mut app = TestEvent::seed();
        let manager = app.actor("manager1");
        manager.require_permission("competition:manage").unwrap();

        let req = competition_request("Swimwear", 3, 1.0);
        competition::validate_competition(&req).unwrap();
        competition::find_conflict(&app.competitions, &req, None).unwrap();
        app.competitions.push(req.into_competition("swim"));

        assert!(!app.competition("swim").is_active);
        assert!(active_competition(&app.competitions, EVENT_ID).is_none());
    }

    #[test]
    fn criteria_must_add_up_to_100() {
        let mut req = competition_request("Swimwear", 3, 1.0);
        req.criteria = vec![
            CriteriaDefinition::new("Poise", 60.0),
            CriteriaDefinition::new("Confidence", 30.0),
        ];
        let err = competition::validate_competition(&req).unwrap_err();
        assert_eq!(err, TallyError::InvalidTotal { total: 90.0 });
        assert_eq!(err.code(), "INVALID_TOTAL");

        req.criteria.push(CriteriaDefinition::new("", 10.0));
        assert_eq!(
            competition::validate_competition(&req),
            Err(TallyError::BlankCriteria)
        );
    }

    #[test]
    fn duplicate_competition_is_a_conflict() {
        let app = TestEvent::seed();
        let req = competition_request("Talent", 9, 1.0);
        let err = competition::find_conflict(&app.competitions, &req, None).unwrap_err();
        assert_eq!(err.code(), "CONFLICT");
    }

    #[test]
    fn tabulator_cannot_manage_competitions() {
        let app = TestEvent::seed();
        assert_eq!(
            app.actor("tab1").require_permission("competition:manage"),
            Err(TallyError::PermissionDenied)
        );
    }
}

mod candidates {
    use super::*;

    fn request(name: &str, number: u32) -> CandidateRequest {
        CandidateRequest {
            event_id: EVENT_ID.into(),
            number,
            full_name: name.into(),
            course: String::new(),
            photo: None,
        }
    }

    #[test]
    fn candidate_numbers_are_unique_per_event() {
        let app = TestEvent::seed();
        let req = request("Joy Dela Cruz", 2);
        candidate::validate_candidate(&req).unwrap();
        assert!(candidate::find_conflict(&app.candidates, &req, None).is_err());
        assert!(candidate::find_conflict(&app.candidates, &request("Joy Dela Cruz", 4), None).is_ok());
    }

    #[test]
    fn candidate_list_is_filtered_sorted_and_paged() {
        let app = TestEvent::seed();

        let query: ListQuery =
            serde_json::from_value(serde_json::json!({"sort": "z-a", "limit": 2})).unwrap();
        let page = paginate(&app.candidates, &query, &app.config.listing);
        let names: Vec<_> = page.data.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, ["Maria Santos", "Liza Reyes"]);
        assert_eq!(page.pagination.total_pages, 2);

        let query = ListQuery {
            filter: "CRUZ".into(),
            ..ListQuery::default()
        };
        let page = paginate(&app.candidates, &query, &app.config.listing);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].display_number(), "02");
        assert_eq!(query.sort, SortOrder::AToZ);
    }
}

mod events {
    use super::*;

    #[test]
    fn event_with_users_cannot_be_deleted() {
        let mut app = TestEvent::seed();
        let err = event::ensure_deletable(EVENT_ID, &app.users).unwrap_err();
        assert_eq!(err.code(), "CONFLICT");

        app.users.retain(|u| u.event_id.is_none());
        event::ensure_deletable(EVENT_ID, &app.users).unwrap();
    }

    #[test]
    fn only_admin_manages_events() {
        let app = TestEvent::seed();
        assert!(app.actor("admin").require_permission("event:manage").is_ok());
        assert!(app.actor("manager1").require_permission("event:manage").is_err());
    }
}

mod configuration {
    use super::*;

    #[test]
    fn defaults_drive_listing_and_passwords() {
        let config = TallyConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.listing.default_limit, 10);
        assert_eq!(config.listing.clamp_limit(1_000), config.listing.max_limit);

        let password = common::password::generate_password(&config.password);
        assert!(common::password::is_acceptable(&password, &config.password));
        assert!(!password.contains('R') && !password.contains('o'));
    }

    #[test]
    fn oversized_page_request_is_capped() {
        let mut app = TestEvent::seed();
        app.config.listing.max_limit = 2;

        let query: ListQuery =
            serde_json::from_value(serde_json::json!({"limit": "1000000000"})).unwrap();
        let page = paginate(&app.candidates, &query, &app.config.listing);
        assert_eq!(page.pagination.per_page, 2);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.total_pages, 2);
    }
}
