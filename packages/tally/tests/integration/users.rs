use crate::common::{EVENT_ID, TestEvent, user};
use common::listing::paginate;
use common::role::landing_for;
use common::{Landing, ListQuery, Menu, Role, UserListQuery, UserTab};
use tally::TallyError;
use tally::competition::active_competition;
use tally::user::{
    authorize_user_change, find_conflict, normalize_user, users_for_tab, validate_new_user,
    validate_password_reset,
};

mod accounts {
    use super::*;

    #[test]
    fn manager_creates_a_judge() {
        let app = TestEvent::seed();
        let manager = app.actor("manager1");

        let req = normalize_user(user("  Judge3 ", Role::Judge, 3, Some(EVENT_ID)));
        authorize_user_change(&manager, req.role).unwrap();
        validate_new_user(&req).unwrap();
        find_conflict(&app.users, &req, None).unwrap();

        let created = req.into_user("judge3");
        assert_eq!(created.username, "judge3");
        assert_eq!(created.judge_number, 3);
    }

    #[test]
    fn taken_judge_seat_is_a_conflict() {
        let app = TestEvent::seed();
        let req = normalize_user(user("judge9", Role::Judge, 2, Some(EVENT_ID)));
        assert_eq!(
            find_conflict(&app.users, &req, None),
            Err(TallyError::Conflict(
                "User number/username already exists".into()
            ))
        );
    }

    #[test]
    fn managers_are_reserved_to_admins() {
        let app = TestEvent::seed();
        assert_eq!(
            authorize_user_change(&app.actor("manager1"), Role::Manager),
            Err(TallyError::PermissionDenied)
        );
        assert!(authorize_user_change(&app.actor("admin"), Role::Manager).is_ok());
        assert!(authorize_user_change(&app.actor("judge1"), Role::Tabulator).is_err());
    }

    #[test]
    fn password_reset_needs_eight_characters() {
        assert!(validate_password_reset("short").is_err());
        assert!(validate_password_reset("longenough").is_ok());
    }
}

mod users_page {
    use super::*;

    #[test]
    fn tabs_are_scoped_to_the_managers_event() {
        let app = TestEvent::seed();
        let manager = app.actor("manager1");

        let query: UserListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.tab, UserTab::Judges);

        let judges = users_for_tab(&manager, &app.users, query.tab);
        let page = paginate(&judges, &query.query, &app.config.listing);
        let names: Vec<_> = page.data.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["judge1", "judge2", "tab1"]);

        let managers = users_for_tab(&manager, &app.users, UserTab::Managers);
        let page = paginate(&managers, &ListQuery::default(), &app.config.listing);
        assert_eq!(page.pagination.total, 1);
    }
}

mod navigation {
    use super::*;

    #[test]
    fn judges_land_on_the_active_competition() {
        let mut app = TestEvent::seed();
        let active = active_competition(&app.competitions, EVENT_ID).map(|c| c.id.as_str());
        assert_eq!(landing_for(Role::Judge, active), Landing::Waiting);

        app.activate("gown");
        let active = active_competition(&app.competitions, EVENT_ID).map(|c| c.id.as_str());
        assert_eq!(
            landing_for(Role::Judge, active),
            Landing::Competition("gown".into())
        );
        assert_eq!(landing_for(Role::Manager, active), Landing::Home);
    }

    #[test]
    fn sidebar_follows_role() {
        assert!(!Role::Judge.can_see(Menu::Home));
        assert!(!Role::Admin.can_see(Menu::Competitions));
        assert!(Role::Admin.can_see(Menu::Events));
        assert!(!Role::Manager.can_see(Menu::Events));
    }
}
