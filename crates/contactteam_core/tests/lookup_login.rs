use contactteam_core::{
    attempt_login, logout, resolve_route, Directory, LoginOutcome, Route, Screen,
    INVALID_CODE_MESSAGE,
};

fn directory() -> Directory {
    Directory::bundled().unwrap()
}

#[test]
fn every_login_code_resolves_to_its_own_community() {
    let directory = directory();
    for community in directory.communities() {
        let found = directory
            .find_community_by_code(&community.login_code)
            .expect("own code must resolve");
        assert_eq!(found.id, community.id);
    }
}

#[test]
fn wrong_code_is_not_found() {
    let directory = directory();
    assert!(directory.find_community_by_code("wrong").is_none());
    assert!(directory.find_community_by_code("abc123").is_none());
}

#[test]
fn login_hit_navigates_to_community_route() {
    let outcome = attempt_login(&directory(), "ABC123");
    assert_eq!(outcome, LoginOutcome::Navigate(Route::Community("vka".to_string())));
}

#[test]
fn login_trims_entered_code() {
    let outcome = attempt_login(&directory(), "  ABC123\n");
    assert_eq!(outcome, LoginOutcome::Navigate(Route::Community("vka".to_string())));
}

#[test]
fn login_miss_shows_fixed_message_without_navigation() {
    let outcome = attempt_login(&directory(), "wrong");
    assert_eq!(
        outcome,
        LoginOutcome::Rejected {
            message: INVALID_CODE_MESSAGE
        }
    );
    assert_eq!(
        INVALID_CODE_MESSAGE,
        "Neteisingas prisijungimo kodas. Bandykite dar kartą."
    );

    assert!(matches!(
        attempt_login(&directory(), "   "),
        LoginOutcome::Rejected { .. }
    ));
}

#[test]
fn community_route_resolves_and_unknown_id_redirects_to_login() {
    let directory = directory();

    match resolve_route(&directory, &Route::parse("/community/vka")) {
        Screen::Directory(community) => assert_eq!(community.login_code, "ABC123"),
        Screen::Login => panic!("known community must resolve"),
    }
    assert_eq!(
        resolve_route(&directory, &Route::parse("/community/ghost")),
        Screen::Login
    );
    assert_eq!(resolve_route(&directory, &Route::parse("/x/y")), Screen::Login);
    assert_eq!(resolve_route(&directory, &logout()), Screen::Login);
}

#[test]
fn dataset_file_can_be_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    std::fs::write(
        &path,
        r#"{"communities": [{"id": "x", "name": "X", "loginCode": "XYZ", "logoPath": "/x.png", "categories": []}]}"#,
    )
    .unwrap();

    let directory = Directory::from_path(&path).unwrap();
    assert_eq!(
        directory.find_community_by_code("XYZ").map(|c| c.id.as_str()),
        Some("x")
    );
    assert!(Directory::from_path(dir.path().join("missing.json")).is_err());
}
