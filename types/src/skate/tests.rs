use super::*;
use proptest::prelude::*;

#[test]
fn test_letters_for_score() {
    assert_eq!(letters_for(0), "");
    assert_eq!(letters_for(3), "SKA");
    assert_eq!(letters_for(LETTERS_TOTAL), "SKATE");
    assert_eq!(letters_for(9), "SKATE");
}

#[test]
fn test_past_self_naming() {
    assert_eq!(past_self_name("janedoe"), "past_janedoe");
    assert_eq!(side_of("janedoe", "janedoe"), Some(Side::User));
    assert_eq!(side_of("past_janedoe", "janedoe"), Some(Side::PastSelf));
    assert_eq!(side_of("past_johndoe", "janedoe"), None);
    assert_eq!(side_of("johndoe", "janedoe"), None);
    assert_eq!(actor_name(Side::PastSelf, "janedoe"), "past_janedoe");
    assert_eq!(actor_name(Side::User, "janedoe"), "janedoe");
}

#[test]
fn test_side_names() {
    assert_eq!(Side::User.display_name(), "New you");
    assert_eq!(Side::PastSelf.to_string(), "Past you");
    assert_eq!(Side::User.other(), Side::PastSelf);
    assert_eq!(Side::PastSelf.other(), Side::User);
}

#[test]
fn test_validate_user_name() {
    assert_eq!(validate_user_name("janedoe"), Ok(()));
    assert_eq!(validate_user_name(""), Err(UserNameError::Empty));
    assert!(matches!(
        validate_user_name(&"x".repeat(MAX_USER_NAME_LENGTH + 1)),
        Err(UserNameError::TooLong { .. })
    ));
    assert!(matches!(
        validate_user_name("past_janedoe"),
        Err(UserNameError::ReservedPrefix { .. })
    ));
}

#[test]
fn test_user_name_error_is_cloneable() {
    let err = validate_user_name("past_janedoe").unwrap_err();
    let copy = err.clone();
    assert_eq!(copy, err);
    assert_eq!(
        copy.to_string(),
        "user name may not start with reserved prefix \"past_\""
    );
}

#[test]
fn test_landing_rate() {
    let mut stats = TrickStats::new(TrickId(4));
    assert_eq!(stats.landing_rate(), 0.0);
    stats.record(true);
    stats.record(false);
    stats.record(true);
    stats.record(true);
    assert_eq!(stats.attempts, 4);
    assert_eq!(stats.lands, 3);
    assert!((stats.landing_rate() - 0.75).abs() < f64::EPSILON);
}

#[test]
fn test_standard_catalog() {
    let catalog = TrickCatalog::standard();
    assert_eq!(catalog.len(), STANDARD_TRICKS.len());
    let ollie = catalog.by_name("Ollie").expect("ollie present");
    assert_eq!(ollie.id, TrickId(1));
    assert!(catalog.by_name("Heelflip Bigspin").is_some());
    assert_eq!(catalog.name_or_fallback(TrickId(7)), "Kickflip");
    assert_eq!(catalog.name_or_fallback(TrickId(999)), "trick #999");
}

#[test]
fn test_catalog_insert_is_idempotent() {
    let mut catalog = TrickCatalog::standard();
    let id = catalog.insert("Tre Flip Late Shuv");
    assert_eq!(id, TrickId(STANDARD_TRICKS.len() as u32 + 1));
    assert_eq!(catalog.insert("Tre Flip Late Shuv"), id);
    assert_eq!(catalog.insert("Ollie"), TrickId(1));
}

#[test]
fn test_attempt_serde_shape() {
    let attempt = Attempt::new(TrickId(3), "janedoe", true, 1_000).in_game(7);
    let json = serde_json::to_value(&attempt).unwrap();
    assert_eq!(json["trick_id"], 3);
    assert_eq!(json["game_id"], 7);
    let decoded: Attempt = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, attempt);

    let bare: Attempt = serde_json::from_str(
        r#"{"trick_id":1,"user":"past_janedoe","landed":false,"time_of_attempt_ms":5}"#,
    )
    .unwrap();
    assert_eq!(bare.game_id, None);
}

proptest! {
    #[test]
    fn landing_rate_is_a_fraction(outcomes in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut stats = TrickStats::new(TrickId(1));
        for landed in &outcomes {
            stats.record(*landed);
        }
        let rate = stats.landing_rate();
        prop_assert!((0.0..=1.0).contains(&rate));
        prop_assert_eq!(stats.attempts as usize, outcomes.len());
    }
}
