//! Registration, profile editing, search and index variants.

mod common;

use socnet::db::SchemaVariant;
use socnet::domain::Gender;
use socnet::models::profile::ProfileInput;
use socnet::models::search::SearchCriteria;
use socnet::services::{UserDirectory, UserError};

use common::{directory, memory_store, register, request};

fn usernames(rows: &[socnet::models::profile::ProfileSummary]) -> Vec<&str> {
    rows.iter().map(|r| r.username.as_str()).collect()
}

#[tokio::test]
async fn register_writes_account_profile_and_interests() {
    let store = memory_store().await;
    let users = directory(&store);

    let mut req = request("alice");
    req.interests = vec!["Chess".into(), "Go".into(), "Chess".into()];
    let account = users.register(req).await.unwrap();

    let page = users.get_user_page("alice").await.unwrap();
    assert_eq!(page.account, account);

    let profile = page.profile.expect("profile should exist");
    assert_eq!(profile.user_id, account.id);
    assert_eq!(profile.name, "Test");
    assert_eq!(profile.gender, Gender::Female);
    assert_eq!(page.interests, vec!["Chess".to_string(), "Go".to_string()]);

    let (_, hash) = store.get_account_with_password("alice").await.unwrap().unwrap();
    assert!(!hash.contains(common::PASSWORD));
}

#[tokio::test]
async fn duplicate_username_is_rejected_without_side_effects() {
    let store = memory_store().await;
    let users = directory(&store);

    register(&store, "alice").await;

    let mut again = request("alice");
    again.name = "Other".into();
    let err = users.register(again).await.unwrap_err();
    assert!(matches!(err, UserError::UsernameInUse));

    assert_eq!(store.count_accounts().await.unwrap(), 1);
    let page = users.get_user_page("alice").await.unwrap();
    assert_eq!(page.profile.unwrap().name, "Test");
}

#[tokio::test]
async fn registration_input_is_validated() {
    let store = memory_store().await;
    let users = directory(&store);

    let mut young = request("young");
    young.age = 17;
    assert!(matches!(users.register(young).await, Err(UserError::Validation(_))));

    assert!(matches!(
        users.register(request("ab")).await,
        Err(UserError::Validation(_))
    ));

    let mut blank = request("blank");
    blank.interests = vec!["  ".into()];
    assert!(matches!(users.register(blank).await, Err(UserError::Validation(_))));

    assert_eq!(store.count_accounts().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_username_is_not_found() {
    let store = memory_store().await;
    let users = directory(&store);

    assert!(matches!(
        users.get_by_username("ghost").await,
        Err(UserError::UsernameNotFound(_))
    ));
    assert!(matches!(
        users.get_user_page("ghost").await,
        Err(UserError::UsernameNotFound(_))
    ));
}

#[tokio::test]
async fn edit_replaces_profile_and_interest_set() {
    let store = memory_store().await;
    let users = directory(&store);
    let account = register(&store, "alice").await;

    let input = ProfileInput {
        name: "Alice".into(),
        surname: "Liddell".into(),
        age: 42,
        gender: Gender::Female,
        city: "Ufa".into(),
        interests: vec!["Yoga".into(), "Tennis".into()],
    };
    users.edit_profile(account.id, input.clone()).await.unwrap();

    let profile = users.get_profile(account.id).await.unwrap().unwrap();
    assert_eq!(profile.name, "Alice");
    assert_eq!(profile.age, 42);
    assert_eq!(profile.city, "Ufa");
    assert_eq!(
        users.get_interests(account.id).await.unwrap(),
        vec!["Yoga".to_string(), "Tennis".to_string()]
    );

    // "Chess" stays in the catalog even though nobody references it now.
    assert_eq!(store.count_interests().await.unwrap(), 3);

    let cleared = ProfileInput {
        interests: Vec::new(),
        ..input
    };
    users.edit_profile(account.id, cleared).await.unwrap();
    assert!(users.get_interests(account.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_edit_leaves_profile_untouched() {
    let store = memory_store().await;
    let users = directory(&store);
    let account = register(&store, "alice").await;

    let input = ProfileInput {
        name: String::new(),
        surname: "X".into(),
        age: 30,
        gender: Gender::Male,
        city: "Moscow".into(),
        interests: Vec::new(),
    };
    assert!(matches!(
        users.edit_profile(account.id, input).await,
        Err(UserError::Validation(_))
    ));

    let profile = users.get_profile(account.id).await.unwrap().unwrap();
    assert_eq!(profile.name, "Test");
    assert_eq!(users.get_interests(account.id).await.unwrap(), vec!["Chess"]);
}

async fn seed_people(store: &socnet::db::Store) {
    let users = directory(store);
    let people = [
        ("ann", "Ann", "Lee", 25, Gender::Female, "Kazan"),
        ("bo", "Bo", "Fox", 40, Gender::Male, "Moscow"),
        ("cy", "Ann", "Fox", 60, Gender::Female, "Moscow"),
    ];
    for (username, name, surname, age, gender, city) in people {
        let mut req = request(username);
        req.name = name.into();
        req.surname = surname.into();
        req.age = age;
        req.gender = gender;
        req.city = city.into();
        users.register(req).await.unwrap();
    }
}

#[tokio::test]
async fn search_honours_each_criterion() {
    let store = memory_store().await;
    seed_people(&store).await;
    let users = directory(&store);

    let search = |criteria: SearchCriteria| {
        let users = &users;
        async move { users.search(&criteria, SchemaVariant::Plain).await.unwrap() }
    };

    let all = search(SearchCriteria::default()).await;
    assert_eq!(usernames(&all), vec!["ann", "bo", "cy"]);

    let by_name = search(SearchCriteria {
        name: Some("Ann".into()),
        ..SearchCriteria::default()
    })
    .await;
    assert_eq!(usernames(&by_name), vec!["ann", "cy"]);

    let by_full_name = search(SearchCriteria {
        name: Some("Ann".into()),
        surname: Some("Fox".into()),
        ..SearchCriteria::default()
    })
    .await;
    assert_eq!(usernames(&by_full_name), vec!["cy"]);

    let by_age = search(SearchCriteria {
        age_from: Some(30),
        age_to: Some(60),
        ..SearchCriteria::default()
    })
    .await;
    assert_eq!(usernames(&by_age), vec!["bo", "cy"]);

    let by_gender_and_city = search(SearchCriteria {
        gender: Some(Gender::Female),
        city: Some("Moscow".into()),
        ..SearchCriteria::default()
    })
    .await;
    assert_eq!(usernames(&by_gender_and_city), vec!["cy"]);

    let blank_ignored = search(SearchCriteria {
        name: Some(String::new()),
        city: Some("Kazan".into()),
        ..SearchCriteria::default()
    })
    .await;
    assert_eq!(usernames(&blank_ignored), vec!["ann"]);

    let injection = search(SearchCriteria {
        name: Some("' OR '1'='1".into()),
        ..SearchCriteria::default()
    })
    .await;
    assert!(injection.is_empty());
}

#[tokio::test]
async fn search_rejects_out_of_range_ages() {
    let store = memory_store().await;
    let users = directory(&store);

    let criteria = SearchCriteria {
        age_to: Some(151),
        ..SearchCriteria::default()
    };
    assert!(matches!(
        users.search(&criteria, SchemaVariant::Plain).await,
        Err(UserError::Validation(_))
    ));
}

#[tokio::test]
async fn variants_return_base_rows_after_sync() {
    let store = memory_store().await;
    seed_people(&store).await;
    let users = directory(&store);

    let criteria = SearchCriteria {
        surname: Some("Fox".into()),
        ..SearchCriteria::default()
    };

    assert!(
        users
            .search(&criteria, SchemaVariant::CompositeIndex)
            .await
            .unwrap()
            .is_empty()
    );

    let report = store.sync_variant(SchemaVariant::CompositeIndex).await.unwrap();
    assert_eq!(report.rows("user_settings_wci"), Some(3));
    assert_eq!(report.rows("user_info_wci"), Some(3));
    store.sync_variant(SchemaVariant::SeparateIndices).await.unwrap();

    let plain = users.search(&criteria, SchemaVariant::Plain).await.unwrap();
    for variant in [SchemaVariant::CompositeIndex, SchemaVariant::SeparateIndices] {
        let rows = users.search(&criteria, variant).await.unwrap();
        assert_eq!(rows, plain, "variant {variant} should mirror the base tables");
    }

    // A second sync replaces rather than appends.
    let again = store.sync_variant(SchemaVariant::CompositeIndex).await.unwrap();
    assert_eq!(again.rows("user_info_wci"), Some(3));
    assert_eq!(
        users
            .search(&SearchCriteria::default(), SchemaVariant::CompositeIndex)
            .await
            .unwrap()
            .len(),
        3
    );

    assert!(store.sync_variant(SchemaVariant::Plain).await.is_err());
}
