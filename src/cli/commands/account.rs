//! Account and profile command handlers

use crate::cli::{ActAs, ProfileArgs};
use crate::config::Config;
use crate::db::Store;
use crate::models::account::Account;
use crate::models::profile::ProfileInput;
use crate::services::{
    AuthError, Authenticator, RegistrationRequest, SeaOrmAuthenticator, SeaOrmUserDirectory,
    UserDirectory, UserError,
};

use super::output::print_json;
use super::{open_store, shared};

/// Resolve `--as`/`--password` into the account a command acts for.
pub(crate) async fn authenticate(
    config: &Config,
    store: &Store,
    auth: &ActAs,
) -> anyhow::Result<Account> {
    let authenticator = SeaOrmAuthenticator::new(store.clone(), shared(config));

    match authenticator
        .authenticate(&auth.username, &auth.password)
        .await
    {
        Ok(account) => Ok(account),
        Err(AuthError::InvalidCredentials) => {
            anyhow::bail!("Invalid username or password")
        }
        Err(e) => Err(e.into()),
    }
}

fn profile_input(profile: ProfileArgs) -> ProfileInput {
    ProfileInput {
        name: profile.name,
        surname: profile.surname,
        age: profile.age,
        gender: profile.gender,
        city: profile.city,
        interests: profile.interests,
    }
}

pub async fn cmd_register(
    config: &Config,
    json: bool,
    username: String,
    password: String,
    profile: ProfileArgs,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let users = SeaOrmUserDirectory::new(store, shared(config));

    let request = RegistrationRequest {
        username,
        password,
        name: profile.name,
        surname: profile.surname,
        age: profile.age,
        gender: profile.gender,
        city: profile.city,
        interests: profile.interests,
    };

    let account = match users.register(request).await {
        Ok(account) => account,
        Err(UserError::UsernameInUse) => anyhow::bail!("Username is already taken"),
        Err(UserError::Validation(msg)) => anyhow::bail!("Invalid registration: {msg}"),
        Err(e) => return Err(e.into()),
    };

    if json {
        return print_json(&account);
    }

    println!("✓ Registered {} (ID: {})", account.username, account.id);
    Ok(())
}

pub async fn cmd_show_user(config: &Config, json: bool, username: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let users = SeaOrmUserDirectory::new(store, shared(config));

    let page = match users.get_user_page(username).await {
        Ok(page) => page,
        Err(UserError::UsernameNotFound(_)) => anyhow::bail!("User '{username}' not found"),
        Err(e) => return Err(e.into()),
    };

    if json {
        return print_json(&page);
    }

    println!("{} (ID: {})", page.account.username, page.account.id);
    println!("{:-<70}", "");

    match &page.profile {
        Some(profile) => {
            println!("Name:    {} {}", profile.name, profile.surname);
            println!("Age:     {}", profile.age);
            println!("Gender:  {}", profile.gender);
            println!("City:    {}", profile.city);
        }
        None => println!("No profile information."),
    }

    if page.interests.is_empty() {
        println!("Interests: none");
    } else {
        println!("Interests: {}", page.interests.join(", "));
    }

    Ok(())
}

/// Interests an edit should store. No `--interest` keeps `current`.
fn interests_after_edit(given: Vec<String>, current: Vec<String>, clear: bool) -> Vec<String> {
    if clear || !given.is_empty() {
        given
    } else {
        current
    }
}

pub async fn cmd_edit_profile(
    config: &Config,
    auth: &ActAs,
    mut profile: ProfileArgs,
    clear_interests: bool,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let actor = authenticate(config, &store, auth).await?;
    let users = SeaOrmUserDirectory::new(store, shared(config));

    let current = if profile.interests.is_empty() && !clear_interests {
        users.get_interests(actor.id).await?
    } else {
        Vec::new()
    };
    profile.interests =
        interests_after_edit(std::mem::take(&mut profile.interests), current, clear_interests);

    match users.edit_profile(actor.id, profile_input(profile)).await {
        Ok(()) => {}
        Err(UserError::Validation(msg)) => anyhow::bail!("Invalid profile: {msg}"),
        Err(e) => return Err(e.into()),
    }

    println!("✓ Profile of {} updated", actor.username);
    Ok(())
}

pub async fn cmd_passwd(config: &Config, auth: &ActAs, new_password: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let actor = authenticate(config, &store, auth).await?;
    let authenticator = SeaOrmAuthenticator::new(store, shared(config));

    match authenticator
        .change_password(&actor, &auth.password, new_password)
        .await
    {
        Ok(()) => {}
        Err(AuthError::Validation(msg)) => anyhow::bail!("{msg}"),
        Err(e) => return Err(e.into()),
    }

    println!("✓ Password changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::interests_after_edit;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_edit_without_interests_keeps_current() {
        let kept = interests_after_edit(Vec::new(), tags(&["Chess", "Go"]), false);
        assert_eq!(kept, tags(&["Chess", "Go"]));
    }

    #[test]
    fn test_edit_with_interests_replaces_current() {
        let replaced = interests_after_edit(tags(&["Yoga"]), tags(&["Chess"]), false);
        assert_eq!(replaced, tags(&["Yoga"]));
    }

    #[test]
    fn test_clear_interests_empties_the_set() {
        assert!(interests_after_edit(Vec::new(), tags(&["Chess"]), true).is_empty());
    }
}
