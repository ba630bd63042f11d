//! Friend graph command handlers

use crate::cli::{ActAs, FriendCommands};
use crate::config::Config;
use crate::services::{FriendError, FriendGraph, SeaOrmFriendGraph};

use super::account::authenticate;
use super::open_store;
use super::output::{print_json, print_summaries};

pub async fn cmd_friends(
    config: &Config,
    json: bool,
    auth: &ActAs,
    command: FriendCommands,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let actor = authenticate(config, &store, auth).await?;
    let graph = SeaOrmFriendGraph::new(store);

    let result = match command {
        FriendCommands::Add { target } => graph.add_friend(&actor, &target).await.map(|added| {
            if json {
                println!("{}", serde_json::json!({ "target": target, "added": added }));
            } else if added {
                println!("✓ Added {target} to friends");
            } else {
                println!("{target} is already in your friends");
            }
        }),

        FriendCommands::Check { target } => {
            graph.is_friend(&actor, &target).await.map(|is_friend| {
                if json {
                    println!("{}", serde_json::json!({ "target": target, "friend": is_friend }));
                } else if is_friend {
                    println!("You added {target}");
                } else {
                    println!("You have not added {target}");
                }
            })
        }

        FriendCommands::List { of } => {
            let rows = match &of {
                Some(username) => graph.mutual_friends_of(username).await,
                None => graph.mutual_friends(&actor).await,
            };
            match rows {
                Ok(rows) if json => return print_json(&rows),
                Ok(rows) => {
                    let owner = of.as_deref().unwrap_or(&actor.username);
                    print_summaries(&format!("Friends of {owner}"), &rows);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        FriendCommands::Requests => {
            let incoming = graph.incoming_requests(&actor).await?;
            let outgoing = graph.outgoing_requests(&actor).await?;
            if json {
                return print_json(&serde_json::json!({
                    "incoming": incoming,
                    "outgoing": outgoing,
                }));
            }
            print_summaries("Incoming requests", &incoming);
            println!();
            print_summaries("Outgoing requests", &outgoing);
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(FriendError::UserNotFound(username)) => anyhow::bail!("User '{username}' not found"),
        Err(e) => Err(e.into()),
    }
}
