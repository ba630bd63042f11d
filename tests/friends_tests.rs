//! Friend graph behaviour against an in-memory store.

mod common;

use socnet::models::account::Account;
use socnet::models::profile::ProfileSummary;
use socnet::services::{FriendError, FriendGraph, SeaOrmFriendGraph};

use common::{memory_store, register};

fn usernames(rows: &[ProfileSummary]) -> Vec<&str> {
    let mut names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
    names.sort_unstable();
    names
}

async fn setup() -> (socnet::db::Store, SeaOrmFriendGraph, Account, Account) {
    let store = memory_store().await;
    let alice = register(&store, "alice").await;
    let bob = register(&store, "bob").await;
    let graph = SeaOrmFriendGraph::new(store.clone());
    (store, graph, alice, bob)
}

#[tokio::test]
async fn add_friend_is_idempotent() {
    let (store, graph, alice, bob) = setup().await;

    assert!(!graph.is_friend(&alice, "bob").await.unwrap());

    assert!(graph.add_friend(&alice, "bob").await.unwrap());
    assert!(!graph.add_friend(&alice, "bob").await.unwrap());
    assert!(!graph.add_friend(&alice, "bob").await.unwrap());

    assert!(graph.is_friend(&alice, "bob").await.unwrap());
    assert!(!graph.is_friend(&bob, "alice").await.unwrap());
    assert_eq!(store.count_friend_edges(alice.id, bob.id).await.unwrap(), 1);
}

#[tokio::test]
async fn one_way_edge_is_a_request() {
    let (_store, graph, alice, bob) = setup().await;

    graph.add_friend(&alice, "bob").await.unwrap();

    let outgoing = graph.outgoing_requests(&alice).await.unwrap();
    assert_eq!(usernames(&outgoing), vec!["bob"]);
    assert_eq!(outgoing[0].user_id, bob.id);
    assert_eq!(outgoing[0].city, "Kazan");

    let incoming = graph.incoming_requests(&bob).await.unwrap();
    assert_eq!(usernames(&incoming), vec!["alice"]);

    assert!(graph.incoming_requests(&alice).await.unwrap().is_empty());
    assert!(graph.outgoing_requests(&bob).await.unwrap().is_empty());
    assert!(graph.mutual_friends(&alice).await.unwrap().is_empty());
    assert!(graph.mutual_friends(&bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn reciprocal_edges_are_mutual() {
    let (store, graph, alice, bob) = setup().await;
    let carol = register(&store, "carol").await;

    graph.add_friend(&alice, "bob").await.unwrap();
    graph.add_friend(&bob, "alice").await.unwrap();
    graph.add_friend(&carol, "alice").await.unwrap();

    assert_eq!(usernames(&graph.mutual_friends(&alice).await.unwrap()), vec!["bob"]);
    assert_eq!(usernames(&graph.mutual_friends(&bob).await.unwrap()), vec!["alice"]);

    // Mutual friends never show up as requests.
    assert_eq!(usernames(&graph.incoming_requests(&alice).await.unwrap()), vec!["carol"]);
    assert!(graph.outgoing_requests(&alice).await.unwrap().is_empty());
    assert!(graph.incoming_requests(&bob).await.unwrap().is_empty());
    assert!(graph.outgoing_requests(&bob).await.unwrap().is_empty());

    assert_eq!(usernames(&graph.outgoing_requests(&carol).await.unwrap()), vec!["alice"]);
}

#[tokio::test]
async fn mutual_friends_of_another_user() {
    let (_store, graph, alice, bob) = setup().await;

    graph.add_friend(&alice, "bob").await.unwrap();
    graph.add_friend(&bob, "alice").await.unwrap();

    let friends = graph.mutual_friends_of("bob").await.unwrap();
    assert_eq!(usernames(&friends), vec!["alice"]);
}

#[tokio::test]
async fn unknown_target_is_an_error_not_false() {
    let (_store, graph, alice, _bob) = setup().await;

    let err = graph.add_friend(&alice, "nobody").await.unwrap_err();
    assert!(matches!(err, FriendError::UserNotFound(ref name) if name == "nobody"));

    let err = graph.is_friend(&alice, "nobody").await.unwrap_err();
    assert!(matches!(err, FriendError::UserNotFound(_)));

    let err = graph.mutual_friends_of("nobody").await.unwrap_err();
    assert!(matches!(err, FriendError::UserNotFound(_)));
}

#[tokio::test]
async fn self_edge_is_kept_and_reads_as_mutual() {
    let (_store, graph, alice, _bob) = setup().await;

    assert!(graph.add_friend(&alice, "alice").await.unwrap());
    assert!(graph.is_friend(&alice, "alice").await.unwrap());

    assert_eq!(usernames(&graph.mutual_friends(&alice).await.unwrap()), vec!["alice"]);
    assert!(graph.incoming_requests(&alice).await.unwrap().is_empty());
    assert!(graph.outgoing_requests(&alice).await.unwrap().is_empty());
}
