//! Integration tests for channel moderation: MODE, INVITE and KICK.

mod common;

use common::client::verb;
use common::{TestClient, TestServer};

/// alice creates `#test` and bob joins it.
async fn setup(port: u16) -> (TestServer, TestClient, TestClient) {
    let server = TestServer::spawn(port).await.expect("spawn server");
    let mut alice = server.register("alice").await.expect("register alice");
    let mut bob = server.register("bob").await.expect("register bob");

    alice.send_raw("JOIN #test").await.unwrap();
    alice.expect("366").await.unwrap();
    bob.send_raw("JOIN #test").await.unwrap();
    bob.expect("366").await.unwrap();
    alice.expect("JOIN").await.unwrap();
    (server, alice, bob)
}

#[tokio::test]
async fn test_invite_only() {
    let server = TestServer::spawn(16821).await.expect("spawn server");
    let mut alice = server.register("alice").await.expect("register alice");
    let mut bob = server.register("bob").await.expect("register bob");

    alice.send_raw("JOIN #test").await.unwrap();
    alice.expect("366").await.unwrap();
    alice.send_raw("MODE #test +i").await.unwrap();
    assert_eq!(
        alice.expect("MODE").await.unwrap(),
        ":alice!alice@127.0.0.1 MODE #test +i"
    );

    bob.send_raw("JOIN #test").await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        ":ircserv 473 bob #test :Cannot join channel (+i)"
    );

    alice.send_raw("INVITE bob #test").await.unwrap();
    assert_eq!(alice.recv().await.unwrap(), ":ircserv 341 alice bob #test");
    assert_eq!(
        bob.recv().await.unwrap(),
        ":alice!alice@127.0.0.1 INVITE bob #test"
    );

    bob.send_raw("JOIN #test").await.unwrap();
    assert_eq!(bob.recv().await.unwrap(), ":bob!bob@127.0.0.1 JOIN #test");
}

#[tokio::test]
async fn test_member_limit() {
    let server = TestServer::spawn(16822).await.expect("spawn server");
    let mut alice = server.register("alice").await.expect("register alice");
    let mut bob = server.register("bob").await.expect("register bob");
    let mut carol = server.register("carol").await.expect("register carol");

    alice.send_raw("JOIN #test").await.unwrap();
    alice.expect("366").await.unwrap();
    alice.send_raw("MODE #test +l 2").await.unwrap();
    alice.expect("MODE").await.unwrap();

    bob.send_raw("JOIN #test").await.unwrap();
    bob.expect("366").await.unwrap();

    carol.send_raw("JOIN #test").await.unwrap();
    assert_eq!(
        carol.recv().await.unwrap(),
        ":ircserv 471 carol #test :Cannot join channel (+l)"
    );
}

#[tokio::test]
async fn test_channel_key() {
    let (server, mut alice, _bob) = setup(16823).await;
    let mut carol = server.register("carol").await.expect("register carol");

    alice.send_raw("MODE #test +k secret").await.unwrap();
    alice.expect("MODE").await.unwrap();

    carol.send_raw("JOIN #test nope").await.unwrap();
    assert_eq!(verb(&carol.recv().await.unwrap()), "475");
    carol.send_raw("JOIN #test secret").await.unwrap();
    assert_eq!(carol.recv().await.unwrap(), ":carol!carol@127.0.0.1 JOIN #test");
}

#[tokio::test]
async fn test_mode_query_and_relay() {
    let (_server, mut alice, mut bob) = setup(16824).await;

    alice.send_raw("MODE #test +tl 5").await.unwrap();
    let relay = ":alice!alice@127.0.0.1 MODE #test +tl 5";
    assert_eq!(alice.recv().await.unwrap(), relay);
    assert_eq!(bob.recv().await.unwrap(), relay);

    bob.send_raw("MODE #test").await.unwrap();
    assert_eq!(bob.recv().await.unwrap(), ":ircserv 324 bob #test +tl 5");

    bob.send_raw("MODE #test -t").await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        ":ircserv 482 bob #test :You're not channel operator"
    );
}

#[tokio::test]
async fn test_kick() {
    let (_server, mut alice, mut bob) = setup(16825).await;

    alice.send_raw("KICK #test bob :behave").await.unwrap();
    let kick = ":alice!alice@127.0.0.1 KICK #test bob :behave";
    assert_eq!(alice.recv().await.unwrap(), kick);
    assert_eq!(bob.recv().await.unwrap(), kick);

    bob.send_raw("PRIVMSG #test :let me back").await.unwrap();
    assert_eq!(verb(&bob.recv().await.unwrap()), "404");
}
