mod common;

use chrono::{TimeZone, Utc};

use chirp_core::domain::{NewPost, NewReshare, TimelineItem};
use chirp_core::presentation::feed_entries;

use common::{account, engine};

#[tokio::test]
async fn follower_sees_the_followed_accounts_post() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    engine.content.publish(alice.id, "hello world").await.unwrap();
    engine.social.follow(bobby.id, alice.id).await.unwrap();

    let items = engine.timeline.home(bobby.id, 50).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].post().body, "hello world");
    assert_eq!(items[0].display_author().handle, "alice");
    assert!(!items[0].is_reshare());
}

#[tokio::test]
async fn reshare_reaches_followers_of_the_resharer() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let carol = account(&engine, "carol").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();
    engine.content.reshare(bobby.id, post.id).await.unwrap();
    engine.social.follow(carol.id, bobby.id).await.unwrap();

    let items = engine.timeline.home(carol.id, 50).await.unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].is_reshare());
    assert_eq!(items[0].display_author().handle, "bobby");

    let entries = feed_entries(&items);
    assert_eq!(entries[0].body, "hello world");
    assert_eq!(entries[0].author, "alice");
    assert!(entries[0].is_reshare);
    assert_eq!(entries[0].reshared_by.as_deref(), Some("bobby"));
    assert_eq!(entries[0].id, post.id);
}

#[tokio::test]
async fn home_timeline_is_newest_first_across_posts_and_reshares() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    engine.social.follow(bobby.id, alice.id).await.unwrap();

    let first = engine.content.publish(alice.id, "first").await.unwrap();
    let second = engine.content.publish(bobby.id, "second").await.unwrap();
    let reshare = engine.content.reshare(bobby.id, first.id).await.unwrap();

    let items = engine.timeline.home(bobby.id, 50).await.unwrap();

    assert_eq!(items.len(), 3);
    assert!(matches!(&items[0], TimelineItem::Reshare { reshare: r, .. } if r.id == reshare.id));
    assert_eq!(items[1].post().id, second.id);
    assert_eq!(items[2].post().id, first.id);
    assert!(
        items
            .windows(2)
            .all(|w| w[0].ordering_timestamp() >= w[1].ordering_timestamp())
    );
}

#[tokio::test]
async fn limit_truncates_and_zero_is_empty() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    for n in 0..5 {
        engine
            .content
            .publish(alice.id, &format!("post number {n}"))
            .await
            .unwrap();
    }

    let items = engine.timeline.account(alice.id, 3).await.unwrap();
    let bodies: Vec<&str> = items.iter().map(|i| i.post().body.as_str()).collect();
    assert_eq!(bodies, vec!["post number 4", "post number 3", "post number 2"]);

    assert!(engine.timeline.home(alice.id, 0).await.unwrap().is_empty());
    assert!(engine.timeline.global(0).await.unwrap().is_empty());
}

#[tokio::test]
async fn equal_timestamps_order_deterministically() {
    let (engine, store) = engine();
    let stores = store.stores();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

    let older = stores
        .posts
        .insert(NewPost::new(alice.id, "same instant a", at).unwrap())
        .await
        .unwrap();
    let newer = stores
        .posts
        .insert(NewPost::new(bobby.id, "same instant b", at).unwrap())
        .await
        .unwrap();
    stores
        .reshares
        .insert(NewReshare::of(&bobby, &older, at).unwrap())
        .await
        .unwrap();
    engine.social.follow(bobby.id, alice.id).await.unwrap();

    let first = engine.timeline.home(bobby.id, 50).await.unwrap();
    let again = engine.timeline.home(bobby.id, 50).await.unwrap();
    assert_eq!(first, again);

    // Reshare first, then posts by descending id.
    assert!(first[0].is_reshare());
    assert_eq!(first[1].post().id, newer.id);
    assert_eq!(first[2].post().id, older.id);
}

#[tokio::test]
async fn global_feed_skips_reshares_and_deleted_posts() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let kept = engine.content.publish(alice.id, "kept").await.unwrap();
    let gone = engine.content.publish(alice.id, "gone").await.unwrap();
    engine.content.reshare(bobby.id, kept.id).await.unwrap();
    engine.content.delete_post(alice.id, gone.id).await.unwrap();

    let items = engine.timeline.global(100).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].post().id, kept.id);
    assert!(!items[0].is_reshare());
}

#[tokio::test]
async fn account_timeline_includes_the_accounts_reshares() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();
    engine.content.reshare(bobby.id, post.id).await.unwrap();

    let items = engine.timeline.account(bobby.id, 50).await.unwrap();

    assert_eq!(items.len(), 1);
    assert!(items[0].is_reshare());
    assert_eq!(items[0].post_author().handle, "alice");
}

#[tokio::test]
async fn reshare_of_a_deleted_post_drops_out() {
    let (engine, _) = engine();
    let alice = account(&engine, "alice").await;
    let bobby = account(&engine, "bobby").await;
    let post = engine.content.publish(alice.id, "hello world").await.unwrap();
    engine.content.reshare(bobby.id, post.id).await.unwrap();

    engine.content.delete_post(alice.id, post.id).await.unwrap();

    assert!(engine.timeline.account(bobby.id, 50).await.unwrap().is_empty());
}
