//! Demo data, loaded when `LOAD_TEST_DATA=true`. Safe to run on every start.

use std::collections::HashMap;

use chirp_core::domain::{Account, PostId};
use chirp_core::ports::TokenClaims;
use chirp_core::{DomainError, Engine};

const ACCOUNTS: [&str; 6] = [
    "carlos.gomez",
    "maria.fernandez",
    "juan.perez",
    "ana.rodriguez",
    "luis.sanchez",
    "usuariocliente",
];

/// (resharer, author, index of the author's post, oldest first)
const RESHARES: [(&str, &str, usize); 6] = [
    ("maria.fernandez", "carlos.gomez", 0),
    ("carlos.gomez", "maria.fernandez", 1),
    ("juan.perez", "ana.rodriguez", 0),
    ("ana.rodriguez", "luis.sanchez", 1),
    ("luis.sanchez", "juan.perez", 0),
    ("usuariocliente", "carlos.gomez", 1),
];

const FOLLOWS: [(&str, &str); 8] = [
    ("carlos.gomez", "maria.fernandez"),
    ("carlos.gomez", "juan.perez"),
    ("maria.fernandez", "carlos.gomez"),
    ("juan.perez", "ana.rodriguez"),
    ("ana.rodriguez", "luis.sanchez"),
    ("luis.sanchez", "juan.perez"),
    ("usuariocliente", "carlos.gomez"),
    ("usuariocliente", "maria.fernandez"),
];

fn posts_for(handle: &str) -> usize {
    if handle == "usuariocliente" { 2 } else { 3 }
}

pub async fn load_test_data(engine: &Engine) -> Result<(), DomainError> {
    let mut accounts: HashMap<&str, Account> = HashMap::new();
    let mut posts: HashMap<&str, Vec<PostId>> = HashMap::new();

    for handle in ACCOUNTS {
        let account = engine
            .accounts
            .ensure_account(&TokenClaims {
                subject: format!("seed-{handle}"),
                preferred_username: Some(handle.to_string()),
                email: Some(format!("{handle}@example.com")),
                exp: 0,
            })
            .await?;

        let mut own = own_posts(engine, &account).await?;
        if own.is_empty() {
            for n in 1..=posts_for(handle) {
                let body = format!("Post {n} from {handle}");
                own.push(engine.content.publish(account.id, &body).await?.id);
            }
        }

        posts.insert(handle, own);
        accounts.insert(handle, account);
    }

    for (resharer, author, index) in RESHARES {
        let (Some(resharer), Some(post)) = (
            accounts.get(resharer),
            posts.get(author).and_then(|ids| ids.get(index)),
        ) else {
            continue;
        };
        engine.content.reshare(resharer.id, *post).await?;
    }

    for (follower, followed) in FOLLOWS {
        if let (Some(follower), Some(followed)) = (accounts.get(follower), accounts.get(followed)) {
            engine.social.follow(follower.id, followed.id).await?;
        }
    }

    tracing::info!(accounts = accounts.len(), "Test data loaded");
    Ok(())
}

/// The account's visible original posts, oldest first.
async fn own_posts(engine: &Engine, account: &Account) -> Result<Vec<PostId>, DomainError> {
    let items = engine.timeline.account(account.id, 50).await?;
    Ok(items
        .iter()
        .rev()
        .filter(|item| !item.is_reshare())
        .map(|item| item.post().id)
        .collect())
}
