#![allow(dead_code)]

use std::sync::Arc;

use chirp_core::Engine;
use chirp_core::domain::Account;
use chirp_core::ports::TokenClaims;
use chirp_infra::InMemoryStore;

pub fn engine() -> (Engine, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    (Engine::new(store.stores()), store)
}

pub fn claims(subject: &str, handle: &str) -> TokenClaims {
    TokenClaims {
        subject: subject.to_string(),
        preferred_username: Some(handle.to_string()),
        email: None,
        exp: 0,
    }
}

pub async fn account(engine: &Engine, handle: &str) -> Account {
    engine
        .accounts
        .ensure_account(&claims(&format!("sub-{handle}"), handle))
        .await
        .unwrap()
}
