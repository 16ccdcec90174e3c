pub mod api;
pub mod types;

use std::time::Instant;

use futures::future::try_join_all;

pub use api::{
    ItemSource,
    ResourcePayload,
    WaniKaniClient,
};
pub use types::{
    RawItem,
    UserInformation,
};

use crate::{
    core::{
        ItemKind,
        KakitoriError,
    },
    glyph::GlyphLibrary,
    study::store::ItemStore,
};

/// Everything a login commits: the profile and the filled item pool.
#[derive(Debug)]
pub struct LoginData {
    pub user: UserInformation,
    pub store: ItemStore,
}

/// Requests every kind concurrently. The first failure aborts the whole set.
pub async fn fetch_all(
    source: &dyn ItemSource,
    api_key: &str,
) -> Result<Vec<(ItemKind, ResourcePayload)>, KakitoriError> {
    try_join_all(ItemKind::ALL.into_iter().map(|kind| async move {
        source.fetch(api_key, kind).await.map(|payload| (kind, payload))
    }))
    .await
}

/// Fetches the three item kinds and builds the item pool. Nothing is returned
/// unless every fetch succeeded and at least one item qualifies.
pub async fn load_items(
    source: &dyn ItemSource,
    glyphs: &dyn GlyphLibrary,
    api_key: &str,
) -> Result<LoginData, KakitoriError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(KakitoriError::Credential("Please enter your API key.".to_string()));
    }

    let start = Instant::now();
    let fetched = fetch_all(source, api_key).await?;
    tracing::info!("Fetched all item lists ({:.1}s)", start.elapsed().as_secs_f32());

    let mut user = None;
    let mut store = ItemStore::new();
    for (kind, payload) in fetched {
        // The profile is taken from the vocabulary answer; the others repeat it.
        if kind == ItemKind::Vocabulary || user.is_none() {
            user = Some(payload.user);
        }
        store.ingest(payload.items, kind, glyphs);
    }
    store.rebuild_distribution();

    let user = user.ok_or(KakitoriError::UnexpectedResponse)?;

    if store.is_empty() {
        tracing::info!("{} has nothing to study yet", user.username);
        return Err(KakitoriError::NothingToStudy);
    }

    tracing::info!(
        "Loaded {} study items for {} (level {}) ({:.1}s total)",
        store.len(),
        user.username,
        user.level,
        start.elapsed().as_secs_f32()
    );
    Ok(LoginData { user, store })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::HashMap,
        sync::Mutex,
    };

    use async_trait::async_trait;

    use super::*;
    use crate::study::store::tests::{
        glyphs,
        raw,
    };

    /// Scripted source answering per kind and recording what was asked.
    #[derive(Default)]
    pub struct FakeSource {
        pub answers: HashMap<ItemKind, Result<Vec<RawItem>, fn() -> KakitoriError>>,
        pub requested: Mutex<Vec<ItemKind>>,
    }

    impl FakeSource {
        pub fn with(mut self, kind: ItemKind, items: Vec<RawItem>) -> Self {
            self.answers.insert(kind, Ok(items));
            self
        }

        pub fn failing(mut self, kind: ItemKind, error: fn() -> KakitoriError) -> Self {
            self.answers.insert(kind, Err(error));
            self
        }
    }

    #[async_trait]
    impl ItemSource for FakeSource {
        async fn fetch(
            &self,
            _api_key: &str,
            kind: ItemKind,
        ) -> Result<ResourcePayload, KakitoriError> {
            self.requested.lock().unwrap().push(kind);
            match self.answers.get(&kind) {
                Some(Ok(items)) => Ok(ResourcePayload {
                    user: UserInformation { username: "koichi".to_string(), level: 2 },
                    items: items.clone(),
                }),
                Some(Err(error)) => Err(error()),
                None => Err(KakitoriError::UnexpectedResponse),
            }
        }
    }

    pub fn scenario_source() -> FakeSource {
        FakeSource::default()
            .with(ItemKind::Radical, vec![raw("大", 1, true)])
            .with(ItemKind::Kanji, vec![raw("人", 1, true)])
            .with(ItemKind::Vocabulary, vec![raw("大人", 1, false)])
    }

    #[tokio::test]
    async fn test_all_three_kinds_are_requested() {
        let source = scenario_source();
        let data = load_items(&source, &glyphs("大人"), "key").await.unwrap();

        let mut requested = source.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(requested, vec![ItemKind::Radical, ItemKind::Kanji, ItemKind::Vocabulary]);

        assert_eq!(data.user.username, "koichi");
        assert_eq!(data.store.len(), 2);
        assert_eq!(data.store.distribution_table().total(), 2);
    }

    #[tokio::test]
    async fn test_single_failure_aborts_login() {
        let source = scenario_source().failing(ItemKind::Kanji, || KakitoriError::Timeout);
        let result = load_items(&source, &glyphs("大人"), "key").await;
        assert!(matches!(result, Err(KakitoriError::Timeout)));

        let source = scenario_source()
            .failing(ItemKind::Radical, || KakitoriError::Credential("bad key".to_string()));
        match load_items(&source, &glyphs("大人"), "key").await {
            Err(KakitoriError::Credential(message)) => assert_eq!(message, "bad key"),
            other => panic!("Expected Credential, got {:?}", other.map(|d| d.store.len())),
        }
    }

    #[tokio::test]
    async fn test_nothing_studied_is_distinct_error() {
        let source = FakeSource::default()
            .with(ItemKind::Radical, vec![raw("大", 1, false)])
            .with(ItemKind::Kanji, Vec::new())
            .with(ItemKind::Vocabulary, Vec::new());
        let result = load_items(&source, &glyphs("大"), "key").await;
        assert!(matches!(result, Err(KakitoriError::NothingToStudy)));
    }

    #[tokio::test]
    async fn test_blank_key_is_rejected_without_fetching() {
        let source = scenario_source();
        let result = load_items(&source, &glyphs("大人"), "   ").await;
        assert!(matches!(result, Err(KakitoriError::Credential(_))));
        assert!(source.requested.lock().unwrap().is_empty());
    }
}
