use crate::{
    model::{
        entity::FileRecord,
        vo::{RecordPatch, RemoteFileInfo, UpdateOptions},
    },
    repository::RecordStore,
    service::{RemoteMetadataService, UploadTransportService},
};
use async_trait::async_trait;
use mockall::mock;
use url::Url;
use uuid::Uuid;

mock! {
    pub RecordStore {}
    #[async_trait]
    impl RecordStore for RecordStore {
        async fn find_one(&self, id: Uuid) -> anyhow::Result<Option<FileRecord>>;
        async fn update(
            &self,
            id: Uuid,
            patch: &RecordPatch,
            options: UpdateOptions,
        ) -> anyhow::Result<u64>;
        async fn remove(&self, id: Uuid) -> anyhow::Result<u64>;
    }
}

mock! {
    pub RemoteMetadataService {}
    #[async_trait]
    impl RemoteMetadataService for RemoteMetadataService {
        async fn fetch(&self, url: &Url) -> anyhow::Result<RemoteFileInfo>;
    }
}

mock! {
    pub UploadTransportService {}
    #[async_trait]
    impl UploadTransportService for UploadTransportService {
        async fn discard_staged_chunks(&self, meta_id: Uuid) -> anyhow::Result<()>;
    }
}
