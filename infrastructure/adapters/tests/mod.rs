use std::sync::Arc;

use domain_file::{
    exception::FileException,
    model::{
        entity::{CopyInfo, FileRecord},
        vo::{AttachSource, RecordPatch, SyncContext, UpdateOptions},
    },
    repository::{RecordStore, StoreRegistry},
};
use infrastructure_adapters::{
    HttpMetadataResolver, HttpResolverConfig, LocalStagingTransport, MemoryRecordStore,
};
use service_file::{AttachmentResolver, FileHandle, RecordSynchronizer};
use uuid::Uuid;

fn load() -> (Arc<MemoryRecordStore>, Arc<StoreRegistry>, LocalStagingTransport) {
    let store = Arc::new(MemoryRecordStore::builder().collection("Images").build());
    let registry = Arc::new(StoreRegistry::new());
    registry.mount("Images", store.clone());
    let staging = LocalStagingTransport::builder()
        .base(std::env::temp_dir().join(format!("staging-{}", Uuid::new_v4())))
        .build();
    (store, registry, staging)
}

fn handle_for(
    record: FileRecord,
    registry: Arc<StoreRegistry>,
    staging: LocalStagingTransport,
) -> FileHandle {
    // The resolver is wired like production; these tests never let it talk.
    let metadata_service =
        Arc::new(HttpMetadataResolver::new(&HttpResolverConfig::default()).unwrap());
    FileHandle::builder()
        .record(record)
        .synchronizer(RecordSynchronizer::builder().registry(registry).build())
        .attachment(AttachmentResolver::builder().metadata_service(metadata_service).build())
        .transport(Arc::new(staging))
        .build()
}

#[tokio::test]
async fn mounted_handle_answers_like_its_store() {
    let (store, registry, staging) = load();

    let mut record = FileRecord {
        name: Some("cat.jpg".to_string()),
        content_type: Some("image/jpeg".to_string()),
        chunk_count: Some(3),
        chunk_sum: Some(3),
        ..Default::default()
    };
    record.copies.insert(
        "thumb".to_string(),
        CopyInfo {
            content_type: Some("image/jpeg".to_string()),
            ..Default::default()
        },
    );
    let mounted = store.insert(record);
    let mut handle = handle_for(mounted, registry, staging);

    assert!(handle.is_mounted());
    assert!(handle.is_uploaded(SyncContext::Manual).await.unwrap());
    assert_eq!(handle.upload_progress(SyncContext::Manual).await.unwrap(), 100.0);
    assert_eq!(handle.extension(SyncContext::Manual).await.unwrap(), "jpg");
    assert!(handle.is_image(Some("thumb"), SyncContext::Manual).await.unwrap());
    assert!(!handle.has_copy("original", false, SyncContext::Manual).await.unwrap());
}

#[tokio::test]
async fn stale_handle_catches_up_on_refresh() {
    let (store, registry, staging) = load();
    let mounted = store.insert(FileRecord {
        name: Some("cat.jpg".to_string()),
        chunk_sum: Some(3),
        ..Default::default()
    });
    let id = mounted.id.unwrap();
    let mut handle = handle_for(mounted, registry, staging);

    assert!(!handle.is_uploaded(SyncContext::Manual).await.unwrap());

    // The transport reports progress behind the handle's back.
    let patch = RecordPatch {
        chunk_count: Some(3),
        ..Default::default()
    };
    store.update(id, &patch, UpdateOptions::default()).await.unwrap();

    assert!(handle.is_uploaded(SyncContext::Manual).await.unwrap());
    assert_eq!(handle.record().chunk_count, Some(3));
}

#[tokio::test]
async fn update_through_the_handle_round_trips() {
    let (store, registry, staging) = load();
    let mounted = store.insert(FileRecord {
        name: Some("cat.jpg".to_string()),
        ..Default::default()
    });
    let id = mounted.id.unwrap();
    let mut handle = handle_for(mounted, registry, staging);

    let patch = RecordPatch {
        name: Some("renamed.png".to_string()),
        ..Default::default()
    };
    let affected =
        handle.update(patch, UpdateOptions::default(), SyncContext::Manual).await.unwrap();

    assert_eq!(affected, 1);
    assert_eq!(handle.record().name.as_deref(), Some("renamed.png"));
    let stored = store.find_one(id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("renamed.png"));
}

#[tokio::test]
async fn remove_clears_store_and_staging() {
    let (store, registry, staging) = load();
    let mounted = store.insert(FileRecord::default());
    let id = mounted.id.unwrap();
    staging.stage_part(id, 0, b"chunk").await.unwrap();

    let mut handle = handle_for(mounted, registry, staging.clone());
    let removed = handle.remove().await.unwrap();

    assert_eq!(removed, 1);
    assert!(store.is_empty());
    assert!(staging.staged_parts(id).await.unwrap().is_empty());
    assert!(!handle.is_mounted());

    // A second removal finds nothing to act on.
    assert!(matches!(handle.remove().await, Err(FileException::NotMounted)));
}

#[tokio::test]
async fn unmounting_the_collection_detaches_handles_on_refresh() {
    let (store, registry, staging) = load();
    let mounted = store.insert(FileRecord::default());
    let mut handle = handle_for(mounted, registry.clone(), staging);

    assert!(handle.is_mounted());
    registry.unmount("Images");
    handle.refresh(SyncContext::Manual).await.unwrap();

    assert!(!handle.is_mounted());
    let result = handle
        .update(RecordPatch::default(), UpdateOptions::default(), SyncContext::Manual)
        .await;
    assert!(matches!(result, Err(FileException::NotMounted)));
    // Only the registration is gone; the store still holds the record.
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn unmount_blocks_destructive_calls_without_a_refresh() {
    let (store, registry, staging) = load();
    let mounted = store.insert(FileRecord::default());
    let mut handle = handle_for(mounted, registry.clone(), staging);

    // Bind the backing store, then pull the registration away while the
    // store itself stays alive.
    handle.refresh(SyncContext::Manual).await.unwrap();
    registry.unmount("Images");

    assert!(!handle.is_mounted());
    assert!(matches!(handle.remove().await, Err(FileException::NotMounted)));
    let result = handle
        .update(RecordPatch::default(), UpdateOptions::default(), SyncContext::Manual)
        .await;
    assert!(matches!(result, Err(FileException::NotMounted)));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn remounting_a_collection_rebinds_write_paths() {
    let (store, registry, staging) = load();
    let mounted = store.insert(FileRecord {
        name: Some("cat.jpg".to_string()),
        ..Default::default()
    });
    let id = mounted.id.unwrap();
    let mut handle = handle_for(mounted, registry.clone(), staging);
    handle.refresh(SyncContext::Manual).await.unwrap();

    // Replace the registration under the same name; the old store lives on.
    let replacement = Arc::new(MemoryRecordStore::builder().collection("Images").build());
    replacement.insert(FileRecord {
        id: Some(id),
        name: Some("cat.jpg".to_string()),
        ..Default::default()
    });
    registry.mount("Images", replacement.clone());

    let patch = RecordPatch {
        name: Some("renamed.png".to_string()),
        ..Default::default()
    };
    handle.update(patch, UpdateOptions::default(), SyncContext::Manual).await.unwrap();

    assert_eq!(handle.record().name.as_deref(), Some("renamed.png"));
    let replaced = replacement.find_one(id).await.unwrap().unwrap();
    assert_eq!(replaced.name.as_deref(), Some("renamed.png"));
    // The superseded store never saw the write.
    let old = store.find_one(id).await.unwrap().unwrap();
    assert_eq!(old.name.as_deref(), Some("cat.jpg"));
}

#[tokio::test]
async fn attached_file_mounts_and_answers_media_queries() {
    let (store, registry, staging) = load();

    // PNG magic is all `infer` needs to declare the type.
    let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    let path = std::env::temp_dir().join(format!("attach-{}.png", Uuid::new_v4()));
    tokio::fs::write(&path, png).await.unwrap();

    let mut handle = handle_for(FileRecord::default(), registry, staging);
    handle.attach_data(AttachSource::File(path.clone()), None).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert!(!handle.is_mounted());
    let mounted = store.insert(handle.record().clone());
    handle.merge_record(&mounted);

    assert!(handle.is_mounted());
    assert!(handle.is_image(None, SyncContext::Manual).await.unwrap());
    assert!(!handle.is_video(None, SyncContext::Manual).await.unwrap());
    assert_eq!(handle.extension(SyncContext::Manual).await.unwrap(), "png");
    assert_eq!(handle.payload().unwrap().len(), Some(png.len() as u64));
}
