use std::sync::Arc;

use anyhow::Result;
use biodata_lib::{BiodataController, BiodataInput, BiodataStore};

#[path = "util.rs"]
mod util;

async fn wired() -> Result<(BiodataController, Arc<BiodataStore>)> {
    let pool = util::memory_pool().await?;
    let store = Arc::new(BiodataStore::new(pool).await?);
    Ok((BiodataController::new(store.clone()), store))
}

#[tokio::test]
async fn save_trims_text_fields() -> Result<()> {
    let (controller, store) = wired().await?;

    controller
        .save(BiodataInput {
            name: "  Alice  ".into(),
            student_id: "  007  ".into(),
            birth_place: " Jakarta ".into(),
            birth_date: " 1 Jan 2000 ".into(),
            address: " Street 1 ".into(),
            photo_uri: None,
        })
        .await?;

    let record = store.get().await?.expect("record after save");
    assert_eq!(record.name, "Alice");
    assert_eq!(record.student_id, "007");
    assert_eq!(record.birth_place, "Jakarta");
    assert_eq!(record.birth_date, "1 Jan 2000");
    assert_eq!(record.address, "Street 1");
    Ok(())
}

#[tokio::test]
async fn photo_reference_is_stored_unchanged() -> Result<()> {
    let (controller, store) = wired().await?;

    let mut input = util::sample_input();
    // Opaque handle: no trimming, no validation.
    input.photo_uri = Some("  content://photos/42 ".into());
    controller.save(input).await?;

    let record = store.get().await?.expect("record after save");
    assert_eq!(record.photo_uri.as_deref(), Some("  content://photos/42 "));
    Ok(())
}

#[tokio::test]
async fn blank_name_is_dropped_silently() -> Result<()> {
    let (controller, store) = wired().await?;

    let mut input = util::sample_input();
    input.name = "   ".into();
    controller.save(input).await?;

    assert!(store.get().await?.is_none());
    assert!(controller.current_record().borrow().is_none());
    Ok(())
}

#[tokio::test]
async fn blank_student_id_leaves_prior_state() -> Result<()> {
    let (controller, store) = wired().await?;

    controller.save(util::sample_input()).await?;
    let before = store.get().await?.expect("record after valid save");

    let mut invalid = util::sample_input();
    invalid.name = "Someone Else".into();
    invalid.student_id = "".into();
    controller.save(invalid).await?;

    let after = store.get().await?.expect("record still present");
    assert_eq!(after, before);
    Ok(())
}

#[tokio::test]
async fn repeated_save_is_idempotent() -> Result<()> {
    let (controller, store) = wired().await?;

    controller.save(util::sample_input()).await?;
    let first = store.get().await?.expect("record after first save");

    controller.save(util::sample_input()).await?;
    let second = store.get().await?.expect("record after second save");

    assert_eq!(second.name, first.name);
    assert_eq!(second.student_id, first.student_id);
    assert_eq!(second.birth_place, first.birth_place);
    assert_eq!(second.birth_date, first.birth_date);
    assert_eq!(second.address, first.address);
    assert_eq!(second.photo_uri, first.photo_uri);
    Ok(())
}

#[tokio::test]
async fn save_observe_delete_end_to_end() -> Result<()> {
    let (controller, _store) = wired().await?;
    let mut rx = controller.current_record();
    assert!(rx.borrow_and_update().is_none());

    controller.save(util::sample_input()).await?;
    rx.changed().await?;
    {
        let seen = rx.borrow_and_update();
        let record = seen.as_ref().expect("record after save");
        assert_eq!(record.name, "Budi");
        assert_eq!(record.student_id, "12345");
        assert_eq!(record.birth_place, "Bandung");
        assert_eq!(record.birth_date, "5 Mei 1999");
        assert_eq!(record.address, "Jl. Merdeka");
        assert_eq!(record.photo_uri, None);
    }

    controller.delete().await?;
    rx.changed().await?;
    assert!(rx.borrow_and_update().is_none());

    // Deleting an already-empty store is still fine.
    controller.delete().await?;
    Ok(())
}
