//! Integration tests for the audit trail repository.
//!
//! Covers append-with-chaining, filtered queries, and hash-chain
//! verification over a sequence of entries.

use sqlx::PgPool;
use uuid::Uuid;

use pressroom_core::audit::{canonical_entry_data, compute_integrity_hash};
use pressroom_core::content::actions;
use pressroom_db::models::audit::{AuditQuery, CreateAuditLog};
use pressroom_db::repositories::AuditLogRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn entry(key: &str, action: &str, revision_no: i64, actor: Uuid) -> CreateAuditLog {
    CreateAuditLog {
        content_key: key.to_string(),
        action: action.to_string(),
        revision_no,
        actor_id: actor,
        details: serde_json::json!({ "note": null }),
    }
}

// ---------------------------------------------------------------------------
// Append and chaining
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn append_chains_hashes(pool: PgPool) {
    let actor = Uuid::new_v4();

    let first = AuditLogRepo::append(&pool, &entry("homepage", actions::SAVE_DRAFT, 1, actor))
        .await
        .unwrap();
    let second = AuditLogRepo::append(&pool, &entry("homepage", actions::PUBLISH, 2, actor))
        .await
        .unwrap();

    let first_hash = first.integrity_hash.expect("first entry must be hashed");
    let second_hash = second.integrity_hash.expect("second entry must be hashed");

    // First entry hashes from the seed, second chains to the first.
    let expected_first = compute_integrity_hash(
        None,
        &canonical_entry_data("homepage", actions::SAVE_DRAFT, 1, actor),
    );
    let expected_second = compute_integrity_hash(
        Some(&first_hash),
        &canonical_entry_data("homepage", actions::PUBLISH, 2, actor),
    );
    assert_eq!(first_hash, expected_first);
    assert_eq!(second_hash, expected_second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn chain_verifies_over_a_sequence(pool: PgPool) {
    let actor = Uuid::new_v4();
    for (i, action) in [actions::SAVE_DRAFT, actions::PUBLISH, actions::ROLLBACK]
        .iter()
        .enumerate()
    {
        AuditLogRepo::append(&pool, &entry("homepage", action, (i + 1) as i64, actor))
            .await
            .unwrap();
    }

    let entries = AuditLogRepo::fetch_for_integrity_check(&pool).await.unwrap();
    assert_eq!(entries.len(), 3);

    let mut prev: Option<String> = None;
    for e in &entries {
        let data = canonical_entry_data(&e.content_key, &e.action, e.revision_no, e.actor_id);
        let expected = compute_integrity_hash(prev.as_deref(), &data);
        assert_eq!(e.integrity_hash.as_deref(), Some(expected.as_str()));
        prev = e.integrity_hash.clone();
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn query_filters_by_key_and_action(pool: PgPool) {
    let actor = Uuid::new_v4();
    AuditLogRepo::append(&pool, &entry("homepage", actions::SAVE_DRAFT, 1, actor))
        .await
        .unwrap();
    AuditLogRepo::append(&pool, &entry("homepage", actions::PUBLISH, 2, actor))
        .await
        .unwrap();
    AuditLogRepo::append(&pool, &entry("pricing", actions::SAVE_DRAFT, 1, actor))
        .await
        .unwrap();

    let by_key = AuditQuery {
        content_key: Some("homepage".to_string()),
        ..Default::default()
    };
    let items = AuditLogRepo::query(&pool, &by_key).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|e| e.content_key == "homepage"));
    assert_eq!(AuditLogRepo::count(&pool, &by_key).await.unwrap(), 2);

    let by_action = AuditQuery {
        action: Some(actions::SAVE_DRAFT.to_string()),
        ..Default::default()
    };
    let items = AuditLogRepo::query(&pool, &by_action).await.unwrap();
    assert_eq!(items.len(), 2);

    let by_both = AuditQuery {
        content_key: Some("pricing".to_string()),
        action: Some(actions::SAVE_DRAFT.to_string()),
        ..Default::default()
    };
    assert_eq!(AuditLogRepo::count(&pool, &by_both).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn query_paginates_newest_first(pool: PgPool) {
    let actor = Uuid::new_v4();
    for i in 1..=5 {
        AuditLogRepo::append(&pool, &entry("homepage", actions::SAVE_DRAFT, i, actor))
            .await
            .unwrap();
    }

    let page = AuditQuery {
        limit: Some(2),
        offset: Some(1),
        ..Default::default()
    };
    let items = AuditLogRepo::query(&pool, &page).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].revision_no, 4);
    assert_eq!(items[1].revision_no, 3);
}
