// This file is licensed under the Apache-2.0 License, see license file

use terrain_storage::{Store, StoreOptions};

fn open_store() -> (tempfile::TempDir, Store) {
	let dir = tempfile::tempdir().unwrap();
	let store = Store::open(dir.path(), &StoreOptions::default()).unwrap();
	(dir, store)
}

#[test]
fn put_then_get_returns_the_value() {
	let (_dir, store) = open_store();
	store.put(b"a", b"1", false).unwrap();
	assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
}

#[test]
fn get_on_missing_key_is_a_normal_absent_result() {
	let (_dir, store) = open_store();
	assert_eq!(store.get(b"missing").unwrap(), None);
	assert!(!store.exists(b"missing").unwrap());
}

#[test]
fn delete_is_idempotent() {
	let (_dir, store) = open_store();
	store.put(b"a", b"1", false).unwrap();
	store.delete(b"a", false).unwrap();
	store.delete(b"a", false).unwrap();
	assert_eq!(store.get(b"a").unwrap(), None);
}

#[test]
fn batch_commit_is_all_or_nothing_from_a_readers_perspective() {
	let (_dir, store) = open_store();
	let mut batch = store.batch();
	batch.put(b"a", b"1");
	batch.put(b"b", b"2");
	batch.delete(b"c");
	batch.commit(false).unwrap();

	assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
	assert_eq!(store.get(b"b").unwrap(), Some(b"2".to_vec()));
}

#[test]
fn range_query_is_half_open_in_byte_lex_order() {
	let (_dir, store) = open_store();
	for key in ["a", "b", "c", "d"] {
		store.put(key.as_bytes(), b"v", false).unwrap();
	}

	let mut seen = Vec::new();
	store.range_query(b"b", b"d", |k, _v| seen.push(k.to_vec()));
	assert_eq!(seen, vec![b"b".to_vec(), b"c".to_vec()]);
}

#[test]
fn range_query_with_empty_end_is_open_ended() {
	let (_dir, store) = open_store();
	for key in ["a", "b", "c"] {
		store.put(key.as_bytes(), b"v", false).unwrap();
	}

	let mut seen = Vec::new();
	store.range_query(b"b", b"", |k, _v| seen.push(k.to_vec()));
	assert_eq!(seen, vec![b"b".to_vec(), b"c".to_vec()]);
}

#[test]
fn prefix_query_only_returns_matching_keys() {
	let (_dir, store) = open_store();
	store.put(b"G_000_000|1.0000000|1.0000000", b"v1", false).unwrap();
	store.put(b"G_000_000|2.0000000|2.0000000", b"v2", false).unwrap();
	store.put(b"G_000_001|1.0000000|1.0000000", b"other", false).unwrap();

	let mut seen = Vec::new();
	store.prefix_query(b"G_000_000|", |k, _v| seen.push(k.to_vec()));
	assert_eq!(seen.len(), 2);
}

#[test]
fn iterator_supports_seek_and_forward_traversal() {
	let (_dir, store) = open_store();
	for key in ["a", "b", "c"] {
		store.put(key.as_bytes(), b"v", false).unwrap();
	}

	let mut cursor = store.iterator();
	cursor.seek(b"b");
	assert!(cursor.valid());
	assert_eq!(cursor.key(), Some(b"b".as_slice()));
	cursor.next();
	assert_eq!(cursor.key(), Some(b"c".as_slice()));
	cursor.next();
	assert!(!cursor.valid());
}

#[test]
fn compact_range_does_not_error_on_an_empty_store() {
	let (_dir, store) = open_store();
	store.compact_range(None, None);
}

#[test]
fn get_stats_returns_a_non_empty_diagnostic_string() {
	let (_dir, store) = open_store();
	assert!(!store.get_stats().is_empty());
}

#[test]
fn typed_stats_carries_the_raw_dump_and_an_estimated_key_count() {
	let (_dir, store) = open_store();
	store.put(b"a", b"1", false).unwrap();
	store.put(b"b", b"2", false).unwrap();

	let stats = store.stats();
	assert!(!stats.raw.is_empty());
	assert!(stats.estimated_keys.is_some());
}
