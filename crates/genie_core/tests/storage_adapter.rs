use genie_core::storage::StorageResult;
use genie_core::{
    JsonStorage, KeyValueStore, KvRepository, MemoryKvStore, SqliteKvStore, StorageError, Task,
    TaskDraft, TaskRepository, User,
};
use genie_core::{AuthRepository, NoteRepository};

/// Backend whose every call fails, for checking the degradation policy.
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Backend("disk unavailable".to_string()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Backend("disk unavailable".to_string()))
    }

    fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Backend("disk unavailable".to_string()))
    }

    fn multi_remove(&self, _keys: &[&str]) -> StorageResult<()> {
        Err(StorageError::Backend("disk unavailable".to_string()))
    }
}

#[test]
fn put_then_get_returns_equal_value() {
    let storage = JsonStorage::new(SqliteKvStore::open_in_memory().unwrap());
    let tasks = vec![Task::new("7", "Water plants").with_details("balcony", "08:00 AM")];

    storage.put("@tasks", &tasks);

    assert_eq!(storage.get::<Vec<Task>>("@tasks"), Some(tasks));
}

#[test]
fn absent_and_removed_keys_read_as_none() {
    let storage = JsonStorage::new(MemoryKvStore::new());
    assert_eq!(storage.get::<Vec<Task>>("@tasks"), None);

    storage.put("@tasks", &Vec::<Task>::new());
    storage.remove("@tasks");
    storage.remove("@tasks");
    assert_eq!(storage.get::<Vec<Task>>("@tasks"), None);
}

#[test]
fn remove_many_clears_every_key() {
    let storage = JsonStorage::new(SqliteKvStore::open_in_memory().unwrap());
    storage.put("@user", &User::new("Ada", "ada@example.com", "secret1"));
    storage.put("@tasks", &Vec::<Task>::new());

    assert!(storage.remove_many(&["@user", "@tasks", "@notes"]));
    assert!(storage.get::<User>("@user").is_none());
    assert!(storage.get::<Vec<Task>>("@tasks").is_none());
}

#[test]
fn malformed_json_reads_as_absent() {
    let store = MemoryKvStore::new();
    store.set_item("@tasks", "{not json").unwrap();
    let storage = JsonStorage::new(store);

    assert_eq!(storage.get::<Vec<Task>>("@tasks"), None);
    assert!(matches!(
        storage.try_get::<Vec<Task>>("@tasks"),
        Err(StorageError::Deserialization { .. })
    ));
}

#[test]
fn backend_faults_are_swallowed() {
    let storage = JsonStorage::new(FailingStore);

    storage.put("@tasks", &Vec::<Task>::new());
    storage.remove("@tasks");
    assert_eq!(storage.get::<Vec<Task>>("@tasks"), None);
    assert!(!storage.remove_many(&["@user", "@tasks"]));
}

#[test]
fn repository_degrades_instead_of_failing_on_broken_backend() {
    let repo = KvRepository::new(FailingStore);

    let seeded = repo.list_tasks(&[Task::new("1", "Google Meet")]);
    assert_eq!(seeded.len(), 1);
    assert!(repo.upsert_task(&TaskDraft::new("Buy milk"), false).is_ok());
    assert!(repo.list_notes(&[]).is_empty());
    assert!(repo.current_session().is_none());
    assert!(!repo.end_session());
}
