//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//! Documents are CBOR-encoded; each collection lives in its own column
//! family (see [`crate::schema`]).

use std::path::Path;
use std::sync::{Arc, Mutex};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use codeclash_core::{
    Comment, CommentId, CommentRef, Contest, ContestId, DiscussionPost, DiscussionRef, PostId,
    SubmissionRecord, User, UserId,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// `RocksDB`-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes read-modify-write patch operations and document deletes.
    /// `RocksDB` has no document-level read-modify-write primitive, so
    /// per-document atomicity of the patch ops is provided here; deletes
    /// take the same lock so an in-flight patch cannot write a deleted
    /// document back.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(column_families = all_column_families().len(), "RocksDB store opened");

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Fetch and decode one document.
    fn get_doc<T: serde::de::DeserializeOwned>(&self, cf_name: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Encode and write one document.
    fn put_doc<T: serde::Serialize>(&self, cf_name: &str, key: &[u8], value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        self.db
            .put_cf(&cf, key, Self::serialize(value)?)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Decode every document in a column family.
    fn scan_docs<T: serde::de::DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut out = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            out.push(Self::deserialize(&value)?);
        }
        Ok(out)
    }

    /// Take the patch lock, mapping poisoning to a database error.
    fn lock_writes(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Database("patch write lock poisoned".into()))
    }

    /// Apply a read-modify-write patch to one user document atomically.
    fn patch_user(&self, user_id: &UserId, apply: impl FnOnce(&mut User)) -> Result<()> {
        let _guard = self.lock_writes()?;
        let key = keys::user_key(user_id);
        let mut user: User = self
            .get_doc(cf::USERS, &key)?
            .ok_or_else(|| StoreError::not_found("user", user_id))?;
        apply(&mut user);
        self.put_doc(cf::USERS, &key, &user)
    }

    /// Scan all user documents, apply a mutation to each, and write back
    /// those the mutation reports as changed. Returns the modified count.
    fn patch_all_users(&self, mut apply: impl FnMut(&mut User) -> bool) -> Result<usize> {
        let _guard = self.lock_writes()?;
        let cf = self.cf(cf::USERS)?;
        let mut modified = 0;
        // Collect first: mutating the column family while iterating it is
        // not supported by the iterator.
        let mut users: Vec<User> = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            users.push(Self::deserialize(&value)?);
        }
        for mut user in users {
            if apply(&mut user) {
                self.put_doc(cf::USERS, &keys::user_key(&user.id), &user)?;
                modified += 1;
            }
        }
        if modified > 0 {
            tracing::debug!(modified, "user mirror cleanup pass wrote documents");
        }
        Ok(modified)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn insert_user(&self, user: &User) -> Result<()> {
        let cf_users = self.cf(cf::USERS)?;
        let cf_email = self.cf(cf::USERS_BY_EMAIL)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, keys::user_key(&user.id), Self::serialize(user)?);
        batch.put_cf(&cf_email, keys::email_key(&user.email), user.id.as_bytes());

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        self.get_doc(cf::USERS, &keys::user_key(user_id))
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS_BY_EMAIL)?;
        let Some(id_bytes) = self
            .db
            .get_cf(&cf, keys::email_key(email))
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let bytes: [u8; 16] = id_bytes
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::Serialization("malformed email index entry".into()))?;
        self.get_user(&UserId::from_uuid(uuid::Uuid::from_bytes(bytes)))
    }

    fn upsert_submission(&self, user_id: &UserId, record: SubmissionRecord) -> Result<()> {
        self.patch_user(user_id, |user| {
            user.upsert_submission(record);
        })
    }

    fn push_discussion_ref(&self, user_id: &UserId, post: DiscussionRef) -> Result<()> {
        self.patch_user(user_id, |user| user.add_discussion_ref(post))
    }

    fn push_comment_ref(&self, user_id: &UserId, comment: CommentRef) -> Result<()> {
        self.patch_user(user_id, |user| user.add_comment_ref(comment))
    }

    fn increment_contest_count(&self, user_id: &UserId) -> Result<()> {
        self.patch_user(user_id, |user| user.contest_created += 1)
    }

    fn remove_comment_refs_by_post(&self, post_id: &PostId) -> Result<usize> {
        self.patch_all_users(|user| user.remove_comment_refs_by_post(post_id) > 0)
    }

    fn remove_discussion_refs_by_post(&self, post_id: &PostId) -> Result<usize> {
        self.patch_all_users(|user| user.remove_discussion_refs_by_post(post_id) > 0)
    }

    fn remove_comment_ref(&self, comment_id: &CommentId) -> Result<usize> {
        self.patch_all_users(|user| user.remove_comment_ref(comment_id))
    }

    // =========================================================================
    // Contest Operations
    // =========================================================================

    fn insert_contest(&self, contest: &Contest) -> Result<()> {
        self.put_doc(cf::CONTESTS, &keys::contest_key(&contest.id), contest)
    }

    fn get_contest(&self, contest_id: &ContestId) -> Result<Option<Contest>> {
        self.get_doc(cf::CONTESTS, &keys::contest_key(contest_id))
    }

    fn list_contests(&self) -> Result<Vec<Contest>> {
        self.scan_docs(cf::CONTESTS)
    }

    // =========================================================================
    // Discussion Post Operations
    // =========================================================================

    fn insert_post(&self, post: &DiscussionPost) -> Result<()> {
        self.put_doc(cf::POSTS, &keys::post_key(&post.id), post)
    }

    fn get_post(&self, post_id: &PostId) -> Result<Option<DiscussionPost>> {
        self.get_doc(cf::POSTS, &keys::post_key(post_id))
    }

    fn list_posts(&self) -> Result<Vec<DiscussionPost>> {
        self.scan_docs(cf::POSTS)
    }

    fn delete_post(&self, post_id: &PostId) -> Result<bool> {
        // Deletes must serialize with the RMW patch ops: a push_comment_id
        // holding a pre-delete read of the post would otherwise write the
        // post back after this delete commits.
        let _guard = self.lock_writes()?;
        let cf = self.cf(cf::POSTS)?;
        let key = keys::post_key(post_id);

        if self.get_post(post_id)?.is_none() {
            return Ok(false);
        }
        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(true)
    }

    fn push_comment_id(&self, post_id: &PostId, comment_id: &CommentId) -> Result<()> {
        let _guard = self.lock_writes()?;
        let key = keys::post_key(post_id);
        let mut post: DiscussionPost = self
            .get_doc(cf::POSTS, &key)?
            .ok_or_else(|| StoreError::not_found("post", post_id))?;
        post.add_comment(*comment_id);
        self.put_doc(cf::POSTS, &key, &post)
    }

    fn pull_comment_id(&self, post_id: &PostId, comment_id: &CommentId) -> Result<bool> {
        let _guard = self.lock_writes()?;
        let key = keys::post_key(post_id);
        let Some(mut post) = self.get_doc::<DiscussionPost>(cf::POSTS, &key)? else {
            return Ok(false);
        };
        if !post.remove_comment(comment_id) {
            return Ok(false);
        }
        self.put_doc(cf::POSTS, &key, &post)?;
        Ok(true)
    }

    // =========================================================================
    // Comment Operations
    // =========================================================================

    fn insert_comment(&self, comment: &Comment) -> Result<()> {
        self.put_doc(cf::COMMENTS, &keys::comment_key(&comment.id), comment)
    }

    fn get_comment(&self, comment_id: &CommentId) -> Result<Option<Comment>> {
        self.get_doc(cf::COMMENTS, &keys::comment_key(comment_id))
    }

    fn find_comments_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>> {
        let comments: Vec<Comment> = self.scan_docs(cf::COMMENTS)?;
        let mut comments: Vec<Comment> = comments
            .into_iter()
            .filter(|c| c.post_id == *post_id)
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    fn delete_comment(&self, comment_id: &CommentId) -> Result<bool> {
        let _guard = self.lock_writes()?;
        let cf = self.cf(cf::COMMENTS)?;
        let key = keys::comment_key(comment_id);

        if self.get_comment(comment_id)?.is_none() {
            return Ok(false);
        }
        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(true)
    }

    fn delete_comments(&self, comment_ids: &[CommentId]) -> Result<usize> {
        let _guard = self.lock_writes()?;
        let cf = self.cf(cf::COMMENTS)?;
        let mut deleted = 0;
        for comment_id in comment_ids {
            let key = keys::comment_key(comment_id);
            if self
                .db
                .get_cf(&cf, &key)
                .map_err(|e| StoreError::Database(e.to_string()))?
                .is_some()
            {
                self.db
                    .delete_cf(&cf, &key)
                    .map_err(|e| StoreError::Database(e.to_string()))?;
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeclash_core::{Difficulty, TestCase};
    use tempfile::TempDir;

    fn open_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let store = RocksStore::open(dir.path()).expect("open store");
        (store, dir)
    }

    fn test_contest() -> Contest {
        Contest {
            id: ContestId::generate(),
            title: "Reverse a list".into(),
            company: "Acme".into(),
            reward: "$100".into(),
            short_description: "Reverse it".into(),
            problem_explanation: "Reverse the input list".into(),
            difficulty: Difficulty::Easy,
            contest_date: chrono::Utc::now(),
            test_cases: vec![TestCase {
                input: "1 2 3".into(),
                output: "3 2 1".into(),
            }],
            examples: vec![],
            key: "secret".into(),
            created_by: "tests".into(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn user_roundtrip_and_email_lookup() {
        let (store, _dir) = open_store();
        let user = User::new("alice", "Alice@Example.com", "hash");
        store.insert_user(&user).unwrap();

        let by_id = store.get_user(&user.id).unwrap().unwrap();
        assert_eq!(by_id.email, "Alice@Example.com");

        // Lookup is case-insensitive through the index.
        let by_email = store.find_user_by_email("alice@example.COM").unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(store.find_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn upsert_submission_replaces_in_place() {
        let (store, _dir) = open_store();
        let user = User::new("bob", "bob@example.com", "hash");
        store.insert_user(&user).unwrap();
        let contest_id = ContestId::generate();

        store
            .upsert_submission(&user.id, SubmissionRecord::new(contest_id, "x", "rust", false))
            .unwrap();
        store
            .upsert_submission(&user.id, SubmissionRecord::new(contest_id, "y", "rust", true))
            .unwrap();

        let user = store.get_user(&user.id).unwrap().unwrap();
        assert_eq!(user.submissions.len(), 1);
        assert_eq!(user.submissions[0].code, "y");
        assert!(user.submissions[0].successful);
    }

    #[test]
    fn patch_ops_fail_on_missing_user() {
        let (store, _dir) = open_store();
        let missing = UserId::generate();
        let err = store
            .upsert_submission(&missing, SubmissionRecord::new(ContestId::generate(), "x", "rust", false))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "user", .. }));
    }

    #[test]
    fn contest_roundtrip_and_listing() {
        let (store, _dir) = open_store();
        let contest = test_contest();
        store.insert_contest(&contest).unwrap();

        let fetched = store.get_contest(&contest.id).unwrap().unwrap();
        assert_eq!(fetched.title, contest.title);
        assert_eq!(store.list_contests().unwrap().len(), 1);
    }

    #[test]
    fn push_and_pull_comment_id_on_post() {
        let (store, _dir) = open_store();
        let post = DiscussionPost::new(UserId::generate(), "alice", "t", "d");
        store.insert_post(&post).unwrap();
        let comment_id = CommentId::generate();

        store.push_comment_id(&post.id, &comment_id).unwrap();
        // Retrying the push is a no-op.
        store.push_comment_id(&post.id, &comment_id).unwrap();
        let fetched = store.get_post(&post.id).unwrap().unwrap();
        assert_eq!(fetched.comment_ids, vec![comment_id]);

        assert!(store.pull_comment_id(&post.id, &comment_id).unwrap());
        assert!(!store.pull_comment_id(&post.id, &comment_id).unwrap());

        // Pulling from a deleted post reports false rather than failing.
        assert!(store.delete_post(&post.id).unwrap());
        assert!(!store.pull_comment_id(&post.id, &comment_id).unwrap());
    }

    #[test]
    fn mirror_cleanup_scans_touch_only_matching_users() {
        let (store, _dir) = open_store();
        let post_id = PostId::generate();

        let mut alice = User::new("alice", "a@example.com", "hash");
        alice.add_comment_ref(CommentRef {
            comment_id: CommentId::generate(),
            post_id,
            text: "hi".into(),
            post_title: None,
            created_at: chrono::Utc::now(),
        });
        let bob = User::new("bob", "b@example.com", "hash");
        store.insert_user(&alice).unwrap();
        store.insert_user(&bob).unwrap();

        assert_eq!(store.remove_comment_refs_by_post(&post_id).unwrap(), 1);
        // Idempotent: a second pass finds nothing.
        assert_eq!(store.remove_comment_refs_by_post(&post_id).unwrap(), 0);

        let alice = store.get_user(&alice.id).unwrap().unwrap();
        assert!(alice.comment_refs.is_empty());
        assert_eq!(alice.comment_created, 1);
    }

    #[test]
    fn delete_post_is_not_undone_by_concurrent_comment_pushes() {
        let (store, _dir) = open_store();
        let store = Arc::new(store);
        let post = DiscussionPost::new(UserId::generate(), "alice", "t", "d");
        store.insert_post(&post).unwrap();
        let post_id = post.id;

        // Hammer the post's comment-id set from another thread while the
        // delete runs. Pushes that lose the race observe the post as gone
        // and fail with NotFound; none may write the post back.
        let pusher = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let _ = store.push_comment_id(&post_id, &CommentId::generate());
                }
            })
        };

        assert!(store.delete_post(&post_id).unwrap());
        pusher.join().unwrap();

        assert!(store.get_post(&post_id).unwrap().is_none());
    }

    #[test]
    fn bulk_comment_delete_skips_missing() {
        let (store, _dir) = open_store();
        let post_id = PostId::generate();
        let c1 = Comment::new(post_id, "alice", "one", None);
        let c2 = Comment::new(post_id, "bob", "two", None);
        store.insert_comment(&c1).unwrap();
        store.insert_comment(&c2).unwrap();

        let ids = vec![c1.id, c2.id, CommentId::generate()];
        assert_eq!(store.delete_comments(&ids).unwrap(), 2);
        assert_eq!(store.delete_comments(&ids).unwrap(), 0);
        assert!(store.find_comments_by_post(&post_id).unwrap().is_empty());
    }
}
