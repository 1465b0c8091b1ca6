//! In-memory storage implementation
//!
//! Each registry keeps an immutable snapshot behind a lock. Mutations build a
//! new list and swap it in, so a snapshot handed out earlier never changes.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// Anything stored in a registry has a string identifier
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Dog {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Walker {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for WalkSession {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Ordered, copy-on-write collection of entities keyed by id
#[derive(Debug)]
pub struct Registry<T> {
    items: RwLock<Arc<Vec<T>>>,
}

impl<T: Keyed + Clone> Registry<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(Arc::new(items)),
        }
    }

    /// Current version of the collection
    pub fn snapshot(&self) -> MatilhaResult<Arc<Vec<T>>> {
        self.items
            .read()
            .map(|items| Arc::clone(&items))
            .map_err(|e| MatilhaError::Storage(e.to_string()))
    }

    pub fn get(&self, id: &str) -> MatilhaResult<Option<T>> {
        Ok(self.snapshot()?.iter().find(|item| item.key() == id).cloned())
    }

    /// Replace the collection with `f(current)`, returning what `f` returns
    fn replace<R>(&self, f: impl FnOnce(&[T]) -> MatilhaResult<(Vec<T>, R)>) -> MatilhaResult<R> {
        let mut guard = self
            .items
            .write()
            .map_err(|e| MatilhaError::Storage(e.to_string()))?;
        let (next, result) = f(&guard)?;
        *guard = Arc::new(next);
        Ok(result)
    }

    pub fn insert(&self, item: T) -> MatilhaResult<()> {
        self.replace(|current| {
            if current.iter().any(|existing| existing.key() == item.key()) {
                return Err(MatilhaError::Storage(format!(
                    "duplicate id '{}'",
                    item.key()
                )));
            }
            let mut next = current.to_vec();
            next.push(item);
            Ok((next, ()))
        })
    }

    /// Replace the entry with the same id. Returns false if there is none.
    pub fn update(&self, item: T) -> MatilhaResult<bool> {
        self.replace(|current| {
            let mut found = false;
            let next: Vec<T> = current
                .iter()
                .map(|existing| {
                    if existing.key() == item.key() {
                        found = true;
                        item.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();
            Ok((next, found))
        })
    }

    /// Remove the entry with this id. Returns false if there is none.
    pub fn remove(&self, id: &str) -> MatilhaResult<bool> {
        self.replace(|current| {
            let next: Vec<T> = current
                .iter()
                .filter(|existing| existing.key() != id)
                .cloned()
                .collect();
            let removed = next.len() != current.len();
            Ok((next, removed))
        })
    }
}

/// In-memory storage, reset to its seed on every process start
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    dogs: Arc<Registry<Dog>>,
    walkers: Arc<Registry<Walker>>,
    sessions: Arc<Registry<WalkSession>>,
}

impl MemoryStorage {
    /// Create an empty storage instance
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new(), Vec::new())
    }

    /// Create a storage instance holding the given records
    pub fn with_data(dogs: Vec<Dog>, walkers: Vec<Walker>, sessions: Vec<WalkSession>) -> Self {
        Self {
            dogs: Arc::new(Registry::new(dogs)),
            walkers: Arc::new(Registry::new(walkers)),
            sessions: Arc::new(Registry::new(sessions)),
        }
    }

    /// Create a storage instance with the built-in seed data
    pub fn seeded() -> Self {
        Self::with_data(seed::dogs(), seed::walkers(), seed::sessions())
    }

    pub fn dog_snapshot(&self) -> MatilhaResult<Arc<Vec<Dog>>> {
        self.dogs.snapshot()
    }

    pub fn walker_snapshot(&self) -> MatilhaResult<Arc<Vec<Walker>>> {
        self.walkers.snapshot()
    }

    pub fn session_snapshot(&self) -> MatilhaResult<Arc<Vec<WalkSession>>> {
        self.sessions.snapshot()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatilhaStorage for MemoryStorage {
    async fn save_dog(&mut self, dog: &Dog) -> MatilhaResult<()> {
        self.dogs.insert(dog.clone())
    }

    async fn get_dog(&self, dog_id: &str) -> MatilhaResult<Option<Dog>> {
        self.dogs.get(dog_id)
    }

    async fn list_dogs(&self) -> MatilhaResult<Vec<Dog>> {
        Ok(self.dogs.snapshot()?.to_vec())
    }

    async fn update_dog(&mut self, dog: &Dog) -> MatilhaResult<()> {
        if self.dogs.update(dog.clone())? {
            Ok(())
        } else {
            Err(MatilhaError::DogNotFound(dog.id.clone()))
        }
    }

    async fn save_walker(&mut self, walker: &Walker) -> MatilhaResult<()> {
        self.walkers.insert(walker.clone())
    }

    async fn get_walker(&self, walker_id: &str) -> MatilhaResult<Option<Walker>> {
        self.walkers.get(walker_id)
    }

    async fn list_walkers(&self) -> MatilhaResult<Vec<Walker>> {
        Ok(self.walkers.snapshot()?.to_vec())
    }

    async fn update_walker(&mut self, walker: &Walker) -> MatilhaResult<()> {
        if self.walkers.update(walker.clone())? {
            Ok(())
        } else {
            Err(MatilhaError::WalkerNotFound(walker.id.clone()))
        }
    }

    async fn delete_walker(&mut self, walker_id: &str) -> MatilhaResult<()> {
        if self.walkers.remove(walker_id)? {
            Ok(())
        } else {
            Err(MatilhaError::WalkerNotFound(walker_id.to_string()))
        }
    }

    async fn save_session(&mut self, session: &WalkSession) -> MatilhaResult<()> {
        self.sessions.insert(session.clone())
    }

    async fn get_session(&self, session_id: &str) -> MatilhaResult<Option<WalkSession>> {
        self.sessions.get(session_id)
    }

    async fn list_sessions(&self) -> MatilhaResult<Vec<WalkSession>> {
        Ok(self.sessions.snapshot()?.to_vec())
    }

    async fn update_session(&mut self, session: &WalkSession) -> MatilhaResult<()> {
        if self.sessions.update(session.clone())? {
            Ok(())
        } else {
            Err(MatilhaError::SessionNotFound(session.id.clone()))
        }
    }

    async fn delete_session(&mut self, session_id: &str) -> MatilhaResult<()> {
        if self.sessions.remove(session_id)? {
            Ok(())
        } else {
            Err(MatilhaError::SessionNotFound(session_id.to_string()))
        }
    }
}

/// Records every fresh process starts with
pub mod seed {
    use super::*;

    fn dog(id: &str, name: &str, tutor: Option<&str>, address: Option<&str>) -> Dog {
        Dog::new(
            id.to_string(),
            name.to_string(),
            tutor.map(str::to_string),
            address.map(str::to_string),
        )
    }

    pub fn dogs() -> Vec<Dog> {
        vec![
            dog("1", "LUNA", Some("Maria"), Some("Rua das Flores")),
            dog("2", "JIMMY", Some("Carol"), Some("Dois de Dezembro")),
            dog("3", "THOR", None, None),
            dog("4", "MAX", None, None),
            dog("5", "NINA", None, None),
        ]
    }

    pub fn walkers() -> Vec<Walker> {
        vec![
            Walker::new(
                "p1".to_string(),
                "Ana".to_string(),
                Some("(21) 98765-4321".to_string()),
                Avatar::Bundled("avatars/ana.png".to_string()),
            ),
            Walker::new(
                "p2".to_string(),
                "Bruno".to_string(),
                Some("(21) 98765-4322".to_string()),
                Avatar::Bundled("avatars/bruno.png".to_string()),
            ),
        ]
    }

    pub fn sessions() -> Vec<WalkSession> {
        let mut session = WalkSession::new(
            "1".to_string(),
            "10/01/2026".to_string(),
            SessionKind::Saturday,
            40,
            None,
        );
        session.walkers = walkers().iter().map(WalkerRef::from).collect();
        session.dogs = vec![
            DogRef {
                id: "3".to_string(),
                name: "THOR".to_string(),
                paid: true,
            },
            DogRef {
                id: "4".to_string(),
                name: "MAX".to_string(),
                paid: true,
            },
        ];
        vec![session]
    }
}
