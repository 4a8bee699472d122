use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::{interval, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::Session;

/// Idle time after which a session is dropped when no TTL is configured.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Entry {
    handle: Arc<Mutex<Session>>,
    last_seen: Instant,
}

/// Live sessions keyed by id. Each session sits behind its own mutex so actions
/// within one session run one at a time while sessions stay independent.
///
/// A session that goes unused for longer than `idle_ttl` is treated as ended:
/// lookups report it missing and the sweeper drops its resume and conversation.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL)
    }
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub async fn create(&self, session: Session) -> Arc<Mutex<Session>> {
        self.purge_expired().await;

        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        let entry = Entry {
            handle: handle.clone(),
            last_seen: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        info!("Session {id} started");
        handle
    }

    /// Looks up a live session and marks it as used.
    pub async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, AppError> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        match sessions.get_mut(&id) {
            Some(entry) if now.duration_since(entry.last_seen) <= self.idle_ttl => {
                entry.last_seen = now;
                Ok(entry.handle.clone())
            }
            Some(_) => {
                sessions.remove(&id);
                info!("Session {id} expired after {}s idle", self.idle_ttl.as_secs());
                Err(not_found(id))
            }
            None => Err(not_found(id)),
        }
    }

    /// Ends a session, dropping its resume, cache, and conversation.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!("Session {id} ended");
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    /// Drops every session idle for longer than the TTL. Returns how many went.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let ttl = self.idle_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            info!("Expired {purged} idle session(s)");
        }
        purged
    }

    /// Spawns the background task that purges idle sessions once a minute.
    pub fn start_sweeper(&self) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(SWEEP_INTERVAL);
            info!(
                "Session sweeper started (idle ttl {}s, every {}s)",
                store.idle_ttl.as_secs(),
                SWEEP_INTERVAL.as_secs()
            );
            loop {
                ticker.tick().await;
                let purged = store.purge_expired().await;
                debug!("Sweep done, {purged} session(s) purged");
            }
        });
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
