//! Process-wide table of open sessions keyed by opaque integer handles
//!
//! Hosts never see a Rust pointer. A destroyed or forged handle fails the
//! lookup instead of dereferencing freed memory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use ost_engine::TranslationSession;

/// Handle value that never refers to a session
pub const NULL_HANDLE: u64 = 0;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

static SESSIONS: OnceLock<Mutex<HashMap<u64, Arc<TranslationSession>>>> = OnceLock::new();

fn sessions() -> MutexGuard<'static, HashMap<u64, Arc<TranslationSession>>> {
    SESSIONS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Store `session` and return its new handle.
pub(crate) fn register(session: TranslationSession) -> u64 {
    let handle = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);
    sessions().insert(handle, Arc::new(session));
    handle
}

/// Look up a session. The registry lock is released before this returns,
/// so the caller can translate without blocking other handles.
pub(crate) fn lookup(handle: u64) -> Option<Arc<TranslationSession>> {
    sessions().get(&handle).cloned()
}

/// Remove a session from the table.
///
/// The session is freed once the last in-flight call holding it returns.
pub(crate) fn remove(handle: u64) -> Option<Arc<TranslationSession>> {
    sessions().remove(&handle)
}
