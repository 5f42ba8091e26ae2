//! Session service - who is logged in

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::Repository;

/// Holds the current user's identity in the store
///
/// Callers receive an explicit [`Session`] and pass it on to the ledger and
/// contact services; nothing reads the stored identity behind their back.
pub struct SessionService {
    repository: Arc<dyn Repository>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Start a session for `email`, replacing any existing one
    pub fn login(&self, email: &str) -> Result<Session> {
        self.repository.set_current_user(email)?;
        Ok(Session::new(email))
    }

    /// The active session, if any
    pub fn current_user(&self) -> Result<Option<Session>> {
        Ok(self.repository.current_user()?.map(Session::new))
    }

    pub fn logout(&self) -> Result<()> {
        self.repository.clear_current_user()
    }

    /// Access guard for every screen except login and register
    pub fn require(&self) -> Result<Session> {
        self.current_user()?.ok_or(Error::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv::KvRepository;
    use crate::adapters::memory::MemoryStore;

    fn service() -> SessionService {
        SessionService::new(Arc::new(KvRepository::new(Arc::new(MemoryStore::new()))))
    }

    #[test]
    fn test_login_logout() {
        let service = service();
        assert_eq!(service.current_user().unwrap(), None);
        assert!(matches!(service.require(), Err(Error::NotAuthenticated)));

        let session = service.login("ana@x.com").unwrap();
        assert_eq!(service.require().unwrap(), session);

        service.logout().unwrap();
        assert_eq!(service.current_user().unwrap(), None);
    }

    #[test]
    fn test_login_overwrites_previous_session() {
        let service = service();
        service.login("ana@x.com").unwrap();
        service.login("bob@x.com").unwrap();
        assert_eq!(service.require().unwrap().email(), "bob@x.com");
    }
}
