//! Contact service - saved payees

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{Contact, NewContact, Session};
use crate::ports::Repository;

use super::recover;

/// Contact book for the logged-in user
pub struct ContactService {
    repository: Arc<dyn Repository>,
    suggestion_limit: usize,
}

impl ContactService {
    pub fn new(repository: Arc<dyn Repository>, suggestion_limit: usize) -> Self {
        Self {
            repository,
            suggestion_limit,
        }
    }

    /// Validate and append a contact. Duplicates are allowed.
    pub fn add_contact(&self, session: &Session, contact: NewContact) -> Result<Contact> {
        let contact = contact.validate()?;

        let key = session.key();
        let mut contacts = recover(self.repository.contacts(&key))?;
        contacts.push(contact.clone());
        self.repository.save_contacts(&key, &contacts)?;

        Ok(contact)
    }

    /// All contacts, in the order they were added
    pub fn list_contacts(&self, session: &Session) -> Result<Vec<Contact>> {
        recover(self.repository.contacts(&session.key()))
    }

    /// Suggestions while typing: at most `suggestion_limit` matches, none for an empty term
    pub fn search_contacts(&self, session: &Session, term: &str) -> Result<Vec<Contact>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .list_contacts(session)?
            .into_iter()
            .filter(|c| c.matches(&needle))
            .take(self.suggestion_limit)
            .collect())
    }

    /// Full search: every match, or every contact for an empty term
    pub fn filter_contacts(&self, session: &Session, term: &str) -> Result<Vec<Contact>> {
        let needle = term.trim().to_lowercase();
        let contacts = self.list_contacts(session)?;
        if needle.is_empty() {
            return Ok(contacts);
        }
        Ok(contacts.into_iter().filter(|c| c.matches(&needle)).collect())
    }

    pub fn find_contact(&self, session: &Session, id: Uuid) -> Result<Contact> {
        self.list_contacts(session)?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found(format!("Contact {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv::KvRepository;
    use crate::adapters::memory::MemoryStore;

    fn setup() -> (ContactService, Session) {
        let repo = Arc::new(KvRepository::new(Arc::new(MemoryStore::new())));
        (ContactService::new(repo, 6), Session::new("ana@x.com"))
    }

    fn add(service: &ContactService, session: &Session, name: &str, alias: Option<&str>) -> Contact {
        let mut contact = NewContact::new(name, "1234567890", "Banco Estado");
        contact.alias = alias.map(str::to_string);
        service.add_contact(session, contact).unwrap()
    }

    #[test]
    fn test_add_preserves_insertion_order_and_duplicates() {
        let (service, session) = setup();
        let first = add(&service, &session, "Bob", None);
        let second = add(&service, &session, "Bob", None);

        let contacts = service.list_contacts(&session).unwrap();
        assert_eq!(contacts, vec![first.clone(), second.clone()]);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_add_rejects_short_account_number() {
        let (service, session) = setup();
        let err = service
            .add_contact(&session, NewContact::new("Bob", "12345", "Banco"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(service.list_contacts(&session).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_bounded_and_case_insensitive() {
        let (service, session) = setup();
        for i in 0..8 {
            add(&service, &session, &format!("Maria {}", i), None);
        }
        add(&service, &session, "Jose", Some("MARIO"));

        assert_eq!(service.search_contacts(&session, "maria").unwrap().len(), 6);
        let alias_hits = service.search_contacts(&session, "mario").unwrap();
        assert_eq!(alias_hits.len(), 1);
        assert_eq!(alias_hits[0].name, "Jose");
    }

    #[test]
    fn test_empty_term() {
        let (service, session) = setup();
        add(&service, &session, "Bob", None);
        assert!(service.search_contacts(&session, "   ").unwrap().is_empty());
        assert_eq!(service.filter_contacts(&session, "").unwrap().len(), 1);
    }

    #[test]
    fn test_filter_is_unbounded() {
        let (service, session) = setup();
        for i in 0..8 {
            add(&service, &session, &format!("Maria {}", i), None);
        }
        assert_eq!(service.filter_contacts(&session, "MAR").unwrap().len(), 8);
    }

    #[test]
    fn test_find_contact() {
        let (service, session) = setup();
        let bob = add(&service, &session, "Bob", None);
        assert_eq!(service.find_contact(&session, bob.id).unwrap(), bob);
        assert!(matches!(
            service.find_contact(&session, Uuid::new_v4()),
            Err(Error::NotFound(_))
        ));
    }
}
