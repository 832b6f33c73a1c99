//! Ordered in-memory collection of committed contacts.

use crate::models::{Contact, ContactId};

/// Append-ordered contact collection with store-owned id assignment.
///
/// Removal is id-keyed internally: positional deletes resolve the id at the
/// observed position first, so a concurrent-looking caller that holds an id
/// can never remove the wrong element.
#[derive(Debug)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    next_id: u64,
}

impl ContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
        }
    }

    /// Hands out the next contact id, strictly increasing within a session.
    pub fn next_id(&mut self) -> ContactId {
        let id = ContactId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends to the end of the ordered sequence.
    pub fn add(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Removes the element currently at `index`; later elements shift down
    /// one position. Silent no-op when the index is out of bounds.
    ///
    /// Indices are valid only for the ordering observed at the moment of the
    /// call. Callers that hold on to an element across mutations should keep
    /// its id and use [`ContactStore::remove`] instead.
    pub fn delete(&mut self, index: usize) -> Option<Contact> {
        let id = self.contacts.get(index)?.id;
        self.remove(id)
    }

    /// Removes the contact with `id`, wherever it currently sits.
    pub fn remove(&mut self, id: ContactId) -> Option<Contact> {
        let position = self.contacts.iter().position(|c| c.id == id)?;
        Some(self.contacts.remove(position))
    }

    /// Read-only ordered view of the committed contacts.
    pub fn snapshot(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactDraft;

    fn committed(store: &mut ContactStore, name: &str) -> ContactId {
        let id = store.next_id();
        let draft = ContactDraft {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0000".to_string(),
            photo: None,
        };
        store.add(draft.into_contact(id));
        id
    }

    #[test]
    fn ids_are_strictly_increasing() {
        let mut store = ContactStore::new();
        let a = committed(&mut store, "Alice");
        let b = committed(&mut store, "Bob");
        let c = committed(&mut store, "Carol");
        assert!(a < b && b < c);
    }

    #[test]
    fn positional_delete_shifts_later_elements() {
        let mut store = ContactStore::new();
        committed(&mut store, "Alice");
        committed(&mut store, "Bob");
        committed(&mut store, "Carol");

        store.delete(1);
        let names: Vec<&str> = store.snapshot().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Carol"]);
    }

    #[test]
    fn out_of_bounds_delete_is_a_noop() {
        let mut store = ContactStore::new();
        committed(&mut store, "Alice");
        assert!(store.delete(5).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_by_id_survives_intervening_mutations() {
        let mut store = ContactStore::new();
        committed(&mut store, "Alice");
        let bob = committed(&mut store, "Bob");
        committed(&mut store, "Carol");

        store.delete(0);
        let removed = store.remove(bob).expect("Bob should still be present");
        assert_eq!(removed.name, "Bob");
        let names: Vec<&str> = store.snapshot().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Carol"]);
    }
}
