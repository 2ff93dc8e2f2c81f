//! Emergency contact list.
//!
//! The list lives in a single slot of the key-value store in insertion order.
//! Every mutation rewrites the whole slot.

mod validation;

pub use validation::validate_contact;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::notice::{Notice, Notifier};
use crate::storage::{load_list, save_list, KvStore, CONTACTS_KEY};

/// One emergency contact. Two contacts are the same contact when both
/// fields match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    name: String,
    phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }
}

pub struct ContactBook<'s, S: KvStore + ?Sized> {
    store: &'s S,
    contacts: Vec<Contact>,
}

impl<'s, S: KvStore + ?Sized> ContactBook<'s, S> {
    /// Load the stored list.
    ///
    /// Corrupt data is treated as an empty list and reported through
    /// `notifier`; the stored value is not cleared.
    pub fn load(store: &'s S, notifier: &dyn Notifier) -> Result<Self> {
        let loaded = load_list::<Contact, _>(store, CONTACTS_KEY)?;
        if loaded.corrupt.is_some() {
            notifier.notify(&Notice::ContactsLoadFailed);
        }
        tracing::debug!("Loaded {} contacts", loaded.items.len());
        Ok(Self {
            store,
            contacts: loaded.items,
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Validate, append and persist. A rejected entry changes nothing.
    pub fn add(&mut self, name: &str, phone: &str) -> Result<&Contact> {
        let (name, phone) = validate_contact(name, phone)?;
        self.contacts.push(Contact::new(name, phone));
        if let Err(e) = self.save() {
            self.contacts.pop();
            return Err(e);
        }
        Ok(&self.contacts[self.contacts.len() - 1])
    }

    /// Remove the first contact equal to `contact` and persist.
    ///
    /// # Errors
    /// `ContactNotFound` if no stored contact matches; the list is unchanged.
    pub fn delete(&mut self, contact: &Contact) -> Result<Contact> {
        let Some(position) = self.contacts.iter().position(|c| c == contact) else {
            tracing::warn!("Could not find contact to delete: {}", contact.name());
            return Err(CoreError::ContactNotFound {
                name: contact.name().to_string(),
                phone: contact.phone().to_string(),
            });
        };

        let removed = self.contacts.remove(position);
        if let Err(e) = self.save() {
            self.contacts.insert(position, removed);
            return Err(e);
        }
        Ok(removed)
    }

    fn save(&self) -> Result<()> {
        save_list(self.store, CONTACTS_KEY, &self.contacts)?;
        tracing::debug!("Saved {} contacts", self.contacts.len());
        Ok(())
    }
}
