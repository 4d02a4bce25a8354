//! Client registry seam
//!
//! Storage owns the clients; the parser only reads a snapshot per call.

use crate::types::Client;
use std::sync::RwLock;

/// Read access to the externally owned client list.
pub trait ClientRegistry: Send + Sync {
    /// All clients, in the storage layer's order.
    fn list_clients(&self) -> Vec<Client>;
}

impl ClientRegistry for Vec<Client> {
    fn list_clients(&self) -> Vec<Client> {
        self.clone()
    }
}

/// Thread-safe registry kept in memory
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    clients: RwLock<Vec<Client>>,
    next_id: RwLock<i64>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(clients: Vec<Client>) -> Self {
        let next_id = clients.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            clients: RwLock::new(clients),
            next_id: RwLock::new(next_id),
        }
    }

    /// Add a client by name; an exact-name duplicate returns the existing id.
    pub fn add_client(&self, name: &str) -> i64 {
        let mut clients = self.clients.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = clients.iter().find(|c| c.name == name) {
            return existing.id;
        }

        let mut next_id = self.next_id.write().unwrap_or_else(|e| e.into_inner());
        *next_id += 1;
        clients.push(Client::new(*next_id, name));
        tracing::info!(client = name, id = *next_id, "Client added");
        *next_id
    }

    pub fn len(&self) -> usize {
        self.clients.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClientRegistry for InMemoryRegistry {
    fn list_clients(&self) -> Vec<Client> {
        self.clients.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_list() {
        let registry = InMemoryRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.add_client("Pérez"), 1);
        assert_eq!(registry.add_client("Gómez"), 2);
        let names: Vec<String> = registry.list_clients().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Pérez", "Gómez"]);
    }

    #[test]
    fn test_duplicate_name_returns_existing_id() {
        let registry = InMemoryRegistry::with_clients(vec![Client::new(7, "Ruiz")]);
        assert_eq!(registry.add_client("Ruiz"), 7);
        assert_eq!(registry.add_client("ruiz"), 8);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_vec_registry() {
        let clients = vec![Client::new(1, "Pérez")];
        assert_eq!(clients.list_clients(), clients);
    }
}
