use std::sync::Mutex;

use async_trait::async_trait;
use collaborator_normalizer::{Collaborator, CollaboratorDirectory, Error, Permission, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(u32),
    Set(String, Permission),
}

/// In-memory repository whose collaborators are served in fixed-size pages.
pub struct MemoryDirectory {
    page_size: usize,
    collaborators: Mutex<Vec<Collaborator>>,
    calls: Mutex<Vec<Call>>,
    fail_list_on: Option<u32>,
    fail_set_for: Option<String>,
}

impl MemoryDirectory {
    pub fn new(page_size: usize, collaborators: Vec<Collaborator>) -> Self {
        Self {
            page_size,
            collaborators: Mutex::new(collaborators),
            calls: Mutex::new(vec![]),
            fail_list_on: None,
            fail_set_for: None,
        }
    }

    /// `count` read-only collaborators named `user-0`, `user-1`, ...
    pub fn readers(page_size: usize, count: usize) -> Self {
        Self::new(
            page_size,
            (0..count)
                .map(|i| Collaborator::new(format!("user-{i}"), Permission::Pull))
                .collect(),
        )
    }

    pub fn fail_list_on(mut self, page: u32) -> Self {
        self.fail_list_on = Some(page);
        self
    }

    pub fn fail_set_for(mut self, username: &str) -> Self {
        self.fail_set_for = Some(username.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn permission_of(&self, username: &str) -> Option<Permission> {
        self.collaborators
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.username == username)
            .map(|c| c.permission)
    }

    pub fn downgrades(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Set(..)))
            .collect()
    }
}

#[async_trait]
impl CollaboratorDirectory for MemoryDirectory {
    async fn list_page(&self, page: u32) -> Result<Vec<Collaborator>> {
        self.calls.lock().unwrap().push(Call::List(page));
        if self.fail_list_on == Some(page) {
            return Err(Error::Protocol {
                status: Some(500),
                message: "Internal Server Error".into(),
            });
        }

        let collaborators = self.collaborators.lock().unwrap();
        Ok(collaborators
            .iter()
            .skip((page as usize - 1) * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect())
    }

    async fn set_permission(&self, username: &str, level: Permission) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Set(username.to_string(), level));
        if self.fail_set_for.as_deref() == Some(username) {
            return Err(Error::Decode("expected value at line 1 column 1".into()));
        }

        let mut collaborators = self.collaborators.lock().unwrap();
        if let Some(collaborator) = collaborators.iter_mut().find(|c| c.username == username) {
            collaborator.permission = level;
        }
        Ok(())
    }
}
