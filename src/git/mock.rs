use crate::error::{Result, TagBumpError};
use crate::git::Repository;
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    tags: RefCell<Vec<String>>,
    branch: Option<String>,
    fail_listing: bool,
    pushed: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock repository holding the given tags
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockRepository {
            tags: RefCell::new(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.get_mut().push(name.into());
    }

    /// Set the checked-out branch
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = Some(branch.into());
    }

    /// Make tag listing fail, as an unreadable repository would
    pub fn fail_listing(&mut self) {
        self.fail_listing = true;
    }

    /// Tags pushed so far, as `(remote, tag)` pairs
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.borrow().iter().any(|t| t == name)
    }
}

impl Repository for MockRepository {
    fn list_tag_names(&self) -> Result<Vec<String>> {
        if self.fail_listing {
            return Err(TagBumpError::repository("simulated listing failure"));
        }
        Ok(self.tags.borrow().clone())
    }

    fn current_branch_name(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| TagBumpError::repository("HEAD is detached"))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if self.has_tag(name) {
            return Err(TagBumpError::tag(format!("Tag '{}' already exists", name)));
        }
        self.tags.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        if !self.has_tag(name) {
            return Err(TagBumpError::remote(format!("Tag '{}' does not exist", name)));
        }
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }
}
