//! Git operations abstraction layer
//!
//! The version engine only needs a handful of things from a repository: its
//! tag names, the checked-out branch, and (when asked) a way to create and
//! push the computed tag. The [Repository] trait captures exactly that.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! ```rust
//! # use git_tag_bump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_tag_bump::Result<()> {
//! let tags = repo.list_tag_names()?;
//! let branch = repo.current_branch_name()?;
//! println!("{} tags, on {}", tags.len(), branch);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Repository operations needed to compute, create and publish a tag
///
/// Implementations map their underlying errors to
/// [crate::error::TagBumpError]: listing tags and reading the branch fail with
/// `RepositoryAccess`, tag creation with `Tag`, pushing with `Remote`.
pub trait Repository {
    /// Every tag name in the repository, in no particular order
    fn list_tag_names(&self) -> Result<Vec<String>>;

    /// Short name of the checked-out branch (e.g. "feat/login")
    ///
    /// A detached or unborn HEAD is an error.
    fn current_branch_name(&self) -> Result<String>;

    /// Create a lightweight tag pointing at HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push `refs/tags/<name>` to `remote`
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}
