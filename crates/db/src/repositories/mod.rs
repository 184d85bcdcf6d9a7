//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open transaction) as the first argument.
//! [`PgDraftRepository`] adapts them to the domain persistence port.

pub mod draft_repo;
pub mod draft_revision_repo;
pub mod pg_draft_repository;

pub use draft_repo::DraftRepo;
pub use draft_revision_repo::DraftRevisionRepo;
pub use pg_draft_repository::PgDraftRepository;
