//! Ports - Interfaces between the domain and the outside world.
//!
//! Each port is an async trait implemented by an adapter (PostgreSQL in
//! production, in-memory for tests and local development).

mod category_catalog;
mod course_catalog;
mod enrollment_reader;
mod membership_repository;
mod student_directory;

pub use category_catalog::{CategoryCatalog, CategorySummary};
pub use course_catalog::{CourseCatalog, CourseSummary};
pub use enrollment_reader::{EnrollmentReader, EnrollmentView};
pub use membership_repository::MembershipRepository;
pub use student_directory::{StudentDirectory, StudentSummary};
