//! In-memory adapters.
//!
//! Full implementations of every port, used by integration tests and local
//! development without a database.

mod category_catalog;
mod course_catalog;
mod enrollment_reader;
mod membership_repository;
mod student_directory;

pub use category_catalog::InMemoryCategoryCatalog;
pub use course_catalog::InMemoryCourseCatalog;
pub use enrollment_reader::InMemoryEnrollmentReader;
pub use membership_repository::InMemoryMembershipRepository;
pub use student_directory::InMemoryStudentDirectory;
