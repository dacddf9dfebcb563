//! PostgreSQL adapters.

mod category_catalog;
mod course_catalog;
mod enrollment_reader;
mod membership_repository;
mod student_directory;

pub use category_catalog::PostgresCategoryCatalog;
pub use course_catalog::PostgresCourseCatalog;
pub use enrollment_reader::PostgresEnrollmentReader;
pub use membership_repository::PostgresMembershipRepository;
pub use student_directory::PostgresStudentDirectory;
