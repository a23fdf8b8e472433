//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod brand;
pub mod pagination;

pub use validation::ValidationError;
pub use brand::{BrandChanges, BrandFields, BrandStatus, NewBrand, RequiredText};
pub use pagination::{Pagination, Paginated, PaginationParams};
