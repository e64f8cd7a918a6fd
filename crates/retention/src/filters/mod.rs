//! Deletion predicates applied to each timeline post.

pub mod age;
pub mod allow_list;
pub mod interaction;

pub use age::AgeFilter;
pub use allow_list::AllowListFilter;
pub use interaction::InteractionChecker;
