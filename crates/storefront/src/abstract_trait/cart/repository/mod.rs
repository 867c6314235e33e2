mod command;
mod query;

pub use self::command::{DynCartCommandRepository, CartCommandRepositoryTrait};
pub use self::query::{DynCartQueryRepository, CartQueryRepositoryTrait};
