mod command;
mod query;

pub use self::command::{DynCartCommandService, CartCommandServiceTrait};
pub use self::query::{DynCartQueryService, CartQueryServiceTrait};
