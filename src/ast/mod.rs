pub mod builders;
pub mod operators;
pub mod predicates;
pub mod query;
pub mod values;

pub use self::operators::{Connective, OPERATOR_ALIASES, SortDir, url_safe_operator};
pub use self::predicates::Predicate;
pub use self::query::{Aggregate, Order, Query, SelectItem};
pub use self::values::Value;
