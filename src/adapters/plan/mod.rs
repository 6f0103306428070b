//! Plan resolver adapters.

mod static_plan_resolver;

pub use static_plan_resolver::StaticPlanResolver;
