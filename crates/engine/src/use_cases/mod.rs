//! Use cases - User story orchestration.
//!
//! Each module wraps one area of the rules in versioned transitions. Every
//! mutating call goes through [`TransitionRunner`], which owns the
//! load-apply-commit loop and the post-commit broadcast.

pub mod checks;
pub mod error;
pub mod resources;
pub mod rest;
pub mod shop;
pub mod transition;

pub use checks::CheckUseCases;
pub use error::EngineError;
pub use resources::ResourceUseCases;
pub use rest::RestUseCases;
pub use shop::{Receipt, ShopUseCases};
pub use transition::{Committed, Transition, TransitionRunner};
