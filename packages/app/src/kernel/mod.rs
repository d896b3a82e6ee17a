//! Kernel module - app infrastructure and dependencies.

pub mod app_kernel;
pub mod deps;
pub mod machine;
pub mod test_dependencies;
pub mod traits;

pub use app_kernel::AppKernel;
pub use deps::{AppDeps, FirebaseAuthAdapter, ProfileApiAdapter, StaticVerificationGate};
pub use machine::Machine;
pub use test_dependencies::{
    MockIdentityProvider, MockProfileStore, MockVerificationGate, TestDependencies,
};
pub use traits::*;
