//! Application Layer
//!
//! Use cases, forms, guards and session tokens.

pub mod check_session;
pub mod config;
pub mod create_staff;
pub mod forms;
pub mod guard;
pub mod profile;
pub mod register;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AccountsConfig;
pub use create_staff::{CreateStaffInput, CreateStaffUseCase};
pub use forms::{ProfileForm, RegistrationForm};
pub use guard::{Guard, GuardPaths, GuardRedirect};
pub use profile::{ProfileView, ShowProfileUseCase, UpdateProfileUseCase};
pub use register::{RegisterOutput, RegisterUseCase};
pub use sign_in::{ClientFingerprint, SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
