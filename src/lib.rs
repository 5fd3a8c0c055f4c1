//! Issuance request builder and deployment orchestrator for equity tokens.
//!
//! The crate covers the path from a partially-filled issuance form to a
//! deployed token contract: domain validation of the
//! [`request::IssuanceRequest`], derivation of computed fields, mapping into
//! the exact constructor argument encoding ([`deploy::DeployParams`]), and
//! the asynchronous five-phase deployment protocol driven by
//! [`deploy::DeploymentOrchestrator`] against an injected
//! [`wallet::WalletProvider`] capability.
//!
//! Rendering, the wallet itself, the contract artifact contents, and
//! persistence of issued tokens live outside this crate.

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod deploy;
pub mod report;
pub mod request;
pub mod session;
pub mod wallet;

pub use config::{Config, LogLevel, setup_tracing};
pub use session::{IssuanceSession, SubmitResult};
