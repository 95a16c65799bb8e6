/// Account entity: balance, transaction history and the rules for
/// deposits, withdrawals and transfers.
/// Every operation first produces a transaction, which is then applied.
pub mod account;

/// Registered users and validation of their national id and birth date.
pub mod user;

/// Branch code and withdrawal limits, with environment overrides.
pub mod config;

/// Storage interfaces for users and accounts, plus "in memory" implementations.
pub mod repository;

/// Registration, account management and money operations on top of the
/// repositories. Owned together by [`service::Bank`].
pub mod service;

/// Menu driven console used by the binary. Lives here so integration tests
/// can run whole sessions.
pub mod bin_utils;
