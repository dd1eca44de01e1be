//! End-to-end tests through the derived facade.

mod company;
mod concurrency;
mod hooks;
