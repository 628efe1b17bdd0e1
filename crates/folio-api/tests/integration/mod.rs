//! Integration tests driving the full router.

mod common;

mod auth_tests;
mod contact_tests;
mod preflight_tests;
mod projects_tests;
mod routing_tests;
