// ABOUTME: API module containing the HTTP handler functions for the brewlog REST API.
// ABOUTME: Brew CRUD handlers live in the brews sub-module.

pub mod brews;
