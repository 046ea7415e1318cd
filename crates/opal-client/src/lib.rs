//! Opal Client — HTTP access to the content-management API.
//!
//! [`CmsClient`] owns URL and header construction plus the JSON verb
//! helpers, and implements the `opal-ask` collaborator traits so the ask
//! pipeline can run against a live CMS.

#![doc = include_str!("../README.md")]

pub mod client;
mod impls;

pub use client::CmsClient;
