//! # nisync Jira
//!
//! Jira REST search client implementing [`nisync_core::IssueSource`].

pub mod client;

pub use client::{JiraClient, SEARCH_PATH};
