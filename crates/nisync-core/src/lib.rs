//! nisync Core Library
//!
//! Ticket model, projection rules and the pipeline that mirrors issue-tracker
//! tickets into the network inventory. Transport clients live in
//! `nisync-jira` and `nisync-inventory` and plug in through the
//! [`IssueSource`] and [`Inventory`] traits.

pub mod config;
pub mod error;
pub mod inventory;
pub mod observer;
pub mod pipeline;
pub mod source;
pub mod ticket;

#[cfg(test)]
mod testing;

pub use config::{ServiceConfig, SyncConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use error::{decode_json, expect_status, ConfigError, PipelineError, SyncError, SyncResult};
pub use inventory::{Inventory, Relationship, ServiceLookup, WriteReport};
pub use observer::{NoopObserver, SyncObserver};
pub use pipeline::{SyncPipeline, SyncReport, SyncStage};
pub use source::IssueSource;
pub use ticket::{RawIssue, TicketRecord};
