//! Deadline Engine for judicial enforcement cases
//!
//! This crate computes the statutory procedural deadlines of an enforcement
//! case over a business calendar of weekends, holidays and court closures,
//! flags the suspension resolutions its periods cross, buckets the days of
//! delay by month, and calculates the resulting fine.
//!
//! # Example
//!
//! ```no_run
//! use deadline_engine::calculation::compute_case;
//! use deadline_engine::config::ConfigLoader;
//! use deadline_engine::models::{CaseInput, ConditionalTerm, NoticeType, Term};
//! use chrono::NaiveDate;
//!
//! let tables = ConfigLoader::load("./config/colombia").unwrap().into_tables();
//! let input = CaseInput {
//!     notification_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     notice_type: NoticeType::Listing,
//!     conditional_term: ConditionalTerm::default(),
//!     compliance_term: Term::BusinessDays { days: 10 },
//!     report_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
//!     report_term_days: 3,
//!     initiating_order_date: None,
//!     accreditation_term_days: 0,
//!     additional_orders: vec![],
//! };
//!
//! let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let result = compute_case(&input, &tables, as_of).unwrap();
//! println!("{} days, fine {}", result.pipeline.total_calendar_days, result.fine.fine_amount_in_words);
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;
