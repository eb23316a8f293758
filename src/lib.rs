//! Ingestion pipeline for line-oriented instruction messages.
//!
//! A raw line such as
//! `InstructionMessage A MZ89 5678 50 2015-03-05T10:04:56.012Z` is parsed into
//! an [`Instruction`], checked against business rules by the [`Validator`],
//! and held in a [`PriorityQueue`] that drains by instruction type, then by
//! arrival order. [`Receiver`] strings the three together.

pub mod clock;
pub mod config;
pub mod error;
pub mod ingest;
pub mod instruction;
pub mod parser;
pub mod queue;
pub mod receiver;
pub mod validator;

pub use clock::{Clock, FixedClock, QuantaClock, SystemClock};
pub use config::ReceiverConfig;
pub use error::{Error, ParseError, Result};
pub use ingest::IngestOptions;
pub use instruction::{Instruction, InstructionType};
pub use parser::parse;
pub use queue::PriorityQueue;
pub use receiver::{ReceiveStats, Receiver};
pub use validator::{ValidationError, Validator, Violation};
