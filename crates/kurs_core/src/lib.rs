//! Kurs Core Runtime
//!
//! Foundational primitives shared by the Kurs components:
//!
//! - **State Machines**: typed flat state machines with a bounded history
//! - **Context Scopes**: explicit scoped context so nested components can reach
//!   shared state without every layer forwarding it
//!
//! # Example
//!
//! ```rust
//! use kurs_core::fsm::StateMachine;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Phase { Idle, Hovered }
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Pointer { Enter, Leave }
//!
//! let mut fsm = StateMachine::builder(Phase::Idle)
//!     .on(Phase::Idle, Pointer::Enter, Phase::Hovered)
//!     .on(Phase::Hovered, Pointer::Leave, Phase::Idle)
//!     .build();
//! assert_eq!(fsm.send(Pointer::Enter), Some(Phase::Hovered));
//! ```

pub mod context;
pub mod fsm;

pub use context::ContextScope;
pub use fsm::{MachineKey, StateMachine, StateMachineBuilder};
