//! Machine module - VM implementation
//!
//! The fetch-decode-execute loop lives in `vm.rs`; each instruction family is
//! handled by a trait implemented on the VM in its own submodule.

mod actions;
mod arithmetic;
mod control;
mod data;
mod stack;
mod vm;

// Public API
pub use stack::Stack;
pub use vm::VM;
