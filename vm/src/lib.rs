pub mod error;
pub mod host;
pub mod instruction;
pub mod loader;
pub mod machine;
pub mod opcode;
pub mod specs;

pub use error::RuntimeError;
pub use host::{Host, HostEvent, OperationMode, RecordingHost, Scalar, StdHost};
pub use instruction::Instruction;
pub use loader::LoaderError;
pub use machine::{Stack, VM};
pub use opcode::OpCode;
