//! Bytecode layout constants shared by the compiler and the VM.

/// Version stamped into the first four bytes of every program.
pub const BYTECODE_VERSION: i32 = 1;

/// Width of the version header. Execution starts right after it.
pub const HEADER_LEN: usize = 4;

/// Byte position of the global frame size operand: the header, then the
/// `SETUP_FRAME` opcode byte.
pub const GLOBAL_FRAME_SIZE_OFFSET: usize = HEADER_LEN + 1;

/// Every operand and every stack slot is four bytes.
pub const WORD: usize = 4;

/// Memory budget used by the CLI when none is given, in KiB.
pub const DEFAULT_MEMORY_KB: usize = 16;
