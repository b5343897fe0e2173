pub mod emulator;
pub mod generator;
pub mod ir_to_asm;
pub mod tac;

mod error;

pub use error::{AsmError, EmulatorError, GenError};
pub use emulator::Emulator;
pub use generator::IrGenerator;
pub use ir_to_asm::ir_to_asm;
