use macro_parser::Builtin;
use vm::opcode::OpCode;

use crate::codegen::{Compiler, OpenFunction};
use crate::error::CompilerError;
use crate::expressions::{AtomCompiler, ExpressionCompiler};
use crate::statements::declarations::DeclarationCompiler;
use crate::statements::StatementCompiler;
use crate::types::VarType;

pub trait BuiltinCompiler {
    fn compile_builtin(&mut self, builtin: Builtin, line: usize) -> Result<(), CompilerError>;
    fn compile_start(&mut self, line: usize) -> Result<(), CompilerError>;
    fn compile_end(&mut self, line: usize) -> Result<(), CompilerError>;
    fn compile_display(&mut self) -> Result<(), CompilerError>;
    fn compile_move(&mut self) -> Result<(), CompilerError>;
    fn compile_delay(&mut self) -> Result<(), CompilerError>;

    /// Compile built-in arguments with the argument-list flag raised.
    fn compile_call_args(
        &mut self,
        ty: VarType,
        count: usize,
    ) -> Result<(), CompilerError>;
}

impl BuiltinCompiler for Compiler {
    fn compile_builtin(&mut self, builtin: Builtin, line: usize) -> Result<(), CompilerError> {
        match builtin {
            Builtin::Int => self.compile_declaration(builtin, VarType::Int),
            Builtin::Float => self.compile_declaration(builtin, VarType::Float),
            Builtin::Start => self.compile_start(line),
            Builtin::End => self.compile_end(line),
            Builtin::Display => self.compile_display(),
            Builtin::Move => self.compile_move(),
            Builtin::Delay => self.compile_delay(),
            Builtin::Drag | Builtin::Click | Builtin::Type | Builtin::Mod => {
                Err(CompilerError::ReservedBuiltin { builtin, line })
            }
        }
    }

    fn compile_start(&mut self, line: usize) -> Result<(), CompilerError> {
        if self.scopes.in_function() {
            return Err(CompilerError::NestedFunction { line });
        }

        let (name, line) = self.expect_ident(Builtin::Start)?;
        if self.functions.contains_key(&name) {
            return Err(CompilerError::DuplicateFunction { name, line });
        }

        let offset = self.bytecode.len();
        self.emit(OpCode::StartFunc);
        self.functions.insert(name.clone(), offset);
        self.scopes.enter_function();
        tracing::debug!(name = %name, offset, "function started");
        self.open_function = Some(OpenFunction { name, line });

        self.finish_statement()
    }

    fn compile_end(&mut self, line: usize) -> Result<(), CompilerError> {
        if !self.scopes.in_function() {
            return Err(CompilerError::EndOutsideFunction { line });
        }

        self.emit(OpCode::EndFunc);
        self.scopes.leave_function();
        self.open_function = None;

        self.finish_statement()
    }

    fn compile_display(&mut self) -> Result<(), CompilerError> {
        let (name, line) = self.expect_ident(Builtin::Display)?;
        let symbol = self.resolve_variable(&name, line)?;

        self.emit(symbol.ty.mode_opcode());
        self.emit_operand(OpCode::Display, symbol.operand());

        self.finish_statement()
    }

    fn compile_move(&mut self) -> Result<(), CompilerError> {
        self.emit(VarType::Int.mode_opcode());
        self.compile_call_args(VarType::Int, 2)?;
        self.emit(OpCode::Move);
        self.finish_statement()
    }

    fn compile_delay(&mut self) -> Result<(), CompilerError> {
        self.emit(VarType::Float.mode_opcode());
        self.compile_call_args(VarType::Float, 1)?;
        self.emit(OpCode::Delay);
        self.finish_statement()
    }

    fn compile_call_args(
        &mut self,
        ty: VarType,
        count: usize,
    ) -> Result<(), CompilerError> {
        self.in_call_args = true;
        let result = (0..count).try_for_each(|_| self.compile_expression(ty));
        self.in_call_args = false;
        result
    }
}
