//! Stack-machine code generation.
//!
//! Operands are pushed before their operator. Call arguments, array
//! elements and object fields are pushed last-to-first so the runtime pops
//! them in source order.

use flowpack_bytecode::{Instruction, InstructionKind, operations};

use super::ExprError;
use super::ast::{Expr, ExprKind, Literal};
use super::builtins;
use super::scope::{Resolved, Scope};
use super::typing::{self, Typer};
use crate::assets::{Assets, Value};
use crate::diagnostics::DiagnosticKind;
use crate::project::{Project, ValueType};

pub struct Codegen<'s, 'a, 'p> {
    assets: &'s mut Assets<'p>,
    scope: Scope<'a>,
    out: Vec<Instruction>,
}

impl<'s, 'a, 'p> Codegen<'s, 'a, 'p> {
    pub fn new(assets: &'s mut Assets<'p>, scope: Scope<'a>) -> Self {
        Self {
            assets,
            scope,
            out: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Vec<Instruction> {
        self.out.push(Instruction::End);
        self.out
    }

    pub fn project(&self) -> &'p Project {
        self.assets.project()
    }

    fn typer(&self, assignable: bool) -> Typer<'_> {
        Typer::new(self.assets.project(), self.scope, assignable)
    }

    fn push(&mut self, kind: InstructionKind, index: usize, expr: &Expr) -> Result<(), ExprError> {
        let instr = Instruction::with_index(kind, index).map_err(|e| {
            ExprError::new(DiagnosticKind::IndexOverflow, e.to_string(), expr.span.clone())
        })?;
        self.out.push(instr);
        Ok(())
    }

    pub fn push_constant(
        &mut self,
        value: Value,
        value_type: ValueType,
        expr: &Expr,
    ) -> Result<(), ExprError> {
        let index = self.assets.constant_index(value, value_type);
        self.push(InstructionKind::PushConstant, index, expr)
    }

    fn push_integer(&mut self, value: usize, expr: &Expr) -> Result<(), ExprError> {
        let value = i32::try_from(value).map_err(|_| {
            ExprError::new(
                DiagnosticKind::IndexOverflow,
                format!("{value} does not fit into an integer constant"),
                expr.span.clone(),
            )
        })?;
        self.push_constant(Value::Integer(value), ValueType::Integer, expr)
    }

    fn operation(&mut self, name: &str, expr: &Expr) -> Result<(), ExprError> {
        let op = operations::by_name(name).ok_or_else(|| {
            ExprError::new(DiagnosticKind::UnknownFunction, name, expr.span.clone())
        })?;
        self.push(InstructionKind::Operation, usize::from(op.index), expr)
    }

    /// Emit `expr`. `hint` is the type an object literal should be built as.
    pub fn emit(
        &mut self,
        expr: &Expr,
        assignable: bool,
        hint: Option<&ValueType>,
    ) -> Result<(), ExprError> {
        match &expr.kind {
            ExprKind::Literal(lit) => {
                let (value, ty) = literal_value(lit);
                self.push_constant(value, ty, expr)
            }
            ExprKind::Identifier(name) => self.identifier(expr, name, assignable),
            ExprKind::Unary { op, arg } => {
                self.emit(arg, false, None)?;
                self.operation(op.operation(), expr)
            }
            ExprKind::Binary { op, left, right } => {
                self.emit(left, false, None)?;
                self.emit(right, false, None)?;
                self.operation(op.operation(), expr)
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.emit(test, false, None)?;
                self.emit(consequent, assignable, hint)?;
                self.emit(alternate, assignable, hint)?;
                self.operation(operations::CONDITIONAL, expr)
            }
            ExprKind::Member { object, property } => {
                self.member(expr, object, property, assignable)
            }
            ExprKind::Index { object, index } => {
                self.emit(object, assignable, None)?;
                self.emit(index, false, None)?;
                self.out.push(Instruction::ArrayElement);
                Ok(())
            }
            ExprKind::Call { callee, args } => self.call(expr, callee, args),
            ExprKind::Array(items) => {
                for item in items.iter().rev() {
                    self.emit(item, false, None)?;
                }
                self.push_integer(items.len(), expr)?;
                let ty = self.typer(false).type_of(expr)?;
                let type_index = self.type_index(&ty, expr)?;
                self.push_integer(type_index, expr)?;
                self.operation("Flow.makeArrayValue", expr)
            }
            ExprKind::Object(fields) => self.object(expr, fields, hint),
        }
    }

    fn identifier(&mut self, expr: &Expr, name: &str, assignable: bool) -> Result<(), ExprError> {
        let project = self.assets.project();
        let resolved = self.scope.resolve(project, name, assignable).ok_or_else(|| {
            ExprError::new(
                DiagnosticKind::UnknownIdentifier,
                format!("identifier '{name}' is neither input or local or global variable"),
                expr.span.clone(),
            )
        })?;

        match resolved {
            Resolved::Output { index, .. } => self.push(InstructionKind::PushOutput, index, expr),
            Resolved::Input { port } => {
                let index = self.assets.component_input_index(
                    self.scope.flow_index,
                    self.scope.obj_id,
                    &port.name,
                    port.flags(),
                );
                self.push(InstructionKind::PushInput, index, expr)
            }
            Resolved::Local { index, .. } => self.push(InstructionKind::PushLocalVar, index, expr),
            Resolved::Global { index, .. } => {
                self.push(InstructionKind::PushGlobalVar, index, expr)
            }
            Resolved::LoopIndex => {
                self.push_constant(Value::Integer(0), ValueType::Integer, expr)?;
                self.operation("Flow.index", expr)
            }
        }
    }

    fn member(
        &mut self,
        expr: &Expr,
        object: &Expr,
        property: &str,
        assignable: bool,
    ) -> Result<(), ExprError> {
        let project = self.assets.project();
        if let Some(name) = object.as_identifier() {
            if let Some(enum_def) = project.find_enum(name) {
                let member = enum_def
                    .members
                    .iter()
                    .find(|m| m.name == property)
                    .ok_or_else(|| typing::unknown_enum_member(name, property, expr))?;
                return self.push_constant(Value::Integer(member.value), ValueType::Integer, expr);
            }
            if let Some((value, ty)) = builtins::constant(&format!("{name}.{property}")) {
                return self.push_constant(value, ty, expr);
            }
        }

        let object_type = self.typer(assignable).type_of(object)?;
        let field_index = match &object_type {
            ValueType::Struct(name) => project
                .find_struct(name)
                .and_then(|s| s.field(property))
                .map(|(index, _)| index),
            _ => None,
        }
        .ok_or_else(|| typing::unknown_field(&object_type, property, expr))?;

        self.emit(object, assignable, None)?;
        self.push_integer(field_index, expr)?;
        self.out.push(Instruction::ArrayElement);
        Ok(())
    }

    fn call(&mut self, expr: &Expr, callee: &Expr, args: &[Expr]) -> Result<(), ExprError> {
        let name = typing::function_name(callee)?;
        let op = operations::function(&name).ok_or_else(|| {
            ExprError::new(DiagnosticKind::UnknownFunction, name.clone(), callee.span.clone())
        })?;
        check_arity(&name, op.arity, args.len(), expr)?;

        if name == "Flow.makeValue" {
            let ty = typing::make_value_type(args, expr)?;
            let type_index = self.type_index(&ty, expr)?;
            self.emit(&args[1], false, Some(&ty))?;
            self.push_integer(type_index, &args[0])?;
        } else {
            for arg in args.iter().rev() {
                self.emit(arg, false, None)?;
            }
        }

        if op.arity.is_variadic() {
            self.push_integer(args.len(), expr)?;
        }
        self.push(InstructionKind::Operation, usize::from(op.index), expr)
    }

    fn object(
        &mut self,
        expr: &Expr,
        fields: &[(String, Expr)],
        hint: Option<&ValueType>,
    ) -> Result<(), ExprError> {
        let project = self.assets.project();
        let structure = match hint {
            Some(ValueType::Struct(name)) => project.find_struct(name),
            _ => None,
        }
        .ok_or_else(|| {
            let ty = hint.map_or_else(|| "struct:any".to_string(), ToString::to_string);
            ExprError::new(
                DiagnosticKind::TypeMismatch,
                format!("Can't build object literal for type '{ty}'"),
                expr.span.clone(),
            )
        })?;

        let mut slots: Vec<Option<&Expr>> = vec![None; structure.fields.len()];
        for (key, value) in fields {
            let (index, _) = structure.field(key).ok_or_else(|| {
                ExprError::new(
                    DiagnosticKind::UnknownMember,
                    format!("Field '{key}' not in struct:{}", structure.name),
                    value.span.clone(),
                )
            })?;
            slots[index] = Some(value);
        }

        for (slot, field) in slots.iter().zip(&structure.fields).rev() {
            match slot {
                Some(value) => {
                    let field_type = ValueType::parse(&field.value_type);
                    self.emit(value, false, field_type.as_ref())?;
                }
                None => self.push_constant(Value::Undefined, ValueType::Undefined, expr)?,
            }
        }
        self.push_integer(structure.fields.len(), expr)
    }

    fn type_index(&mut self, ty: &ValueType, expr: &Expr) -> Result<usize, ExprError> {
        usize::try_from(self.assets.type_index(ty)).map_err(|_| {
            ExprError::new(
                DiagnosticKind::UnknownType,
                format!("Unknown type '{ty}'"),
                expr.span.clone(),
            )
        })
    }
}

pub fn literal_value(lit: &Literal) -> (Value, ValueType) {
    let value = match lit {
        Literal::Undefined => Value::Undefined,
        Literal::Null => Value::Null,
        Literal::Boolean(v) => Value::Boolean(*v),
        Literal::Integer(v) => Value::Integer(*v),
        Literal::Double(v) => Value::Double(*v),
        Literal::String(s) => Value::String(s.clone()),
    };
    (value, typing::literal_type(lit))
}

pub fn check_arity(
    name: &str,
    arity: operations::Arity,
    count: usize,
    expr: &Expr,
) -> Result<(), ExprError> {
    if arity.accepts(count) {
        return Ok(());
    }
    let expected = match arity {
        operations::Arity::Fixed(n) => n.to_string(),
        operations::Arity::Range { min, max } => format!("{min} to {max}"),
    };
    Err(ExprError::new(
        DiagnosticKind::ArgumentCount,
        format!("In function '{name}' call expected {expected} arguments, but got {count}"),
        expr.span.clone(),
    ))
}
