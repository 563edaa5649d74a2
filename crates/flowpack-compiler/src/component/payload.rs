//! Type-specific payloads, written after the generic header.

use super::encoder::{EncodeContext, write_instructions};
use crate::assets::{Value, WidgetBinding};
use crate::expr::eval_constant_expression;
use crate::project::{CompareOperator, Component, ComponentKind, Flow, ValueType};
use crate::writer::DataBuffer;

/// Position of the component among the flow's components of the same kind.
fn slot_among(ctx: &EncodeContext<'_, '_>, same_kind: fn(&ComponentKind) -> bool) -> u8 {
    let position = ctx
        .flow
        .components_where(same_kind)
        .position(|c| c.obj_id == ctx.component.obj_id)
        .unwrap_or(0);
    u8::try_from(position).unwrap_or(u8::MAX)
}

pub fn input(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    buf.write_u8(slot_among(ctx, |k| matches!(k, ComponentKind::Input(_))));
}

pub fn output(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    buf.write_u8(slot_among(ctx, |k| matches!(k, ComponentKind::Output(_))));
}

pub fn set_variable(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::SetVariable(props) = &component.kind else {
        return;
    };
    let entries: Vec<_> = props
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let target = ctx.assignable(&format!("entries[{i}].variable"), &entry.variable);
            let value = ctx.expression(
                &format!("entries[{i}].value"),
                &entry.value,
                &ValueType::Any,
            );
            (target, value)
        })
        .collect();

    buf.write_array(&entries, |b, (target, value)| {
        b.write_object_offset(2, |s| write_instructions(s, target));
        b.write_object_offset(2, |s| write_instructions(s, value));
    });
}

pub fn switch(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::Switch(props) = &component.kind else {
        return;
    };
    let tests: Vec<_> = props
        .tests
        .iter()
        .enumerate()
        .map(|(i, test)| {
            let output = ctx
                .ports
                .output_index(&test.output_name)
                .and_then(|index| u32::try_from(index).ok())
                .unwrap_or(u32::MAX);
            let condition = ctx.expression(
                &format!("tests[{i}].condition"),
                &test.condition,
                &ValueType::Any,
            );
            let value = ctx.expression(
                &format!("tests[{i}].outputValue"),
                &test.output_value,
                &ValueType::Any,
            );
            (output, condition, value)
        })
        .collect();

    buf.write_array(&tests, |b, (output, condition, value)| {
        b.write_u32(*output);
        b.write_object_offset(2, |s| write_instructions(s, condition));
        b.write_object_offset(2, |s| write_instructions(s, value));
    });
}

/// Boolean condition built from the operands and operator.
pub fn compare_condition(operator: CompareOperator, a: &str, b: &str, c: &str) -> String {
    let binary = |op: &str| format!("({a}) {op} ({b})");
    match operator {
        CompareOperator::Equal => binary("=="),
        CompareOperator::Less => binary("<"),
        CompareOperator::Greater => binary(">"),
        CompareOperator::LessOrEqual => binary("<="),
        CompareOperator::GreaterOrEqual => binary(">="),
        CompareOperator::NotEqual => binary("!="),
        CompareOperator::Not => format!("!({a})"),
        CompareOperator::And => binary("&&"),
        CompareOperator::Or => binary("||"),
        CompareOperator::Xor => format!("(({a}) && !({b})) || (!({a}) && ({b}))"),
        CompareOperator::Between => format!("(({a}) >= ({b})) && (({a}) <= ({c}))"),
    }
}

pub fn compare(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::Compare(props) = &component.kind else {
        return;
    };
    let condition = compare_condition(props.operator, &props.a, &props.b, &props.c);
    let instructions = ctx.expression("operator", &condition, &ValueType::Any);
    buf.write_object_offset(2, |s| write_instructions(s, &instructions));
}

pub fn constant(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::Constant(props) = &component.kind else {
        return;
    };
    let (value, value_type) = match eval_constant_expression(ctx.assets.project(), &props.value) {
        Ok(folded) => folded,
        Err(err) => {
            err.report(ctx.diagnostics, &props.value)
                .at(&ctx.flow.name, Some(&ctx.component.obj_id))
                .property("value")
                .emit();
            (Value::Null, ValueType::Null)
        }
    };
    let index = ctx.assets.constant_index(value, value_type);
    let index = ctx.index_u16("value", index);
    buf.write_u16(index);
}

pub fn call_action(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::CallAction(props) = &component.kind else {
        return;
    };
    let flow = ctx.action("action", &props.action);

    // Where the callee's first Input/Output sits among the caller's ports;
    // 0 for native, unresolved or slotless callees.
    let callee = ctx
        .assets
        .project()
        .find_action(&props.action)
        .filter(|action| !action.is_native());
    let inputs_start = first_of(callee, |k| matches!(k, ComponentKind::Input(_)))
        .and_then(|c| ctx.ports.input_index(&c.obj_id))
        .unwrap_or(0);
    let outputs_start = first_of(callee, |k| matches!(k, ComponentKind::Output(_)))
        .and_then(|c| ctx.ports.output_index(&c.obj_id))
        .unwrap_or(0);

    buf.write_i16(flow);
    buf.write_u8(u8::try_from(inputs_start).unwrap_or(u8::MAX));
    buf.write_u8(u8::try_from(outputs_start).unwrap_or(u8::MAX));
}

fn first_of(flow: Option<&Flow>, kind: fn(&ComponentKind) -> bool) -> Option<&Component> {
    flow.and_then(|flow| flow.components_where(kind).next())
}

pub fn show_page(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::ShowPage(props) = &component.kind else {
        return;
    };
    let page = ctx.page("page", &props.page);
    buf.write_i16(page);
}

pub fn on_event(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    if let ComponentKind::OnEvent(props) = &ctx.component.kind {
        buf.write_u8(props.event.code());
    }
}

pub fn text(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::Text(props) = &component.kind else {
        return;
    };
    let style = ctx.style("style", &props.style);
    buf.write_i16(style);
}

pub fn button(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::Button(props) = &component.kind else {
        return;
    };
    let style = ctx.style("style", &props.style);
    let action = ctx.action("action", &props.action);

    let slot = ctx.ports.output_index("clicked").unwrap_or(0);
    let binding = WidgetBinding {
        component: ctx.component_index,
        slot,
    };
    let widget_action = ctx.assets.flow_state_mut(ctx.flow_index).widget_action_index(
        &ctx.component.obj_id,
        "clicked",
        binding,
    );
    let widget_action = ctx.index_u16("action", widget_action);

    buf.write_i16(style);
    buf.write_i16(action);
    buf.write_u16(widget_action);
}

pub fn text_input(ctx: &mut EncodeContext<'_, '_>, buf: &mut DataBuffer) {
    let component = ctx.component;
    let ComponentKind::TextInput(props) = &component.kind else {
        return;
    };
    let style = ctx.style("style", &props.style);

    // `data` is the first entry of the TextInput property table.
    let binding = WidgetBinding {
        component: ctx.component_index,
        slot: 0,
    };
    let data_item = ctx.assets.flow_state_mut(ctx.flow_index).widget_data_item_index(
        &ctx.component.obj_id,
        "data",
        binding,
    );
    let data_item = ctx.index_u16("data", data_item);

    buf.write_i16(style);
    buf.write_u16(data_item);
}
