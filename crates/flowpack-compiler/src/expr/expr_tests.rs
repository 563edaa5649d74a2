use indoc::indoc;

use super::*;
use crate::BuildMode;
use crate::component::Port;

fn project() -> Project {
    Project::from_json(indoc! {r#"
        {
          "variables": {
            "globalVariables": [
              { "name": "g", "type": "integer" },
              { "name": "p", "type": "struct:Point" },
              { "name": "arr", "type": "array:integer" }
            ],
            "structures": [
              { "name": "Point", "fields": [
                { "name": "x", "type": "integer" },
                { "name": "y", "type": "integer" }
              ] }
            ],
            "enums": [{ "name": "Color", "members": [{ "name": "Red", "value": 1 }] }]
          },
          "pages": [{
            "name": "Main",
            "userProperties": [{ "name": "u", "type": "integer" }],
            "localVariables": [{ "name": "l", "type": "integer" }]
          }]
        }
    "#})
    .unwrap()
}

fn ports() -> (Vec<Port>, Vec<Port>) {
    (
        vec![Port::seq("@seqin"), Port::data("a", ValueType::Integer)],
        vec![Port::seq("@seqout"), Port::data("out", ValueType::Any)],
    )
}

fn compile_as(text: &str, expected: ValueType) -> String {
    let project = project();
    let mut assets = Assets::new(&project, BuildMode::BuildAssets);
    let (inputs, outputs) = ports();
    let scope = Scope::component(0, &project.pages[0], "c1", &inputs, &outputs);
    match build_expression(&mut assets, scope, text, &expected) {
        Ok(instructions) => disassemble(&instructions, &assets),
        Err(err) => format!("error: {err}"),
    }
}

fn compile(text: &str) -> String {
    compile_as(text, ValueType::Any)
}

fn compile_target(text: &str) -> String {
    let project = project();
    let mut assets = Assets::new(&project, BuildMode::BuildAssets);
    let (inputs, outputs) = ports();
    let scope = Scope::component(0, &project.pages[0], "c1", &inputs, &outputs);
    match build_assignable_expression(&mut assets, scope, text) {
        Ok(instructions) => disassemble(&instructions, &assets),
        Err(err) => format!("error: {err}"),
    }
}

fn fold(text: &str) -> Result<Value, String> {
    eval_constant_expression(&project(), text)
        .map(|(value, _)| value)
        .map_err(|e| e.to_string())
}

fn type_of(text: &str) -> String {
    let project = project();
    match expression_type(&project, Scope::flow(0, &project.pages[0]), text) {
        Ok(ty) => ty.to_string(),
        Err(err) => format!("error: {err}"),
    }
}

#[test]
fn empty_text_pushes_undefined() {
    insta::assert_snapshot!(compile("  "), @r"
    push_const 0 (undefined undefined)
    end
    ");
}

#[test]
fn binary_operands_before_operator() {
    insta::assert_snapshot!(compile("1 + 2"), @r"
    push_const 2 (integer 1)
    push_const 3 (integer 2)
    op 0 (add)
    end
    ");
}

#[test]
fn identifiers_resolve_by_scope() {
    insta::assert_snapshot!(compile("a + l + g + u"), @r"
    push_input 0
    push_local 1
    op 0 (add)
    push_global 0
    op 0 (add)
    push_local 0
    op 0 (add)
    end
    ");
}

#[test]
fn outputs_only_resolve_as_targets() {
    insta::assert_snapshot!(compile_target("out"), @r"
    push_output 1
    end
    ");
    insta::assert_snapshot!(
        compile("out"),
        @"error: identifier 'out' is neither input or local or global variable"
    );
}

#[test]
fn loop_index() {
    insta::assert_snapshot!(compile("$index"), @r"
    push_const 2 (integer 0)
    op 24 (Flow.index)
    end
    ");
}

#[test]
fn enum_members_and_builtin_constants() {
    insta::assert_snapshot!(compile("Color.Red"), @r"
    push_const 2 (integer 1)
    end
    ");
    insta::assert_snapshot!(compile("Math.PI"), @r"
    push_const 2 (double 3.141592653589793)
    end
    ");
    insta::assert_snapshot!(
        compile("Color.Blue"),
        @"error: Member 'Blue' does not exist in enum 'Color'"
    );
}

#[test]
fn variadic_call_pushes_argument_count() {
    insta::assert_snapshot!(compile("Math.max(1, 2, 3)"), @r"
    push_const 2 (integer 3)
    push_const 3 (integer 2)
    push_const 4 (integer 1)
    push_const 2 (integer 3)
    op 46 (Math.max)
    end
    ");
}

#[test]
fn call_errors() {
    insta::assert_snapshot!(
        compile("String.find('a')"),
        @"error: In function 'String.find' call expected 2 arguments, but got 1"
    );
    insta::assert_snapshot!(
        compile("Math.round()"),
        @"error: In function 'Math.round' call expected 1 to 2 arguments, but got 0"
    );
    insta::assert_snapshot!(compile("Foo.bar()"), @"error: Unknown function 'Foo.bar'");
    insta::assert_snapshot!(compile("foo()"), @"error: Invalid call expression");
}

#[test]
fn struct_field_access() {
    insta::assert_snapshot!(compile("p.y"), @r"
    push_global 1
    push_const 2 (integer 1)
    array_elem
    end
    ");
    insta::assert_snapshot!(compile("p.z"), @r#"error: field not found: "struct:Point"."z""#);
}

#[test]
fn array_element_access() {
    insta::assert_snapshot!(compile("arr[2]"), @r"
    push_global 2
    push_const 2 (integer 2)
    array_elem
    end
    ");
    insta::assert_snapshot!(compile("g[0]"), @"error: Array type expected but found 'integer'");
}

#[test]
fn array_literal() {
    insta::assert_snapshot!(compile("[1, 2]"), @r"
    push_const 2 (integer 2)
    push_const 3 (integer 1)
    push_const 2 (integer 2)
    push_const 4 (integer 0)
    op 28 (Flow.makeArrayValue)
    end
    ");
}

#[test]
fn make_value_fills_missing_fields() {
    insta::assert_snapshot!(compile("Flow.makeValue('Point', {y: 5})"), @r"
    push_const 2 (integer 5)
    push_const 0 (undefined undefined)
    push_const 3 (integer 2)
    push_const 4 (integer 0)
    op 27 (Flow.makeValue)
    end
    ");
}

#[test]
fn object_literal_needs_a_structure() {
    insta::assert_snapshot!(
        compile("{x: 1}"),
        @"error: Can't build object literal for type 'any'"
    );
    insta::assert_snapshot!(compile_as("{x: 1}", ValueType::Struct("Point".into())), @r"
    push_const 0 (undefined undefined)
    push_const 2 (integer 1)
    push_const 3 (integer 2)
    end
    ");
}

#[test]
fn expected_type_is_checked() {
    insta::assert_snapshot!(
        compile_as("'x'", ValueType::Boolean),
        @"error: Type mismatch: expected 'boolean', found 'string'"
    );
    insta::assert_snapshot!(compile_as("g > 1", ValueType::Boolean), @r"
    push_global 0
    push_const 2 (integer 1)
    op 13 (greater)
    end
    ");
}

#[test]
fn assignable_targets() {
    insta::assert_snapshot!(compile_target("g > 0 ? p.x : out"), @r"
    push_global 0
    push_const 2 (integer 0)
    op 13 (greater)
    push_global 1
    push_const 2 (integer 0)
    array_elem
    push_output 1
    op 22 (conditional)
    end
    ");
    insta::assert_snapshot!(compile_target("1 + 2"), @"error: Expression is not assignable");
    insta::assert_snapshot!(compile_target("g ? 1 : l"), @"error: Expression is not assignable");
}

#[test]
fn syntax_errors_carry_span() {
    let project = project();
    let mut assets = Assets::new(&project, BuildMode::BuildAssets);
    let err = build_expression(&mut assets, Scope::empty(), "1 + ", &ValueType::Any).unwrap_err();

    assert_eq!(err.kind, DiagnosticKind::ExpressionSyntax);
    assert_eq!(err.span, 4..4);
    assert_eq!(err.to_string(), "Expression error: unexpected end of expression");
}

#[test]
fn template_compiles_to_concatenation() {
    let text = template_to_expression("v={a}").unwrap();
    insta::assert_snapshot!(compile(&text), @r#"
    push_const 2 (string "v=")
    push_input 0
    op 0 (add)
    end
    "#);
}

#[test]
fn constant_folding() {
    assert_eq!(fold("1 + 2 * 3"), Ok(Value::Integer(7)));
    assert_eq!(fold("7 / 2"), Ok(Value::Integer(3)));
    assert_eq!(fold("7 / 2.0"), Ok(Value::Double(3.5)));
    assert_eq!(fold("'a' + 1"), Ok(Value::String("a1".into())));
    assert_eq!(fold("-(1 << 4) | 1"), Ok(Value::Integer(-15)));
    assert_eq!(fold("Color.Red + 1"), Ok(Value::Integer(2)));
    assert_eq!(fold("true ? 'y' : 'n'"), Ok(Value::String("y".into())));
    assert_eq!(fold("1 < 2 && 'b' > 'a'"), Ok(Value::Boolean(true)));
    assert_eq!(
        fold("[1, 2]"),
        Ok(Value::Array(vec![Value::Integer(1), Value::Integer(2)]))
    );
}

#[test]
fn constant_folding_builtins() {
    assert_eq!(fold("String.length('héllo')"), Ok(Value::Integer(5)));
    assert_eq!(fold("String.find('hello', 'll')"), Ok(Value::Integer(2)));
    assert_eq!(fold("String.padStart('7', 3, '0')"), Ok(Value::String("007".into())));
    assert_eq!(fold("String.substring('hello', 1, 3)"), Ok(Value::String("el".into())));
    assert_eq!(fold("Math.max(1, 5, 3)"), Ok(Value::Integer(5)));
    assert_eq!(fold("Math.abs(-4)"), Ok(Value::Integer(4)));
    assert_eq!(fold("Math.floor(2.7)"), Ok(Value::Double(2.0)));
}

#[test]
fn constant_folding_errors() {
    assert_eq!(fold("1 / 0"), Err("Division by zero".to_string()));
    assert_eq!(fold("g + 1"), Err("Not a constant".to_string()));
    assert_eq!(fold("System.getTick()"), Err("Not a constant".to_string()));
    assert_eq!(
        fold("String.padStart('a', 2000000000, 'x')"),
        Err("Not a constant".to_string())
    );
    assert_eq!(fold("1 +"), Err("Expression error: unexpected end of expression".to_string()));
}

#[test]
fn inferred_types() {
    assert_eq!(type_of("1 + 2.5"), "double");
    assert_eq!(type_of("'a' + 1"), "string");
    assert_eq!(type_of("1 < 2"), "boolean");
    assert_eq!(type_of("7 % 2"), "integer");
    assert_eq!(type_of("Math.sin(1)"), "double");
    assert_eq!(type_of("String.split('a,b', ',')"), "array:string");
    assert_eq!(type_of("Array.slice(arr, 1)"), "array:integer");
    assert_eq!(type_of("arr[0]"), "integer");
    assert_eq!(type_of("p.x"), "integer");
    assert_eq!(type_of("[]"), "array:any");
    assert_eq!(type_of("u + l"), "integer");
    assert_eq!(
        type_of("g.x"),
        "error: Struct or object type expected but found 'integer'"
    );
}
