use flowpack_bytecode::dump_expression;
use flowpack_compiler::assets::Assets;
use flowpack_compiler::expr::{Scope, build_expression};
use flowpack_compiler::project::ValueType;
use flowpack_compiler::{BuildMode, Project};

pub struct ExprArgs {
    pub text: String,
}

pub fn run(args: ExprArgs) {
    match disassemble(&args.text) {
        Ok(text) => print!("{}", text),
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    }
}

/// Compile `text` against an empty project and list instructions, then constants.
pub fn disassemble(text: &str) -> Result<String, String> {
    let project = Project::default();
    let mut assets = Assets::new(&project, BuildMode::BuildAssets);
    let instructions = build_expression(&mut assets, Scope::empty(), text, &ValueType::Any)
        .map_err(|e| e.to_string())?;

    let bytes: Vec<u8> = instructions
        .iter()
        .flat_map(|instr| instr.encode().to_le_bytes())
        .collect();

    let mut out = dump_expression(&bytes);
    out.push('\n');
    let map = assets.finalize_map();
    if !map.constants.is_empty() {
        out.push_str("\nconstants:\n");
        for constant in &map.constants {
            out.push_str(&format!(
                "  C{} {} {}\n",
                constant.index, constant.value_type, constant.value
            ));
        }
    }
    Ok(out)
}
