//! Whole-project program build.
//!
//! Order of work: register flows, build one component arena per flow, run
//! the structural checks, then encode the document and lay out every
//! deferred object. The constant pool is reserved ahead of the globals and
//! filled last, once every expression has interned its constants.

mod flows;
mod values;


use flowpack_bytecode::value::FLOW_VALUE_ALIGN;

use crate::BuildMode;
use crate::assets::{Assets, AssetsMap, Constant};
use crate::component::Registry;
use crate::diagnostics::Diagnostics;
use crate::project::Project;
use crate::writer::{DataBuffer, WriterError};

pub use flows::{ArenaEntry, FlowArena};
pub use values::{default_value, flow_value_type, write_value};

/// Encoded payload (without the header) plus the debugger map.
#[derive(Debug)]
pub struct Built {
    pub payload: Vec<u8>,
    pub assets_map: AssetsMap,
}

pub fn build(
    project: &Project,
    mode: BuildMode,
    registry: &Registry,
    diagnostics: &mut Diagnostics,
) -> Result<Built, WriterError> {
    let mut assets = Assets::new(project, mode);
    let flows: Vec<_> = assets.flows().to_vec();
    let arenas: Vec<FlowArena<'_>> = flows
        .into_iter()
        .enumerate()
        .map(|(index, flow)| FlowArena::new(&assets, registry, index, flow))
        .collect();

    for arena in &arenas {
        arena.check(diagnostics);
    }

    let mut doc = DataBuffer::new();
    let mut result = Ok(());
    doc.write_object_offset(4, |def| {
        result = write_definition(def, &mut assets, diagnostics, &arenas);
    });
    result?;

    let natives = assets.native_action_names();
    doc.write_array(&natives, |b, name| b.write_string(name));

    let payload = doc.finalize()?;

    assets.report_unused_assets(diagnostics);
    let mut assets_map = assets.finalize_map();
    assets_map.payload_checksum = crc32fast::hash(&payload);

    tracing::debug!(
        flows = arenas.len(),
        constants = assets_map.constants.len(),
        types = assets_map.types.len(),
        "document encoded"
    );
    Ok(Built {
        payload,
        assets_map,
    })
}

fn write_definition<'p>(
    def: &mut DataBuffer,
    assets: &mut Assets<'p>,
    diagnostics: &mut Diagnostics,
    arenas: &[FlowArena<'p>],
) -> Result<(), WriterError> {
    let mut result = Ok(());
    def.write_array(arenas, |f, arena| {
        if let Err(err) = flows::write_flow(f, assets, diagnostics, arena) {
            result = Err(err);
        }
    });
    result?;

    let constants = def.reserve_array(FLOW_VALUE_ALIGN);

    let globals = &assets.project().variables.global_variables;
    def.write_array_aligned(globals, FLOW_VALUE_ALIGN, |b, variable| {
        values::write_variable(b, assets, diagnostics, None, variable);
    });

    let pool: Vec<Constant> = assets.constants.iter().cloned().collect();
    def.fill_array(constants, &pool, |b, constant| {
        write_value(b, assets, &constant.value, &constant.value_type);
    })
}
