mod cli;
mod commands;
mod logging;

use cli::{BuildParams, CheckParams, DumpParams, ExprParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            logging::init(m.get_flag("verbose"));
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("build", m)) => {
            logging::init(m.get_flag("verbose"));
            let params = BuildParams::from_matches(m);
            commands::build::run(params.into());
        }
        Some(("dump", m)) => {
            logging::init(m.get_flag("verbose"));
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("expr", m)) => {
            logging::init(m.get_flag("verbose"));
            let params = ExprParams::from_matches(m);
            commands::expr::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
