pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "pcb=info";
const DEBUG_DIRECTIVE: &str = "pcb=debug,pcb_core=debug,pcb_storage_md=debug";

/// Installs a stderr fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { DEBUG_DIRECTIVE } else { DEFAULT_DIRECTIVE };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
