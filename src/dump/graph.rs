//! Export of an optimized network graph to a Graphviz `.dot` file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::nn::Model;

/// A graph that can write itself in Graphviz dot syntax.
pub trait DotSerializer {
    fn serialize_to_dot(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// `<dump_dir>/networkgraph_<HEX>.dot`, keyed by the model's address so
/// every live model gets its own file.
pub fn network_graph_file_path(dump_dir: &Path, model: &Model) -> PathBuf {
    let address = model as *const Model as usize;
    dump_dir.join(format!("networkgraph_{:X}.dot", address))
}

/// Write `graph` next to the other dumps in `dump_dir`.
///
/// An empty `dump_dir` disables the export. The directory must already
/// exist; open and write failures are logged, never returned.
pub fn export_network_graph_to_dot_file(
    graph: &dyn DotSerializer,
    dump_dir: &Path,
    model: &Model,
) {
    if dump_dir.as_os_str().is_empty() {
        return;
    }

    let path = network_graph_file_path(dump_dir, model);
    info!(path = %path.display(), "Exporting the optimized network graph");

    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not open file for writing");
            return;
        }
    };

    let mut writer = BufWriter::new(file);
    if let Err(e) = graph
        .serialize_to_dot(&mut writer)
        .and_then(|_| writer.flush())
    {
        warn!(path = %path.display(), error = %e, "An error occurred when writing to file");
    }
}
